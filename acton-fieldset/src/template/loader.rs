//! Bundled template loader with directory overrides and hot reload support

use minijinja::{context, AutoEscape, Environment, ErrorKind, Value};
use parking_lot::RwLock;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{TemplateError, ViewsRenderer, TEMPLATE_NAMES};
use crate::config::TemplateSettings;
use crate::forms::ElementModel;
use crate::messages::Locale;

/// Default template sources compiled into the crate
const EMBEDDED: &[(&str, &str)] = &[
    ("fieldset/_label.html", include_str!("../../templates/fieldset/_label.html")),
    ("fieldset/_errors.html", include_str!("../../templates/fieldset/_errors.html")),
    ("fieldset/_choice.html", include_str!("../../templates/fieldset/_choice.html")),
    ("fieldset/input.html", include_str!("../../templates/fieldset/input.html")),
    ("fieldset/input-hidden.html", include_str!("../../templates/fieldset/input-hidden.html")),
    ("fieldset/input-submit.html", include_str!("../../templates/fieldset/input-submit.html")),
    ("fieldset/input-checkbox.html", include_str!("../../templates/fieldset/input-checkbox.html")),
    ("fieldset/input-radio.html", include_str!("../../templates/fieldset/input-radio.html")),
    ("fieldset/select.html", include_str!("../../templates/fieldset/select.html")),
    ("fieldset/option.html", include_str!("../../templates/fieldset/option.html")),
    ("fieldset/textarea.html", include_str!("../../templates/fieldset/textarea.html")),
    ("fieldset/trix-editor.html", include_str!("../../templates/fieldset/trix-editor.html")),
];

/// Thread-safe fieldset template environment with hot reload support
///
/// Every bundled template is compiled in. When a template directory is set,
/// a file at the same relative path overrides the bundled template, and any
/// other template in the directory can be named as a view.
///
/// Auto-escaping is off: element models arrive already escaped according to
/// `render.escape_values`.
#[derive(Debug, Clone)]
pub struct FieldsetTemplates {
    env: Arc<RwLock<Environment<'static>>>,
    template_dir: Option<PathBuf>,
}

impl FieldsetTemplates {
    /// Create an environment holding only the bundled templates
    ///
    /// # Errors
    ///
    /// Returns error if a bundled template fails to compile.
    pub fn new() -> Result<Self, TemplateError> {
        Self::build(None)
    }

    /// Create an environment whose templates can be overridden from `dir`
    ///
    /// # Errors
    ///
    /// Returns error if an override cannot be read or a template fails to compile.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Result<Self, TemplateError> {
        Self::build(Some(dir.into()))
    }

    /// Create an environment from configuration
    ///
    /// # Errors
    ///
    /// Returns error if an override cannot be read or a template fails to compile.
    pub fn from_settings(settings: &TemplateSettings) -> Result<Self, TemplateError> {
        Self::build(settings.template_dir.clone())
    }

    fn build(template_dir: Option<PathBuf>) -> Result<Self, TemplateError> {
        let env = Self::create_environment(template_dir.as_deref())?;
        Ok(Self {
            env: Arc::new(RwLock::new(env)),
            template_dir,
        })
    }

    /// Create a new minijinja environment with all templates loaded
    fn create_environment(template_dir: Option<&Path>) -> Result<Environment<'static>, TemplateError> {
        let mut env = Environment::new();

        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);

        for &(name, source) in EMBEDDED {
            match Self::load_override(name, template_dir)? {
                Some(content) => {
                    tracing::debug!(template = name, "using template override");
                    env.add_template_owned(name, content)?;
                }
                None => env.add_template(name, source)?,
            }
        }

        if let Some(dir) = template_dir {
            env.set_loader(minijinja::path_loader(dir));
        }

        Ok(env)
    }

    /// Read an override from the template directory, if one exists
    fn load_override(name: &str, template_dir: Option<&Path>) -> Result<Option<String>, TemplateError> {
        let Some(dir) = template_dir else {
            return Ok(None);
        };
        let path = dir.join(name);
        if !path.is_file() {
            return Ok(None);
        }
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| TemplateError::ReadFailed(name.to_string(), e))
    }

    /// Render a template with the given context
    ///
    /// # Errors
    ///
    /// Returns error if the template is not found or rendering fails.
    pub fn render_template(&self, name: &str, ctx: impl Serialize) -> Result<String, TemplateError> {
        let env = self.env.read();
        let template = env.get_template(name).map_err(|e| {
            if e.kind() == ErrorKind::TemplateNotFound {
                TemplateError::NotFound(name.to_string())
            } else {
                TemplateError::Render(e)
            }
        })?;
        Ok(template.render(ctx)?)
    }

    /// Reload all templates
    ///
    /// Creates a new environment and atomically swaps it with the current one.
    ///
    /// # Errors
    ///
    /// Returns error if templates cannot be reloaded; the current environment
    /// stays in place.
    pub fn reload(&self) -> Result<(), TemplateError> {
        let new_env = Self::create_environment(self.template_dir.as_deref())?;

        *self.env.write() = new_env;

        tracing::debug!("fieldset templates reloaded");
        Ok(())
    }

    /// Check if a bundled template is overridden by the template directory
    #[must_use]
    pub fn is_customized(&self, name: &str) -> bool {
        self.template_path(name).is_some()
    }

    /// Path an overriding template is loaded from
    ///
    /// Returns `None` when the bundled template is used.
    #[must_use]
    pub fn template_path(&self, name: &str) -> Option<PathBuf> {
        self.template_dir
            .as_ref()
            .map(|dir| dir.join(name))
            .filter(|path| path.is_file())
    }

    /// The template override directory
    #[must_use]
    pub fn template_dir(&self) -> Option<&Path> {
        self.template_dir.as_deref()
    }

    /// Names of the bundled templates
    #[must_use]
    pub const fn template_names() -> &'static [&'static str] {
        TEMPLATE_NAMES
    }
}

impl ViewsRenderer for FieldsetTemplates {
    fn render(&self, view: &str, model: &ElementModel, locale: &Locale) -> Result<String, TemplateError> {
        self.render_template(
            view,
            context! {
                el => Value::from_serialize(model),
                locale => locale.as_str(),
            },
        )
    }
}
