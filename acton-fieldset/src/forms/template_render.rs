//! Template-based form rendering
//!
//! [`TemplateFormElementRenderer`] renders elements through named views of a
//! [`ViewsRenderer`], passing the [`ElementModel`] as `el`. The bundled views
//! produce the same markup as [`HtmlFormElementRenderer`]; copies placed in a
//! template directory can restyle any element kind.
//!
//! [`FieldsetRenderer`] combines both strategies and renders whole fieldsets
//! and forms.

use std::fmt::Write;
use std::sync::Arc;

use super::field::{ElementKind, FormElement};
use super::fieldset::{Fieldset, HtmlForm};
use super::render::{escape_html, ElementModel, FormElementRenderer, HtmlFormElementRenderer};
use crate::config::{FieldsetConfig, RenderSettings, ViewSettings};
use crate::error::{FieldsetError, Result};
use crate::messages::{Locale, MessageSource, StaticMessageSource};
use crate::template::{FieldsetTemplates, ViewsRenderer};

/// Renders form elements through named template views
#[derive(Clone)]
pub struct TemplateFormElementRenderer {
    views: Arc<dyn ViewsRenderer>,
    view_settings: ViewSettings,
    models: HtmlFormElementRenderer,
}

impl std::fmt::Debug for TemplateFormElementRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateFormElementRenderer")
            .field("view_settings", &self.view_settings)
            .field("settings", self.models.settings())
            .finish_non_exhaustive()
    }
}

impl TemplateFormElementRenderer {
    /// Create a renderer using the bundled view of every element kind
    #[must_use]
    pub fn new(views: Arc<dyn ViewsRenderer>, settings: RenderSettings) -> Self {
        Self {
            views,
            view_settings: ViewSettings::default(),
            models: HtmlFormElementRenderer::new(settings),
        }
    }

    /// Override view names per element kind
    #[must_use]
    pub fn with_views(mut self, view_settings: ViewSettings) -> Self {
        self.view_settings = view_settings;
        self
    }

    /// Resolve message codes through `messages`
    #[must_use]
    pub fn with_messages(mut self, messages: Arc<dyn MessageSource>) -> Self {
        self.models = self.models.with_messages(messages);
        self
    }

    /// View explicitly configured for a kind
    #[must_use]
    pub fn configured_view(&self, kind: ElementKind) -> Option<&str> {
        self.view_settings.view_for(kind)
    }

    /// View that renders a kind: the configured one, else the bundled default
    #[must_use]
    pub fn view_for(&self, kind: ElementKind) -> &str {
        self.configured_view(kind)
            .unwrap_or_else(|| kind.default_view())
    }

    /// Build the model of an element
    #[must_use]
    pub fn model(&self, element: &FormElement, locale: &Locale) -> ElementModel {
        self.models.model(element, locale)
    }
}

impl FormElementRenderer for TemplateFormElementRenderer {
    fn render(&self, element: &FormElement, locale: &Locale) -> Result<String> {
        let view = self.view_for(element.kind());
        let model = self.model(element, locale);

        tracing::trace!(view, kind = ?element.kind(), "rendering element through view");

        self.views
            .render(view, &model, locale)
            .map_err(|source| FieldsetError::ViewRendering {
                view: view.to_string(),
                source,
            })
    }
}

/// Renders elements, fieldsets and forms
///
/// An element kind with a configured view renders through the template
/// renderer; every other kind uses the built-in renderer.
///
/// # Examples
///
/// ```rust
/// use acton_fieldset::config::FieldsetConfig;
/// use acton_fieldset::forms::{FieldsetGenerator, FieldsetRenderer, Form, FormEnum};
/// use acton_fieldset::messages::Locale;
///
/// #[derive(FormEnum)]
/// enum Genre {
///     Music,
///     Sport,
/// }
///
/// #[derive(Form)]
/// struct EventCreateForm {
///     #[form(not_blank)]
///     name: String,
///     genre: Genre,
/// }
///
/// let mut config = FieldsetConfig::default();
/// config.views.select = Some("fieldset/select.html".into());
///
/// let renderer = FieldsetRenderer::from_config(&config)?;
/// let fieldset = FieldsetGenerator::new().generate_for(&EventCreateForm {
///     name: String::new(),
///     genre: Genre::Sport,
/// })?;
///
/// let html = renderer.render_fieldset(&fieldset, &Locale::default())?;
/// assert!(html.contains(r#"<option value="SPORT" selected>SPORT</option>"#));
/// # Ok::<(), acton_fieldset::FieldsetError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldsetRenderer {
    html: HtmlFormElementRenderer,
    templates: Option<TemplateFormElementRenderer>,
}

impl FieldsetRenderer {
    /// Create a renderer that uses the built-in renderer for every kind
    #[must_use]
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            html: HtmlFormElementRenderer::new(settings),
            templates: None,
        }
    }

    /// Route the kinds configured in `view_settings` through `views`
    #[must_use]
    pub fn with_templates(mut self, views: Arc<dyn ViewsRenderer>, view_settings: ViewSettings) -> Self {
        let templates = TemplateFormElementRenderer {
            views,
            view_settings,
            models: self.html.clone(),
        };
        self.templates = Some(templates);
        self
    }

    /// Resolve message codes through `messages` in both strategies
    #[must_use]
    pub fn with_messages(mut self, messages: Arc<dyn MessageSource>) -> Self {
        self.html = self.html.with_messages(Arc::clone(&messages));
        self.templates = self.templates.map(|t| t.with_messages(messages));
        self
    }

    /// Build a renderer from configuration
    ///
    /// Loads the message bundle when one is configured and the bundled
    /// templates (with directory overrides) for the configured views.
    ///
    /// # Errors
    ///
    /// Returns [`FieldsetError::Config`] when the message bundle or the
    /// templates cannot be loaded.
    pub fn from_config(config: &FieldsetConfig) -> Result<Self> {
        let templates = FieldsetTemplates::from_settings(&config.templates)
            .map_err(|e| FieldsetError::Config(format!("failed to load templates: {e}")))?;

        let mut renderer = Self::new(config.render.clone())
            .with_templates(Arc::new(templates), config.views.clone());

        if let Some(bundle) = &config.messages.bundle {
            let messages = StaticMessageSource::load(bundle)?;
            renderer = renderer.with_messages(Arc::new(messages));
        }

        Ok(renderer)
    }

    /// Render a single element
    ///
    /// # Errors
    ///
    /// Returns [`FieldsetError::ViewRendering`] when a configured view fails.
    pub fn render_element(&self, element: &FormElement, locale: &Locale) -> Result<String> {
        match &self.templates {
            Some(templates) if templates.configured_view(element.kind()).is_some() => {
                templates.render(element, locale)
            }
            _ => self.html.render(element, locale),
        }
    }

    /// Render class-level errors followed by every element
    ///
    /// With `render.group_class` set, each visible element is wrapped in a
    /// `<div>` of that class.
    ///
    /// # Errors
    ///
    /// Returns [`FieldsetError::ViewRendering`] when a configured view fails.
    pub fn render_fieldset(&self, fieldset: &Fieldset, locale: &Locale) -> Result<String> {
        let settings = self.html.settings();
        let mut html = String::with_capacity(1024);

        for error in fieldset.errors() {
            let text = self.escape(&error.resolve(self.html.messages().as_ref(), locale));
            let _ = write!(
                html,
                r#"<span class="{}">{text}</span>"#,
                self.escape(&settings.error_class)
            );
        }

        for field in fieldset.fields() {
            let rendered = self.render_element(field, locale)?;
            match &settings.group_class {
                Some(class) if field.kind() != ElementKind::InputHidden => {
                    let _ = write!(html, r#"<div class="{}">{rendered}</div>"#, self.escape(class));
                }
                _ => html.push_str(&rendered),
            }
        }

        tracing::debug!(fields = fieldset.fields().len(), errors = fieldset.errors().len(), "rendered fieldset");
        Ok(html)
    }

    /// Render a `<form>` with its fieldset and submit button
    ///
    /// # Errors
    ///
    /// Returns [`FieldsetError::ViewRendering`] when a configured view fails.
    pub fn render_form(&self, form: &HtmlForm, locale: &Locale) -> Result<String> {
        let mut html = String::with_capacity(2048);

        let _ = write!(
            html,
            r#"<form action="{}" method="{}""#,
            self.escape(&form.action),
            form.method.as_str()
        );
        if let Some(enctype) = form.enctype {
            let _ = write!(html, r#" enctype="{}""#, enctype.as_str());
        }
        if let Some(turbo) = form.data_turbo {
            let _ = write!(html, r#" data-turbo="{turbo}""#);
        }
        html.push('>');

        html.push_str(&self.render_fieldset(&form.fieldset, locale)?);

        if let Some(submit) = &form.submit {
            html.push_str(&self.render_element(&FormElement::InputSubmit(submit.clone()), locale)?);
        }

        html.push_str("</form>");
        Ok(html)
    }

    fn escape(&self, value: &str) -> String {
        if self.html.settings().escape_values {
            escape_html(value)
        } else {
            value.to_string()
        }
    }
}

impl FormElementRenderer for FieldsetRenderer {
    fn render(&self, element: &FormElement, locale: &Locale) -> Result<String> {
        self.render_element(element, locale)
    }
}
