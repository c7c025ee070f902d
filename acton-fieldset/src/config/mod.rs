//! Configuration management for acton-fieldset
//!
//! Configuration is layered with clear precedence:
//!
//! 1. Environment variables (highest priority, `ACTON_FIELDSET_` prefix, `__`
//!    separates nested keys)
//! 2. An optional TOML file
//! 3. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # fieldset.toml
//! [render]
//! label_class = "form-label"
//! input_class = "form-input"
//! input_error_class = "form-input-error"
//! error_class = "form-error"
//! group_class = "form-group"
//! escape_values = true
//!
//! [views]
//! select = "fieldset/select.html"
//! textarea = "fieldset/textarea.html"
//!
//! [templates]
//! template_dir = "./templates"
//!
//! [messages]
//! default_locale = "en"
//! bundle = "./messages.toml"
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use acton_fieldset::config::FieldsetConfig;
//!
//! # fn example() -> acton_fieldset::Result<()> {
//! let config = FieldsetConfig::load_from("./fieldset.toml")?;
//! assert_eq!(config.render.error_class, "form-error");
//! # Ok(())
//! # }
//! ```

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::forms::ElementKind;
use crate::messages::Locale;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "ACTON_FIELDSET_";

/// CSS classes and escaping applied by both rendering strategies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Class of `<label>` elements
    pub label_class: Option<String>,

    /// Class of form controls
    pub input_class: Option<String>,

    /// Class added to controls that carry errors
    pub input_error_class: Option<String>,

    /// Class of error `<span>`s
    pub error_class: String,

    /// Class of the `<div>` wrapping each field of a rendered fieldset
    pub group_class: Option<String>,

    /// HTML-escape attribute values and text content
    pub escape_values: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            label_class: None,
            input_class: None,
            input_error_class: None,
            error_class: "form-error".to_string(),
            group_class: None,
            escape_values: false,
        }
    }
}

impl RenderSettings {
    /// Class attribute of a control, if any class applies
    #[must_use]
    pub fn control_class(&self, has_errors: bool) -> Option<String> {
        let mut classes = Vec::new();
        if let Some(class) = &self.input_class {
            classes.push(class.as_str());
        }
        if has_errors {
            if let Some(class) = &self.input_error_class {
                classes.push(class.as_str());
            }
        }
        (!classes.is_empty()).then(|| classes.join(" "))
    }
}

/// View names routing element kinds through the template renderer
///
/// An unset kind renders with the built-in renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ViewSettings {
    pub input_text: Option<String>,
    pub input_email: Option<String>,
    pub input_tel: Option<String>,
    pub input_url: Option<String>,
    pub input_password: Option<String>,
    pub input_number: Option<String>,
    pub input_date: Option<String>,
    pub input_date_time_local: Option<String>,
    pub input_time: Option<String>,
    pub input_checkbox: Option<String>,
    pub input_radio: Option<String>,
    pub select: Option<String>,
    pub textarea: Option<String>,
    pub input_hidden: Option<String>,
    pub input_submit: Option<String>,
    pub trix_editor: Option<String>,
    pub input_file: Option<String>,
}

impl ViewSettings {
    /// Configured view for an element kind
    #[must_use]
    pub fn view_for(&self, kind: ElementKind) -> Option<&str> {
        let view = match kind {
            ElementKind::InputText => &self.input_text,
            ElementKind::InputEmail => &self.input_email,
            ElementKind::InputTel => &self.input_tel,
            ElementKind::InputUrl => &self.input_url,
            ElementKind::InputPassword => &self.input_password,
            ElementKind::InputNumber => &self.input_number,
            ElementKind::InputDate => &self.input_date,
            ElementKind::InputDateTimeLocal => &self.input_date_time_local,
            ElementKind::InputTime => &self.input_time,
            ElementKind::InputCheckbox => &self.input_checkbox,
            ElementKind::InputRadio => &self.input_radio,
            ElementKind::Select => &self.select,
            ElementKind::Textarea => &self.textarea,
            ElementKind::InputHidden => &self.input_hidden,
            ElementKind::InputSubmit => &self.input_submit,
            ElementKind::TrixEditor => &self.trix_editor,
            ElementKind::InputFile => &self.input_file,
        };
        view.as_deref()
    }

    /// Route every element kind through its bundled default view
    #[must_use]
    pub fn all_defaults() -> Self {
        let view = |kind: ElementKind| Some(kind.default_view().to_string());
        Self {
            input_text: view(ElementKind::InputText),
            input_email: view(ElementKind::InputEmail),
            input_tel: view(ElementKind::InputTel),
            input_url: view(ElementKind::InputUrl),
            input_password: view(ElementKind::InputPassword),
            input_number: view(ElementKind::InputNumber),
            input_date: view(ElementKind::InputDate),
            input_date_time_local: view(ElementKind::InputDateTimeLocal),
            input_time: view(ElementKind::InputTime),
            input_checkbox: view(ElementKind::InputCheckbox),
            input_radio: view(ElementKind::InputRadio),
            select: view(ElementKind::Select),
            textarea: view(ElementKind::Textarea),
            input_hidden: view(ElementKind::InputHidden),
            input_submit: view(ElementKind::InputSubmit),
            trix_editor: view(ElementKind::TrixEditor),
            input_file: view(ElementKind::InputFile),
        }
    }
}

/// Template engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Directory whose templates override the bundled defaults
    pub template_dir: Option<PathBuf>,
}

/// Message localization configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageSettings {
    /// Locale used when the caller does not supply one
    pub default_locale: String,

    /// TOML message bundle
    pub bundle: Option<PathBuf>,
}

impl Default for MessageSettings {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            bundle: None,
        }
    }
}

impl MessageSettings {
    /// Default locale as a [`Locale`]
    #[must_use]
    pub fn locale(&self) -> Locale {
        Locale::new(self.default_locale.clone())
    }
}

/// Complete acton-fieldset configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldsetConfig {
    /// Rendering settings
    #[serde(default)]
    pub render: RenderSettings,

    /// Per-kind view names
    #[serde(default)]
    pub views: ViewSettings,

    /// Template engine settings
    #[serde(default)]
    pub templates: TemplateSettings,

    /// Message settings
    #[serde(default)]
    pub messages: MessageSettings,
}

impl FieldsetConfig {
    /// Load configuration from defaults and the environment
    ///
    /// # Errors
    ///
    /// Returns [`FieldsetError::Config`](crate::FieldsetError::Config) when an
    /// environment variable holds a value of the wrong type.
    pub fn load() -> Result<Self> {
        let config: Self = Self::figment().extract()?;
        tracing::debug!(?config, "loaded fieldset configuration");
        Ok(config)
    }

    /// Load configuration from a TOML file, then the environment
    ///
    /// A missing file is not an error; its layer is simply empty.
    ///
    /// # Errors
    ///
    /// Returns [`FieldsetError::Config`](crate::FieldsetError::Config) when the
    /// file is malformed or a value has the wrong type.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        tracing::debug!(path = %path.display(), ?config, "loaded fieldset configuration");
        Ok(config)
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = FieldsetConfig::default();
        assert_eq!(config.render.error_class, "form-error");
        assert!(!config.render.escape_values);
        assert_eq!(config.render.label_class, None);
        assert_eq!(config.messages.default_locale, "en");
        assert_eq!(config.templates.template_dir, None);
        assert_eq!(config.views.view_for(ElementKind::Select), None);
    }

    #[test]
    fn test_control_class() {
        let mut settings = RenderSettings::default();
        assert_eq!(settings.control_class(true), None);

        settings.input_class = Some("form-input".into());
        settings.input_error_class = Some("is-invalid".into());
        assert_eq!(settings.control_class(false).as_deref(), Some("form-input"));
        assert_eq!(
            settings.control_class(true).as_deref(),
            Some("form-input is-invalid")
        );
    }

    #[test]
    fn test_all_defaults_covers_every_kind() {
        let views = ViewSettings::all_defaults();
        for kind in ElementKind::ALL {
            assert_eq!(views.view_for(kind), Some(kind.default_view()));
        }
    }

    #[test]
    fn test_file_and_environment_layers() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "fieldset.toml",
                r#"
                    [render]
                    label_class = "form-label"
                    escape_values = true

                    [views]
                    select = "custom/select.html"
                "#,
            )?;
            jail.set_env("ACTON_FIELDSET_RENDER__ERROR_CLASS", "invalid-feedback");

            let config = FieldsetConfig::load_from("fieldset.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.render.label_class.as_deref(), Some("form-label"));
            assert!(config.render.escape_values);
            assert_eq!(config.render.error_class, "invalid-feedback");
            assert_eq!(
                config.views.view_for(ElementKind::Select),
                Some("custom/select.html")
            );
            assert_eq!(config.messages.default_locale, "en");
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        Jail::expect_with(|_| {
            let config = FieldsetConfig::load_from("absent.toml").map_err(|e| e.to_string())?;
            assert_eq!(config, FieldsetConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_malformed_value_is_a_config_error() {
        Jail::expect_with(|jail| {
            jail.create_file("fieldset.toml", "[render]\nescape_values = \"sometimes\"\n")?;
            let err = FieldsetConfig::load_from("fieldset.toml").unwrap_err();
            assert!(matches!(err, crate::FieldsetError::Config(_)));
            Ok(())
        });
    }
}
