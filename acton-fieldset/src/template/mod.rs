//! Template-engine integration
//!
//! [`ViewsRenderer`] is the seam between the template-backed element renderer
//! and a template engine: it renders a named view against an element model.
//! [`FieldsetTemplates`] is the bundled minijinja implementation.

mod loader;

pub use loader::FieldsetTemplates;

use thiserror::Error;

use crate::forms::ElementModel;
use crate::messages::Locale;

/// Names of the bundled templates
pub const TEMPLATE_NAMES: &[&str] = &[
    "fieldset/_label.html",
    "fieldset/_errors.html",
    "fieldset/_choice.html",
    "fieldset/input.html",
    "fieldset/input-hidden.html",
    "fieldset/input-submit.html",
    "fieldset/input-checkbox.html",
    "fieldset/input-radio.html",
    "fieldset/select.html",
    "fieldset/option.html",
    "fieldset/textarea.html",
    "fieldset/trix-editor.html",
];

/// Errors that can occur when loading or rendering templates
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template file could not be read
    #[error("failed to read template '{0}': {1}")]
    ReadFailed(String, std::io::Error),

    /// No template is registered under the name
    #[error("template not found: {0}")]
    NotFound(String),

    /// minijinja failed to compile or render the template
    #[error("template render error: {0}")]
    Render(#[from] minijinja::Error),

    /// A foreign template engine failed
    #[error("template engine error: {0}")]
    Engine(Box<dyn std::error::Error + Send + Sync>),
}

/// Renders a named view against an element model
///
/// Implementations expose the model to the view under the `el` variable.
pub trait ViewsRenderer: Send + Sync {
    /// Render `view` for `model` in `locale`
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when the view does not exist or fails to render.
    fn render(&self, view: &str, model: &ElementModel, locale: &Locale) -> Result<String, TemplateError>;
}
