//! Error types and error handling

use thiserror::Error;

use crate::template::TemplateError;

/// Fieldset generation and rendering error type
#[derive(Debug, Error)]
pub enum FieldsetError {
    /// A property's type and hint combination maps to no form element
    #[error("cannot resolve a form element for '{form}.{property}' of type {type_name}")]
    UnresolvedFieldType {
        /// Form type name
        form: String,
        /// Property name
        property: String,
        /// Declared type of the property
        type_name: String,
    },

    /// A hint names an option fetcher that is not registered
    #[error("option fetcher '{fetcher}' required by '{form}.{property}' is not registered")]
    FetcherResolution {
        /// Form type name
        form: String,
        /// Property name
        property: String,
        /// Registry key named by the hint
        fetcher: String,
    },

    /// A descriptor table declares the same property twice
    #[error("property '{property}' is declared more than once in form '{form}'")]
    DuplicateProperty {
        /// Form type name
        form: String,
        /// Repeated property name
        property: String,
    },

    /// A view failed to render a form element
    #[error("failed to render view '{view}'")]
    ViewRendering {
        /// View name
        view: String,
        /// Underlying template failure
        #[source]
        source: TemplateError,
    },

    /// A `<form>` wrapper was built with inconsistent attributes
    #[error("Invalid form: {0}")]
    InvalidForm(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result alias used throughout the crate
pub type Result<T, E = FieldsetError> = std::result::Result<T, E>;

impl From<figment::Error> for FieldsetError {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_field_type_message() {
        let err = FieldsetError::UnresolvedFieldType {
            form: "Book".into(),
            property: "cover".into(),
            type_name: "Image".into(),
        };
        assert_eq!(
            err.to_string(),
            "cannot resolve a form element for 'Book.cover' of type Image"
        );
    }

    #[test]
    fn test_view_rendering_keeps_source() {
        let err = FieldsetError::ViewRendering {
            view: "fieldset/select.html".into(),
            source: TemplateError::NotFound("fieldset/select.html".into()),
        };
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("template not found: fieldset/select.html")
        );
    }
}
