//! Fieldsets and form wrappers

use serde::Serialize;

use super::field::{FormElement, InputSubmitElement};
use crate::error::{FieldsetError, Result};
use crate::messages::Message;

/// Ordered form elements plus class-level errors
///
/// Built by [`FieldsetGenerator`](super::FieldsetGenerator); immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fieldset {
    fields: Vec<FormElement>,
    errors: Vec<Message>,
}

impl Fieldset {
    /// Create a fieldset
    #[must_use]
    pub const fn new(fields: Vec<FormElement>, errors: Vec<Message>) -> Self {
        Self { fields, errors }
    }

    /// Elements in property declaration order
    #[must_use]
    pub fn fields(&self) -> &[FormElement] {
        &self.fields
    }

    /// Class-level errors
    #[must_use]
    pub fn errors(&self) -> &[Message] {
        &self.errors
    }

    /// Element for a property
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FormElement> {
        self.fields.iter().find(|field| field.name() == Some(name))
    }

    /// Whether the fieldset or any of its elements carries errors
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty() || self.fields.iter().any(FormElement::has_errors)
    }

    /// Consume the fieldset into its parts
    #[must_use]
    pub fn into_parts(self) -> (Vec<FormElement>, Vec<Message>) {
        (self.fields, self.errors)
    }
}

/// HTTP method of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMethod {
    /// GET
    Get,
    /// POST
    #[default]
    Post,
}

impl FormMethod {
    /// Attribute value
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
        }
    }
}

/// Encoding of a submitted form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FormEnctype {
    /// `application/x-www-form-urlencoded`
    #[serde(rename = "application/x-www-form-urlencoded")]
    UrlEncoded,
    /// `multipart/form-data`
    #[serde(rename = "multipart/form-data")]
    Multipart,
    /// `text/plain`
    #[serde(rename = "text/plain")]
    TextPlain,
}

impl FormEnctype {
    /// Attribute value
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UrlEncoded => "application/x-www-form-urlencoded",
            Self::Multipart => "multipart/form-data",
            Self::TextPlain => "text/plain",
        }
    }
}

/// A `<form>` wrapping a fieldset and a submit button
///
/// # Examples
///
/// ```rust
/// use acton_fieldset::forms::{Fieldset, FormMethod, HtmlForm};
/// use acton_fieldset::messages::Message;
///
/// let form = HtmlForm::new("/books/save", Fieldset::new(vec![], vec![]))
///     .submit(Message::new("Save", "default.save"))
///     .data_turbo(false)
///     .build()?;
///
/// assert_eq!(form.method, FormMethod::Post);
/// # Ok::<(), acton_fieldset::FieldsetError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HtmlForm {
    /// Action URL
    pub action: String,
    /// HTTP method
    pub method: FormMethod,
    /// Encoding type
    pub enctype: Option<FormEnctype>,
    /// Value of the `data-turbo` attribute
    pub data_turbo: Option<bool>,
    /// Form fields
    pub fieldset: Fieldset,
    /// Submit button
    pub submit: Option<InputSubmitElement>,
}

impl HtmlForm {
    /// Start building a POST form
    #[must_use]
    pub fn new(action: impl Into<String>, fieldset: Fieldset) -> HtmlFormBuilder {
        HtmlFormBuilder {
            form: Self {
                action: action.into(),
                method: FormMethod::Post,
                enctype: None,
                data_turbo: None,
                fieldset,
                submit: None,
            },
        }
    }
}

/// Builder for [`HtmlForm`]
#[derive(Debug, Clone)]
pub struct HtmlFormBuilder {
    form: HtmlForm,
}

impl HtmlFormBuilder {
    /// Set the HTTP method
    #[must_use]
    pub const fn method(mut self, method: FormMethod) -> Self {
        self.form.method = method;
        self
    }

    /// Set the encoding type
    #[must_use]
    pub const fn enctype(mut self, enctype: FormEnctype) -> Self {
        self.form.enctype = Some(enctype);
        self
    }

    /// Use `multipart/form-data` (for file uploads)
    #[must_use]
    pub const fn multipart(self) -> Self {
        self.enctype(FormEnctype::Multipart)
    }

    /// Set the `data-turbo` attribute
    #[must_use]
    pub const fn data_turbo(mut self, enabled: bool) -> Self {
        self.form.data_turbo = Some(enabled);
        self
    }

    /// Add a submit button
    #[must_use]
    pub fn submit(mut self, value: Message) -> Self {
        self.form.submit = Some(InputSubmitElement::new(value));
        self
    }

    /// Add a fully configured submit button
    #[must_use]
    pub fn submit_element(mut self, submit: InputSubmitElement) -> Self {
        self.form.submit = Some(submit);
        self
    }

    /// Finish the form
    ///
    /// # Errors
    ///
    /// Returns [`FieldsetError::InvalidForm`] when the action is blank or a
    /// multipart form does not use POST.
    pub fn build(self) -> Result<HtmlForm> {
        if self.form.action.trim().is_empty() {
            return Err(FieldsetError::InvalidForm("form action must not be blank".into()));
        }
        if self.form.enctype == Some(FormEnctype::Multipart) && self.form.method != FormMethod::Post {
            return Err(FieldsetError::InvalidForm(
                "multipart/form-data requires the post method".into(),
            ));
        }
        Ok(self.form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::field::InputHiddenElement;

    fn hidden(name: &str) -> FormElement {
        FormElement::InputHidden(InputHiddenElement {
            name: name.into(),
            id: None,
            value: None,
        })
    }

    #[test]
    fn test_fieldset_lookup_and_errors() {
        let fieldset = Fieldset::new(vec![hidden("id"), hidden("version")], vec![]);
        assert!(fieldset.field("version").is_some());
        assert!(fieldset.field("missing").is_none());
        assert!(!fieldset.has_errors());

        let invalid = Fieldset::new(vec![], vec![Message::of("passwords do not match")]);
        assert!(invalid.has_errors());
    }

    #[test]
    fn test_blank_action_is_rejected() {
        let err = HtmlForm::new("  ", Fieldset::new(vec![], vec![]))
            .build()
            .unwrap_err();
        assert!(matches!(err, FieldsetError::InvalidForm(_)));
    }

    #[test]
    fn test_multipart_requires_post() {
        let err = HtmlForm::new("/upload", Fieldset::new(vec![], vec![]))
            .method(FormMethod::Get)
            .multipart()
            .build()
            .unwrap_err();
        assert!(matches!(err, FieldsetError::InvalidForm(_)));

        let form = HtmlForm::new("/upload", Fieldset::new(vec![], vec![]))
            .multipart()
            .build()
            .unwrap();
        assert_eq!(form.enctype.map(|e| e.as_str()), Some("multipart/form-data"));
    }
}
