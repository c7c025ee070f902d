//! Element builder
//!
//! [`ElementBuilder`] collects the attributes of one form element before it
//! is finalized. The fieldset generator fills a builder with defaults and then
//! hands it to the caller's override callback, which may adjust attributes
//! but cannot change the element kind:
//!
//! ```rust
//! use acton_fieldset::forms::{ElementBuilder, ElementKind};
//!
//! let mut builder = ElementBuilder::new(ElementKind::InputNumber, "guests");
//! builder.min(1_i64).max(12_i64).required(true);
//!
//! let element = builder.build();
//! assert_eq!(element.kind(), ElementKind::InputNumber);
//! assert!(element.is_required());
//! ```

use super::descriptor::FieldValue;
use super::field::{
    Checkbox, ElementKind, FormElement, InputCheckboxElement, InputFileElement,
    InputHiddenElement, InputNumberElement, InputRadioElement, InputStringElement,
    InputSubmitElement, InputTemporalElement, Radio, SelectElement, SelectOption,
    TextareaElement, TrixEditorElement,
};
use crate::messages::Message;

/// Mutable attribute set of a form element under construction
///
/// Attributes that do not apply to the element kind are ignored by
/// [`ElementBuilder::build`].
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone)]
pub struct ElementBuilder {
    kind: ElementKind,
    name: String,
    id: Option<String>,
    label: Option<Message>,
    errors: Vec<Message>,
    value: Option<String>,
    required: bool,
    readonly: bool,
    placeholder: Option<String>,
    pattern: Option<String>,
    min_length: Option<u32>,
    max_length: Option<u32>,
    size: Option<u32>,
    min: Option<String>,
    max: Option<String>,
    step: Option<String>,
    rows: Option<u32>,
    cols: Option<u32>,
    multiple: bool,
    accept: Option<String>,
    options: Vec<SelectOption>,
    checkboxes: Vec<Checkbox>,
    radios: Vec<Radio>,
}

impl ElementBuilder {
    /// Create a builder for an element kind
    #[must_use]
    pub fn new(kind: ElementKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            id: None,
            label: None,
            errors: Vec::new(),
            value: None,
            required: false,
            readonly: false,
            placeholder: None,
            pattern: None,
            min_length: None,
            max_length: None,
            size: None,
            min: None,
            max: None,
            step: None,
            rows: None,
            cols: None,
            multiple: false,
            accept: None,
            options: Vec::new(),
            checkboxes: Vec::new(),
            radios: Vec::new(),
        }
    }

    /// Element kind; fixed for the lifetime of the builder
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Name attribute
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value, if bound
    #[must_use]
    pub fn current_value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Current label
    #[must_use]
    pub const fn current_label(&self) -> Option<&Message> {
        self.label.as_ref()
    }

    /// Attached errors
    #[must_use]
    pub fn current_errors(&self) -> &[Message] {
        &self.errors
    }

    /// Set the id attribute
    pub fn id(&mut self, id: impl Into<String>) -> &mut Self {
        self.id = Some(id.into());
        self
    }

    /// Remove the id attribute
    pub fn clear_id(&mut self) -> &mut Self {
        self.id = None;
        self
    }

    /// Set the label
    pub fn label(&mut self, label: Message) -> &mut Self {
        self.label = Some(label);
        self
    }

    /// Remove the label
    pub fn clear_label(&mut self) -> &mut Self {
        self.label = None;
        self
    }

    /// Set the bound value
    pub fn value(&mut self, value: impl Into<FieldValue>) -> &mut Self {
        self.value = Some(value.into().to_form_string());
        self
    }

    /// Remove the bound value
    pub fn clear_value(&mut self) -> &mut Self {
        self.value = None;
        self
    }

    /// Attach a validation error
    pub fn error(&mut self, error: Message) -> &mut Self {
        self.errors.push(error);
        self
    }

    /// Replace the validation errors
    pub fn errors(&mut self, errors: Vec<Message>) -> &mut Self {
        self.errors = errors;
        self
    }

    /// Set the required flag
    pub fn required(&mut self, required: bool) -> &mut Self {
        self.required = required;
        self
    }

    /// Set the read-only flag
    pub fn readonly(&mut self, readonly: bool) -> &mut Self {
        self.readonly = readonly;
        self
    }

    /// Set placeholder text
    pub fn placeholder(&mut self, placeholder: impl Into<String>) -> &mut Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set the pattern attribute
    pub fn pattern(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Set the minimum text length
    pub fn min_length(&mut self, len: u32) -> &mut Self {
        self.min_length = Some(len);
        self
    }

    /// Set the maximum text length
    pub fn max_length(&mut self, len: u32) -> &mut Self {
        self.max_length = Some(len);
        self
    }

    /// Set the visible size
    pub fn size(&mut self, size: u32) -> &mut Self {
        self.size = Some(size);
        self
    }

    /// Set the lower bound
    pub fn min(&mut self, min: impl Into<FieldValue>) -> &mut Self {
        self.min = Some(min.into().to_form_string());
        self
    }

    /// Set the upper bound
    pub fn max(&mut self, max: impl Into<FieldValue>) -> &mut Self {
        self.max = Some(max.into().to_form_string());
        self
    }

    /// Set the step
    pub fn step(&mut self, step: impl Into<FieldValue>) -> &mut Self {
        self.step = Some(step.into().to_form_string());
        self
    }

    /// Set textarea rows
    pub fn rows(&mut self, rows: u32) -> &mut Self {
        self.rows = Some(rows);
        self
    }

    /// Set textarea columns
    pub fn cols(&mut self, cols: u32) -> &mut Self {
        self.cols = Some(cols);
        self
    }

    /// Allow several values (select and file inputs)
    pub fn multiple(&mut self, multiple: bool) -> &mut Self {
        self.multiple = multiple;
        self
    }

    /// Set accepted file types
    pub fn accept(&mut self, accept: impl Into<String>) -> &mut Self {
        self.accept = Some(accept.into());
        self
    }

    /// Replace select options
    pub fn options(&mut self, options: Vec<SelectOption>) -> &mut Self {
        self.options = options;
        self
    }

    /// Replace group checkboxes
    pub fn checkboxes(&mut self, checkboxes: Vec<Checkbox>) -> &mut Self {
        self.checkboxes = checkboxes;
        self
    }

    /// Replace group radio buttons
    pub fn radios(&mut self, radios: Vec<Radio>) -> &mut Self {
        self.radios = radios;
        self
    }

    fn string_element(self) -> InputStringElement {
        InputStringElement {
            name: self.name,
            id: self.id,
            value: self.value,
            label: self.label,
            errors: self.errors,
            placeholder: self.placeholder,
            pattern: self.pattern,
            min_length: self.min_length,
            max_length: self.max_length,
            size: self.size,
            required: self.required,
            readonly: self.readonly,
        }
    }

    fn temporal_element(self) -> InputTemporalElement {
        InputTemporalElement {
            name: self.name,
            id: self.id,
            value: self.value,
            label: self.label,
            errors: self.errors,
            min: self.min,
            max: self.max,
            step: self.step,
            required: self.required,
            readonly: self.readonly,
        }
    }

    /// Finalize the element
    #[must_use]
    pub fn build(self) -> FormElement {
        match self.kind {
            ElementKind::InputText => FormElement::InputText(self.string_element()),
            ElementKind::InputEmail => FormElement::InputEmail(self.string_element()),
            ElementKind::InputTel => FormElement::InputTel(self.string_element()),
            ElementKind::InputUrl => FormElement::InputUrl(self.string_element()),
            ElementKind::InputPassword => FormElement::InputPassword(self.string_element()),
            ElementKind::InputDate => FormElement::InputDate(self.temporal_element()),
            ElementKind::InputDateTimeLocal => {
                FormElement::InputDateTimeLocal(self.temporal_element())
            }
            ElementKind::InputTime => FormElement::InputTime(self.temporal_element()),
            ElementKind::InputNumber => FormElement::InputNumber(InputNumberElement {
                name: self.name,
                id: self.id,
                value: self.value,
                label: self.label,
                errors: self.errors,
                min: self.min,
                max: self.max,
                step: self.step,
                placeholder: self.placeholder,
                required: self.required,
                readonly: self.readonly,
            }),
            ElementKind::InputCheckbox => {
                let required = self.required;
                FormElement::InputCheckbox(InputCheckboxElement {
                    checkboxes: self
                        .checkboxes
                        .into_iter()
                        .map(|mut checkbox| {
                            checkbox.required = checkbox.required || required;
                            checkbox
                        })
                        .collect(),
                    name: self.name,
                    label: self.label,
                    errors: self.errors,
                })
            }
            ElementKind::InputRadio => {
                let required = self.required;
                FormElement::InputRadio(InputRadioElement {
                    buttons: self
                        .radios
                        .into_iter()
                        .map(|mut radio| {
                            radio.required = radio.required || required;
                            radio
                        })
                        .collect(),
                    name: self.name,
                    label: self.label,
                    errors: self.errors,
                    required,
                })
            }
            ElementKind::Select => FormElement::Select(SelectElement {
                name: self.name,
                id: self.id,
                label: self.label,
                errors: self.errors,
                options: self.options,
                multiple: self.multiple,
                size: self.size,
                required: self.required,
            }),
            ElementKind::Textarea => FormElement::Textarea(TextareaElement {
                name: self.name,
                id: self.id,
                value: self.value,
                label: self.label,
                errors: self.errors,
                cols: self.cols,
                rows: self.rows,
                placeholder: self.placeholder,
                min_length: self.min_length,
                max_length: self.max_length,
                required: self.required,
                readonly: self.readonly,
            }),
            ElementKind::InputHidden => FormElement::InputHidden(InputHiddenElement {
                name: self.name,
                id: self.id,
                value: self.value,
            }),
            ElementKind::InputSubmit => FormElement::InputSubmit(InputSubmitElement {
                value: self
                    .label
                    .unwrap_or_else(|| Message::of(self.value.unwrap_or_default())),
                name: Some(self.name).filter(|name| !name.is_empty()),
                id: self.id,
            }),
            ElementKind::TrixEditor => FormElement::TrixEditor(TrixEditorElement {
                name: self.name,
                id: self.id,
                value: self.value,
                label: self.label,
                errors: self.errors,
            }),
            ElementKind::InputFile => FormElement::InputFile(InputFileElement {
                name: self.name,
                id: self.id,
                label: self.label,
                errors: self.errors,
                accept: self.accept,
                multiple: self.multiple,
                required: self.required,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_builder_ignores_unrelated_attributes() {
        let mut builder = ElementBuilder::new(ElementKind::InputText, "title");
        builder.rows(5).max_length(120).value("Dune");
        match builder.build() {
            FormElement::InputText(text) => {
                assert_eq!(text.max_length, Some(120));
                assert_eq!(text.value.as_deref(), Some("Dune"));
            }
            other => panic!("unexpected element {other:?}"),
        }
    }

    #[test]
    fn test_temporal_min_formats_value() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut builder = ElementBuilder::new(ElementKind::InputDateTimeLocal, "event_end");
        builder.min(start);
        match builder.build() {
            FormElement::InputDateTimeLocal(input) => {
                assert_eq!(input.min.as_deref(), Some("2024-03-01T09:00"));
            }
            other => panic!("unexpected element {other:?}"),
        }
    }

    #[test]
    fn test_required_propagates_to_group_entries() {
        let mut builder = ElementBuilder::new(ElementKind::InputRadio, "status");
        builder
            .radios(vec![Radio::new("status", "DRAFT", Message::of("DRAFT"))])
            .required(true);
        match builder.build() {
            FormElement::InputRadio(group) => {
                assert!(group.required);
                assert!(group.buttons[0].required);
            }
            other => panic!("unexpected element {other:?}"),
        }
    }

    #[test]
    fn test_kind_is_fixed() {
        let mut builder = ElementBuilder::new(ElementKind::Select, "genre");
        builder.placeholder("ignored").required(true);
        assert_eq!(builder.kind(), ElementKind::Select);
        assert_eq!(builder.build().kind(), ElementKind::Select);
    }
}
