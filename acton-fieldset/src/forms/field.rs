//! Form element descriptors
//!
//! Defines the closed set of form elements a fieldset is made of, along with
//! the option, checkbox and radio entries used by choice elements.

use serde::Serialize;

use crate::messages::Message;

/// HTML input types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputType {
    /// Text input
    Text,
    /// Email input with validation
    Email,
    /// Password input (masked)
    Password,
    /// Number input
    Number,
    /// Telephone input
    Tel,
    /// URL input
    Url,
    /// Date input
    Date,
    /// Time input
    Time,
    /// Date and time input
    DateTimeLocal,
    /// Hidden input
    Hidden,
    /// File upload
    File,
    /// Checkbox
    Checkbox,
    /// Radio button
    Radio,
    /// Submit button
    Submit,
}

impl InputType {
    /// Get the HTML type attribute value
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Number => "number",
            Self::Tel => "tel",
            Self::Url => "url",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTimeLocal => "datetime-local",
            Self::Hidden => "hidden",
            Self::File => "file",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Submit => "submit",
        }
    }
}

impl std::fmt::Display for InputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of form element, one per [`FormElement`] variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// `<input type="text">`
    InputText,
    /// `<input type="email">`
    InputEmail,
    /// `<input type="tel">`
    InputTel,
    /// `<input type="url">`
    InputUrl,
    /// `<input type="password">`
    InputPassword,
    /// `<input type="number">`
    InputNumber,
    /// `<input type="date">`
    InputDate,
    /// `<input type="datetime-local">`
    InputDateTimeLocal,
    /// `<input type="time">`
    InputTime,
    /// Group of checkboxes
    InputCheckbox,
    /// Group of radio buttons
    InputRadio,
    /// `<select>`
    Select,
    /// `<textarea>`
    Textarea,
    /// `<input type="hidden">`
    InputHidden,
    /// `<input type="submit">`
    InputSubmit,
    /// Trix rich text editor
    TrixEditor,
    /// `<input type="file">`
    InputFile,
}

impl ElementKind {
    /// Every element kind
    pub const ALL: [Self; 17] = [
        Self::InputText,
        Self::InputEmail,
        Self::InputTel,
        Self::InputUrl,
        Self::InputPassword,
        Self::InputNumber,
        Self::InputDate,
        Self::InputDateTimeLocal,
        Self::InputTime,
        Self::InputCheckbox,
        Self::InputRadio,
        Self::Select,
        Self::Textarea,
        Self::InputHidden,
        Self::InputSubmit,
        Self::TrixEditor,
        Self::InputFile,
    ];

    /// The `type` attribute of the rendered `<input>`, if the kind renders one
    #[must_use]
    pub const fn input_type(&self) -> Option<InputType> {
        match self {
            Self::InputText => Some(InputType::Text),
            Self::InputEmail => Some(InputType::Email),
            Self::InputTel => Some(InputType::Tel),
            Self::InputUrl => Some(InputType::Url),
            Self::InputPassword => Some(InputType::Password),
            Self::InputNumber => Some(InputType::Number),
            Self::InputDate => Some(InputType::Date),
            Self::InputDateTimeLocal => Some(InputType::DateTimeLocal),
            Self::InputTime => Some(InputType::Time),
            Self::InputCheckbox => Some(InputType::Checkbox),
            Self::InputRadio => Some(InputType::Radio),
            Self::InputHidden | Self::TrixEditor => Some(InputType::Hidden),
            Self::InputSubmit => Some(InputType::Submit),
            Self::InputFile => Some(InputType::File),
            Self::Select | Self::Textarea => None,
        }
    }

    /// Bundled template rendering this kind
    #[must_use]
    pub const fn default_view(&self) -> &'static str {
        match self {
            Self::InputCheckbox => "fieldset/input-checkbox.html",
            Self::InputRadio => "fieldset/input-radio.html",
            Self::Select => "fieldset/select.html",
            Self::Textarea => "fieldset/textarea.html",
            Self::InputHidden => "fieldset/input-hidden.html",
            Self::InputSubmit => "fieldset/input-submit.html",
            Self::TrixEditor => "fieldset/trix-editor.html",
            Self::InputText
            | Self::InputEmail
            | Self::InputTel
            | Self::InputUrl
            | Self::InputPassword
            | Self::InputNumber
            | Self::InputDate
            | Self::InputDateTimeLocal
            | Self::InputTime
            | Self::InputFile => "fieldset/input.html",
        }
    }

    /// Whether the kind is a single-line text input
    #[must_use]
    pub const fn is_string_input(&self) -> bool {
        matches!(
            self,
            Self::InputText | Self::InputEmail | Self::InputTel | Self::InputUrl | Self::InputPassword
        )
    }

    /// Whether the kind is a date or time input
    #[must_use]
    pub const fn is_temporal_input(&self) -> bool {
        matches!(self, Self::InputDate | Self::InputDateTimeLocal | Self::InputTime)
    }

    /// Whether elements of this kind display validation errors
    ///
    /// Hidden inputs and submit buttons have nowhere to show them.
    #[must_use]
    pub const fn shows_errors(&self) -> bool {
        !matches!(self, Self::InputHidden | Self::InputSubmit)
    }
}

/// `<option>` entry of a select
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    /// Value attribute
    pub value: String,
    /// Display text
    pub label: Message,
    /// Whether this option matches the bound value
    pub selected: bool,
    /// Whether this option is disabled
    pub disabled: bool,
}

impl SelectOption {
    /// Create a new select option
    #[must_use]
    pub fn new(value: impl Into<String>, label: Message) -> Self {
        Self {
            value: value.into(),
            label,
            selected: false,
            disabled: false,
        }
    }

    /// Mark the option as selected
    #[must_use]
    pub const fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Create a disabled option (useful for placeholder)
    #[must_use]
    pub fn disabled(value: impl Into<String>, label: Message) -> Self {
        Self {
            value: value.into(),
            label,
            selected: false,
            disabled: true,
        }
    }
}

/// One checkbox of a checkbox group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Checkbox {
    /// Name attribute, shared across the group
    pub name: String,
    /// Id attribute
    pub id: Option<String>,
    /// Value submitted when checked
    pub value: String,
    /// Label rendered after the input
    pub label: Message,
    /// Whether the checkbox is checked
    pub checked: bool,
    /// Whether the checkbox is disabled
    pub disabled: bool,
    /// Whether the checkbox must be checked
    pub required: bool,
}

impl Checkbox {
    /// Create an unchecked checkbox
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>, label: Message) -> Self {
        Self {
            name: name.into(),
            id: None,
            value: value.into(),
            label,
            checked: false,
            disabled: false,
            required: false,
        }
    }

    /// Set the id attribute
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the checked state
    #[must_use]
    pub const fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }
}

/// One radio button of a radio group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Radio {
    /// Name attribute, shared across the group
    pub name: String,
    /// Id attribute
    pub id: Option<String>,
    /// Value submitted when checked
    pub value: String,
    /// Label rendered after the input
    pub label: Message,
    /// Whether the radio is checked
    pub checked: bool,
    /// Whether the radio is disabled
    pub disabled: bool,
    /// Whether a choice is required
    pub required: bool,
}

impl Radio {
    /// Create an unchecked radio button
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>, label: Message) -> Self {
        Self {
            name: name.into(),
            id: None,
            value: value.into(),
            label,
            checked: false,
            disabled: false,
            required: false,
        }
    }

    /// Set the id attribute
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the checked state
    #[must_use]
    pub const fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }
}

/// Text, email, telephone, URL and password inputs
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputStringElement {
    /// Name attribute
    pub name: String,
    /// Id attribute
    pub id: Option<String>,
    /// Current value
    pub value: Option<String>,
    /// Label
    pub label: Option<Message>,
    /// Validation errors
    pub errors: Vec<Message>,
    /// Placeholder text
    pub placeholder: Option<String>,
    /// Pattern attribute
    pub pattern: Option<String>,
    /// Minimum length
    pub min_length: Option<u32>,
    /// Maximum length
    pub max_length: Option<u32>,
    /// Visible width in characters
    pub size: Option<u32>,
    /// Required flag
    pub required: bool,
    /// Read-only flag
    pub readonly: bool,
}

/// Number input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputNumberElement {
    /// Name attribute
    pub name: String,
    /// Id attribute
    pub id: Option<String>,
    /// Current value
    pub value: Option<String>,
    /// Label
    pub label: Option<Message>,
    /// Validation errors
    pub errors: Vec<Message>,
    /// Lower bound
    pub min: Option<String>,
    /// Upper bound
    pub max: Option<String>,
    /// Step
    pub step: Option<String>,
    /// Placeholder text
    pub placeholder: Option<String>,
    /// Required flag
    pub required: bool,
    /// Read-only flag
    pub readonly: bool,
}

/// Date, date-time and time inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputTemporalElement {
    /// Name attribute
    pub name: String,
    /// Id attribute
    pub id: Option<String>,
    /// Current value in HTML input format
    pub value: Option<String>,
    /// Label
    pub label: Option<Message>,
    /// Validation errors
    pub errors: Vec<Message>,
    /// Earliest allowed value
    pub min: Option<String>,
    /// Latest allowed value
    pub max: Option<String>,
    /// Step in seconds (or days for dates)
    pub step: Option<String>,
    /// Required flag
    pub required: bool,
    /// Read-only flag
    pub readonly: bool,
}

/// Group of checkboxes; a boolean property renders as a group of one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputCheckboxElement {
    /// Property name shared by the checkboxes
    pub name: String,
    /// Group label
    pub label: Option<Message>,
    /// Checkboxes in order
    pub checkboxes: Vec<Checkbox>,
    /// Validation errors
    pub errors: Vec<Message>,
}

/// Group of radio buttons
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputRadioElement {
    /// Property name shared by the buttons
    pub name: String,
    /// Group label
    pub label: Option<Message>,
    /// Buttons in order
    pub buttons: Vec<Radio>,
    /// Validation errors
    pub errors: Vec<Message>,
    /// Required flag
    pub required: bool,
}

/// Select dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectElement {
    /// Name attribute
    pub name: String,
    /// Id attribute
    pub id: Option<String>,
    /// Label
    pub label: Option<Message>,
    /// Validation errors
    pub errors: Vec<Message>,
    /// Options in order
    pub options: Vec<SelectOption>,
    /// Allow several selections
    pub multiple: bool,
    /// Visible rows
    pub size: Option<u32>,
    /// Required flag
    pub required: bool,
}

/// Multi-line text area
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextareaElement {
    /// Name attribute
    pub name: String,
    /// Id attribute
    pub id: Option<String>,
    /// Current value
    pub value: Option<String>,
    /// Label
    pub label: Option<Message>,
    /// Validation errors
    pub errors: Vec<Message>,
    /// Visible width in characters
    pub cols: Option<u32>,
    /// Visible text lines
    pub rows: Option<u32>,
    /// Placeholder text
    pub placeholder: Option<String>,
    /// Minimum length
    pub min_length: Option<u32>,
    /// Maximum length
    pub max_length: Option<u32>,
    /// Required flag
    pub required: bool,
    /// Read-only flag
    pub readonly: bool,
}

/// Hidden input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputHiddenElement {
    /// Name attribute
    pub name: String,
    /// Id attribute
    pub id: Option<String>,
    /// Current value
    pub value: Option<String>,
}

/// Submit button
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputSubmitElement {
    /// Button text
    pub value: Message,
    /// Name attribute
    pub name: Option<String>,
    /// Id attribute
    pub id: Option<String>,
}

impl InputSubmitElement {
    /// Create a submit button
    #[must_use]
    pub const fn new(value: Message) -> Self {
        Self {
            value,
            name: None,
            id: None,
        }
    }
}

/// Trix rich text editor bound through a hidden input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrixEditorElement {
    /// Name of the hidden input
    pub name: String,
    /// Id of the hidden input, referenced by the editor
    pub id: Option<String>,
    /// Current HTML content
    pub value: Option<String>,
    /// Label
    pub label: Option<Message>,
    /// Validation errors
    pub errors: Vec<Message>,
}

/// File upload input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputFileElement {
    /// Name attribute
    pub name: String,
    /// Id attribute
    pub id: Option<String>,
    /// Label
    pub label: Option<Message>,
    /// Validation errors
    pub errors: Vec<Message>,
    /// Accepted MIME types or extensions
    pub accept: Option<String>,
    /// Allow several files
    pub multiple: bool,
    /// Required flag
    pub required: bool,
}

/// A form element with its bound state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormElement {
    /// `<input type="text">`
    InputText(InputStringElement),
    /// `<input type="email">`
    InputEmail(InputStringElement),
    /// `<input type="tel">`
    InputTel(InputStringElement),
    /// `<input type="url">`
    InputUrl(InputStringElement),
    /// `<input type="password">`
    InputPassword(InputStringElement),
    /// `<input type="number">`
    InputNumber(InputNumberElement),
    /// `<input type="date">`
    InputDate(InputTemporalElement),
    /// `<input type="datetime-local">`
    InputDateTimeLocal(InputTemporalElement),
    /// `<input type="time">`
    InputTime(InputTemporalElement),
    /// Group of checkboxes
    InputCheckbox(InputCheckboxElement),
    /// Group of radio buttons
    InputRadio(InputRadioElement),
    /// `<select>`
    Select(SelectElement),
    /// `<textarea>`
    Textarea(TextareaElement),
    /// `<input type="hidden">`
    InputHidden(InputHiddenElement),
    /// `<input type="submit">`
    InputSubmit(InputSubmitElement),
    /// Trix rich text editor
    TrixEditor(TrixEditorElement),
    /// `<input type="file">`
    InputFile(InputFileElement),
}

impl FormElement {
    /// Kind of this element
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        match self {
            Self::InputText(_) => ElementKind::InputText,
            Self::InputEmail(_) => ElementKind::InputEmail,
            Self::InputTel(_) => ElementKind::InputTel,
            Self::InputUrl(_) => ElementKind::InputUrl,
            Self::InputPassword(_) => ElementKind::InputPassword,
            Self::InputNumber(_) => ElementKind::InputNumber,
            Self::InputDate(_) => ElementKind::InputDate,
            Self::InputDateTimeLocal(_) => ElementKind::InputDateTimeLocal,
            Self::InputTime(_) => ElementKind::InputTime,
            Self::InputCheckbox(_) => ElementKind::InputCheckbox,
            Self::InputRadio(_) => ElementKind::InputRadio,
            Self::Select(_) => ElementKind::Select,
            Self::Textarea(_) => ElementKind::Textarea,
            Self::InputHidden(_) => ElementKind::InputHidden,
            Self::InputSubmit(_) => ElementKind::InputSubmit,
            Self::TrixEditor(_) => ElementKind::TrixEditor,
            Self::InputFile(_) => ElementKind::InputFile,
        }
    }

    /// Name attribute; submit buttons may be anonymous
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::InputText(e)
            | Self::InputEmail(e)
            | Self::InputTel(e)
            | Self::InputUrl(e)
            | Self::InputPassword(e) => Some(&e.name),
            Self::InputNumber(e) => Some(&e.name),
            Self::InputDate(e) | Self::InputDateTimeLocal(e) | Self::InputTime(e) => Some(&e.name),
            Self::InputCheckbox(e) => Some(&e.name),
            Self::InputRadio(e) => Some(&e.name),
            Self::Select(e) => Some(&e.name),
            Self::Textarea(e) => Some(&e.name),
            Self::InputHidden(e) => Some(&e.name),
            Self::InputSubmit(e) => e.name.as_deref(),
            Self::TrixEditor(e) => Some(&e.name),
            Self::InputFile(e) => Some(&e.name),
        }
    }

    /// Id attribute
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::InputText(e)
            | Self::InputEmail(e)
            | Self::InputTel(e)
            | Self::InputUrl(e)
            | Self::InputPassword(e) => e.id.as_deref(),
            Self::InputNumber(e) => e.id.as_deref(),
            Self::InputDate(e) | Self::InputDateTimeLocal(e) | Self::InputTime(e) => e.id.as_deref(),
            Self::Select(e) => e.id.as_deref(),
            Self::Textarea(e) => e.id.as_deref(),
            Self::InputHidden(e) => e.id.as_deref(),
            Self::InputSubmit(e) => e.id.as_deref(),
            Self::TrixEditor(e) => e.id.as_deref(),
            Self::InputFile(e) => e.id.as_deref(),
            Self::InputCheckbox(_) | Self::InputRadio(_) => None,
        }
    }

    /// Label, if any
    #[must_use]
    pub const fn label(&self) -> Option<&Message> {
        match self {
            Self::InputText(e)
            | Self::InputEmail(e)
            | Self::InputTel(e)
            | Self::InputUrl(e)
            | Self::InputPassword(e) => e.label.as_ref(),
            Self::InputNumber(e) => e.label.as_ref(),
            Self::InputDate(e) | Self::InputDateTimeLocal(e) | Self::InputTime(e) => e.label.as_ref(),
            Self::InputCheckbox(e) => e.label.as_ref(),
            Self::InputRadio(e) => e.label.as_ref(),
            Self::Select(e) => e.label.as_ref(),
            Self::Textarea(e) => e.label.as_ref(),
            Self::TrixEditor(e) => e.label.as_ref(),
            Self::InputFile(e) => e.label.as_ref(),
            Self::InputHidden(_) | Self::InputSubmit(_) => None,
        }
    }

    /// Current value rendered into the `value` attribute or element body
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::InputText(e)
            | Self::InputEmail(e)
            | Self::InputTel(e)
            | Self::InputUrl(e)
            | Self::InputPassword(e) => e.value.as_deref(),
            Self::InputNumber(e) => e.value.as_deref(),
            Self::InputDate(e) | Self::InputDateTimeLocal(e) | Self::InputTime(e) => {
                e.value.as_deref()
            }
            Self::Textarea(e) => e.value.as_deref(),
            Self::InputHidden(e) => e.value.as_deref(),
            Self::TrixEditor(e) => e.value.as_deref(),
            Self::InputCheckbox(_)
            | Self::InputRadio(_)
            | Self::Select(_)
            | Self::InputSubmit(_)
            | Self::InputFile(_) => None,
        }
    }

    /// Validation errors attached to this element
    #[must_use]
    pub fn errors(&self) -> &[Message] {
        match self {
            Self::InputText(e)
            | Self::InputEmail(e)
            | Self::InputTel(e)
            | Self::InputUrl(e)
            | Self::InputPassword(e) => &e.errors,
            Self::InputNumber(e) => &e.errors,
            Self::InputDate(e) | Self::InputDateTimeLocal(e) | Self::InputTime(e) => &e.errors,
            Self::InputCheckbox(e) => &e.errors,
            Self::InputRadio(e) => &e.errors,
            Self::Select(e) => &e.errors,
            Self::Textarea(e) => &e.errors,
            Self::TrixEditor(e) => &e.errors,
            Self::InputFile(e) => &e.errors,
            Self::InputHidden(_) | Self::InputSubmit(_) => &[],
        }
    }

    /// Whether validation errors are attached
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }

    /// Required flag; a checkbox group is required when any checkbox is
    #[must_use]
    pub fn is_required(&self) -> bool {
        match self {
            Self::InputText(e)
            | Self::InputEmail(e)
            | Self::InputTel(e)
            | Self::InputUrl(e)
            | Self::InputPassword(e) => e.required,
            Self::InputNumber(e) => e.required,
            Self::InputDate(e) | Self::InputDateTimeLocal(e) | Self::InputTime(e) => e.required,
            Self::InputCheckbox(e) => e.checkboxes.iter().any(|c| c.required),
            Self::InputRadio(e) => e.required,
            Self::Select(e) => e.required,
            Self::Textarea(e) => e.required,
            Self::InputFile(e) => e.required,
            Self::InputHidden(_) | Self::InputSubmit(_) | Self::TrixEditor(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_type_as_str() {
        assert_eq!(InputType::Text.as_str(), "text");
        assert_eq!(InputType::DateTimeLocal.as_str(), "datetime-local");
        assert_eq!(InputType::Submit.to_string(), "submit");
    }

    #[test]
    fn test_element_kind_input_types() {
        assert_eq!(ElementKind::TrixEditor.input_type(), Some(InputType::Hidden));
        assert_eq!(ElementKind::Select.input_type(), None);
        assert!(ElementKind::InputPassword.is_string_input());
        assert!(ElementKind::InputTime.is_temporal_input());
        assert!(!ElementKind::InputNumber.is_temporal_input());
    }

    #[test]
    fn test_select_option() {
        let option = SelectOption::new("dog", Message::of("Dog")).selected(true);
        assert_eq!(option.value, "dog");
        assert!(option.selected);
        assert!(!option.disabled);

        let placeholder = SelectOption::disabled("", Message::of("Pick one"));
        assert!(placeholder.disabled);
    }

    #[test]
    fn test_element_accessors() {
        let element = FormElement::InputHidden(InputHiddenElement {
            name: "token".into(),
            id: None,
            value: Some("abc".into()),
        });
        assert_eq!(element.kind(), ElementKind::InputHidden);
        assert_eq!(element.name(), Some("token"));
        assert_eq!(element.value(), Some("abc"));
        assert!(element.errors().is_empty());
        assert!(!element.is_required());

        let submit = FormElement::InputSubmit(InputSubmitElement::new(Message::of("Send")));
        assert_eq!(submit.name(), None);
    }

    #[test]
    fn test_element_serializes_with_kind_tag() {
        let element = FormElement::InputHidden(InputHiddenElement {
            name: "token".into(),
            id: None,
            value: None,
        });
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["kind"], "input_hidden");
        assert_eq!(json["name"], "token");
    }
}
