//! Form element rendering to HTML
//!
//! Every strategy renders from the same [`ElementModel`]: message codes are
//! resolved, classes computed and values escaped (when `escape_values` is on)
//! before any markup is written. [`HtmlFormElementRenderer`] writes the markup
//! directly; the template strategy hands the model to a view.
//!
//! Markup is attribute-ordered and compact:
//!
//! ```text
//! <label for="name">Name</label><input type="text" name="name" value="" id="name" required/>
//! ```

use serde::Serialize;
use std::fmt::Write;
use std::sync::Arc;

use super::field::{Checkbox, ElementKind, FormElement, InputType, Radio, SelectOption};
use crate::config::RenderSettings;
use crate::error::Result;
use crate::messages::{DefaultMessageSource, Locale, Message, MessageSource};

/// Renders a single form element to an HTML fragment
pub trait FormElementRenderer: Send + Sync {
    /// Render `element` with messages resolved for `locale`
    ///
    /// # Errors
    ///
    /// Returns [`FieldsetError::ViewRendering`](crate::FieldsetError::ViewRendering)
    /// when a template-backed renderer fails.
    fn render(&self, element: &FormElement, locale: &Locale) -> Result<String>;
}

/// Resolved `<label>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelModel {
    /// Label text
    pub text: String,
    /// Id of the labelled control
    pub for_id: Option<String>,
    /// Class attribute
    pub class: Option<String>,
}

/// Resolved `<option>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionModel {
    /// Submitted value
    pub value: String,
    /// Option text
    pub label: String,
    /// Pre-selected
    pub selected: bool,
    /// Not selectable
    pub disabled: bool,
}

/// Resolved checkbox or radio button of a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceModel {
    /// `checkbox` or `radio`
    pub input_type: &'static str,
    /// Name attribute
    pub name: String,
    /// Value attribute
    pub value: String,
    /// Id attribute
    pub id: Option<String>,
    /// Label following the input
    pub label: LabelModel,
    /// Pre-checked
    pub checked: bool,
    /// Not selectable
    pub disabled: bool,
    /// Required
    pub required: bool,
    /// Class attribute
    pub class: Option<String>,
}

/// Render-ready view of a [`FormElement`]
///
/// Attributes that do not apply to the element's kind are `None` or `false`.
/// This is the model templates receive as `el`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[allow(missing_docs, clippy::struct_excessive_bools)]
pub struct ElementModel {
    pub kind: ElementKind,
    pub input_type: Option<&'static str>,
    pub name: Option<String>,
    pub id: Option<String>,
    pub value: Option<String>,
    pub label: Option<LabelModel>,
    pub errors: Vec<String>,
    pub error_class: String,
    pub class: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
    pub step: Option<String>,
    pub placeholder: Option<String>,
    pub pattern: Option<String>,
    pub min_length: Option<u32>,
    pub max_length: Option<u32>,
    pub size: Option<u32>,
    pub cols: Option<u32>,
    pub rows: Option<u32>,
    pub accept: Option<String>,
    pub multiple: bool,
    pub required: bool,
    pub readonly: bool,
    pub options: Vec<OptionModel>,
    pub choices: Vec<ChoiceModel>,
    /// Target of a Trix editor's `input` attribute
    pub editor_input: Option<String>,
}

struct ModelContext<'a> {
    messages: &'a dyn MessageSource,
    locale: &'a Locale,
    settings: &'a RenderSettings,
}

impl ModelContext<'_> {
    fn escape(&self, value: &str) -> String {
        if self.settings.escape_values {
            escape_html(value)
        } else {
            value.to_string()
        }
    }

    fn escape_opt(&self, value: Option<&str>) -> Option<String> {
        value.map(|v| self.escape(v))
    }

    fn text(&self, message: &Message) -> String {
        self.escape(&message.resolve(self.messages, self.locale))
    }

    fn label(&self, message: &Message, for_id: Option<&str>) -> LabelModel {
        LabelModel {
            text: self.text(message),
            for_id: self.escape_opt(for_id),
            class: self.escape_opt(self.settings.label_class.as_deref()),
        }
    }

    fn checkbox(&self, checkbox: &Checkbox, class: Option<&String>) -> ChoiceModel {
        ChoiceModel {
            input_type: InputType::Checkbox.as_str(),
            name: self.escape(&checkbox.name),
            value: self.escape(&checkbox.value),
            id: self.escape_opt(checkbox.id.as_deref()),
            label: self.label(&checkbox.label, checkbox.id.as_deref()),
            checked: checkbox.checked,
            disabled: checkbox.disabled,
            required: checkbox.required,
            class: class.cloned(),
        }
    }

    fn radio(&self, radio: &Radio, class: Option<&String>) -> ChoiceModel {
        ChoiceModel {
            input_type: InputType::Radio.as_str(),
            name: self.escape(&radio.name),
            value: self.escape(&radio.value),
            id: self.escape_opt(radio.id.as_deref()),
            label: self.label(&radio.label, radio.id.as_deref()),
            checked: radio.checked,
            disabled: radio.disabled,
            required: radio.required,
            class: class.cloned(),
        }
    }

    fn option(&self, option: &SelectOption) -> OptionModel {
        OptionModel {
            value: self.escape(&option.value),
            label: self.text(&option.label),
            selected: option.selected,
            disabled: option.disabled,
        }
    }
}

impl ElementModel {
    /// Build the model of `element`, resolving messages for `locale`
    #[must_use]
    pub fn new(
        element: &FormElement,
        messages: &dyn MessageSource,
        locale: &Locale,
        settings: &RenderSettings,
    ) -> Self {
        let ctx = ModelContext {
            messages,
            locale,
            settings,
        };
        let kind = element.kind();
        let errors: Vec<String> = element.errors().iter().map(|m| ctx.text(m)).collect();
        let class = ctx.escape_opt(settings.control_class(!errors.is_empty()).as_deref());

        let mut model = Self {
            kind,
            input_type: kind.input_type().map(|t| t.as_str()),
            name: ctx.escape_opt(element.name()),
            id: ctx.escape_opt(element.id()),
            value: ctx.escape_opt(element.value()),
            label: element.label().map(|l| ctx.label(l, element.id())),
            errors,
            error_class: ctx.escape(&settings.error_class),
            class,
            min: None,
            max: None,
            step: None,
            placeholder: None,
            pattern: None,
            min_length: None,
            max_length: None,
            size: None,
            cols: None,
            rows: None,
            accept: None,
            multiple: false,
            required: element.is_required(),
            readonly: false,
            options: Vec::new(),
            choices: Vec::new(),
            editor_input: None,
        };

        match element {
            FormElement::InputText(e)
            | FormElement::InputEmail(e)
            | FormElement::InputTel(e)
            | FormElement::InputUrl(e)
            | FormElement::InputPassword(e) => {
                model.placeholder = ctx.escape_opt(e.placeholder.as_deref());
                model.pattern = ctx.escape_opt(e.pattern.as_deref());
                model.min_length = e.min_length;
                model.max_length = e.max_length;
                model.size = e.size;
                model.readonly = e.readonly;
            }
            FormElement::InputNumber(e) => {
                model.min = ctx.escape_opt(e.min.as_deref());
                model.max = ctx.escape_opt(e.max.as_deref());
                model.step = ctx.escape_opt(e.step.as_deref());
                model.placeholder = ctx.escape_opt(e.placeholder.as_deref());
                model.readonly = e.readonly;
            }
            FormElement::InputDate(e)
            | FormElement::InputDateTimeLocal(e)
            | FormElement::InputTime(e) => {
                model.min = ctx.escape_opt(e.min.as_deref());
                model.max = ctx.escape_opt(e.max.as_deref());
                model.step = ctx.escape_opt(e.step.as_deref());
                model.readonly = e.readonly;
            }
            FormElement::InputCheckbox(e) => {
                model.required = false;
                model.choices = e
                    .checkboxes
                    .iter()
                    .map(|c| ctx.checkbox(c, model.class.as_ref()))
                    .collect();
            }
            FormElement::InputRadio(e) => {
                model.required = false;
                model.choices = e
                    .buttons
                    .iter()
                    .map(|r| ctx.radio(r, model.class.as_ref()))
                    .collect();
            }
            FormElement::Select(e) => {
                model.options = e.options.iter().map(|o| ctx.option(o)).collect();
                model.multiple = e.multiple;
                model.size = e.size;
            }
            FormElement::Textarea(e) => {
                model.placeholder = ctx.escape_opt(e.placeholder.as_deref());
                model.min_length = e.min_length;
                model.max_length = e.max_length;
                model.cols = e.cols;
                model.rows = e.rows;
                model.readonly = e.readonly;
            }
            FormElement::InputSubmit(e) => {
                model.value = Some(ctx.text(&e.value));
            }
            FormElement::TrixEditor(e) => {
                model.editor_input = Some(ctx.escape(e.id.as_deref().unwrap_or(&e.name)));
            }
            FormElement::InputFile(e) => {
                model.accept = ctx.escape_opt(e.accept.as_deref());
                model.multiple = e.multiple;
            }
            FormElement::InputHidden(_) => {}
        }

        model
    }
}

/// Built-in renderer writing markup directly
///
/// # Examples
///
/// ```rust
/// use acton_fieldset::config::RenderSettings;
/// use acton_fieldset::forms::{
///     ElementBuilder, ElementKind, FormElementRenderer, HtmlFormElementRenderer,
/// };
/// use acton_fieldset::messages::{Locale, Message};
///
/// let mut builder = ElementBuilder::new(ElementKind::InputText, "name");
/// builder.id("name").label(Message::of("Name")).required(true);
///
/// let renderer = HtmlFormElementRenderer::new(RenderSettings::default());
/// let html = renderer.render(&builder.build(), &Locale::default())?;
///
/// assert_eq!(
///     html,
///     r#"<label for="name">Name</label><input type="text" name="name" id="name" required/>"#
/// );
/// # Ok::<(), acton_fieldset::FieldsetError>(())
/// ```
#[derive(Clone)]
pub struct HtmlFormElementRenderer {
    messages: Arc<dyn MessageSource>,
    settings: RenderSettings,
}

impl std::fmt::Debug for HtmlFormElementRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlFormElementRenderer")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Default for HtmlFormElementRenderer {
    fn default() -> Self {
        Self::new(RenderSettings::default())
    }
}

impl HtmlFormElementRenderer {
    /// Create a renderer that renders every message's default text
    #[must_use]
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            messages: Arc::new(DefaultMessageSource),
            settings,
        }
    }

    /// Resolve message codes through `messages`
    #[must_use]
    pub fn with_messages(mut self, messages: Arc<dyn MessageSource>) -> Self {
        self.messages = messages;
        self
    }

    /// Rendering settings
    #[must_use]
    pub const fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Message source
    #[must_use]
    pub fn messages(&self) -> &Arc<dyn MessageSource> {
        &self.messages
    }

    /// Build the model of an element
    #[must_use]
    pub fn model(&self, element: &FormElement, locale: &Locale) -> ElementModel {
        ElementModel::new(element, self.messages.as_ref(), locale, &self.settings)
    }

    /// Render a prepared model
    #[must_use]
    pub fn render_model(model: &ElementModel) -> String {
        let mut html = String::with_capacity(256);

        match model.kind {
            ElementKind::InputHidden => Self::write_hidden(&mut html, model),
            ElementKind::InputSubmit => Self::write_submit(&mut html, model),
            ElementKind::InputCheckbox | ElementKind::InputRadio => {
                Self::write_label(&mut html, model.label.as_ref());
                for choice in &model.choices {
                    Self::write_choice(&mut html, choice);
                }
                Self::write_errors(&mut html, model);
            }
            ElementKind::Select => {
                Self::write_label(&mut html, model.label.as_ref());
                Self::write_select(&mut html, model);
                Self::write_errors(&mut html, model);
            }
            ElementKind::Textarea => {
                Self::write_label(&mut html, model.label.as_ref());
                Self::write_textarea(&mut html, model);
                Self::write_errors(&mut html, model);
            }
            ElementKind::TrixEditor => {
                Self::write_label(&mut html, model.label.as_ref());
                Self::write_hidden(&mut html, model);
                html.push_str("<trix-editor");
                Self::write_attr(&mut html, "input", model.editor_input.as_deref().unwrap_or_default());
                Self::write_opt_attr(&mut html, "class", model.class.as_deref());
                html.push_str("></trix-editor>");
                Self::write_errors(&mut html, model);
            }
            ElementKind::InputText
            | ElementKind::InputEmail
            | ElementKind::InputTel
            | ElementKind::InputUrl
            | ElementKind::InputPassword
            | ElementKind::InputNumber
            | ElementKind::InputDate
            | ElementKind::InputDateTimeLocal
            | ElementKind::InputTime
            | ElementKind::InputFile => {
                Self::write_label(&mut html, model.label.as_ref());
                Self::write_input(&mut html, model);
                Self::write_errors(&mut html, model);
            }
        }

        html
    }

    fn write_input(html: &mut String, model: &ElementModel) {
        html.push_str("<input");
        Self::write_opt_attr(html, "type", model.input_type);
        Self::write_opt_attr(html, "name", model.name.as_deref());
        Self::write_opt_attr(html, "value", model.value.as_deref());
        Self::write_opt_attr(html, "id", model.id.as_deref());
        Self::write_opt_attr(html, "min", model.min.as_deref());
        Self::write_opt_attr(html, "max", model.max.as_deref());
        Self::write_opt_attr(html, "step", model.step.as_deref());
        Self::write_opt_attr(html, "placeholder", model.placeholder.as_deref());
        Self::write_opt_attr(html, "pattern", model.pattern.as_deref());
        Self::write_num_attr(html, "minlength", model.min_length);
        Self::write_num_attr(html, "maxlength", model.max_length);
        Self::write_num_attr(html, "size", model.size);
        Self::write_opt_attr(html, "accept", model.accept.as_deref());
        Self::write_flag(html, "multiple", model.multiple);
        Self::write_opt_attr(html, "class", model.class.as_deref());
        Self::write_flag(html, "required", model.required);
        Self::write_flag(html, "readonly", model.readonly);
        html.push_str("/>");
    }

    fn write_hidden(html: &mut String, model: &ElementModel) {
        html.push_str("<input");
        Self::write_attr(html, "type", InputType::Hidden.as_str());
        Self::write_opt_attr(html, "name", model.name.as_deref());
        Self::write_opt_attr(html, "value", model.value.as_deref());
        Self::write_opt_attr(html, "id", model.id.as_deref());
        html.push_str("/>");
    }

    fn write_submit(html: &mut String, model: &ElementModel) {
        html.push_str("<input");
        Self::write_attr(html, "type", InputType::Submit.as_str());
        Self::write_opt_attr(html, "name", model.name.as_deref());
        Self::write_opt_attr(html, "value", model.value.as_deref());
        Self::write_opt_attr(html, "id", model.id.as_deref());
        Self::write_opt_attr(html, "class", model.class.as_deref());
        html.push_str("/>");
    }

    fn write_choice(html: &mut String, choice: &ChoiceModel) {
        html.push_str("<div><input");
        Self::write_attr(html, "type", choice.input_type);
        Self::write_attr(html, "name", &choice.name);
        Self::write_attr(html, "value", &choice.value);
        Self::write_opt_attr(html, "id", choice.id.as_deref());
        Self::write_flag(html, "checked", choice.checked);
        Self::write_opt_attr(html, "class", choice.class.as_deref());
        Self::write_flag(html, "required", choice.required);
        Self::write_flag(html, "disabled", choice.disabled);
        html.push_str("/>");
        Self::write_label(html, Some(&choice.label));
        html.push_str("</div>");
    }

    fn write_select(html: &mut String, model: &ElementModel) {
        html.push_str("<select");
        Self::write_opt_attr(html, "name", model.name.as_deref());
        Self::write_opt_attr(html, "id", model.id.as_deref());
        Self::write_num_attr(html, "size", model.size);
        Self::write_flag(html, "multiple", model.multiple);
        Self::write_opt_attr(html, "class", model.class.as_deref());
        Self::write_flag(html, "required", model.required);
        html.push('>');

        for option in &model.options {
            html.push_str("<option");
            Self::write_attr(html, "value", &option.value);
            Self::write_flag(html, "selected", option.selected);
            Self::write_flag(html, "disabled", option.disabled);
            html.push('>');
            html.push_str(&option.label);
            html.push_str("</option>");
        }

        html.push_str("</select>");
    }

    fn write_textarea(html: &mut String, model: &ElementModel) {
        html.push_str("<textarea");
        Self::write_opt_attr(html, "name", model.name.as_deref());
        Self::write_opt_attr(html, "id", model.id.as_deref());
        Self::write_opt_attr(html, "placeholder", model.placeholder.as_deref());
        Self::write_num_attr(html, "minlength", model.min_length);
        Self::write_num_attr(html, "maxlength", model.max_length);
        Self::write_num_attr(html, "cols", model.cols);
        Self::write_num_attr(html, "rows", model.rows);
        Self::write_opt_attr(html, "class", model.class.as_deref());
        Self::write_flag(html, "required", model.required);
        Self::write_flag(html, "readonly", model.readonly);
        html.push('>');
        if let Some(value) = &model.value {
            html.push_str(value);
        }
        html.push_str("</textarea>");
    }

    fn write_label(html: &mut String, label: Option<&LabelModel>) {
        let Some(label) = label else {
            return;
        };
        html.push_str("<label");
        Self::write_opt_attr(html, "for", label.for_id.as_deref());
        Self::write_opt_attr(html, "class", label.class.as_deref());
        html.push('>');
        html.push_str(&label.text);
        html.push_str("</label>");
    }

    fn write_errors(html: &mut String, model: &ElementModel) {
        for error in &model.errors {
            let _ = write!(html, r#"<span class="{}">{error}</span>"#, model.error_class);
        }
    }

    fn write_attr(html: &mut String, name: &str, value: &str) {
        html.push(' ');
        html.push_str(name);
        html.push_str("=\"");
        html.push_str(value);
        html.push('"');
    }

    fn write_opt_attr(html: &mut String, name: &str, value: Option<&str>) {
        if let Some(value) = value {
            Self::write_attr(html, name, value);
        }
    }

    fn write_num_attr(html: &mut String, name: &str, value: Option<u32>) {
        if let Some(value) = value {
            let _ = write!(html, r#" {name}="{value}""#);
        }
    }

    fn write_flag(html: &mut String, name: &str, on: bool) {
        if on {
            html.push(' ');
            html.push_str(name);
        }
    }
}

impl FormElementRenderer for HtmlFormElementRenderer {
    fn render(&self, element: &FormElement, locale: &Locale) -> Result<String> {
        let model = self.model(element, locale);
        Ok(Self::render_model(&model))
    }
}

/// Escape a string for use in HTML attribute values and content
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
