//! Fieldset generation and rendering
//!
//! A form type describes its properties through `#[derive(Form)]`. The
//! [`FieldsetGenerator`] turns a form type (for a blank form) or an instance
//! (optionally with constraint violations) into a [`Fieldset`]: one
//! [`FormElement`] per property, with values, labels and errors bound. A
//! [`FieldsetRenderer`] turns the result into HTML.
//!
//! # Quick Start
//!
//! ```rust
//! use acton_fieldset::forms::{
//!     ConstraintViolations, FieldsetGenerator, FieldsetRenderer, Form, FormEnum,
//! };
//! use acton_fieldset::messages::Locale;
//!
//! #[derive(FormEnum)]
//! enum Genre {
//!     Music,
//!     Sport,
//!     Theater,
//! }
//!
//! #[derive(Form)]
//! struct EventCreateForm {
//!     #[form(not_blank)]
//!     name: String,
//!     genre: Genre,
//! }
//!
//! let form = EventCreateForm { name: String::new(), genre: Genre::Sport };
//!
//! let mut violations = ConstraintViolations::new();
//! violations.add("name", "NotBlank", "must not be blank");
//!
//! let generator = FieldsetGenerator::new();
//! let fieldset = generator.generate_invalid(&form, &violations)?;
//!
//! let html = FieldsetRenderer::default().render_fieldset(&fieldset, &Locale::default())?;
//! assert!(html.contains(r#"<span class="form-error">must not be blank</span>"#));
//! assert!(html.contains(r#"<option value="SPORT" selected>SPORT</option>"#));
//! # Ok::<(), acton_fieldset::FieldsetError>(())
//! ```
//!
//! # Element Resolution
//!
//! Each property resolves to an element kind from its hint, or from its type
//! when there is none (see [`resolve`]). Hints are set with `#[form(...)]`:
//!
//! ```rust
//! use acton_fieldset::forms::{ElementKind, FieldsetGenerator, Form, FormEnum};
//!
//! #[derive(FormEnum)]
//! enum Genre {
//!     Music,
//!     Sport,
//! }
//!
//! #[derive(Form)]
//! struct Preferences {
//!     #[form(radio)]
//!     favourite: Genre,
//!     #[form(textarea(rows = 4))]
//!     notes: Option<String>,
//!     newsletter: bool,
//! }
//!
//! let fieldset = FieldsetGenerator::new().generate::<Preferences>()?;
//! let kinds: Vec<_> = fieldset.fields().iter().map(|f| f.kind()).collect();
//! assert_eq!(
//!     kinds,
//!     [ElementKind::InputRadio, ElementKind::Textarea, ElementKind::InputCheckbox]
//! );
//! # Ok::<(), acton_fieldset::FieldsetError>(())
//! ```

mod builder;
mod descriptor;
mod error;
mod fetcher;
mod field;
mod fieldset;
mod generator;
mod render;
mod resolver;
mod template_render;

pub use acton_fieldset_macros::{Form, FormEnum};

pub use builder::ElementBuilder;
#[doc(hidden)]
pub use descriptor::dispatch as __dispatch;
pub use descriptor::{
    enum_field_type, Constraints, FieldDescriptor, FieldHint, FieldType, FieldValue, Form,
    FormDescriptor, FormEnum, FormValue,
};
pub use error::{ConstraintViolation, ConstraintViolations};
pub use fetcher::{
    CheckboxFetcher, EnumCheckboxFetcher, EnumOptionFetcher, EnumRadioFetcher, FetcherRegistry,
    OptionFetcher, RadioFetcher,
};
pub use field::{
    Checkbox, ElementKind, FormElement, InputCheckboxElement, InputFileElement,
    InputHiddenElement, InputNumberElement, InputRadioElement, InputStringElement,
    InputSubmitElement, InputTemporalElement, InputType, Radio, SelectElement, SelectOption,
    TextareaElement, TrixEditorElement,
};
pub use fieldset::{Fieldset, FormEnctype, FormMethod, HtmlForm, HtmlFormBuilder};
pub use generator::FieldsetGenerator;
pub use render::{
    escape_html, ChoiceModel, ElementModel, FormElementRenderer, HtmlFormElementRenderer,
    LabelModel, OptionModel,
};
pub use resolver::{kind_for_hint, resolve};
pub use template_render::{FieldsetRenderer, TemplateFormElementRenderer};
