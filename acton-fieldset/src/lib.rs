//! acton-fieldset: HTML fieldsets generated from Rust form types
//!
//! Derive [`Form`](forms::Form) on a struct and the crate builds its HTML form
//! fields for you:
//!
//! - each property resolves to a form element from its type and hints
//! - current values, labels and validation errors are bound per field
//! - enums fan out into selects, radio groups or checkbox groups
//! - fields render through a built-in renderer or minijinja templates
//!
//! # Design Principles
//!
//! 1. **Convention Over Configuration**: types pick their element, hints override
//! 2. **Deterministic Output**: the same input always yields the same fieldset
//! 3. **Swappable Rendering**: any element kind can be restyled with a template
//!
//! # Quick Start
//!
//! ```rust
//! use acton_fieldset::prelude::*;
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
//! # fn main() -> acton_fieldset::Result<()> {
//! let generator = FieldsetGenerator::new();
//! let fieldset = generator.generate::<EventCreateForm>()?;
//!
//! let html = FieldsetRenderer::default().render_fieldset(&fieldset, &Locale::default())?;
//! assert!(html.starts_with(r#"<label for="name">Name</label><input type="text" name="name" id="name" required/>"#));
//! # Ok(())
//! # }
//! ```

// Lint configuration is handled at the workspace level in Cargo.toml
// Additional crate-specific allows:
#![allow(clippy::missing_errors_doc)]

// Derive output refers to `::acton_fieldset`, including inside this crate's tests
extern crate self as acton_fieldset;

pub mod config;
pub mod error;
pub mod forms;
pub mod messages;
pub mod observability;
pub mod template;

pub use error::{FieldsetError, Result};

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! # Examples
    //!
    //! ```rust
    //! use acton_fieldset::prelude::*;
    //! ```

    // Form description
    pub use crate::forms::{
        ConstraintViolations, FieldDescriptor, FieldHint, FieldType, FieldValue, Form,
        FormDescriptor, FormEnum, FormValue,
    };

    // Generation
    pub use crate::forms::{
        ElementBuilder, ElementKind, FetcherRegistry, Fieldset, FieldsetGenerator, FormElement,
        HtmlForm, SelectOption,
    };

    // Rendering
    pub use crate::forms::{
        FieldsetRenderer, FormElementRenderer, HtmlFormElementRenderer,
        TemplateFormElementRenderer,
    };
    pub use crate::template::{FieldsetTemplates, ViewsRenderer};

    // Messages
    pub use crate::messages::{Locale, Message, MessageSource, StaticMessageSource};

    // Configuration and errors
    pub use crate::config::FieldsetConfig;
    pub use crate::error::{FieldsetError, Result};
}
