//! Type-to-element resolution
//!
//! Decides which element kind represents a property. Resolution is a
//! priority-ordered match:
//!
//! 1. an explicit hint wins outright
//! 2. enums become a select
//! 3. dates, date-times and times map to their temporal inputs
//! 4. numbers become number inputs, booleans a single checkbox
//! 5. text becomes a text input, or an email input under an `email` constraint
//!
//! Any other type without a hint is an [`FieldsetError::UnresolvedFieldType`].

use super::descriptor::{FieldDescriptor, FieldHint, FieldType};
use super::field::ElementKind;
use crate::error::{FieldsetError, Result};

/// Element kind selected by a hint
#[must_use]
pub const fn kind_for_hint(hint: &FieldHint) -> ElementKind {
    match hint {
        FieldHint::Select { .. } => ElementKind::Select,
        FieldHint::Radio { .. } => ElementKind::InputRadio,
        FieldHint::Checkbox { .. } => ElementKind::InputCheckbox,
        FieldHint::Textarea { .. } => ElementKind::Textarea,
        FieldHint::TrixEditor => ElementKind::TrixEditor,
        FieldHint::Email => ElementKind::InputEmail,
        FieldHint::Tel => ElementKind::InputTel,
        FieldHint::Url => ElementKind::InputUrl,
        FieldHint::Password => ElementKind::InputPassword,
        FieldHint::Hidden => ElementKind::InputHidden,
        FieldHint::File { .. } => ElementKind::InputFile,
    }
}

/// Resolve the element kind of a property
///
/// Returns `Ok(None)` for auto-populated properties, which never appear in a
/// generated fieldset.
pub fn resolve(form_name: &str, field: &FieldDescriptor) -> Result<Option<ElementKind>> {
    if field.auto_populated {
        tracing::trace!(form = form_name, property = %field.name, "skipping auto-populated property");
        return Ok(None);
    }

    if let Some(hint) = &field.hint {
        return Ok(Some(kind_for_hint(hint)));
    }

    let kind = match field.field_type {
        FieldType::Enum { .. } => ElementKind::Select,
        FieldType::Date => ElementKind::InputDate,
        FieldType::DateTime => ElementKind::InputDateTimeLocal,
        FieldType::Time => ElementKind::InputTime,
        FieldType::Integer | FieldType::Decimal => ElementKind::InputNumber,
        FieldType::Boolean => ElementKind::InputCheckbox,
        FieldType::Text if field.constraints.email => ElementKind::InputEmail,
        FieldType::Text => ElementKind::InputText,
        FieldType::Other(type_name) => {
            return Err(FieldsetError::UnresolvedFieldType {
                form: form_name.to_string(),
                property: field.name.clone(),
                type_name: type_name.to_string(),
            });
        }
    };
    Ok(Some(kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::descriptor::FormEnum;

    struct Genre;

    impl FormEnum for Genre {
        const TYPE_NAME: &'static str = "Genre";
        const CONSTANTS: &'static [&'static str] = &["MUSIC", "SPORT"];

        fn constant_name(&self) -> &'static str {
            "MUSIC"
        }

        fn from_constant(constant: &str) -> Option<Self> {
            (constant == "MUSIC").then_some(Self)
        }
    }

    fn kind(field: &FieldDescriptor) -> Option<ElementKind> {
        resolve("Test", field).unwrap()
    }

    #[test]
    fn test_default_kinds() {
        use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

        assert_eq!(kind(&FieldDescriptor::of::<String>("a")), Some(ElementKind::InputText));
        assert_eq!(kind(&FieldDescriptor::of::<u64>("a")), Some(ElementKind::InputNumber));
        assert_eq!(kind(&FieldDescriptor::of::<f32>("a")), Some(ElementKind::InputNumber));
        assert_eq!(kind(&FieldDescriptor::of::<bool>("a")), Some(ElementKind::InputCheckbox));
        assert_eq!(kind(&FieldDescriptor::of::<NaiveDate>("a")), Some(ElementKind::InputDate));
        assert_eq!(
            kind(&FieldDescriptor::of::<NaiveDateTime>("a")),
            Some(ElementKind::InputDateTimeLocal)
        );
        assert_eq!(kind(&FieldDescriptor::of::<NaiveTime>("a")), Some(ElementKind::InputTime));
        assert_eq!(
            kind(&FieldDescriptor::new(
                "genre",
                crate::forms::descriptor::enum_field_type::<Genre>()
            )),
            Some(ElementKind::Select)
        );
    }

    #[test]
    fn test_hint_wins_over_type() {
        let textarea = FieldDescriptor::of::<u32>("notes").textarea(Some(4), None);
        assert_eq!(kind(&textarea), Some(ElementKind::Textarea));

        let radio = FieldDescriptor::new(
            "genre",
            crate::forms::descriptor::enum_field_type::<Genre>(),
        )
        .radio(None);
        assert_eq!(kind(&radio), Some(ElementKind::InputRadio));

        let password = FieldDescriptor::of::<String>("secret").password();
        assert_eq!(kind(&password), Some(ElementKind::InputPassword));
    }

    #[test]
    fn test_email_constraint_narrows_text() {
        let email = FieldDescriptor::of::<String>("contact").email();
        assert_eq!(kind(&email), Some(ElementKind::InputEmail));
    }

    #[test]
    fn test_auto_populated_is_skipped() {
        let created = FieldDescriptor::of::<chrono::NaiveDateTime>("date_created").auto_populated();
        assert_eq!(kind(&created), None);
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        let field = FieldDescriptor::new("cover", FieldType::Other("Image"));
        let err = resolve("Book", &field).unwrap_err();
        assert!(matches!(
            err,
            FieldsetError::UnresolvedFieldType { ref property, ref type_name, .. }
                if property == "cover" && type_name == "Image"
        ));
    }

    #[test]
    fn test_unknown_type_with_hint_resolves() {
        let field = FieldDescriptor::new("cover", FieldType::Other("Image")).hint(FieldHint::File {
            accept: Some("image/*".into()),
            multiple: false,
        });
        assert_eq!(kind(&field), Some(ElementKind::InputFile));
    }
}
