//! Option fetchers
//!
//! Fetchers turn a property's declared type (and optionally its current
//! value) into the entries of a choice element. Enum properties use the
//! built-in enum fetchers; anything else (for example a foreign-key id whose
//! options come from a repository) uses a fetcher registered in a
//! [`FetcherRegistry`] under the key named by the property's hint.
//!
//! Fetchers build entries without a `name`; the generator assigns the
//! property name to every radio and checkbox it receives.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::descriptor::{FieldType, FieldValue};
use super::field::{Checkbox, Radio, SelectOption};
use crate::messages::Message;

/// Produces `<option>` entries for a select
pub trait OptionFetcher: Send + Sync {
    /// Entries with nothing selected
    fn generate(&self, field_type: FieldType) -> Vec<SelectOption>;

    /// Entries with the ones matching `value` selected
    fn generate_bound(&self, field_type: FieldType, value: &FieldValue) -> Vec<SelectOption>;
}

/// Produces radio buttons for a radio group
pub trait RadioFetcher: Send + Sync {
    /// Buttons with nothing checked
    fn generate(&self, field_type: FieldType) -> Vec<Radio>;

    /// Buttons with the one matching `value` checked
    fn generate_bound(&self, field_type: FieldType, value: &FieldValue) -> Vec<Radio>;
}

/// Produces checkboxes for a checkbox group
pub trait CheckboxFetcher: Send + Sync {
    /// Checkboxes with nothing checked
    fn generate(&self, field_type: FieldType) -> Vec<Checkbox>;

    /// Checkboxes with the ones matching `value` checked
    fn generate_bound(&self, field_type: FieldType, value: &FieldValue) -> Vec<Checkbox>;
}

fn enum_constants(field_type: FieldType, fetcher: &str) -> Option<(&'static str, &'static [&'static str])> {
    match field_type {
        FieldType::Enum {
            type_name,
            constants,
        } => Some((type_name, constants)),
        other => {
            tracing::warn!(
                fetcher,
                field_type = other.type_name(),
                "enum fetcher used with a non-enum type"
            );
            None
        }
    }
}

fn matches_constant(value: Option<&FieldValue>, constant: &str) -> bool {
    match value {
        Some(FieldValue::Enum(name)) => *name == constant,
        Some(FieldValue::Text(text)) => text == constant,
        _ => false,
    }
}

/// Select options for every constant of an enum, in declaration order
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumOptionFetcher;

impl EnumOptionFetcher {
    fn options(field_type: FieldType, value: Option<&FieldValue>) -> Vec<SelectOption> {
        enum_constants(field_type, "EnumOptionFetcher").map_or_else(Vec::new, |(type_name, constants)| {
            constants
                .iter()
                .map(|constant| {
                    SelectOption::new(*constant, Message::for_enum_constant(type_name, constant))
                        .selected(matches_constant(value, constant))
                })
                .collect()
        })
    }
}

impl OptionFetcher for EnumOptionFetcher {
    fn generate(&self, field_type: FieldType) -> Vec<SelectOption> {
        Self::options(field_type, None)
    }

    fn generate_bound(&self, field_type: FieldType, value: &FieldValue) -> Vec<SelectOption> {
        Self::options(field_type, Some(value))
    }
}

/// One radio button per enum constant, ids are the lowercased constant
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumRadioFetcher;

impl EnumRadioFetcher {
    fn radios(field_type: FieldType, value: Option<&FieldValue>) -> Vec<Radio> {
        enum_constants(field_type, "EnumRadioFetcher").map_or_else(Vec::new, |(type_name, constants)| {
            constants
                .iter()
                .map(|constant| {
                    Radio::new(
                        String::new(),
                        *constant,
                        Message::for_enum_constant(type_name, constant),
                    )
                    .id(constant.to_lowercase())
                    .checked(matches_constant(value, constant))
                })
                .collect()
        })
    }
}

impl RadioFetcher for EnumRadioFetcher {
    fn generate(&self, field_type: FieldType) -> Vec<Radio> {
        Self::radios(field_type, None)
    }

    fn generate_bound(&self, field_type: FieldType, value: &FieldValue) -> Vec<Radio> {
        Self::radios(field_type, Some(value))
    }
}

/// One checkbox per enum constant, ids are the lowercased constant
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumCheckboxFetcher;

impl EnumCheckboxFetcher {
    fn checkboxes(field_type: FieldType, value: Option<&FieldValue>) -> Vec<Checkbox> {
        enum_constants(field_type, "EnumCheckboxFetcher").map_or_else(Vec::new, |(type_name, constants)| {
            constants
                .iter()
                .map(|constant| {
                    Checkbox::new(
                        String::new(),
                        *constant,
                        Message::for_enum_constant(type_name, constant),
                    )
                    .id(constant.to_lowercase())
                    .checked(matches_constant(value, constant))
                })
                .collect()
        })
    }
}

impl CheckboxFetcher for EnumCheckboxFetcher {
    fn generate(&self, field_type: FieldType) -> Vec<Checkbox> {
        Self::checkboxes(field_type, None)
    }

    fn generate_bound(&self, field_type: FieldType, value: &FieldValue) -> Vec<Checkbox> {
        Self::checkboxes(field_type, Some(value))
    }
}

/// Custom fetchers keyed by the name used in field hints
#[derive(Clone, Default)]
pub struct FetcherRegistry {
    options: HashMap<String, Arc<dyn OptionFetcher>>,
    radios: HashMap<String, Arc<dyn RadioFetcher>>,
    checkboxes: HashMap<String, Arc<dyn CheckboxFetcher>>,
}

impl FetcherRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a select option fetcher
    #[must_use]
    pub fn with_options(mut self, key: impl Into<String>, fetcher: impl OptionFetcher + 'static) -> Self {
        self.options.insert(key.into(), Arc::new(fetcher));
        self
    }

    /// Register a radio fetcher
    #[must_use]
    pub fn with_radios(mut self, key: impl Into<String>, fetcher: impl RadioFetcher + 'static) -> Self {
        self.radios.insert(key.into(), Arc::new(fetcher));
        self
    }

    /// Register a checkbox fetcher
    #[must_use]
    pub fn with_checkboxes(
        mut self,
        key: impl Into<String>,
        fetcher: impl CheckboxFetcher + 'static,
    ) -> Self {
        self.checkboxes.insert(key.into(), Arc::new(fetcher));
        self
    }

    /// Look up a select option fetcher
    #[must_use]
    pub fn option_fetcher(&self, key: &str) -> Option<Arc<dyn OptionFetcher>> {
        self.options.get(key).cloned()
    }

    /// Look up a radio fetcher
    #[must_use]
    pub fn radio_fetcher(&self, key: &str) -> Option<Arc<dyn RadioFetcher>> {
        self.radios.get(key).cloned()
    }

    /// Look up a checkbox fetcher
    #[must_use]
    pub fn checkbox_fetcher(&self, key: &str) -> Option<Arc<dyn CheckboxFetcher>> {
        self.checkboxes.get(key).cloned()
    }
}

impl fmt::Debug for FetcherRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetcherRegistry")
            .field("options", &self.options.keys().collect::<Vec<_>>())
            .field("radios", &self.radios.keys().collect::<Vec<_>>())
            .field("checkboxes", &self.checkboxes.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENRE: FieldType = FieldType::Enum {
        type_name: "Genre",
        constants: &["MUSIC", "SPORT", "THEATER"],
    };

    #[test]
    fn test_enum_options_unbound() {
        let options = EnumOptionFetcher.generate(GENRE);
        let values: Vec<_> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, ["MUSIC", "SPORT", "THEATER"]);
        assert!(options.iter().all(|o| !o.selected));
        assert_eq!(options[0].label, Message::new("MUSIC", "genre.music"));
    }

    #[test]
    fn test_enum_options_select_bound_value() {
        let options = EnumOptionFetcher.generate_bound(GENRE, &FieldValue::Enum("SPORT"));
        let selected: Vec<_> = options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(selected, ["SPORT"]);
    }

    #[test]
    fn test_enum_radios_use_lowercase_ids() {
        let radios = EnumRadioFetcher.generate_bound(GENRE, &FieldValue::Enum("THEATER"));
        assert_eq!(radios.len(), 3);
        assert_eq!(radios[2].id.as_deref(), Some("theater"));
        assert!(radios[2].checked);
        assert!(!radios[0].checked);
    }

    #[test]
    fn test_enum_checkboxes() {
        let checkboxes = EnumCheckboxFetcher.generate(GENRE);
        assert_eq!(checkboxes.len(), 3);
        assert_eq!(checkboxes[1].value, "SPORT");
        assert_eq!(checkboxes[1].id.as_deref(), Some("sport"));
    }

    #[test]
    fn test_enum_fetcher_with_non_enum_type_is_empty() {
        assert!(EnumOptionFetcher.generate(FieldType::Text).is_empty());
    }

    struct Colors;

    impl OptionFetcher for Colors {
        fn generate(&self, _field_type: FieldType) -> Vec<SelectOption> {
            vec![SelectOption::new("1", Message::of("Red"))]
        }

        fn generate_bound(&self, field_type: FieldType, value: &FieldValue) -> Vec<SelectOption> {
            self.generate(field_type)
                .into_iter()
                .map(|o| {
                    let selected = o.value == value.to_form_string();
                    o.selected(selected)
                })
                .collect()
        }
    }

    #[test]
    fn test_registry_lookup() {
        let registry = FetcherRegistry::new().with_options("colors", Colors);
        assert!(registry.option_fetcher("colors").is_some());
        assert!(registry.option_fetcher("sizes").is_none());
        assert!(registry.radio_fetcher("colors").is_none());
        assert!(format!("{registry:?}").contains("colors"));
    }
}
