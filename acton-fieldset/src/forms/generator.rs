//! Fieldset generation
//!
//! [`FieldsetGenerator`] walks a form type's descriptor table in declaration
//! order, resolves one element per property, binds the instance's current
//! values, attaches validation errors, and lets the caller adjust each
//! element before it is finalized.
//!
//! # Example
//!
//! ```rust
//! use acton_fieldset::forms::{ConstraintViolations, FieldsetGenerator, Form, FormEnum};
//!
//! #[derive(FormEnum, Clone, Copy)]
//! enum Genre {
//!     Music,
//!     Sport,
//!     Theater,
//! }
//!
//! #[derive(Form)]
//! struct EventForm {
//!     #[form(not_blank)]
//!     name: String,
//!     genre: Genre,
//! }
//!
//! let generator = FieldsetGenerator::new();
//! let form = EventForm { name: String::new(), genre: Genre::Sport };
//!
//! let mut violations = ConstraintViolations::new();
//! violations.add("name", "not_blank", "must not be blank");
//!
//! let fieldset = generator.generate_invalid(&form, &violations)?;
//! assert_eq!(fieldset.fields().len(), 2);
//! assert!(fieldset.has_errors());
//! # Ok::<(), acton_fieldset::FieldsetError>(())
//! ```

use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::builder::ElementBuilder;
use super::descriptor::{FieldDescriptor, FieldHint, FieldType, FieldValue, Form, FormDescriptor};
use super::error::ConstraintViolations;
use super::fetcher::{
    CheckboxFetcher, EnumCheckboxFetcher, EnumOptionFetcher, EnumRadioFetcher, FetcherRegistry,
    OptionFetcher, RadioFetcher,
};
use super::field::{Checkbox, ElementKind, Radio, SelectOption};
use super::fieldset::Fieldset;
use super::resolver;
use crate::error::{FieldsetError, Result};
use crate::messages::Message;

/// Generates fieldsets from form types and instances
///
/// Descriptor tables are memoized per type. The cache is read-mostly and
/// population is idempotent, so one generator can be shared across threads.
#[derive(Debug, Default)]
pub struct FieldsetGenerator {
    fetchers: FetcherRegistry,
    cache: RwLock<HashMap<TypeId, Arc<FormDescriptor>>>,
}

impl FieldsetGenerator {
    /// Create a generator without custom fetchers
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator with custom fetchers
    #[must_use]
    pub fn with_fetchers(fetchers: FetcherRegistry) -> Self {
        Self {
            fetchers,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Registered custom fetchers
    #[must_use]
    pub const fn fetchers(&self) -> &FetcherRegistry {
        &self.fetchers
    }

    /// Descriptor table of a form type, built once and cached
    ///
    /// # Errors
    ///
    /// Returns [`FieldsetError::DuplicateProperty`] if the table declares a
    /// property name twice.
    pub fn descriptor<F: Form>(&self) -> Result<Arc<FormDescriptor>> {
        let type_id = TypeId::of::<F>();
        if let Some(descriptor) = self.cache.read().get(&type_id) {
            return Ok(Arc::clone(descriptor));
        }

        let descriptor = F::describe();
        check_unique_names(&descriptor)?;

        let mut cache = self.cache.write();
        let entry = cache.entry(type_id).or_insert_with(|| {
            tracing::debug!(
                form = %descriptor.name,
                fields = descriptor.fields.len(),
                "cached form descriptor"
            );
            Arc::new(descriptor)
        });
        Ok(Arc::clone(entry))
    }

    /// Blank fieldset for a form type
    pub fn generate<F: Form>(&self) -> Result<Fieldset> {
        self.build::<F>(None, None, &mut |_, _| {})
    }

    /// Blank fieldset, adjusting each element through `customize`
    pub fn generate_with<F: Form>(
        &self,
        mut customize: impl FnMut(&str, &mut ElementBuilder),
    ) -> Result<Fieldset> {
        self.build::<F>(None, None, &mut customize)
    }

    /// Fieldset bound to an instance's current values
    pub fn generate_for<F: Form>(&self, instance: &F) -> Result<Fieldset> {
        self.build(Some(instance), None, &mut |_, _| {})
    }

    /// Bound fieldset, adjusting each element through `customize`
    pub fn generate_for_with<F: Form>(
        &self,
        instance: &F,
        mut customize: impl FnMut(&str, &mut ElementBuilder),
    ) -> Result<Fieldset> {
        self.build(Some(instance), None, &mut customize)
    }

    /// Bound fieldset with validation errors attached
    pub fn generate_invalid<F: Form>(
        &self,
        instance: &F,
        violations: &ConstraintViolations,
    ) -> Result<Fieldset> {
        self.build(Some(instance), Some(violations), &mut |_, _| {})
    }

    /// Bound fieldset with validation errors, adjusting each element through `customize`
    pub fn generate_invalid_with<F: Form>(
        &self,
        instance: &F,
        violations: &ConstraintViolations,
        mut customize: impl FnMut(&str, &mut ElementBuilder),
    ) -> Result<Fieldset> {
        self.build(Some(instance), Some(violations), &mut customize)
    }

    fn build<F: Form>(
        &self,
        instance: Option<&F>,
        violations: Option<&ConstraintViolations>,
        customize: &mut dyn FnMut(&str, &mut ElementBuilder),
    ) -> Result<Fieldset> {
        let descriptor = self.descriptor::<F>()?;
        let form_name = descriptor.name.as_str();
        let mut fields = Vec::with_capacity(descriptor.fields.len());
        let mut matched = HashSet::new();

        for field in &descriptor.fields {
            let Some(kind) = resolver::resolve(form_name, field)? else {
                continue;
            };
            tracing::trace!(form = form_name, property = %field.name, ?kind, "resolved element");

            let value = instance.and_then(|instance| instance.value_of(&field.name));
            let mut builder = self.default_builder(form_name, field, kind, value.as_ref())?;

            if let Some(violations) = violations.filter(|_| kind.shows_errors()) {
                let mut errors: Vec<Message> = violations
                    .for_property(&field.name)
                    .map(|violation| violation.to_message(form_name))
                    .collect();
                errors.sort();
                builder.errors(errors);
            }

            customize(&field.name, &mut builder);
            // Violations on a field that cannot show them fall back to the fieldset
            if kind.shows_errors() {
                matched.insert(field.name.as_str());
            }
            fields.push(builder.build());
        }

        let errors = violations.map_or_else(Vec::new, |violations| {
            violations
                .iter()
                .filter(|violation| {
                    violation
                        .last_node()
                        .is_none_or(|node| !matched.contains(node))
                })
                .map(|violation| violation.to_message(form_name))
                .collect()
        });

        Ok(Fieldset::new(fields, errors))
    }

    fn default_builder(
        &self,
        form_name: &str,
        field: &FieldDescriptor,
        kind: ElementKind,
        value: Option<&FieldValue>,
    ) -> Result<ElementBuilder> {
        let constraints = &field.constraints;
        let mut builder = ElementBuilder::new(kind, field.name.clone());
        builder
            .id(field.name.clone())
            .label(Message::for_property(form_name, &field.name))
            .required(constraints.is_required());

        if let Some(value) = value {
            builder.value(value.clone());
        }
        if let Some(placeholder) = &constraints.placeholder {
            builder.placeholder(placeholder.clone());
        }
        if let Some(min) = constraints.effective_min() {
            builder.min(min);
        }
        if let Some(max) = &constraints.max {
            builder.max(max.clone());
        }
        if let Some(pattern) = &constraints.pattern {
            builder.pattern(pattern.clone());
        }
        if let Some(len) = constraints.min_length {
            builder.min_length(len);
        }
        if let Some(len) = constraints.max_length {
            builder.max_length(len);
        }

        match (kind, &field.hint) {
            (ElementKind::Textarea, Some(FieldHint::Textarea { rows, cols })) => {
                if let Some(rows) = rows {
                    builder.rows(*rows);
                }
                if let Some(cols) = cols {
                    builder.cols(*cols);
                }
            }
            (ElementKind::InputFile, Some(FieldHint::File { accept, multiple })) => {
                builder.multiple(*multiple);
                if let Some(accept) = accept {
                    builder.accept(accept.clone());
                }
            }
            (ElementKind::InputHidden, _) => {
                builder.clear_label();
            }
            (ElementKind::Select, hint) => {
                let (fetcher, multiple) = match hint {
                    Some(FieldHint::Select { fetcher, multiple }) => (fetcher.as_deref(), *multiple),
                    _ => (None, false),
                };
                builder
                    .multiple(multiple)
                    .options(self.select_options(form_name, field, fetcher, value)?);
            }
            (ElementKind::InputRadio, hint) => {
                let fetcher = match hint {
                    Some(FieldHint::Radio { fetcher }) => fetcher.as_deref(),
                    _ => None,
                };
                let radios = self
                    .radios(form_name, field, fetcher, value)?
                    .into_iter()
                    .map(|mut radio| {
                        radio.name.clone_from(&field.name);
                        radio
                    })
                    .collect();
                builder.radios(radios);
            }
            (ElementKind::InputCheckbox, hint) => {
                let fetcher = match hint {
                    Some(FieldHint::Checkbox { fetcher }) => fetcher.as_deref(),
                    _ => None,
                };
                let checkboxes = self.checkboxes(form_name, field, fetcher, value)?;
                let checkboxes = if let Some(checkboxes) = checkboxes {
                    checkboxes
                        .into_iter()
                        .map(|mut checkbox| {
                            checkbox.name.clone_from(&field.name);
                            checkbox
                        })
                        .collect()
                } else {
                    let label = builder
                        .current_label()
                        .cloned()
                        .unwrap_or_else(|| Message::for_property(form_name, &field.name));
                    builder.clear_label();
                    vec![Checkbox::new(field.name.clone(), "true", label)
                        .id(field.name.clone())
                        .checked(value.is_some_and(FieldValue::is_truthy))]
                };
                builder.clear_value().checkboxes(checkboxes);
            }
            _ => {}
        }

        Ok(builder)
    }

    fn select_options(
        &self,
        form_name: &str,
        field: &FieldDescriptor,
        fetcher: Option<&str>,
        value: Option<&FieldValue>,
    ) -> Result<Vec<SelectOption>> {
        let fetcher: Arc<dyn OptionFetcher> = match fetcher {
            Some(key) => self
                .fetchers
                .option_fetcher(key)
                .ok_or_else(|| missing_fetcher(form_name, field, key))?,
            None if is_enum(field.field_type) => Arc::new(EnumOptionFetcher),
            None => return Ok(Vec::new()),
        };
        Ok(match value {
            Some(value) => fetcher.generate_bound(field.field_type, value),
            None => fetcher.generate(field.field_type),
        })
    }

    fn radios(
        &self,
        form_name: &str,
        field: &FieldDescriptor,
        fetcher: Option<&str>,
        value: Option<&FieldValue>,
    ) -> Result<Vec<Radio>> {
        let fetcher: Arc<dyn RadioFetcher> = match fetcher {
            Some(key) => self
                .fetchers
                .radio_fetcher(key)
                .ok_or_else(|| missing_fetcher(form_name, field, key))?,
            None if is_enum(field.field_type) => Arc::new(EnumRadioFetcher),
            None => return Ok(Vec::new()),
        };
        Ok(match value {
            Some(value) => fetcher.generate_bound(field.field_type, value),
            None => fetcher.generate(field.field_type),
        })
    }

    /// Checkboxes from a fetcher, or `None` when the property is a single flag
    fn checkboxes(
        &self,
        form_name: &str,
        field: &FieldDescriptor,
        fetcher: Option<&str>,
        value: Option<&FieldValue>,
    ) -> Result<Option<Vec<Checkbox>>> {
        let fetcher: Arc<dyn CheckboxFetcher> = match fetcher {
            Some(key) => self
                .fetchers
                .checkbox_fetcher(key)
                .ok_or_else(|| missing_fetcher(form_name, field, key))?,
            None if is_enum(field.field_type) => Arc::new(EnumCheckboxFetcher),
            None => return Ok(None),
        };
        Ok(Some(match value {
            Some(value) => fetcher.generate_bound(field.field_type, value),
            None => fetcher.generate(field.field_type),
        }))
    }
}

const fn is_enum(field_type: FieldType) -> bool {
    matches!(field_type, FieldType::Enum { .. })
}

fn missing_fetcher(form_name: &str, field: &FieldDescriptor, key: &str) -> FieldsetError {
    FieldsetError::FetcherResolution {
        form: form_name.to_string(),
        property: field.name.clone(),
        fetcher: key.to_string(),
    }
}

fn check_unique_names(descriptor: &FormDescriptor) -> Result<()> {
    let mut seen = HashSet::new();
    for field in &descriptor.fields {
        if field.name.is_empty() || !seen.insert(field.name.as_str()) {
            return Err(FieldsetError::DuplicateProperty {
                form: descriptor.name.clone(),
                property: field.name.clone(),
            });
        }
    }
    Ok(())
}
