//! Constraint violations
//!
//! A validation failure is a list of [`ConstraintViolation`]s. Each violation
//! carries the dotted property path it refers to, the name of the violated
//! constraint, and a message. The generator matches violations to fields by
//! the last node of their path; violations with an empty path, or whose last
//! node matches no generated field, become fieldset-level errors.

use crate::messages::Message;

/// A single failed constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    /// Dotted property path, empty for class-level violations
    pub path: String,
    /// Name of the violated constraint
    pub constraint: String,
    /// Human-readable message
    pub message: String,
}

impl ConstraintViolation {
    /// Create a violation of a property
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        constraint: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            constraint: constraint.into(),
            message: message.into(),
        }
    }

    /// Create a class-level violation
    #[must_use]
    pub fn global(constraint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(String::new(), constraint, message)
    }

    /// Last property name of the path, without any index suffix
    ///
    /// `address.city` yields `city`, `items[2]` yields `items`, and an empty
    /// path yields `None`.
    #[must_use]
    pub fn last_node(&self) -> Option<&str> {
        let last = self.path.rsplit('.').next()?;
        let last = last.split('[').next().unwrap_or(last);
        (!last.is_empty()).then_some(last)
    }

    /// Message for this violation within a form
    ///
    /// The code is `<form>.<property>.<constraint>`, or `<form>.<constraint>`
    /// for class-level violations, all lowercased.
    #[must_use]
    pub fn to_message(&self, form_name: &str) -> Message {
        let code = match self.last_node() {
            Some(node) => format!("{form_name}.{node}.{}", self.constraint),
            None => format!("{form_name}.{}", self.constraint),
        };
        Message::new(self.message.clone(), code.to_lowercase())
    }
}

/// Collection of constraint violations
///
/// # Examples
///
/// ```rust
/// use acton_fieldset::forms::ConstraintViolations;
///
/// let mut violations = ConstraintViolations::new();
/// violations.add("name", "not_blank", "must not be blank");
/// violations.add_global("password_match", "passwords do not match");
///
/// assert_eq!(violations.len(), 2);
/// assert_eq!(violations.for_property("name").count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConstraintViolations {
    violations: Vec<ConstraintViolation>,
}

impl ConstraintViolations {
    /// Create an empty collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property violation
    pub fn add(
        &mut self,
        path: impl Into<String>,
        constraint: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.violations
            .push(ConstraintViolation::new(path, constraint, message));
    }

    /// Add a class-level violation
    pub fn add_global(&mut self, constraint: impl Into<String>, message: impl Into<String>) {
        self.violations
            .push(ConstraintViolation::global(constraint, message));
    }

    /// Add a violation
    pub fn push(&mut self, violation: ConstraintViolation) {
        self.violations.push(violation);
    }

    /// Whether the collection is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of violations
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Violations whose last path node is `property`
    pub fn for_property<'a>(
        &'a self,
        property: &'a str,
    ) -> impl Iterator<Item = &'a ConstraintViolation> + 'a {
        self.violations
            .iter()
            .filter(move |v| v.last_node() == Some(property))
    }

    /// Iterate over all violations
    pub fn iter(&self) -> impl Iterator<Item = &ConstraintViolation> {
        self.violations.iter()
    }

    /// Merge violations from another collection
    pub fn merge(&mut self, other: &Self) {
        self.violations.extend(other.violations.iter().cloned());
    }

    fn collect_validator_errors(&mut self, prefix: &str, errors: &validator::ValidationErrors) {
        for (field, kind) in errors.errors() {
            let field = field.to_string();
            match kind {
                validator::ValidationErrorsKind::Field(field_errors) => {
                    let path = if field == "__all__" {
                        prefix.to_string()
                    } else {
                        join_path(prefix, &field)
                    };
                    for error in field_errors {
                        let message = error
                            .message
                            .as_ref()
                            .map_or_else(|| error.code.to_string(), ToString::to_string);
                        self.add(path.clone(), error.code.to_string(), message);
                    }
                }
                validator::ValidationErrorsKind::Struct(inner) => {
                    self.collect_validator_errors(&join_path(prefix, &field), inner);
                }
                validator::ValidationErrorsKind::List(items) => {
                    for (index, inner) in items {
                        let path = format!("{}[{index}]", join_path(prefix, &field));
                        self.collect_validator_errors(&path, inner);
                    }
                }
            }
        }
    }
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

impl FromIterator<ConstraintViolation> for ConstraintViolations {
    fn from_iter<I: IntoIterator<Item = ConstraintViolation>>(iter: I) -> Self {
        Self {
            violations: iter.into_iter().collect(),
        }
    }
}

/// Convert from validator crate's `ValidationErrors`
///
/// Struct-level errors (the `__all__` key) become class-level violations and
/// nested struct or list errors keep their full path.
impl From<validator::ValidationErrors> for ConstraintViolations {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut result = Self::new();
        result.collect_validator_errors("", &errors);
        result
    }
}

impl From<&validator::ValidationErrors> for ConstraintViolations {
    fn from(errors: &validator::ValidationErrors) -> Self {
        let mut result = Self::new();
        result.collect_validator_errors("", errors);
        result
    }
}
