//! Form descriptor tables
//!
//! A [`FormDescriptor`] lists a form type's properties in declaration order
//! together with their declared type, an optional element hint, and their
//! validation constraints. Descriptor tables are normally produced by
//! `#[derive(Form)]`, but can be written by hand:
//!
//! ```rust
//! use acton_fieldset::forms::{FieldDescriptor, FieldValue, Form, FormDescriptor, FormValue};
//!
//! struct Login {
//!     email: String,
//!     password: String,
//! }
//!
//! impl Form for Login {
//!     fn describe() -> FormDescriptor {
//!         FormDescriptor::new("Login")
//!             .field(FieldDescriptor::of::<String>("email").email().not_blank())
//!             .field(FieldDescriptor::of::<String>("password").password().not_blank())
//!     }
//!
//!     fn value_of(&self, property: &str) -> Option<FieldValue> {
//!         match property {
//!             "email" => self.email.to_field_value(),
//!             "password" => self.password.to_field_value(),
//!             _ => None,
//!         }
//!     }
//! }
//! ```

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;
use std::fmt;

/// Declared type of a form property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// String-like value
    Text,
    /// Signed or unsigned integer
    Integer,
    /// Floating point number
    Decimal,
    /// Boolean flag
    Boolean,
    /// Calendar date
    Date,
    /// Local date and time
    DateTime,
    /// Local time of day
    Time,
    /// Closed set of named constants
    Enum {
        /// Enum type name
        type_name: &'static str,
        /// Constant names in declaration order
        constants: &'static [&'static str],
    },
    /// Any other type; only usable together with an explicit hint
    Other(&'static str),
}

impl FieldType {
    /// Human-readable type name used in error messages
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "date-time",
            Self::Time => "time",
            Self::Enum { type_name, .. } | Self::Other(type_name) => *type_name,
        }
    }
}

/// A bound property value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Text value
    Text(String),
    /// Integer value (wide enough for every primitive integer)
    Integer(i128),
    /// Floating point value
    Decimal(f64),
    /// Boolean value
    Boolean(bool),
    /// Calendar date
    Date(NaiveDate),
    /// Local date and time
    DateTime(NaiveDateTime),
    /// Local time of day
    Time(NaiveTime),
    /// Enum constant name
    Enum(&'static str),
}

/// Shortest `strftime` format that keeps every non-zero component of `time`
fn time_format(time: NaiveTime) -> &'static str {
    if time.nanosecond() != 0 {
        "%H:%M:%S%.f"
    } else if time.second() != 0 {
        "%H:%M:%S"
    } else {
        "%H:%M"
    }
}

impl FieldValue {
    /// Format the value the way HTML inputs expect it
    ///
    /// Dates use `YYYY-MM-DD`. Date-times and times use minute precision,
    /// adding seconds when they are non-zero and fractional seconds when the
    /// value has any. A minute-precision date-time such as `2018-07-22T19:30`
    /// is not accepted by `NaiveDateTime::from_str`; parse it with the
    /// `%Y-%m-%dT%H:%M` format instead.
    #[must_use]
    pub fn to_form_string(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Integer(n) => n.to_string(),
            Self::Decimal(n) => n.to_string(),
            Self::Boolean(b) => b.to_string(),
            Self::Date(date) => date.format("%Y-%m-%d").to_string(),
            Self::DateTime(dt) => format!(
                "{}T{}",
                dt.date().format("%Y-%m-%d"),
                dt.time().format(time_format(dt.time()))
            ),
            Self::Time(time) => time.format(time_format(*time)).to_string(),
            Self::Enum(name) => (*name).to_string(),
        }
    }

    /// Truthiness used when binding checkboxes
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Boolean(b) => *b,
            Self::Text(text) => text.eq_ignore_ascii_case("true") || text == "on",
            Self::Integer(n) => *n != 0,
            _ => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_form_string())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(i128::from(value))
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Integer(i128::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<NaiveTime> for FieldValue {
    fn from(value: NaiveTime) -> Self {
        Self::Time(value)
    }
}

/// Explicit element-kind override carried by a property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum FieldHint {
    /// Render as `<select>`, optionally through a registered option fetcher
    Select {
        /// Registry key of a custom option fetcher
        fetcher: Option<String>,
        /// Allow several selected options
        multiple: bool,
    },
    /// Render one radio button per option
    Radio {
        /// Registry key of a custom radio fetcher
        fetcher: Option<String>,
    },
    /// Render one checkbox per option
    Checkbox {
        /// Registry key of a custom checkbox fetcher
        fetcher: Option<String>,
    },
    /// Render as `<textarea>`
    Textarea {
        /// Visible text lines
        rows: Option<u32>,
        /// Visible width in characters
        cols: Option<u32>,
    },
    /// Rich text editor bound through a hidden input
    TrixEditor,
    /// `<input type="email">`
    Email,
    /// `<input type="tel">`
    Tel,
    /// `<input type="url">`
    Url,
    /// `<input type="password">`
    Password,
    /// `<input type="hidden">`
    Hidden,
    /// `<input type="file">`
    File {
        /// Accepted MIME types or extensions
        accept: Option<String>,
        /// Allow several files
        multiple: bool,
    },
}

/// Validation constraints copied onto element attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Constraints {
    /// Must contain non-whitespace text
    pub not_blank: bool,
    /// Must be present
    pub not_null: bool,
    /// Must be supplied by the user
    pub required: bool,
    /// Must be strictly positive
    pub positive: bool,
    /// Lower numeric or temporal bound
    pub min: Option<String>,
    /// Upper numeric or temporal bound
    pub max: Option<String>,
    /// Minimum text length
    pub min_length: Option<u32>,
    /// Maximum text length
    pub max_length: Option<u32>,
    /// Regular expression the value must match
    pub pattern: Option<String>,
    /// Must be an email address
    pub email: bool,
    /// Placeholder text
    pub placeholder: Option<String>,
}

impl Constraints {
    /// Whether the element should carry the `required` attribute
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.not_blank || self.not_null || self.required
    }

    /// Effective lower bound
    ///
    /// `positive` means a minimum of one and takes precedence over `min`.
    #[must_use]
    pub fn effective_min(&self) -> Option<String> {
        if self.positive {
            Some("1".to_string())
        } else {
            self.min.clone()
        }
    }
}

/// One property of a form type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Property name, also used as the element name and id
    pub name: String,
    /// Declared type
    pub field_type: FieldType,
    /// Whether the property may be absent
    pub nullable: bool,
    /// Explicit element-kind override
    pub hint: Option<FieldHint>,
    /// Validation constraints
    pub constraints: Constraints,
    /// System-managed property excluded from generated fieldsets
    pub auto_populated: bool,
}

impl FieldDescriptor {
    /// Describe a property of an explicit type
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            nullable: false,
            hint: None,
            constraints: Constraints::default(),
            auto_populated: false,
        }
    }

    /// Describe a property whose type implements [`FormValue`]
    #[must_use]
    pub fn of<T: FormValue + ?Sized>(name: impl Into<String>) -> Self {
        let mut descriptor = Self::new(name, T::field_type());
        descriptor.nullable = T::nullable();
        descriptor
    }

    /// Set the element hint
    #[must_use]
    pub fn hint(mut self, hint: FieldHint) -> Self {
        self.hint = Some(hint);
        self
    }

    /// Render as a select, optionally backed by a registered fetcher
    #[must_use]
    pub fn select(self, fetcher: Option<&str>) -> Self {
        self.hint(FieldHint::Select {
            fetcher: fetcher.map(ToString::to_string),
            multiple: false,
        })
    }

    /// Render as a group of radio buttons
    #[must_use]
    pub fn radio(self, fetcher: Option<&str>) -> Self {
        self.hint(FieldHint::Radio {
            fetcher: fetcher.map(ToString::to_string),
        })
    }

    /// Render as a group of checkboxes
    #[must_use]
    pub fn checkbox(self, fetcher: Option<&str>) -> Self {
        self.hint(FieldHint::Checkbox {
            fetcher: fetcher.map(ToString::to_string),
        })
    }

    /// Render as a textarea
    #[must_use]
    pub fn textarea(self, rows: Option<u32>, cols: Option<u32>) -> Self {
        self.hint(FieldHint::Textarea { rows, cols })
    }

    /// Render as a password input
    #[must_use]
    pub fn password(self) -> Self {
        self.hint(FieldHint::Password)
    }

    /// Render as a hidden input
    #[must_use]
    pub fn hidden(self) -> Self {
        self.hint(FieldHint::Hidden)
    }

    /// Require an email address
    #[must_use]
    pub const fn email(mut self) -> Self {
        self.constraints.email = true;
        self
    }

    /// Require non-blank text
    #[must_use]
    pub const fn not_blank(mut self) -> Self {
        self.constraints.not_blank = true;
        self
    }

    /// Require a value
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.constraints.required = true;
        self
    }

    /// Require a strictly positive number
    #[must_use]
    pub const fn positive(mut self) -> Self {
        self.constraints.positive = true;
        self
    }

    /// Lower bound
    #[must_use]
    pub fn min(mut self, min: impl Into<String>) -> Self {
        self.constraints.min = Some(min.into());
        self
    }

    /// Upper bound
    #[must_use]
    pub fn max(mut self, max: impl Into<String>) -> Self {
        self.constraints.max = Some(max.into());
        self
    }

    /// Text length bounds
    #[must_use]
    pub const fn length(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.constraints.min_length = min;
        self.constraints.max_length = max;
        self
    }

    /// Pattern the value must match
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.constraints.pattern = Some(pattern.into());
        self
    }

    /// Placeholder text
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.constraints.placeholder = Some(placeholder.into());
        self
    }

    /// Mark as system-managed
    #[must_use]
    pub const fn auto_populated(mut self) -> Self {
        self.auto_populated = true;
        self
    }
}

/// Descriptor table of a form type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormDescriptor {
    /// Form type name, lowercased in message codes
    pub name: String,
    /// Properties in declaration order
    pub fields: Vec<FieldDescriptor>,
}

impl FormDescriptor {
    /// Create an empty descriptor table
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a property
    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Look up a property by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// A Rust type usable as a form property
pub trait FormValue {
    /// Declared type used for element resolution
    fn field_type() -> FieldType;

    /// Whether the type admits an absent value
    fn nullable() -> bool {
        false
    }

    /// Current value, `None` when absent
    fn to_field_value(&self) -> Option<FieldValue>;
}

/// A form type with a descriptor table
pub trait Form: 'static {
    /// Build the descriptor table
    fn describe() -> FormDescriptor;

    /// Current value of a property, `None` when absent or unknown
    fn value_of(&self, property: &str) -> Option<FieldValue>;
}

/// A unit-only enum usable as a form property
pub trait FormEnum: Sized + 'static {
    /// Enum type name
    const TYPE_NAME: &'static str;

    /// Constant names in declaration order
    const CONSTANTS: &'static [&'static str];

    /// Constant name of this value
    fn constant_name(&self) -> &'static str;

    /// Value named by a submitted constant, `None` when no constant matches
    fn from_constant(constant: &str) -> Option<Self>;
}

/// Declared type of a [`FormEnum`]
#[must_use]
pub const fn enum_field_type<E: FormEnum>() -> FieldType {
    FieldType::Enum {
        type_name: E::TYPE_NAME,
        constants: E::CONSTANTS,
    }
}

impl FormValue for String {
    fn field_type() -> FieldType {
        FieldType::Text
    }

    fn to_field_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Text(self.clone()))
    }
}

impl FormValue for str {
    fn field_type() -> FieldType {
        FieldType::Text
    }

    fn to_field_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Text(self.to_string()))
    }
}

macro_rules! impl_integer_form_value {
    ($($ty:ty),*) => {
        $(
            impl FormValue for $ty {
                fn field_type() -> FieldType {
                    FieldType::Integer
                }

                fn to_field_value(&self) -> Option<FieldValue> {
                    i128::try_from(*self).ok().map(FieldValue::Integer)
                }
            }
        )*
    };
}

impl_integer_form_value!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl FormValue for f32 {
    fn field_type() -> FieldType {
        FieldType::Decimal
    }

    fn to_field_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Decimal(f64::from(*self)))
    }
}

impl FormValue for f64 {
    fn field_type() -> FieldType {
        FieldType::Decimal
    }

    fn to_field_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Decimal(*self))
    }
}

impl FormValue for bool {
    fn field_type() -> FieldType {
        FieldType::Boolean
    }

    fn to_field_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Boolean(*self))
    }
}

impl FormValue for NaiveDate {
    fn field_type() -> FieldType {
        FieldType::Date
    }

    fn to_field_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Date(*self))
    }
}

impl FormValue for NaiveDateTime {
    fn field_type() -> FieldType {
        FieldType::DateTime
    }

    fn to_field_value(&self) -> Option<FieldValue> {
        Some(FieldValue::DateTime(*self))
    }
}

impl FormValue for NaiveTime {
    fn field_type() -> FieldType {
        FieldType::Time
    }

    fn to_field_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Time(*self))
    }
}

impl<T: FormValue> FormValue for Option<T> {
    fn field_type() -> FieldType {
        T::field_type()
    }

    fn nullable() -> bool {
        true
    }

    fn to_field_value(&self) -> Option<FieldValue> {
        self.as_ref().and_then(FormValue::to_field_value)
    }
}

/// Property lookups used by `#[derive(Form)]`
///
/// Types implementing [`FormValue`] describe and bind themselves. Any other
/// type is described as [`FieldType::Other`] and never binds a value, so it
/// needs a hint such as `#[form(file)]` to resolve.
#[doc(hidden)]
pub mod dispatch {
    use std::any::type_name;
    use std::marker::PhantomData;

    use super::{FieldDescriptor, FieldType, FieldValue, FormValue};

    /// Marker for the declared type of a property
    pub struct Property<T: ?Sized>(pub PhantomData<T>);

    /// Lookup for properties whose type implements [`FormValue`]
    pub trait ValueProperty {
        /// Declared property type
        type Value: ?Sized;

        /// Descriptor for a property of this type
        fn descriptor(&self, name: &str) -> FieldDescriptor;

        /// Bound value of a property of this type
        fn bind(&self, value: &Self::Value) -> Option<FieldValue>;
    }

    impl<T: FormValue + ?Sized> ValueProperty for Property<T> {
        type Value = T;

        fn descriptor(&self, name: &str) -> FieldDescriptor {
            FieldDescriptor::of::<T>(name)
        }

        fn bind(&self, value: &T) -> Option<FieldValue> {
            value.to_field_value()
        }
    }

    /// Fallback lookup for every other property type
    pub trait OpaqueProperty {
        /// Declared property type
        type Value: ?Sized;

        /// Descriptor naming the type as [`FieldType::Other`]
        fn descriptor(&self, name: &str) -> FieldDescriptor;

        /// Always `None`
        fn bind(&self, value: &Self::Value) -> Option<FieldValue>;
    }

    impl<T: ?Sized> OpaqueProperty for &Property<T> {
        type Value = T;

        fn descriptor(&self, name: &str) -> FieldDescriptor {
            FieldDescriptor::new(name, FieldType::Other(type_name::<T>()))
        }

        fn bind(&self, _value: &T) -> Option<FieldValue> {
            None
        }
    }
}
