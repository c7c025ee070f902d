//! Localizable messages
//!
//! A [`Message`] pairs a default text with an optional message code. Codes are
//! resolved at render time through a [`MessageSource`] for the request's
//! [`Locale`]; a message without a code always renders its default text.
//!
//! # Example
//!
//! ```rust
//! use acton_fieldset::messages::{Locale, Message, StaticMessageSource};
//!
//! let source = StaticMessageSource::new().with_message("es", "book.title", "Título");
//! let label = Message::new("Title", "book.title");
//!
//! assert_eq!(label.resolve(&source, &Locale::new("es")), "Título");
//! assert_eq!(label.resolve(&source, &Locale::new("en")), "Title");
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::error::{FieldsetError, Result};

/// A localizable string: default text plus an optional lookup code
///
/// Messages order by default text first, then by code (a missing code sorts
/// first), which is the order used for per-field error lists.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Message {
    default_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl Message {
    /// Create a message with a lookup code
    #[must_use]
    pub fn new(default_message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            default_message: default_message.into(),
            code: Some(code.into()),
        }
    }

    /// Create a message that is always rendered verbatim
    #[must_use]
    pub fn of(default_message: impl Into<String>) -> Self {
        Self {
            default_message: default_message.into(),
            code: None,
        }
    }

    /// Label for a form property: code `<form>.<property>`, humanized default text
    #[must_use]
    pub fn for_property(form_name: &str, property: &str) -> Self {
        Self::new(
            humanize(property),
            format!("{}.{property}", form_name.to_lowercase()),
        )
    }

    /// Label for an enum constant: code `<enum>.<constant>` lowercased
    #[must_use]
    pub fn for_enum_constant(enum_name: &str, constant: &str) -> Self {
        Self::new(
            constant,
            format!("{}.{}", enum_name.to_lowercase(), constant.to_lowercase()),
        )
    }

    /// Text used when the code has no translation
    #[must_use]
    pub fn default_message(&self) -> &str {
        &self.default_message
    }

    /// Lookup code, if any
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Resolve this message for a locale
    #[must_use]
    pub fn resolve(&self, source: &dyn MessageSource, locale: &Locale) -> String {
        match &self.code {
            Some(code) => source.resolve(code, &self.default_message, locale),
            None => self.default_message.clone(),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.default_message)
    }
}

/// Turn a property name into a capitalized phrase
///
/// Words are split on `_`, `-` and lower-to-upper camel-case boundaries.
/// `additional_info` and `additionalInfo` both become `Additional Info`.
#[must_use]
pub fn humanize(name: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut previous: Option<char> = None;

    for ch in name.chars() {
        if ch == '_' || ch == '-' || ch.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            previous = None;
            continue;
        }
        if ch.is_uppercase()
            && previous.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit())
            && !current.is_empty()
        {
            words.push(std::mem::take(&mut current));
        }
        current.push(ch);
        previous = Some(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| capitalize(word))
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

/// A language tag such as `en` or `en-US`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// Create a locale from a language tag
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The full language tag
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary language subtag (`en` for `en-US`)
    #[must_use]
    pub fn language(&self) -> &str {
        self.0
            .split(['-', '_'])
            .next()
            .unwrap_or(self.0.as_str())
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new("en")
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Locale-aware message lookup
pub trait MessageSource: Send + Sync {
    /// Resolve `code` for `locale`, returning `default_message` when there is no translation
    fn resolve(&self, code: &str, default_message: &str, locale: &Locale) -> String;
}

/// Message source without translations; every code resolves to its default text
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMessageSource;

impl MessageSource for DefaultMessageSource {
    fn resolve(&self, _code: &str, default_message: &str, _locale: &Locale) -> String {
        default_message.to_string()
    }
}

/// In-memory message bundles keyed by language tag
///
/// Lookups try the full tag, then the primary language, then fall back to the
/// default text. Bundles can be loaded from TOML:
///
/// ```toml
/// [en]
/// "eventcreateform.name" = "Event name"
///
/// [es]
/// "eventcreateform.name" = "Nombre del evento"
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticMessageSource {
    bundles: HashMap<String, HashMap<String, String>>,
}

impl StaticMessageSource {
    /// Create an empty message source
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a translation
    #[must_use]
    pub fn with_message(
        mut self,
        locale: impl Into<String>,
        code: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.insert(locale, code, text);
        self
    }

    /// Add a translation in place
    pub fn insert(
        &mut self,
        locale: impl Into<String>,
        code: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.bundles
            .entry(locale.into())
            .or_default()
            .insert(code.into(), text.into());
    }

    /// Parse bundles from a TOML document with one table per locale
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let bundles: HashMap<String, HashMap<String, String>> = toml::from_str(source)
            .map_err(|e| FieldsetError::Config(format!("invalid message bundle: {e}")))?;
        Ok(Self { bundles })
    }

    /// Load bundles from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            FieldsetError::Config(format!(
                "failed to read message bundle {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&source)
    }

    fn lookup(&self, locale: &str, code: &str) -> Option<&String> {
        self.bundles.get(locale).and_then(|bundle| bundle.get(code))
    }
}

impl MessageSource for StaticMessageSource {
    fn resolve(&self, code: &str, default_message: &str, locale: &Locale) -> String {
        self.lookup(locale.as_str(), code)
            .or_else(|| self.lookup(locale.language(), code))
            .map_or_else(|| default_message.to_string(), Clone::clone)
    }
}
