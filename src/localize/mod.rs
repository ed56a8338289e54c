//! Localized string resolution.
//!
//! Human-facing attributes (names, notes, URIs) are stored in one of three
//! shapes:
//!
//! - `null` or absent: no value, rendered as a placeholder
//! - a bare string: a canonical literal such as a CSS property name, shown
//!   code-formatted and never translated
//! - an object mapping language tags to text, e.g. `{"en": "Flexbox", "de": "..."}`
//!
//! [`LocalizedValue::resolve`] picks the requested language, falls back to
//! `"en"`, and finally to the empty string.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Language tag used when the requested language has no entry.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Placeholder shown for absent values.
pub const NONE_PLACEHOLDER: &str = "none";

/// A stored attribute that may be localized.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LocalizedValue {
    #[default]
    Absent,
    Canonical(String),
    Translations(BTreeMap<String, String>),
}

/// Outcome of resolving a [`LocalizedValue`] for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    None,
    Code(&'a str),
    Text(&'a str),
}

impl<'a> Resolved<'a> {
    /// The resolved text regardless of formatting; `None` when absent.
    #[must_use]
    pub fn as_text(&self) -> Option<&'a str> {
        match *self {
            Resolved::None => None,
            Resolved::Code(s) | Resolved::Text(s) => Some(s),
        }
    }
}

impl LocalizedValue {
    /// Interpret a raw attribute value.
    ///
    /// Non-string entries of a translation object are ignored; scalar numbers
    /// and booleans are treated as canonical literals.
    #[must_use]
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => LocalizedValue::Absent,
            Some(Value::String(s)) => LocalizedValue::Canonical(s.clone()),
            Some(Value::Object(map)) => LocalizedValue::Translations(
                map.iter()
                    .filter_map(|(lang, text)| text.as_str().map(|t| (lang.clone(), t.to_string())))
                    .collect(),
            ),
            Some(other @ (Value::Number(_) | Value::Bool(_))) => {
                LocalizedValue::Canonical(other.to_string())
            }
            Some(Value::Array(_)) => LocalizedValue::Absent,
        }
    }

    /// Resolve for `lang`, falling back to `"en"`, then to `""`.
    #[must_use]
    pub fn resolve(&self, lang: &str) -> Resolved<'_> {
        match self {
            LocalizedValue::Absent => Resolved::None,
            LocalizedValue::Canonical(s) => Resolved::Code(s),
            LocalizedValue::Translations(map) => Resolved::Text(
                map.get(lang).or_else(|| map.get(FALLBACK_LANGUAGE)).map_or("", String::as_str),
            ),
        }
    }

    /// Resolved text for building URLs and other plain strings; empty when absent.
    #[must_use]
    pub fn plain(&self, lang: &str) -> String {
        self.resolve(lang).as_text().unwrap_or_default().to_string()
    }

    /// Whether the value carries any non-empty text.
    #[must_use]
    pub fn is_present(&self) -> bool {
        match self {
            LocalizedValue::Absent => false,
            LocalizedValue::Canonical(s) => !s.is_empty(),
            LocalizedValue::Translations(map) => map.values().any(|t| !t.is_empty()),
        }
    }

    /// Convert to [`DisplayText`], using `placeholder` when absent.
    #[must_use]
    pub fn display(&self, lang: &str, placeholder: &str) -> DisplayText {
        match self.resolve(lang) {
            Resolved::None => DisplayText::Placeholder(placeholder.to_string()),
            Resolved::Code(s) => DisplayText::Code(s.to_string()),
            Resolved::Text(s) => DisplayText::Text(s.to_string()),
        }
    }
}

/// A display-ready string with its formatting.
///
/// Serialized as `{"kind": "text" | "code" | "placeholder", "text": ...}` so
/// templates can pick the markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum DisplayText {
    Text(String),
    Code(String),
    Placeholder(String),
}

impl DisplayText {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            DisplayText::Text(s) | DisplayText::Code(s) | DisplayText::Placeholder(s) => s,
        }
    }
}
