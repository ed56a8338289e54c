//! Text helpers for list and detail views.
//!
//! These turn resource attributes into the short strings shown next to a
//! record: relationship counts ("3 Children"), optional dates, translation
//! lists, and feature flags. Counts come from relationship identifiers only,
//! so they never require the related records to be loaded.

use chrono::{DateTime, NaiveDate};
use serde::Serialize;

use crate::core::{Resource, ResourceType};
use crate::graph::ResourceIndex;
use crate::localize::{DisplayText, LocalizedValue, NONE_PLACEHOLDER};

/// Language label used for untranslated (canonical) values.
pub const CANONICAL_LANGUAGE: &str = "canonical";

/// `"1 Version"`, `"3 Versions"`; `plural` overrides the default `+s`.
#[must_use]
pub fn count_text(count: usize, singular: &str, plural: Option<&str>) -> String {
    if count == 1 {
        format!("1 {singular}")
    } else {
        match plural {
            Some(plural) => format!("{count} {plural}"),
            None => format!("{count} {singular}s"),
        }
    }
}

/// Format a date attribute as `YYYY-MM-DD`.
///
/// Accepts plain dates and RFC 3339 timestamps; anything else (including
/// absence) yields the `none` placeholder.
#[must_use]
pub fn optional_date(value: Option<&str>) -> DisplayText {
    let Some(raw) = value.filter(|v| !v.is_empty()) else {
        return DisplayText::Placeholder(NONE_PLACEHOLDER.to_string());
    };
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()));
    match date {
        Some(date) => DisplayText::Text(date.format("%Y-%m-%d").to_string()),
        None => {
            tracing::debug!("Unparseable date '{}'", raw);
            DisplayText::Placeholder(NONE_PLACEHOLDER.to_string())
        }
    }
}

/// One language entry of a translated attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationEntry {
    pub lang: String,
    pub value: DisplayText,
}

/// All translations of a value, `"en"` first and the rest sorted by tag.
///
/// A canonical string is a single `canonical` entry; an absent value is empty.
#[must_use]
pub fn translation_list(value: &LocalizedValue) -> Vec<TranslationEntry> {
    match value {
        LocalizedValue::Absent => Vec::new(),
        LocalizedValue::Canonical(text) => vec![TranslationEntry {
            lang: CANONICAL_LANGUAGE.to_string(),
            value: DisplayText::Code(text.clone()),
        }],
        LocalizedValue::Translations(map) => {
            let english = map.get_key_value("en");
            english
                .into_iter()
                .chain(map.iter().filter(|(lang, _)| lang.as_str() != "en"))
                .map(|(lang, text)| TranslationEntry {
                    lang: lang.clone(),
                    value: DisplayText::Text(text.clone()),
                })
                .collect()
        }
    }
}

/// Flags worth calling out on a feature.
///
/// `stable` and `standardized` default to false when absent, matching the
/// way the API omits them on unreviewed features.
#[must_use]
pub fn feature_flags(feature: &Resource) -> Vec<&'static str> {
    let mut flags = Vec::new();
    if feature.attr_bool("experimental") == Some(true) {
        flags.push("experimental");
    }
    if feature.attr_bool("stable") != Some(true) {
        flags.push("not stable");
    }
    if feature.attr_bool("standardized") != Some(true) {
        flags.push("not standardized");
    }
    if feature.attr_bool("obsolete") == Some(true) {
        flags.push("obsolete");
    }
    flags
}

/// Relationship counts shown in a resource's detail view.
#[must_use]
pub fn relationship_counts(resource: &Resource) -> Vec<String> {
    let counted: &[(&str, &str, Option<&str>)] = match resource.resource_type() {
        ResourceType::Browser => &[("versions", "Version", None)],
        ResourceType::Version => &[("supports", "Feature", None)],
        ResourceType::Feature => &[
            ("supports", "Version", None),
            ("children", "Child", Some("Children")),
            ("references", "Reference", None),
        ],
        ResourceType::Specification => &[("sections", "Section", None)],
        ResourceType::Section => &[("references", "Reference", None)],
        ResourceType::Maturity => &[("specifications", "Specification", None)],
        ResourceType::User => &[("changesets", "Changeset", None)],
        ResourceType::Support | ResourceType::Reference | ResourceType::Changeset => &[],
    };
    counted
        .iter()
        .map(|(name, singular, plural)| count_text(resource.relationship_count(name), singular, *plural))
        .collect()
}

/// Short one-line label for a resource in list output.
#[must_use]
pub fn resource_label(resource: &Resource, index: &ResourceIndex, lang: &str) -> String {
    let localized = |name: &str| LocalizedValue::from_value(resource.attr(name)).display(lang, NONE_PLACEHOLDER);
    match resource.resource_type() {
        ResourceType::Browser | ResourceType::Feature | ResourceType::Specification | ResourceType::Maturity => {
            localized("name").text().to_string()
        }
        ResourceType::Version => {
            let browser = index
                .related(resource, "browser")
                .ok()
                .map(|b| LocalizedValue::from_value(b.attr("name")).plain(lang))
                .unwrap_or_else(|| NONE_PLACEHOLDER.to_string());
            match resource.attr_str("version").filter(|v| !v.is_empty()) {
                Some(version) => format!("{browser} {version}"),
                None => format!("{browser} (unspecified version)"),
            }
        }
        ResourceType::Section => {
            let number = LocalizedValue::from_value(resource.attr("number")).plain(lang);
            let name = localized("name");
            if number.is_empty() {
                name.text().to_string()
            } else {
                format!("{number} {}", name.text())
            }
        }
        ResourceType::Support => {
            format!("support {}: {}", resource.id(), resource.attr_str("support").unwrap_or("unknown"))
        }
        ResourceType::User => resource.attr_str("username").unwrap_or(NONE_PLACEHOLDER).to_string(),
        ResourceType::Reference | ResourceType::Changeset => format!("{} {}", resource.resource_type(), resource.id()),
    }
}
