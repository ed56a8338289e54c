//! Specification table of a feature.

use serde::Serialize;

use crate::core::{BrowseError, Resource, ResourceId, ResourceType};
use crate::graph::{ResourceIndex, SpecLinkage};
use crate::localize::{DisplayText, LocalizedValue, NONE_PLACEHOLDER};

use super::RenderOptions;

/// CSS class used when a specification's maturity cannot be resolved.
pub const UNKNOWN_MATURITY_CLASS: &str = "maturity-unknown";

/// One row: specification and section, maturity, comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecRow {
    pub specification: DisplayText,
    /// Section number and name joined by a space.
    pub section: String,
    /// Specification URI followed by the section subpath.
    pub href: Option<String>,
    pub maturity_class: String,
    pub maturity: DisplayText,
    pub comment: Option<DisplayText>,
}

impl SpecRow {
    /// The first column as plain text.
    #[must_use]
    pub fn label(&self) -> String {
        if self.section.is_empty() {
            self.specification.text().to_string()
        } else {
            format!("{} {}", self.specification.text(), self.section)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SpecTable {
    pub rows: Vec<SpecRow>,
}

/// Builds a [`SpecTable`] from a feature's sections or references.
pub struct SpecificationTableRenderer<'a> {
    index: &'a ResourceIndex,
    options: &'a RenderOptions,
}

impl<'a> SpecificationTableRenderer<'a> {
    #[must_use]
    pub fn new(index: &'a ResourceIndex, options: &'a RenderOptions) -> Self {
        Self {
            index,
            options,
        }
    }

    /// Build the table for the index's primary resource.
    ///
    /// A primary without `sections` or `references` yields an empty table.
    /// Rows whose section cannot be resolved are left out.
    ///
    /// # Errors
    ///
    /// Returns [`BrowseError::NoPrimary`] for collection payloads.
    pub fn build(&self) -> Result<SpecTable, BrowseError> {
        let primary = self.index.primary()?;
        let rows = match self.index.spec_linkage() {
            Some(SpecLinkage::Sections) => primary
                .related_ids("sections")
                .into_iter()
                .filter_map(|id| self.resolve(ResourceType::Section, id))
                .map(|section| self.row(section, None))
                .collect(),
            Some(SpecLinkage::References) => primary
                .related_ids("references")
                .into_iter()
                .filter_map(|id| self.resolve(ResourceType::Reference, id))
                .filter_map(|reference| {
                    let section = self.related(reference, "section")?;
                    Some(self.row(section, Some(reference)))
                })
                .collect(),
            None => Vec::new(),
        };

        tracing::debug!("Specification table for {} {} has {} rows", primary.resource_type(), primary.id(), rows.len());
        Ok(SpecTable {
            rows,
        })
    }

    fn lang(&self) -> &str {
        &self.options.language
    }

    fn resolve(&self, resource_type: ResourceType, id: &ResourceId) -> Option<&'a Resource> {
        match self.index.require(resource_type, id.as_str()) {
            Ok(resource) => Some(resource),
            Err(e) => {
                tracing::warn!("Skipping specification row: {}", e);
                None
            }
        }
    }

    fn related(&self, resource: &Resource, name: &str) -> Option<&'a Resource> {
        match self.index.related(resource, name) {
            Ok(related) => Some(related),
            Err(e) => {
                tracing::warn!("{} {}: {}", resource.resource_type(), resource.id(), e);
                None
            }
        }
    }

    fn row(&self, section: &Resource, reference: Option<&Resource>) -> SpecRow {
        let lang = self.lang();
        let specification = self.related(section, "specification");
        let maturity = specification.and_then(|spec| self.related(spec, "maturity"));

        let number = LocalizedValue::from_value(section.attr("number")).plain(lang);
        let name = LocalizedValue::from_value(section.attr("name")).plain(lang);
        let section_text = [number, name].into_iter().filter(|part| !part.is_empty()).collect::<Vec<_>>().join(" ");

        let href = specification.and_then(|spec| {
            let uri = LocalizedValue::from_value(spec.attr("uri")).plain(lang);
            let subpath = LocalizedValue::from_value(section.attr("subpath")).plain(lang);
            (!uri.is_empty()).then(|| format!("{uri}{subpath}"))
        });

        let comment = reference
            .map(|reference| LocalizedValue::from_value(reference.attr("note")))
            .filter(LocalizedValue::is_present)
            .or_else(|| Some(LocalizedValue::from_value(section.attr("note"))).filter(LocalizedValue::is_present))
            .map(|note| note.display(lang, NONE_PLACEHOLDER));

        SpecRow {
            specification: match specification {
                Some(spec) => LocalizedValue::from_value(spec.attr("name")).display(lang, NONE_PLACEHOLDER),
                None => DisplayText::Placeholder(NONE_PLACEHOLDER.to_string()),
            },
            section: section_text,
            href,
            maturity_class: maturity
                .and_then(|m| m.attr_str("slug"))
                .map_or_else(|| UNKNOWN_MATURITY_CLASS.to_string(), |slug| format!("maturity-{slug}")),
            maturity: match maturity {
                Some(m) => LocalizedValue::from_value(m.attr("name")).display(lang, "unknown"),
                None => DisplayText::Placeholder("unknown".to_string()),
            },
            comment,
        }
    }
}
