//! Summarise the resources in a payload.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::common::CommandContext;
use crate::core::{Resource, ResourceType};
use crate::display::{feature_flags, optional_date, relationship_counts, resource_label, translation_list};
use crate::graph::{ResourceIndex, SpecLinkage};
use crate::localize::LocalizedValue;

/// Date attributes shown per resource type.
const DATE_ATTRIBUTES: &[(ResourceType, &str)] = &[
    (ResourceType::Version, "release_day"),
    (ResourceType::Version, "retirement_day"),
    (ResourceType::Changeset, "created"),
    (ResourceType::Changeset, "modified"),
    (ResourceType::User, "created"),
];

/// Command to print what a payload contains.
#[derive(Args, Debug)]
pub struct InspectCommand {
    /// JSON file or http(s) URL of any API payload
    source: String,
}

impl InspectCommand {
    pub async fn execute(self, context: &CommandContext) -> Result<()> {
        let index = context.load_source(&self.source).await?;
        println!("{}", summary(&index, context.language()));
        Ok(())
    }
}

fn summary(index: &ResourceIndex, lang: &str) -> String {
    let mut lines = Vec::new();

    if let Ok(primary) = index.primary() {
        lines.push(format!(
            "{} {} {}",
            primary.resource_type().singular().bold(),
            primary.id(),
            resource_label(primary, index, lang).cyan()
        ));
        lines.extend(details(primary).into_iter().map(|line| format!("  {line}")));
        match index.spec_linkage() {
            Some(SpecLinkage::References) => lines.push("  specifications: via references".to_string()),
            Some(SpecLinkage::Sections) => lines.push("  specifications: via sections".to_string()),
            None => {}
        }
    } else if let Some((resource_type, ids)) = index.collection() {
        lines.push(format!("{} {}", resource_type.plural().bold(), format!("({} listed)", ids.len()).dimmed()));
    }

    if let Ok(meta) = index.compat_meta() {
        let tabs: Vec<String> = meta
            .tabs
            .iter()
            .map(|tab| format!("{} ({})", tab.name.plain(lang), tab.browsers.len()))
            .collect();
        lines.push(format!("  compat tabs: {}", tabs.join(", ")));
        lines.push(format!("  notes: {}", meta.notes().count()));
        if !meta.languages.is_empty() {
            lines.push(format!("  languages: {}", meta.languages.join(", ")));
        }
    }

    lines.push(String::new());
    lines.push("Resources:".bold().to_string());
    for resource_type in index.resource_types() {
        lines.push(format!("  {:<16}{}", resource_type.plural(), index.count(resource_type)));
    }
    lines.join("\n")
}

fn details(resource: &Resource) -> Vec<String> {
    let mut lines = Vec::new();

    let names = translation_list(&LocalizedValue::from_value(resource.attr("name")));
    if names.len() > 1 {
        let names: Vec<String> = names.iter().map(|entry| format!("{}: {}", entry.lang, entry.value.text())).collect();
        lines.push(format!("name: {}", names.join(", ")));
    }

    if resource.resource_type() == ResourceType::Feature {
        let flags = feature_flags(resource);
        if !flags.is_empty() {
            lines.push(format!("flags: {}", flags.join(", ")));
        }
    }

    for (resource_type, attribute) in DATE_ATTRIBUTES {
        if *resource_type == resource.resource_type() {
            lines.push(format!("{attribute}: {}", optional_date(resource.attr_str(attribute)).text()));
        }
    }

    let counts = relationship_counts(resource);
    if !counts.is_empty() {
        lines.push(format!("links: {}", counts.join(", ")));
    }
    lines
}
