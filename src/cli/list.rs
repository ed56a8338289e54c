//! List the resources of a collection payload.

use anyhow::{Context, Result};
use clap::Args;

use super::common::CommandContext;
use crate::display::{count_text, resource_label};
use crate::graph::ResourceIndex;
use crate::pagination::CollectionView;

/// Command to list a paginated collection such as `browsers?page=1`.
#[derive(Args, Debug)]
pub struct ListCommand {
    /// JSON file or http(s) URL of a collection payload
    source: String,

    /// Keep fetching pages from the API until the collection is complete
    #[arg(short, long)]
    all: bool,
}

impl ListCommand {
    pub async fn execute(self, context: &CommandContext) -> Result<()> {
        let mut index = context.load_source(&self.source).await?;
        let mut view = CollectionView::from_index(&index).context("The list command needs a collection payload")?;

        if self.all {
            while let Some(page) = context
                .client
                .load_more(&mut view)
                .await
                .with_context(|| format!("Failed to load page {} of {}", view.current_page(), view.resource_type()))?
            {
                merge(&mut index, &page);
            }
        }

        println!("{}", listing(&view, &index, context.language()));
        Ok(())
    }
}

/// Keep the resources of a later page so their labels resolve.
fn merge(index: &mut ResourceIndex, page: &ResourceIndex) {
    for resource_type in page.resource_types() {
        for resource in page.resources_of(resource_type) {
            index.insert(resource.clone());
        }
    }
}

fn listing(view: &CollectionView, index: &ResourceIndex, lang: &str) -> String {
    let resource_type = view.resource_type();
    let mut lines: Vec<String> = view
        .items()
        .iter()
        .map(|id| match index.get(resource_type, id.as_str()) {
            Some(resource) => format!("{:>6}  {}", id.as_str(), resource_label(resource, index, lang)),
            None => format!("{:>6}  (not loaded)", id.as_str()),
        })
        .collect();

    let shown = count_text(view.items().len(), resource_type.singular(), None);
    let footer = match view.pagination() {
        Some(pagination) if view.can_load_more() => {
            format!("{shown} of {} (use --all to load the rest)", pagination.count)
        }
        _ => shown,
    };
    lines.push(String::new());
    lines.push(footer);
    lines.join("\n")
}
