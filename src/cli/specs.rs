//! Render the specification table of a feature.

use anyhow::Result;
use clap::Args;

use super::common::{CommandContext, OutputFormat, text_table};
use crate::graph::ResourceIndex;
use crate::render::{HtmlRenderer, SpecTable, SpecificationTableRenderer};

/// Command to render a feature's sections or references as a specification table.
#[derive(Args, Debug)]
pub struct SpecsCommand {
    /// JSON file or http(s) URL of a feature payload
    source: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
    format: OutputFormat,
}

impl SpecsCommand {
    pub async fn execute(self, context: &CommandContext) -> Result<()> {
        let index = context.load_source(&self.source).await?;
        println!("{}", self.render(&index, context)?);
        Ok(())
    }

    fn render(&self, index: &ResourceIndex, context: &CommandContext) -> Result<String> {
        let options = context.render_options();
        let table = SpecificationTableRenderer::new(index, &options).build()?;
        if table.rows.is_empty() {
            tracing::warn!("Feature has no specification sections");
        }

        match self.format {
            OutputFormat::Html => Ok(HtmlRenderer::new()?.render_specs(&table)?),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&table)?),
            OutputFormat::Text => Ok(text(&table)),
        }
    }
}

fn text(table: &SpecTable) -> String {
    let headers = ["Specification", "Status", "Comment"].map(String::from);
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            vec![
                row.label(),
                row.maturity.text().to_string(),
                row.comment.as_ref().map(|c| c.text().to_string()).unwrap_or_default(),
            ]
        })
        .collect();
    text_table(&headers, &rows)
}
