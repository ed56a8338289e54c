//! Render the browser compatibility table of a feature view.

use anyhow::{Context, Result};
use clap::Args;

use super::common::{CommandContext, OutputFormat, text_table};
use crate::graph::ResourceIndex;
use crate::render::{CompatTable, CompatibilityTableRenderer, HtmlRenderer};

/// Command to render a `view_features` payload as a compatibility table.
#[derive(Args, Debug)]
pub struct CompatCommand {
    /// JSON file or http(s) URL of a feature view payload
    source: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
    format: OutputFormat,

    /// Only show the named browser tab (text output)
    #[arg(short, long, value_name = "NAME")]
    tab: Option<String>,
}

impl CompatCommand {
    pub async fn execute(self, context: &CommandContext) -> Result<()> {
        let index = context.load_source(&self.source).await?;
        println!("{}", self.render(&index, context)?);
        Ok(())
    }

    fn render(&self, index: &ResourceIndex, context: &CommandContext) -> Result<String> {
        let meta = index.compat_meta().context("Payload cannot be rendered as a compatibility table")?;
        let options = context.render_options();
        let table = CompatibilityTableRenderer::new(index, &meta, &options).build()?;
        tracing::debug!("Built compatibility table {} with {} tabs", table.id, table.tabs.len());

        match self.format {
            OutputFormat::Html => Ok(HtmlRenderer::new()?.render_compat(&table)?),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&table)?),
            OutputFormat::Text => self.text(&table),
        }
    }

    fn text(&self, table: &CompatTable) -> Result<String> {
        let tabs: Vec<_> = match &self.tab {
            Some(name) => {
                let tab = table.tab(name).with_context(|| {
                    let names: Vec<&str> = table.tabs.iter().map(|t| t.name.text()).collect();
                    format!("No tab named '{name}' (available: {})", names.join(", "))
                })?;
                vec![tab]
            }
            None => table.tabs.iter().collect(),
        };

        let mut sections = Vec::new();
        for tab in tabs {
            let headers: Vec<String> = std::iter::once("Feature".to_string())
                .chain(tab.browsers.iter().map(|b| b.name.text().to_string()))
                .collect();
            let rows: Vec<Vec<String>> = tab
                .rows
                .iter()
                .map(|row| std::iter::once(row.label_text()).chain(row.cells.iter().map(|c| c.text())).collect())
                .collect();
            sections.push(format!("{}\n\n{}", tab.name.text(), text_table(&headers, &rows)));
        }

        if !table.notes.is_empty() {
            let notes: Vec<String> =
                table.notes.iter().map(|note| format!("[{}] {}", note.number, note.text.text())).collect();
            sections.push(notes.join("\n"));
        }
        Ok(sections.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BrowseConfig;
    use crate::test_utils::PayloadFixture;

    fn command(format: OutputFormat, tab: Option<&str>) -> CompatCommand {
        CompatCommand {
            source: "unused.json".to_string(),
            format,
            tab: tab.map(String::from),
        }
    }

    fn fixture() -> ResourceIndex {
        ResourceIndex::from_payload(&PayloadFixture::feature_view().payload).unwrap()
    }

    #[test]
    fn test_text_output() -> Result<()> {
        let context = CommandContext::new(BrowseConfig::default());
        let text = command(OutputFormat::Text, Some("Desktop Browsers")).render(&fixture(), &context)?;

        assert!(text.starts_with("Desktop Browsers\n\nFeature"));
        assert!(text.contains("Basic support"));
        assert!(text.contains("4.0Not supported"));
        assert!(text.contains("[1] Needs the prefix until 29."));
        assert!(!text.contains("Safari Mobile"));
        Ok(())
    }

    #[test]
    fn test_unknown_tab() {
        let context = CommandContext::new(BrowseConfig::default());
        let err = command(OutputFormat::Text, Some("Tablet")).render(&fixture(), &context).unwrap_err();
        assert!(err.to_string().contains("available: Desktop Browsers, Mobile Browsers"));
    }

    #[test]
    fn test_json_and_html_output() -> Result<()> {
        let context = CommandContext::new(BrowseConfig::default());

        let json: serde_json::Value =
            serde_json::from_str(&command(OutputFormat::Json, None).render(&fixture(), &context)?)?;
        assert_eq!(json["id"], "wpc-compat-5");

        let html = command(OutputFormat::Html, None).render(&fixture(), &context)?;
        assert!(html.contains("id=\"wpc-compat-5\""));
        Ok(())
    }
}
