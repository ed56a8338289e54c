//! Shared plumbing for CLI commands

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::path::Path;

use crate::api::ApiClient;
use crate::config::BrowseConfig;
use crate::graph::ResourceIndex;
use crate::render::RenderOptions;

/// Output format of the table commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// HTML fragment from the embedded templates
    #[default]
    Html,
    /// Plain text for the terminal
    Text,
    /// The view model as JSON
    Json,
}

/// Whether SOURCE names an `http(s)://` URL rather than a file.
#[must_use]
pub fn is_url(source: &str) -> bool {
    let lowered = source.to_ascii_lowercase();
    lowered.starts_with("http://") || lowered.starts_with("https://")
}

/// Configuration and API client shared by every command.
#[derive(Debug)]
pub struct CommandContext {
    pub config: BrowseConfig,
    pub client: ApiClient,
}

impl CommandContext {
    #[must_use]
    pub fn new(config: BrowseConfig) -> Self {
        let client = config.api.client();
        Self {
            config,
            client,
        }
    }

    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        self.config.render_options()
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.config.language
    }

    /// Read SOURCE from disk or over HTTP and parse it.
    ///
    /// # Errors
    ///
    /// Read, fetch, and payload errors, with SOURCE as context.
    pub async fn load_source(&self, source: &str) -> Result<ResourceIndex> {
        let body = if is_url(source) {
            self.client.fetch_text(source).await?
        } else {
            let path = Path::new(source);
            tokio::fs::read_to_string(path)
                .await
                .map_err(crate::core::BrowseError::from)
                .with_context(|| format!("Failed to read payload from {}", path.display()))?
        };

        let index = ResourceIndex::parse(&body).with_context(|| format!("Failed to parse payload from {source}"))?;
        tracing::debug!("Loaded {} resources from {}", index.len(), source);
        Ok(index)
    }
}

/// Left-aligned plain-text table with a header rule.
///
/// Multi-line cells are flattened with `"; "`.
#[must_use]
pub fn text_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let flatten = |cell: &String| cell.replace('\n', "; ");
    let rows: Vec<Vec<String>> = rows.iter().map(|row| row.iter().map(flatten).collect()).collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(headers)];
    out.push(widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
    out.extend(rows.iter().map(|row| line(row)));
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::PayloadFixture;
    use tempfile::TempDir;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/api/v1/browsers"));
        assert!(is_url("HTTP://example.com"));
        assert!(!is_url("payload.json"));
        assert!(!is_url("./http/payload.json"));
    }

    #[test]
    fn test_text_table() {
        let headers = vec!["Feature".to_string(), "Firefox".to_string()];
        let rows = vec![vec!["Basic support".to_string(), "1.0\n2.0 [1]".to_string()]];
        assert_eq!(
            text_table(&headers, &rows),
            "Feature        Firefox\n-------------  ------------\nBasic support  1.0; 2.0 [1]"
        );
    }

    #[tokio::test]
    async fn test_load_source_from_file() -> Result<()> {
        let temp = TempDir::new()?;
        let path = PayloadFixture::feature_view().write_to(temp.path())?;

        let context = CommandContext::new(BrowseConfig::default());
        let index = context.load_source(&path.to_string_lossy()).await?;
        assert_eq!(index.primary()?.id().as_str(), "5");
        Ok(())
    }

    #[tokio::test]
    async fn test_load_source_missing_file() {
        let context = CommandContext::new(BrowseConfig::default());
        let err = context.load_source("/definitely/not/here.json").await.unwrap_err();
        assert!(err.to_string().contains("Failed to read payload"));
        assert!(err.chain().any(|e| e.downcast_ref::<crate::core::BrowseError>().is_some()));
    }
}
