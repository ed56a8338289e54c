//! Show the link routes a payload advertises.

use anyhow::{Context, Result};
use clap::Args;

use super::common::{CommandContext, text_table};
use crate::graph::ResourceIndex;
use crate::routes::LinkRoutes;

/// Command to print the route table from a payload's `links` block.
#[derive(Args, Debug)]
pub struct RoutesCommand {
    /// JSON file or http(s) URL of any API payload
    source: String,

    /// Build the URL for this route key (e.g. `browser`) instead of listing routes
    #[arg(short, long, value_name = "KEY")]
    url: Option<String>,

    /// Resource id for --url; without it the list URL is built
    #[arg(long, requires = "url")]
    id: Option<String>,
}

impl RoutesCommand {
    pub async fn execute(self, context: &CommandContext) -> Result<()> {
        let index = context.load_source(&self.source).await?;
        println!("{}", self.render(&index, context)?);
        Ok(())
    }

    fn render(&self, index: &ResourceIndex, context: &CommandContext) -> Result<String> {
        let namespace = context.client.namespace();
        let routes = index.links().map(|links| LinkRoutes::extract(links, namespace)).unwrap_or_default();

        if let Some(key) = &self.url {
            return routes
                .build_url(key, self.id.as_deref(), Some(context.client.base_url()), Some(namespace))
                .with_context(|| format!("Payload has no route for '{key}'"));
        }

        if routes.is_empty() {
            return Ok("No link routes in payload".to_string());
        }
        let headers = ["Key", "Route"].map(String::from);
        let rows: Vec<Vec<String>> = routes.iter().map(|(key, route)| vec![key.to_string(), route.to_string()]).collect();
        Ok(text_table(&headers, &rows))
    }
}
