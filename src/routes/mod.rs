//! Link templates and URL building.
//!
//! Payloads describe how to fetch related resources in a top-level `links`
//! block:
//!
//! ```json
//! {"links": {
//!     "features.children": {"type": "features", "href": "https://host/api/v1/features/{features.children}"},
//!     "versions.browser": "https://host/api/v1/browsers/{versions.browser}"
//! }}
//! ```
//!
//! Routes are keyed by the singular, camel-cased resource name and stored
//! relative to the API namespace, so the same route table works for any
//! host the client is pointed at.

use regex::{NoExpand, Regex};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Namespace prefix of the current API revision.
pub const DEFAULT_NAMESPACE: &str = "api/v1";

static PARAM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{(.*?)\}").expect("valid regex"));
static LIST_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\{(.*?)\}").expect("valid regex"));

/// Route templates keyed by singular camel-cased resource name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkRoutes {
    routes: BTreeMap<String, String>,
}

impl LinkRoutes {
    /// Extract routes from a payload `links` block.
    ///
    /// Entries that are neither a string nor an object with an `href` are
    /// skipped.
    #[must_use]
    pub fn extract(links: &Value, namespace: &str) -> Self {
        let mut routes = BTreeMap::new();
        let Some(links) = links.as_object() else {
            return Self {
                routes,
            };
        };

        for (link, value) in links {
            let mut key = link.rsplit('.').next().unwrap_or(link).to_string();
            let href = match value {
                Value::String(href) => href.as_str(),
                Value::Object(object) => {
                    if let Some(kind) = object.get("type").and_then(Value::as_str) {
                        key = kind.to_string();
                    }
                    match object.get("href").and_then(Value::as_str) {
                        Some(href) => href,
                        None => {
                            tracing::debug!("Skipping link '{}' without href", link);
                            continue;
                        }
                    }
                }
                _ => {
                    tracing::debug!("Skipping link '{}' with unexpected value", link);
                    continue;
                }
            };

            let route = strip_namespace(href, namespace);
            let route_key = camelize(&singularize(&key));
            routes.insert(route_key, route);
        }

        Self {
            routes,
        }
    }

    #[must_use]
    pub fn route(&self, type_key: &str) -> Option<&str> {
        self.routes.get(type_key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.routes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Build the URL for a resource (`id` given) or a list (`id` absent).
    ///
    /// `{...}` placeholders are replaced by the id, or the id is appended
    /// when the route has none. List URLs drop the placeholder segment.
    /// `prefix` is the host-relative namespace; without a `host` the URL
    /// starts with `/`.
    #[must_use]
    pub fn build_url(
        &self,
        type_key: &str,
        id: Option<&str>,
        host: Option<&str>,
        prefix: Option<&str>,
    ) -> Option<String> {
        let route = self.routes.get(type_key)?;

        let mut parts: Vec<String> = Vec::new();
        if let Some(host) = host {
            parts.push(host.trim_end_matches('/').to_string());
        }
        if let Some(prefix) = prefix.filter(|p| !p.is_empty()) {
            parts.push(prefix.trim_matches('/').to_string());
        }
        match id {
            Some(id) if PARAM.is_match(route) => parts.push(PARAM.replace_all(route, NoExpand(id)).into_owned()),
            Some(id) => {
                parts.push(route.clone());
                parts.push(id.to_string());
            }
            None => parts.push(LIST_PARAM.replace_all(route, "").into_owned()),
        }

        let url = parts.join("/");
        if host.is_none() && !url.is_empty() {
            Some(format!("/{url}"))
        } else {
            Some(url)
        }
    }
}

/// Strip scheme and host, a leading `/`, and the API namespace from a URL.
#[must_use]
pub fn strip_namespace(url: &str, namespace: &str) -> String {
    let mut route = url;
    if route.get(..4).is_some_and(|scheme| scheme.eq_ignore_ascii_case("http")) {
        let after_scheme = route.rsplit("//").next().unwrap_or(route);
        route = after_scheme.split_once('/').map_or("", |(_, path)| path);
    }
    route = route.strip_prefix('/').unwrap_or(route);

    let namespace = namespace.trim_matches('/');
    if !namespace.is_empty() {
        if let Some(rest) = route.strip_prefix(namespace) {
            route = rest.strip_prefix('/').unwrap_or(rest);
        }
    }
    route.to_string()
}

/// Naive English singular of a collection key.
#[must_use]
pub fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        format!("{stem}y")
    } else if word.ends_with("ss") {
        word.to_string()
    } else if let Some(stem) = word.strip_suffix('s') {
        stem.to_string()
    } else {
        word.to_string()
    }
}

/// `snake_case` or `dash-case` to `camelCase`.
#[must_use]
pub fn camelize(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut upper = false;
    for c in word.chars() {
        if c == '_' || c == '-' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
