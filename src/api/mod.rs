//! HTTP access to the compatibility API.
//!
//! [`ApiClient`] issues plain GET requests for JSON:API documents and parses
//! the body into a [`ResourceIndex`]. There are no retries or timeouts; a
//! failed request surfaces as [`BrowseError::Http`] and the caller decides
//! what to do.

use reqwest::header::ACCEPT;

use crate::core::{BrowseError, ResourceType};
use crate::graph::ResourceIndex;
use crate::pagination::CollectionView;

/// Media type requested from the API.
pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Client for one API host and namespace.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    namespace: String,
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. `https://host`) and a namespace
    /// such as `api/v1`.
    pub fn new(base_url: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            namespace: namespace.into().trim_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Absolute URL for a path below the namespace.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if self.namespace.is_empty() {
            format!("{}/{}", self.base_url, path)
        } else {
            format!("{}/{}/{}", self.base_url, self.namespace, path)
        }
    }

    /// Fetch a path below the namespace.
    ///
    /// # Errors
    ///
    /// [`BrowseError::Http`] for transport failures and non-success statuses;
    /// parse errors of [`ResourceIndex::parse`] otherwise.
    pub async fn fetch(&self, path: &str) -> Result<ResourceIndex, BrowseError> {
        self.fetch_url(&self.url(path)).await
    }

    /// Fetch an absolute URL.
    ///
    /// # Errors
    ///
    /// See [`fetch`](Self::fetch).
    pub async fn fetch_url(&self, url: &str) -> Result<ResourceIndex, BrowseError> {
        let body = self.fetch_text(url).await?;
        ResourceIndex::parse(&body)
    }

    /// Fetch an absolute URL and return the raw body.
    ///
    /// # Errors
    ///
    /// Returns [`BrowseError::Http`] for transport failures and non-success
    /// statuses.
    pub async fn fetch_text(&self, url: &str) -> Result<String, BrowseError> {
        let http_error = |message: String| BrowseError::Http {
            url: url.to_string(),
            message,
        };

        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(ACCEPT, JSON_API_MEDIA_TYPE)
            .send()
            .await
            .map_err(|e| http_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("GET {} returned HTTP {}", url, status);
            return Err(http_error(format!("HTTP {status}")));
        }

        let body = response.text().await.map_err(|e| http_error(e.to_string()))?;
        tracing::debug!("GET {} returned {} bytes", url, body.len());
        Ok(body)
    }

    /// Fetch the feature view payload (feature tree plus `compat_table`).
    ///
    /// # Errors
    ///
    /// See [`fetch`](Self::fetch).
    pub async fn fetch_view_feature(&self, feature_id: &str) -> Result<ResourceIndex, BrowseError> {
        self.fetch(&format!("view_features/{feature_id}")).await
    }

    /// Fetch one resource by type and id.
    ///
    /// # Errors
    ///
    /// See [`fetch`](Self::fetch).
    pub async fn fetch_resource(
        &self,
        resource_type: ResourceType,
        id: &str,
    ) -> Result<ResourceIndex, BrowseError> {
        self.fetch(&format!("{}/{}", resource_type.plural(), id)).await
    }

    /// Fetch one page of a collection.
    ///
    /// # Errors
    ///
    /// See [`fetch`](Self::fetch).
    pub async fn fetch_page(&self, resource_type: ResourceType, page: u32) -> Result<ResourceIndex, BrowseError> {
        self.fetch(&format!("{}?page={}", resource_type.plural(), page)).await
    }

    /// Fetch the next page of a collection view and append its ids.
    ///
    /// Returns the fetched page so the caller can keep its resources, or
    /// `None` without a request when the view has nothing more to load.
    ///
    /// # Errors
    ///
    /// Fetch and parse errors, or [`BrowseError::MalformedInput`] when the
    /// page does not match the view.
    pub async fn load_more(&self, view: &mut CollectionView) -> Result<Option<ResourceIndex>, BrowseError> {
        let Some(page) = view.begin_load_more() else {
            return Ok(None);
        };
        let index = self.fetch_page(view.resource_type(), page).await?;
        view.apply_page(&index)?;
        Ok(Some(index))
    }
}
