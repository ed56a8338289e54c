//! The `BrowseConfig` file and its loading rules.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::api::ApiClient;
use crate::core::BrowseError;
use crate::localize::FALLBACK_LANGUAGE;
use crate::render::{DEFAULT_ID_PREFIX, DEFAULT_ROOT_LABEL, RenderOptions};
use crate::routes::DEFAULT_NAMESPACE;

pub const DEFAULT_LANGUAGE: &str = FALLBACK_LANGUAGE;
pub const DEFAULT_BASE_URL: &str = "https://browsercompat.herokuapp.com";
pub const DEFAULT_API_NAMESPACE: &str = DEFAULT_NAMESPACE;

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_namespace() -> String {
    DEFAULT_API_NAMESPACE.to_string()
}

fn default_id_prefix() -> String {
    DEFAULT_ID_PREFIX.to_string()
}

fn default_root_label() -> String {
    DEFAULT_ROOT_LABEL.to_string()
}

/// User configuration, read from `~/.wpc-browse/config.toml` or `--config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BrowseConfig {
    /// Language tag used to resolve localized strings.
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub render: RenderConfig,
}

/// The `[api]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// API host; [`DEFAULT_BASE_URL`] when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default = "default_namespace")]
    pub namespace: String,
}

/// The `[render]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,

    #[serde(default = "default_root_label")]
    pub root_label: String,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            api: ApiConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            namespace: default_namespace(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            id_prefix: default_id_prefix(),
            root_label: default_root_label(),
        }
    }
}

impl ApiConfig {
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().filter(|url| !url.is_empty()).unwrap_or(DEFAULT_BASE_URL)
    }

    /// Client for the configured host and namespace.
    #[must_use]
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.base_url(), self.namespace.as_str())
    }
}

impl BrowseConfig {
    /// Load from `path` when given, else from [`default_path`](Self::default_path).
    ///
    /// A missing default file yields the defaults. An explicit path must exist.
    ///
    /// # Errors
    ///
    /// [`BrowseError::Config`] when the file cannot be read or parsed.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self, BrowseError> {
        if let Some(path) = path {
            return Self::load_from(&path).await;
        }

        let Some(path) = Self::default_path() else {
            tracing::debug!("No home directory; using default configuration");
            return Ok(Self::default());
        };
        if fs::try_exists(&path).await.unwrap_or(false) {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No config at {}; using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    ///
    /// # Errors
    ///
    /// [`BrowseError::Config`] naming the file and the read or TOML error.
    pub async fn load_from(path: &Path) -> Result<Self, BrowseError> {
        let content = fs::read_to_string(path).await.map_err(|e| BrowseError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| BrowseError::Config {
            message: format!("Failed to parse {}: {e}", path.display()),
        })?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// `~/.wpc-browse/config.toml`, or `None` without a home directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".wpc-browse").join("config.toml"))
    }

    /// Replace the language when `language` is given (the `--lang` flag).
    #[must_use]
    pub fn with_language(mut self, language: Option<String>) -> Self {
        if let Some(language) = language.filter(|l| !l.is_empty()) {
            self.language = language;
        }
        self
    }

    /// Renderer options for this configuration.
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            language: self.language.clone(),
            id_prefix: self.render.id_prefix.clone(),
            root_label: self.render.root_label.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = BrowseConfig::default();
        assert_eq!(config.language, "en");
        assert_eq!(config.api.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.api.namespace, "api/v1");
        assert_eq!(config.render_options(), RenderOptions::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: BrowseConfig = toml::from_str(
            r#"
            language = "fr"

            [render]
            id_prefix = "mdn"
            "#,
        )
        .unwrap();

        assert_eq!(config.language, "fr");
        assert_eq!(config.render.id_prefix, "mdn");
        assert_eq!(config.render.root_label, "Basic support");
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    fn test_empty_base_url_uses_default() {
        let api = ApiConfig {
            base_url: Some(String::new()),
            namespace: "api/v2".into(),
        };
        assert_eq!(api.base_url(), DEFAULT_BASE_URL);
        assert_eq!(api.client().url("browsers"), "https://browsercompat.herokuapp.com/api/v2/browsers");
    }

    #[test]
    fn test_language_override() {
        let config = BrowseConfig::default().with_language(Some("de".into()));
        assert_eq!(config.render_options().language, "de");

        let unchanged = BrowseConfig::default().with_language(None);
        assert_eq!(unchanged.language, "en");
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        tokio::fs::write(&path, "[api]\nbase_url = \"http://localhost:8000\"\n").await.unwrap();

        let config = BrowseConfig::load_with_optional(Some(path)).await.unwrap();
        assert_eq!(config.api.base_url(), "http://localhost:8000");
        assert_eq!(config.language, "en");
    }

    #[tokio::test]
    async fn test_explicit_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let err = BrowseConfig::load_with_optional(Some(temp.path().join("nope.toml"))).await.unwrap_err();
        assert!(matches!(err, BrowseError::Config { .. }));
    }

    #[tokio::test]
    async fn test_invalid_file_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        tokio::fs::write(&path, "language = [1, 2]\n").await.unwrap();

        let err = BrowseConfig::load_from(&path).await.unwrap_err();
        match err {
            BrowseError::Config {
                message,
            } => assert!(message.contains("Failed to parse")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_key_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        tokio::fs::write(&path, "langauge = \"fr\"\n").await.unwrap();

        assert!(BrowseConfig::load_from(&path).await.is_err());
    }
}
