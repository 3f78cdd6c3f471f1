//! Feed configuration
//!
//! A feed pairs an HTTP page source with the controller settings used to
//! page through it. Feeds are written in YAML:
//!
//! ```yaml
//! source:
//!   url: https://api.example.com/posts
//!   page_param: page
//!   items_path: $.data
//!   headers:
//!     Authorization: Bearer abc
//! controller:
//!   initial_page: 1
//!   overlap: skip
//! ```

use crate::controller::ControllerConfig;
use crate::error::{Error, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Source Config
// ============================================================================

/// Where and how pages are requested over HTTP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Endpoint URL
    pub url: String,

    /// Query parameter carrying the page index
    #[serde(default = "default_page_param")]
    pub page_param: String,

    /// Optional query parameter carrying the page size
    #[serde(default)]
    pub page_size_param: Option<String>,

    /// Page size value sent with `page_size_param`
    #[serde(default)]
    pub page_size: Option<u32>,

    /// JSONPath of the item array in the response (`$` = the body itself)
    #[serde(default = "default_items_path")]
    pub items_path: String,

    /// Extra query parameters sent with every request
    #[serde(default)]
    pub query: HashMap<String, String>,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_page_param() -> String {
    "page".to_string()
}

fn default_items_path() -> String {
    "$".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl SourceConfig {
    /// Create a source with defaults for everything but the URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            page_param: default_page_param(),
            page_size_param: None,
            page_size: None,
            items_path: default_items_path(),
            query: HashMap::new(),
            headers: HashMap::new(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Set the page index parameter name
    #[must_use]
    pub fn with_page_param(mut self, param: impl Into<String>) -> Self {
        self.page_param = param.into();
        self
    }

    /// Send a page size with every request
    #[must_use]
    pub fn with_page_size(mut self, param: impl Into<String>, size: u32) -> Self {
        self.page_size_param = Some(param.into());
        self.page_size = Some(size);
        self
    }

    /// Set the item array path
    #[must_use]
    pub fn with_items_path(mut self, path: impl Into<String>) -> Self {
        self.items_path = path.into();
        self
    }

    /// Add a static query parameter
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a header
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the source
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(Error::invalid_value("url", "must not be empty"));
        }
        url::Url::parse(&self.url)
            .map_err(|e| Error::invalid_value("url", format!("'{}': {e}", self.url)))?;

        if self.page_param.trim().is_empty() {
            return Err(Error::invalid_value("page_param", "must not be empty"));
        }

        match (&self.page_size_param, self.page_size) {
            (Some(param), _) if param.trim().is_empty() => {
                return Err(Error::invalid_value("page_size_param", "must not be empty"));
            }
            (Some(_), None) => {
                return Err(Error::invalid_value(
                    "page_size",
                    "required when page_size_param is set",
                ));
            }
            (_, Some(0)) => {
                return Err(Error::invalid_value("page_size", "must be greater than 0"));
            }
            _ => {}
        }

        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be greater than 0"));
        }

        Ok(())
    }
}

// ============================================================================
// Feed Config
// ============================================================================

/// A page source plus controller settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// HTTP page source
    pub source: SourceConfig,

    /// Controller settings
    #[serde(default)]
    pub controller: ControllerConfig,
}

impl FeedConfig {
    /// Create a feed for a source with default controller settings
    pub fn new(source: SourceConfig) -> Self {
        Self {
            source,
            controller: ControllerConfig::default(),
        }
    }

    /// Set the controller settings
    #[must_use]
    pub fn with_controller(mut self, controller: ControllerConfig) -> Self {
        self.controller = controller;
        self
    }

    /// Validate the feed
    pub fn validate(&self) -> Result<()> {
        self.source.validate()
    }
}

/// Load a feed configuration from a YAML file
pub fn load_feed_config(path: impl AsRef<Path>) -> Result<FeedConfig> {
    let path = path.as_ref();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::file_not_found(path.display().to_string()));
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to read feed file '{}'", path.display()));
        }
    };
    load_feed_config_from_str(&content)
}

/// Load a feed configuration from a YAML string
pub fn load_feed_config_from_str(yaml: &str) -> Result<FeedConfig> {
    let feed = serde_yaml::from_str::<FeedConfig>(yaml).context("Failed to parse feed YAML")?;

    feed.validate()?;
    Ok(feed)
}
