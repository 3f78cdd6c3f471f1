//! HTTP page fetcher
//!
//! Requests one page per call from a JSON endpoint:
//! - The page index goes into a configurable query parameter
//! - Items are pulled out of the response with a dotted JSONPath
//! - The full response body is kept on the page for the consumer
//!
//! Failures are returned as-is. Retrying is left to whoever handles the
//! error callback.

use super::types::PageFetcher;
use crate::config::SourceConfig;
use crate::error::{Error, Result};
use crate::page::{FetchOutcome, Page};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// A page decoded from a JSON response
#[derive(Debug, Clone, PartialEq)]
pub struct JsonPage<E> {
    /// Index this page was requested with
    pub page_index: u32,
    /// Items extracted from `items_path`
    pub items: Vec<E>,
    /// The whole response body (totals, cursors, links...)
    pub body: Value,
}

impl<E: Send + 'static> Page for JsonPage<E> {
    type Item = E;

    fn items(&self) -> &[E] {
        &self.items
    }
}

/// Fetches JSON pages over HTTP
pub struct HttpPageFetcher<E> {
    client: Client,
    url: Url,
    source: SourceConfig,
    _item: PhantomData<fn() -> E>,
}

impl<E> fmt::Debug for HttpPageFetcher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpPageFetcher")
            .field("url", &self.url.as_str())
            .field("page_param", &self.source.page_param)
            .field("items_path", &self.source.items_path)
            .finish_non_exhaustive()
    }
}

impl<E> HttpPageFetcher<E>
where
    E: DeserializeOwned + Send + 'static,
{
    /// Create a fetcher for a source
    pub fn new(source: SourceConfig) -> Result<Self> {
        source.validate()?;
        let url = Url::parse(&source.url)?;

        let client = Client::builder()
            .timeout(source.timeout())
            .user_agent(format!("infinity-list/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url,
            source,
            _item: PhantomData,
        })
    }

    /// Get the source configuration
    pub fn source(&self) -> &SourceConfig {
        &self.source
    }

    /// Build the query string for a page
    fn query_for(&self, page_index: u32) -> Vec<(String, String)> {
        let mut query: Vec<(String, String)> = self
            .source
            .query
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        query.sort();

        query.push((self.source.page_param.clone(), page_index.to_string()));
        if let (Some(param), Some(size)) = (&self.source.page_size_param, self.source.page_size) {
            query.push((param.clone(), size.to_string()));
        }
        query
    }

    /// Fetch and decode one page
    pub async fn fetch_page(&self, page_index: u32) -> Result<JsonPage<E>> {
        let mut req = self
            .client
            .get(self.url.clone())
            .query(&self.query_for(page_index));

        for (key, value) in &self.source.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        debug!("Fetching page {} from {}", page_index, self.url);

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_ms: timeout_ms(self.source.timeout()),
                }
            } else {
                Error::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        let body_text = response
            .text()
            .await
            .map_err(|e| Error::Other(format!("Failed to read response body: {e}")))?;
        let body: Value = serde_json::from_str(&body_text)?;
        let items = extract_items(&body, &self.source.items_path)?;

        debug!("Page {}: decoded {} items", page_index, items.len());

        Ok(JsonPage {
            page_index,
            items,
            body,
        })
    }
}

#[async_trait]
impl<E> PageFetcher for HttpPageFetcher<E>
where
    E: DeserializeOwned + Send + 'static,
{
    type Page = JsonPage<E>;
    type Error = Error;

    async fn fetch(&self, page_index: u32) -> FetchOutcome<JsonPage<E>, Error> {
        self.fetch_page(page_index).await.into()
    }
}

fn timeout_ms(timeout: Duration) -> u64 {
    timeout.as_millis() as u64
}

/// Extract the item array at `path` and decode its elements
///
/// `path` is a dotted JSONPath (`$.data.items`). `$` or an empty path
/// means the body itself is the array.
pub fn extract_items<E: DeserializeOwned>(body: &Value, path: &str) -> Result<Vec<E>> {
    let trimmed = path.trim();
    let relative = trimmed
        .strip_prefix("$.")
        .or_else(|| trimmed.strip_prefix('$'))
        .unwrap_or(trimmed);

    let mut current = body;
    if !relative.is_empty() {
        for part in relative.split('.') {
            current = match current {
                Value::Object(map) => map
                    .get(part)
                    .ok_or_else(|| Error::items_extraction(path, format!("missing key '{part}'")))?,
                _ => {
                    return Err(Error::items_extraction(
                        path,
                        format!("cannot index into non-object with '{part}'"),
                    ))
                }
            };
        }
    }

    match current {
        Value::Array(_) => serde_json::from_value(current.clone())
            .map_err(|e| Error::items_extraction(path, e.to_string())),
        Value::Null => Ok(Vec::new()),
        other => Err(Error::items_extraction(
            path,
            format!("expected an array, found {}", json_kind(other)),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
