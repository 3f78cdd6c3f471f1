//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{load_feed_config, FeedConfig, SourceConfig};
use crate::controller::{LoadStatus, PaginationController};
use crate::error::{Error, Result};
use crate::fetcher::{HttpPageFetcher, JsonPage, PageFetcher};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tracing::info;

/// Options for the `scroll` command
#[derive(Debug, Clone, Default)]
pub struct ScrollOptions {
    /// Feed definition file
    pub config: Option<PathBuf>,
    /// Endpoint URL override
    pub url: Option<String>,
    /// Page parameter override
    pub page_param: Option<String>,
    /// Items path override
    pub items_path: Option<String>,
    /// First page override
    pub start_page: Option<u32>,
    /// Page limit
    pub max_pages: Option<u32>,
}

/// What a scroll session loaded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScrollSummary {
    /// Index of the first page requested
    pub start_page: u32,
    /// Pages loaded
    pub pages: u32,
    /// Items loaded
    pub items: usize,
    /// Index the next load would request
    pub next_page: u32,
    /// Whether the feed returned an empty page
    pub reached_end: bool,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Scroll {
                config,
                url,
                page_param,
                items_path,
                start_page,
                max_pages,
            } => {
                let options = ScrollOptions {
                    config: config.clone(),
                    url: url.clone(),
                    page_param: page_param.clone(),
                    items_path: items_path.clone(),
                    start_page: *start_page,
                    max_pages: *max_pages,
                };
                let feed = Self::resolve_feed(&options)?;
                self.scroll(feed, options.max_pages).await.map(|_| ())
            }
            Commands::Validate { config } => self.validate(config),
        }
    }

    /// Build the feed for a scroll from a file and/or flags
    ///
    /// Flags override values from the file.
    pub fn resolve_feed(options: &ScrollOptions) -> Result<FeedConfig> {
        let mut feed = match (&options.config, &options.url) {
            (Some(path), _) => load_feed_config(path)?,
            (None, Some(url)) => FeedConfig::new(SourceConfig::new(url.clone())),
            (None, None) => return Err(Error::config("Either --config or --url is required")),
        };

        if let Some(url) = &options.url {
            feed.source.url = url.clone();
        }
        if let Some(page_param) = &options.page_param {
            feed.source.page_param = page_param.clone();
        }
        if let Some(items_path) = &options.items_path {
            feed.source.items_path = items_path.clone();
        }
        if let Some(start_page) = options.start_page {
            feed.controller.initial_page = start_page;
        }

        feed.validate()?;
        Ok(feed)
    }

    /// Page through a feed like a list being scrolled to the bottom
    ///
    /// The first load happens when the list appears. After each page the
    /// newly appended items are rendered, and if the last one answers
    /// `should_load_more` the next page is requested. Scrolling stops at an
    /// empty page, a failed fetch, or `max_pages`.
    pub async fn scroll(&self, feed: FeedConfig, max_pages: Option<u32>) -> Result<ScrollSummary> {
        let failure: Arc<Mutex<Option<Error>>> = Arc::default();
        let failure_slot = Arc::clone(&failure);

        let fetcher = HttpPageFetcher::<Value>::new(feed.source.clone())?;
        let controller = PaginationController::builder(fetcher)
            .config(feed.controller.clone())
            .on_success(|page: JsonPage<Value>| {
                info!("Loaded page {} ({} items)", page.page_index, page.items.len());
            })
            .on_error(move |err| {
                if let Ok(mut slot) = failure_slot.lock() {
                    *slot = Some(err);
                }
            })
            .build();
        let view = controller.subscribe();

        let mut summary = ScrollSummary {
            start_page: controller.page_index(),
            ..ScrollSummary::default()
        };
        let mut rendered = 0;
        let mut last_rendered: Option<Value> = None;

        if max_pages == Some(0) {
            return Ok(self.finish_scroll(summary, &controller));
        }

        let mut status = Self::wait_for(controller.load_more()).await?;
        loop {
            match status {
                LoadStatus::Loaded { page_index, count } => {
                    summary.pages += 1;

                    let items = view.items();
                    for item in &items[rendered..] {
                        self.output_message(&json!({
                            "type": "ITEM",
                            "page": page_index,
                            "item": item,
                        }));
                    }
                    rendered = items.len();
                    last_rendered = items.last().cloned();

                    if count == 0 {
                        summary.reached_end = true;
                        break;
                    }
                }
                LoadStatus::Failed { page_index } => {
                    let err = failure.lock().ok().and_then(|mut slot| slot.take());
                    return Err(
                        err.unwrap_or_else(|| Error::Other(format!("Page {page_index} failed")))
                    );
                }
                LoadStatus::Skipped => break,
                LoadStatus::Exhausted { .. } => {
                    summary.reached_end = true;
                    break;
                }
            }

            if max_pages.is_some_and(|max| summary.pages >= max) {
                break;
            }

            let Some(last) = last_rendered.as_ref() else {
                break;
            };
            if !controller.should_load_more(last) {
                break;
            }
            status = Self::wait_for(controller.load_more()).await?;
        }

        Ok(self.finish_scroll(summary, &controller))
    }

    /// Record final progress and emit the STATE message
    fn finish_scroll<F: PageFetcher>(
        &self,
        mut summary: ScrollSummary,
        controller: &PaginationController<F>,
    ) -> ScrollSummary {
        summary.items = controller.len();
        summary.next_page = controller.page_index();

        self.output_message(&json!({
            "type": "STATE",
            "state": summary,
        }));

        summary
    }

    async fn wait_for(load: JoinHandle<LoadStatus>) -> Result<LoadStatus> {
        load.await
            .map_err(|e| Error::Other(format!("Load task failed: {e}")))
    }

    /// Validate a feed definition file
    fn validate(&self, path: &Path) -> Result<()> {
        let feed = load_feed_config(path)?;

        self.output_message(&json!({
            "type": "LOG",
            "log": {
                "level": "INFO",
                "message": format!(
                    "Feed '{}' is valid (page param '{}', items at '{}', starting at page {})",
                    feed.source.url,
                    feed.source.page_param,
                    feed.source.items_path,
                    feed.controller.initial_page
                )
            }
        }));

        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}
