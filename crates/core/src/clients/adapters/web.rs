//! Webpage fetcher that extracts the readable text of a page.

use crate::clients::base::{ClientError, ContentFetcher, Resource};
use async_trait::async_trait;
use scraper::{ElementRef, Html, Node, Selector};
use std::time::Duration;
use tokio::sync::RwLock;

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko)";

/// Elements whose text never counts as content.
const SKIPPED_ELEMENTS: [&str; 5] = ["script", "style", "nav", "header", "footer"];

/// Containers tried in order before falling back to the whole document.
const CONTENT_SELECTORS: [&str; 3] = [
    "main",
    "article",
    "div[class*=content], div[class*=article], div[class*=post]",
];

pub struct WebContentFetcher {
    max_chars: usize,
    http: RwLock<Option<reqwest::Client>>,
}

impl WebContentFetcher {
    /// # Arguments
    ///
    /// * `timeout` - Per-page fetch timeout
    /// * `max_chars` - Extracted text is cut to this many characters
    pub fn new(timeout: Duration, max_chars: usize) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ClientError::Connect("web".to_string(), e.to_string()))?;

        Ok(Self {
            max_chars,
            http: RwLock::new(Some(http)),
        })
    }
}

#[async_trait]
impl Resource for WebContentFetcher {
    fn label(&self) -> &'static str {
        "web"
    }

    async fn close(&self) -> Result<(), ClientError> {
        self.http.write().await.take();
        Ok(())
    }
}

#[async_trait]
impl ContentFetcher for WebContentFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ClientError> {
        let http = self
            .http
            .read()
            .await
            .clone()
            .ok_or_else(|| ClientError::Closed(self.label().to_string()))?;

        let html = http.get(url).send().await?.error_for_status()?.text().await?;

        let text = extract_main_text(&html, self.max_chars);
        if text.is_empty() {
            return Err(ClientError::EmptyResponse(url.to_string()));
        }
        Ok(text)
    }
}

/// Extract the main text of an HTML document.
///
/// Script, style and page-chrome elements are ignored, whitespace runs are
/// collapsed to one space, and the result is cut to `max_chars` characters.
pub fn extract_main_text(html: &str, max_chars: usize) -> String {
    let document = Html::parse_document(html);

    let container = CONTENT_SELECTORS
        .iter()
        .filter_map(|css| Selector::parse(css).ok())
        .find_map(|selector| document.select(&selector).next())
        .unwrap_or_else(|| document.root_element());

    let raw = visible_text(container);
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(max_chars)
        .collect()
}

fn visible_text(container: ElementRef<'_>) -> String {
    let mut pieces = Vec::new();
    for node in container.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let skipped = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| SKIPPED_ELEMENTS.contains(&el.name()))
        });
        if !skipped {
            pieces.push(text.trim().to_string());
        }
    }
    pieces.join(" ")
}
