//! Search client backed by the Brave Search web API.

use crate::clients::base::{ClientError, Resource, SearchClient};
use async_trait::async_trait;
use blogi_protocol::SearchResult;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::RwLock;

const SEARCH_URL: &str = "https://api.search.brave.com/res/v1/web/search";

#[derive(Deserialize, Default)]
struct SearchResponse {
    #[serde(default)]
    web: Option<WebResults>,
}

#[derive(Deserialize, Default)]
struct WebResults {
    #[serde(default)]
    results: Vec<SearchResult>,
}

pub struct BraveSearchClient {
    api_key: String,
    http: RwLock<Option<reqwest::Client>>,
}

impl BraveSearchClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Connect("brave".to_string(), e.to_string()))?;

        Ok(Self {
            api_key,
            http: RwLock::new(Some(http)),
        })
    }
}

#[async_trait]
impl Resource for BraveSearchClient {
    fn label(&self) -> &'static str {
        "brave"
    }

    async fn close(&self) -> Result<(), ClientError> {
        self.http.write().await.take();
        Ok(())
    }
}

#[async_trait]
impl SearchClient for BraveSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ClientError> {
        let http = self
            .http
            .read()
            .await
            .clone()
            .ok_or_else(|| ClientError::Closed(self.label().to_string()))?;

        let response: SearchResponse = http
            .get(SEARCH_URL)
            .query(&[("q", query)])
            .header("Accept", "application/json")
            .header("X-Subscription-Token", &self.api_key)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(into_results(response))
    }
}

/// Keeps rank order and drops hits without a URL.
fn into_results(response: SearchResponse) -> Vec<SearchResult> {
    response
        .web
        .unwrap_or_default()
        .results
        .into_iter()
        .filter(|r| !r.url.is_empty())
        .collect()
}
