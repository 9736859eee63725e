//! Client traits for the external services a run talks to.

use async_trait::async_trait;
use blogi_protocol::SearchResult;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Missing credential: {0}")]
    MissingCredential(String),
    #[error("Failed to open {0}: {1}")]
    Connect(String, String),
    #[error("API call failed: {0}")]
    ApiError(String),
    #[error("HTTP error {status} for {url}")]
    HttpStatus { status: u16, url: String },
    #[error("Request timed out: {0}")]
    Timeout(String),
    #[error("Response parsing error: {0}")]
    ParseError(String),
    #[error("Empty response from {0}")]
    EmptyResponse(String),
    #[error("{0} has been closed")]
    Closed(String),
    #[error("Failed to close {0}: {1}")]
    Close(String, String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "request".to_string());
        if err.is_timeout() {
            ClientError::Timeout(url)
        } else if let Some(status) = err.status() {
            ClientError::HttpStatus {
                status: status.as_u16(),
                url,
            }
        } else if err.is_decode() {
            ClientError::ParseError(err.to_string())
        } else {
            ClientError::ApiError(err.to_string())
        }
    }
}

/// A handle that holds a network connection for the duration of a run.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Short name used in logs and teardown errors.
    fn label(&self) -> &'static str;

    /// Release the connection. Calls after the first are no-ops.
    async fn close(&self) -> Result<(), ClientError>;
}

/// One prompt in, one full completion out.
#[async_trait]
pub trait CompletionClient: Resource {
    async fn ask(&self, prompt: &str) -> Result<String, ClientError>;
}

/// Ranked web search.
#[async_trait]
pub trait SearchClient: Resource {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ClientError>;
}

/// Fetches a page and returns its main text content.
#[async_trait]
pub trait ContentFetcher: Resource {
    async fn fetch(&self, url: &str) -> Result<String, ClientError>;
}

/// Submits an image generation job. The result is delivered to `callback`
/// out of band.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn submit(&self, prompt: &str, callback: &str) -> Result<(), ClientError>;
}

/// Produces an image prompt when the caller did not supply one.
#[async_trait]
pub trait PromptProvider: Send + Sync {
    async fn random_prompt(&self) -> Result<String, ClientError>;
}
