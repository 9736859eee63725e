//! Completion client backed by the Anthropic Messages API.

use crate::clients::base::{ClientError, CompletionClient, Resource};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::RwLock;

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

/// Anthropic completion client.
///
/// Owns one `reqwest::Client` connection pool until [`Resource::close`] is
/// called; afterwards every `ask` fails with [`ClientError::Closed`].
pub struct AnthropicClient {
    api_key: String,
    model: String,
    http: RwLock<Option<reqwest::Client>>,
}

impl AnthropicClient {
    /// Create a client for `model`.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Anthropic API key
    /// * `model` - Model identifier, e.g. `claude-3-haiku-20240307`
    /// * `timeout` - Upper bound for a single request
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Connect("anthropic".to_string(), e.to_string()))?;

        Ok(Self {
            api_key,
            model,
            http: RwLock::new(Some(http)),
        })
    }

    async fn http(&self) -> Result<reqwest::Client, ClientError> {
        self.http
            .read()
            .await
            .clone()
            .ok_or_else(|| ClientError::Closed(self.label().to_string()))
    }
}

#[async_trait]
impl Resource for AnthropicClient {
    fn label(&self) -> &'static str {
        "anthropic"
    }

    async fn close(&self) -> Result<(), ClientError> {
        self.http.write().await.take();
        Ok(())
    }
}

#[async_trait]
impl CompletionClient for AnthropicClient {
    async fn ask(&self, prompt: &str) -> Result<String, ClientError> {
        let http = self.http().await?;
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response: MessagesResponse = http
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        extract_text(response)
    }
}

fn extract_text(response: MessagesResponse) -> Result<String, ClientError> {
    let text: String = response
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .map(|block| block.text)
        .collect();

    if text.trim().is_empty() {
        return Err(ClientError::EmptyResponse("anthropic".to_string()));
    }
    Ok(text)
}
