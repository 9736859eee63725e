//! Random image prompt provider backed by OpenAI chat completions.

use crate::clients::base::{ClientError, PromptProvider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

const SYSTEM_PROMPT: &str = "You write prompts for an image generation model. \
Reply with a single vivid, specific image prompt of at most 60 words. \
Pick an unexpected subject, setting and art style. Reply with the prompt only.";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct OpenAiPromptProvider {
    api_key: String,
    model: String,
    http: reqwest::Client,
}

impl OpenAiPromptProvider {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Connect("openai".to_string(), e.to_string()))?;

        Ok(Self {
            api_key,
            model,
            http,
        })
    }
}

#[async_trait]
impl PromptProvider for OpenAiPromptProvider {
    async fn random_prompt(&self) -> Result<String, ClientError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: "Give me a random image prompt.",
                },
            ],
            temperature: 1.0,
        };

        let response: ChatResponse = self
            .http
            .post(CHAT_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        first_choice(response)
    }
}

fn first_choice(response: ChatResponse) -> Result<String, ClientError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().trim_matches('"').trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| ClientError::EmptyResponse("openai".to_string()))
}
