//! Image generation through the UserAPI Midjourney proxy.

use crate::clients::base::{ClientError, ImageGenerator};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const IMAGINE_URL: &str = "https://api.userapi.ai/midjourney/v2/imagine";

#[derive(Serialize)]
struct ImagineRequest<'a> {
    prompt: &'a str,
    webhook_url: &'a str,
    webhook_type: &'a str,
    account_hash: &'a str,
    is_disable_prefilter: bool,
}

#[derive(Deserialize)]
struct ImagineResponse {
    #[serde(default)]
    hash: Option<String>,
}

/// Fire-and-forget Midjourney client.
///
/// `submit` returns once the job is accepted; the rendered image is posted to
/// the webhook by the service.
pub struct MidjourneyClient {
    api_key: String,
    account_hash: String,
    http: reqwest::Client,
}

impl MidjourneyClient {
    pub fn new(api_key: String, account_hash: String, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Connect("midjourney".to_string(), e.to_string()))?;

        Ok(Self {
            api_key,
            account_hash,
            http,
        })
    }
}

#[async_trait]
impl ImageGenerator for MidjourneyClient {
    async fn submit(&self, prompt: &str, callback: &str) -> Result<(), ClientError> {
        let request = ImagineRequest {
            prompt,
            webhook_url: callback,
            webhook_type: "result",
            account_hash: &self.account_hash,
            is_disable_prefilter: false,
        };

        let response: ImagineResponse = self
            .http
            .post(IMAGINE_URL)
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match response.hash {
            Some(hash) => tracing::info!(task = %hash, "Image job submitted"),
            None => tracing::info!("Image job submitted"),
        }
        Ok(())
    }
}
