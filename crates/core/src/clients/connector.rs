//! Connector: the factory that opens service clients for a run.

use crate::clients::adapters::{
    AnthropicClient, BraveSearchClient, MidjourneyClient, OpenAiPromptProvider, WebContentFetcher,
};
use crate::clients::base::{
    ClientError, CompletionClient, ContentFetcher, ImageGenerator, PromptProvider, SearchClient,
};
use crate::config::loader::{
    ENV_ANTHROPIC_API_KEY, ENV_BRAVE_SEARCH_API_KEY, ENV_OPENAI_API_KEY, ENV_USERAPI_ACCOUNT_HASH,
    ENV_USERAPI_API_KEY,
};
use crate::config::Settings;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Opens the clients a run needs.
///
/// Clients returned by the `open_*` methods hold a connection and must be
/// closed; the controller tracks them in a
/// [`ResourceSet`](crate::engine::resources::ResourceSet). Image and prompt
/// clients are one-shot and are not tracked.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn open_completion(&self, model: &str) -> Result<Arc<dyn CompletionClient>, ClientError>;
    async fn open_search(&self) -> Result<Arc<dyn SearchClient>, ClientError>;
    async fn open_fetcher(&self) -> Result<Arc<dyn ContentFetcher>, ClientError>;
    fn image_generator(&self) -> Result<Arc<dyn ImageGenerator>, ClientError>;
    fn prompt_provider(&self) -> Result<Arc<dyn PromptProvider>, ClientError>;
}

/// Connector for the real HTTP services, configured from [`Settings`].
pub struct HttpConnector {
    settings: Arc<Settings>,
}

impl HttpConnector {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.settings.limits.request_timeout_secs)
    }
}

fn credential(value: &Option<String>, name: &str) -> Result<String, ClientError> {
    value
        .clone()
        .ok_or_else(|| ClientError::MissingCredential(name.to_string()))
}

#[async_trait]
impl Connector for HttpConnector {
    async fn open_completion(&self, model: &str) -> Result<Arc<dyn CompletionClient>, ClientError> {
        let key = credential(&self.settings.credentials.anthropic_api_key, ENV_ANTHROPIC_API_KEY)?;
        let client = AnthropicClient::new(key, model.to_string(), self.request_timeout())?;
        Ok(Arc::new(client))
    }

    async fn open_search(&self) -> Result<Arc<dyn SearchClient>, ClientError> {
        let key = credential(
            &self.settings.credentials.brave_search_api_key,
            ENV_BRAVE_SEARCH_API_KEY,
        )?;
        let client = BraveSearchClient::new(key, self.request_timeout())?;
        Ok(Arc::new(client))
    }

    async fn open_fetcher(&self) -> Result<Arc<dyn ContentFetcher>, ClientError> {
        let limits = &self.settings.limits;
        let client = WebContentFetcher::new(
            Duration::from_secs(limits.fetch_timeout_secs),
            limits.max_content_chars,
        )?;
        Ok(Arc::new(client))
    }

    fn image_generator(&self) -> Result<Arc<dyn ImageGenerator>, ClientError> {
        let credentials = &self.settings.credentials;
        let key = credential(&credentials.userapi_api_key, ENV_USERAPI_API_KEY)?;
        let hash = credential(&credentials.userapi_account_hash, ENV_USERAPI_ACCOUNT_HASH)?;
        Ok(Arc::new(MidjourneyClient::new(key, hash, self.request_timeout())?))
    }

    fn prompt_provider(&self) -> Result<Arc<dyn PromptProvider>, ClientError> {
        let key = credential(&self.settings.credentials.openai_api_key, ENV_OPENAI_API_KEY)?;
        Ok(Arc::new(OpenAiPromptProvider::new(
            key,
            self.settings.image_prompt_model.clone(),
            self.request_timeout(),
        )?))
    }
}
