//! Orchestration controller.
//!
//! The [`Controller`] turns one [`AgentConfig`] into one saved post. It owns
//! every network client opened for the run and releases them before
//! returning, whatever the outcome.

pub mod error;
pub mod persist;
pub mod resources;

pub use error::{RunError, RunResult, TeardownError};
pub use resources::{ResourceKind, ResourceSet};

use crate::clients::Connector;
use crate::config::loader::{
    ENV_ANTHROPIC_API_KEY, ENV_BRAVE_SEARCH_API_KEY, ENV_OPENAI_API_KEY, ENV_USERAPI_ACCOUNT_HASH,
    ENV_USERAPI_API_KEY,
};
use crate::config::Settings;
use crate::pipeline::{
    ArtistPipeline, Pipeline, PipelineContext, PipelineError, ResearcherPipeline,
};
use crate::templates::{TemplateSet, TemplateStore};
use blogi_protocol::{AgentConfig, AgentConfigError, AgentKind, GenerationResult};
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Runs generation requests against a [`Connector`].
///
/// The controller is stateless between runs; each call to
/// [`run`](Self::run) gets its own [`ResourceSet`].
pub struct Controller<C: Connector> {
    settings: Arc<Settings>,
    connector: C,
    store: TemplateStore,
    clock: fn() -> NaiveDate,
}

impl<C: Connector> Controller<C> {
    /// Create a controller reading templates from the configured prompt
    /// directory, falling back to the embedded prompt set.
    pub fn new(settings: Arc<Settings>, connector: C) -> Self {
        let store = TemplateStore::for_prompts_dir(settings.prompts_dir.as_deref());
        Self {
            settings,
            connector,
            store,
            clock: local_today,
        }
    }

    pub fn with_store(mut self, store: TemplateStore) -> Self {
        self.store = store;
        self
    }

    /// Replace the source of "today" used for prompts, dates and filenames.
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn store(&self) -> &TemplateStore {
        &self.store
    }

    /// Generate and save one post.
    ///
    /// Phases, in order:
    /// 1. Validate `config`
    /// 2. Check credentials, the posts directory and that the agent's
    ///    prompts load for its kind
    /// 3. Pick a random image prompt for artists that supplied none
    /// 4. Open the clients the agent kind needs
    /// 5. Run the pipeline
    /// 6. Save the post
    ///
    /// Every opened client is closed before this returns. Close failures are
    /// logged and do not change the result.
    ///
    /// # Returns
    ///
    /// A [`GenerationResult`]; failures are reported through it, never
    /// through a panic or an error.
    pub async fn run(&self, config: &AgentConfig) -> GenerationResult {
        let run_id = Uuid::new_v4();
        let span = info_span!(
            "run",
            %run_id,
            agent = %config.agent_name,
            kind = %config.kind
        );

        async {
            info!("Starting blog generation");
            let mut resources = ResourceSet::new();
            let outcome = self.execute(config, &mut resources).await;

            if let Err(err) = resources.teardown().await {
                error!(error = %err, "Resource cleanup reported errors");
            }

            match outcome {
                Ok(path) => {
                    info!(path = %path.display(), "Blog generation finished");
                    GenerationResult::saved(path)
                }
                Err(err) => {
                    error!(error = %err, failure = ?err.kind(), "Blog generation failed");
                    GenerationResult::failed(err.kind(), err.to_string())
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn execute(&self, config: &AgentConfig, resources: &mut ResourceSet) -> RunResult<PathBuf> {
        config.validate()?;
        self.check_dependencies(config).await?;

        let image_prompt = match config.kind {
            AgentKind::Artist => Some(self.resolve_image_prompt(config).await?),
            AgentKind::Researcher => None,
        };

        resources
            .acquire(
                &self.connector,
                ResourceKind::for_agent(config.kind),
                &config.model,
            )
            .await?;

        let pipeline = self.build_pipeline(config, resources, image_prompt)?;
        let post = pipeline.generate().await?;

        persist::save_post(&self.settings.posts_dir, &post).await
    }

    async fn check_dependencies(&self, config: &AgentConfig) -> RunResult<()> {
        let credentials = &self.settings.credentials;
        let mut required = vec![(&credentials.anthropic_api_key, ENV_ANTHROPIC_API_KEY)];
        match config.kind {
            AgentKind::Researcher => {
                required.push((&credentials.brave_search_api_key, ENV_BRAVE_SEARCH_API_KEY));
            }
            AgentKind::Artist => {
                required.push((&credentials.userapi_api_key, ENV_USERAPI_API_KEY));
                required.push((&credentials.userapi_account_hash, ENV_USERAPI_ACCOUNT_HASH));
                if config.image_prompt().is_none() {
                    required.push((&credentials.openai_api_key, ENV_OPENAI_API_KEY));
                }
            }
        }

        let missing: Vec<&str> = required
            .into_iter()
            .filter(|(value, _)| value.is_none())
            .map(|(_, name)| name)
            .collect();
        if !missing.is_empty() {
            return Err(RunError::Dependency(format!(
                "missing credentials: {}",
                missing.join(", ")
            )));
        }

        let posts_dir = &self.settings.posts_dir;
        tokio::fs::create_dir_all(posts_dir).await.map_err(|err| {
            RunError::Dependency(format!(
                "cannot create posts directory {}: {err}",
                posts_dir.display()
            ))
        })?;

        if !self.store.has_agent(&config.agent_name) {
            return Err(RunError::Dependency(format!(
                "no prompt directory for agent '{}'",
                config.agent_name
            )));
        }

        // Catches an agent directory written for the other kind.
        TemplateSet::load(&self.store, &config.agent_name, config.kind)
            .await
            .map_err(|err| {
                RunError::Dependency(format!(
                    "prompts for agent '{}' cannot serve a {} run: {err}",
                    config.agent_name, config.kind
                ))
            })?;

        Ok(())
    }

    async fn resolve_image_prompt(&self, config: &AgentConfig) -> RunResult<String> {
        if let Some(prompt) = config.image_prompt() {
            return Ok(prompt.to_string());
        }

        let provider = self
            .connector
            .prompt_provider()
            .map_err(|err| RunError::Dependency(err.to_string()))?;
        let prompt = provider
            .random_prompt()
            .await
            .map_err(PipelineError::ImagePrompt)?;
        info!(image_prompt = %prompt, "Generated random image prompt");
        Ok(prompt)
    }

    fn build_pipeline(
        &self,
        config: &AgentConfig,
        resources: &ResourceSet,
        image_prompt: Option<String>,
    ) -> RunResult<Box<dyn Pipeline>> {
        let completion = resources
            .completion()
            .ok_or_else(|| not_acquired(ResourceKind::Completion))?;
        let context = PipelineContext::new(
            self.store.clone(),
            config.agent_name.as_str(),
            (self.clock)(),
            completion,
        );

        match config.kind {
            AgentKind::Researcher => {
                let topic = config.topic().ok_or(AgentConfigError::MissingTopic)?;
                let search = resources
                    .search()
                    .ok_or_else(|| not_acquired(ResourceKind::Search))?;
                let fetcher = resources
                    .fetcher()
                    .ok_or_else(|| not_acquired(ResourceKind::WebFetch))?;
                Ok(Box::new(
                    ResearcherPipeline::new(context, topic, search, fetcher)
                        .with_max_results(self.settings.limits.max_search_results),
                ))
            }
            AgentKind::Artist => {
                let callback = config
                    .callback_url()
                    .ok_or(AgentConfigError::MissingCallback)?;
                let image = self
                    .connector
                    .image_generator()
                    .map_err(|err| RunError::Dependency(err.to_string()))?;
                let image_prompt = image_prompt.ok_or_else(|| {
                    RunError::Dependency("image prompt was not resolved".to_string())
                })?;
                Ok(Box::new(ArtistPipeline::new(
                    context,
                    image_prompt,
                    callback,
                    image,
                )))
            }
        }
    }
}

fn not_acquired(kind: ResourceKind) -> RunError {
    RunError::Dependency(format!("{kind} client was not acquired"))
}
