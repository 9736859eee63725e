//! Generation pipelines, one per agent kind.
//!
//! A pipeline loads its templates, gathers source material, asks the
//! completion client for a draft body, derives metadata and renders the final
//! document. It never touches the filesystem outside the template store and
//! never closes the clients it was given.

pub mod artist;
pub mod error;
pub mod metadata;
pub mod researcher;

pub use artist::ArtistPipeline;
pub use error::{PipelineError, PipelineResult};
pub use metadata::DocumentMetadata;
pub use researcher::ResearcherPipeline;

use crate::clients::CompletionClient;
use crate::templates::{Bindings, Field, TemplateName, TemplateSet, TemplateStore};
use async_trait::async_trait;
use blogi_protocol::AgentKind;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

/// A finished post ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPost {
    pub filename: String,
    pub document: String,
    pub metadata: DocumentMetadata,
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    fn kind(&self) -> AgentKind;

    async fn generate(&self) -> PipelineResult<GeneratedPost>;
}

/// Inputs common to every pipeline.
#[derive(Clone)]
pub struct PipelineContext {
    pub store: TemplateStore,
    pub agent_name: String,
    pub today: NaiveDate,
    pub completion: Arc<dyn CompletionClient>,
}

impl PipelineContext {
    pub fn new(
        store: TemplateStore,
        agent_name: impl Into<String>,
        today: NaiveDate,
        completion: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            store,
            agent_name: agent_name.into(),
            today,
            completion,
        }
    }

    pub(crate) async fn load_templates(&self, kind: AgentKind) -> PipelineResult<TemplateSet> {
        Ok(TemplateSet::load(&self.store, &self.agent_name, kind).await?)
    }

    /// Agent prompt and enhanced prompt joined by a blank line.
    pub(crate) fn main_prompt(
        &self,
        templates: &TemplateSet,
        agent: &Bindings,
        enhanced: &Bindings,
    ) -> PipelineResult<String> {
        let agent_prompt = templates.render(TemplateName::AgentPrompt, agent)?;
        let enhanced_prompt = templates.render(TemplateName::EnhancedPrompt, enhanced)?;
        Ok(format!("{agent_prompt}\n\n{enhanced_prompt}"))
    }

    pub(crate) async fn write_body(&self, prompt: &str) -> PipelineResult<String> {
        let body = self
            .completion
            .ask(prompt)
            .await
            .map_err(PipelineError::BodyGeneration)?;
        if body.trim().is_empty() {
            return Err(PipelineError::EmptyBody);
        }
        info!(chars = body.chars().count(), "Draft body generated");
        Ok(body)
    }

    /// Derive metadata for `body` and render the full document.
    pub(crate) async fn finish(
        &self,
        templates: &TemplateSet,
        kind: AgentKind,
        disclaimer: &str,
        body: String,
    ) -> PipelineResult<GeneratedPost> {
        let metadata =
            metadata::generate_metadata(self.completion.as_ref(), templates, &body, self.today)
                .await;

        let frontmatter = templates.render(
            TemplateName::Frontmatter,
            &Bindings::new()
                .with(Field::Title, metadata.title.as_str())
                .with(Field::Tags, metadata.tags.as_str())
                .with(Field::Date, metadata::format_date(metadata.date))
                .with(Field::Author, kind.author()),
        )?;
        let document = templates.render(
            TemplateName::BlogPage,
            &Bindings::new()
                .with(Field::Frontmatter, frontmatter)
                .with(Field::Disclaimer, disclaimer)
                .with(Field::Content, body),
        )?;

        Ok(GeneratedPost {
            filename: metadata.filename(),
            document,
            metadata,
        })
    }
}
