//! Research-backed posts: search the topic, summarize the top sources, write.

use super::error::{PipelineError, PipelineResult};
use super::metadata::format_date;
use super::{GeneratedPost, Pipeline, PipelineContext};
use crate::clients::{ContentFetcher, SearchClient};
use crate::config::Limits;
use crate::templates::{Bindings, Field, TemplateName};
use async_trait::async_trait;
use blogi_protocol::{format_research_summary, AgentKind, ResearchItem};
use std::sync::Arc;
use tracing::{info, warn};

pub struct ResearcherPipeline {
    context: PipelineContext,
    topic: String,
    search: Arc<dyn SearchClient>,
    fetcher: Arc<dyn ContentFetcher>,
    max_results: usize,
}

impl ResearcherPipeline {
    pub fn new(
        context: PipelineContext,
        topic: impl Into<String>,
        search: Arc<dyn SearchClient>,
        fetcher: Arc<dyn ContentFetcher>,
    ) -> Self {
        Self {
            context,
            topic: topic.into(),
            search,
            fetcher,
            max_results: Limits::default().max_search_results,
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Search the topic and summarize each kept result in rank order.
    ///
    /// A search failure aborts; a source that cannot be fetched or
    /// summarized is kept without a summary.
    pub async fn gather_research(&self, instructions: &str) -> PipelineResult<Vec<ResearchItem>> {
        let results = self
            .search
            .search(&self.topic)
            .await
            .map_err(PipelineError::Search)?;
        info!(found = results.len(), keep = self.max_results, "Search complete");

        let mut items = Vec::new();
        for result in results.into_iter().take(self.max_results) {
            let summary = self.summarize_source(&result.url, instructions).await;
            items.push(ResearchItem::from_result(result, summary));
        }
        Ok(items)
    }

    async fn summarize_source(&self, url: &str, instructions: &str) -> Option<String> {
        let content = match self.fetcher.fetch(url).await {
            Ok(content) if !content.trim().is_empty() => content,
            Ok(_) => {
                warn!(url, "Source has no readable content");
                return None;
            }
            Err(err) => {
                warn!(url, error = %err, "Failed to fetch source");
                return None;
            }
        };

        let prompt = format!("{instructions}\n\n{content}");
        match self.context.completion.ask(&prompt).await {
            Ok(summary) if !summary.trim().is_empty() => Some(summary.trim().to_string()),
            Ok(_) => {
                warn!(url, "Empty summary for source");
                None
            }
            Err(err) => {
                warn!(url, error = %err, "Failed to summarize source");
                None
            }
        }
    }
}

#[async_trait]
impl Pipeline for ResearcherPipeline {
    fn kind(&self) -> AgentKind {
        AgentKind::Researcher
    }

    async fn generate(&self) -> PipelineResult<GeneratedPost> {
        let templates = self.context.load_templates(self.kind()).await?;
        let disclaimer = templates.get(TemplateName::Disclaimer)?.text()?;
        let instructions = templates.get(TemplateName::SummarizeContent)?.text()?;

        let research = self.gather_research(&instructions).await?;
        let summarized = research
            .iter()
            .filter(|item| item.content_summary.is_some())
            .count();
        info!(sources = research.len(), summarized, "Research gathered");

        let prompt = self.context.main_prompt(
            &templates,
            &Bindings::new()
                .with(Field::Topic, self.topic.as_str())
                .with(Field::Today, format_date(self.context.today))
                .with(Field::Disclaimer, disclaimer.as_str()),
            &Bindings::new()
                .with(Field::ResearchSummary, format_research_summary(&research))
                .with(Field::Topic, self.topic.as_str()),
        )?;
        let body = self.context.write_body(&prompt).await?;

        self.context
            .finish(&templates, self.kind(), &disclaimer, body)
            .await
    }
}
