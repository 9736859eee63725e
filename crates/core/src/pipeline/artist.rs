//! Image-driven posts: submit the image job, then write about the prompt.

use super::error::{PipelineError, PipelineResult};
use super::metadata::format_date;
use super::{GeneratedPost, Pipeline, PipelineContext};
use crate::clients::ImageGenerator;
use crate::templates::{Bindings, Field, TemplateName};
use async_trait::async_trait;
use blogi_protocol::AgentKind;
use std::sync::Arc;
use tracing::info;

pub struct ArtistPipeline {
    context: PipelineContext,
    image_prompt: String,
    callback_url: String,
    image: Arc<dyn ImageGenerator>,
}

impl ArtistPipeline {
    pub fn new(
        context: PipelineContext,
        image_prompt: impl Into<String>,
        callback_url: impl Into<String>,
        image: Arc<dyn ImageGenerator>,
    ) -> Self {
        Self {
            context,
            image_prompt: image_prompt.into(),
            callback_url: callback_url.into(),
            image,
        }
    }
}

#[async_trait]
impl Pipeline for ArtistPipeline {
    fn kind(&self) -> AgentKind {
        AgentKind::Artist
    }

    async fn generate(&self) -> PipelineResult<GeneratedPost> {
        let templates = self.context.load_templates(self.kind()).await?;
        let disclaimer = templates.get(TemplateName::Disclaimer)?.text()?;

        self.image
            .submit(&self.image_prompt, &self.callback_url)
            .await
            .map_err(PipelineError::ImageSubmission)?;
        info!(callback = %self.callback_url, "Image generation requested");

        let prompt = self.context.main_prompt(
            &templates,
            &Bindings::new()
                .with(Field::ImagePrompt, self.image_prompt.as_str())
                .with(Field::Today, format_date(self.context.today))
                .with(Field::Disclaimer, disclaimer.as_str()),
            &Bindings::new().with(Field::ImagePrompt, self.image_prompt.as_str()),
        )?;
        let body = self.context.write_body(&prompt).await?;

        self.context
            .finish(&templates, self.kind(), &disclaimer, body)
            .await
    }
}
