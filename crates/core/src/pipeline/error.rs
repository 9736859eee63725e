//! Error types for the generation pipelines.

use crate::clients::ClientError;
use crate::templates::TemplateError;
use thiserror::Error;

/// Failures that abort a pipeline.
///
/// Per-field metadata failures and per-source research failures are
/// recovered inside the pipeline and never surface here.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Search failed: {0}")]
    Search(#[source] ClientError),

    #[error("Body generation failed: {0}")]
    BodyGeneration(#[source] ClientError),

    #[error("Body generation returned no content")]
    EmptyBody,

    #[error("Image submission failed: {0}")]
    ImageSubmission(#[source] ClientError),

    #[error("Image prompt generation failed: {0}")]
    ImagePrompt(#[source] ClientError),
}

/// Type alias for Result with PipelineError.
pub type PipelineResult<T> = Result<T, PipelineError>;
