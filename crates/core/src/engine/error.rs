//! Error types for the orchestration controller.

use super::resources::ResourceKind;
use crate::clients::ClientError;
use crate::pipeline::PipelineError;
use blogi_protocol::{AgentConfigError, FailureKind};
use std::path::PathBuf;
use thiserror::Error;

/// Why a run failed. Every variant maps to one [`FailureKind`].
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] AgentConfigError),

    #[error("Dependency check failed: {0}")]
    Dependency(String),

    #[error("Failed to acquire {kind} client: {source}")]
    Acquire {
        kind: ResourceKind,
        #[source]
        source: ClientError,
    },

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Failed to save post to {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RunError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Configuration(_) => FailureKind::Configuration,
            Self::Dependency(_) | Self::Acquire { .. } => FailureKind::Dependency,
            Self::Pipeline(_) => FailureKind::Pipeline,
            Self::Persistence { .. } => FailureKind::Persistence,
        }
    }
}

/// Type alias for Result with RunError.
pub type RunResult<T> = Result<T, RunError>;

/// Every close failure from one teardown.
#[derive(Error, Debug)]
#[error("{} resource(s) failed to close: {}", .failures.len(), describe(.failures))]
pub struct TeardownError {
    pub failures: Vec<(ResourceKind, ClientError)>,
}

fn describe(failures: &[(ResourceKind, ClientError)]) -> String {
    failures
        .iter()
        .map(|(kind, err)| format!("{kind}: {err}"))
        .collect::<Vec<_>>()
        .join("; ")
}
