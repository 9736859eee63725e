//! The terminal outcome of one generation run.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which phase of a run failed.
///
/// Lets callers tell "nothing was produced" (`Configuration`, `Dependency`,
/// `Pipeline`) apart from "the post was produced but lost" (`Persistence`).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Configuration,
    Dependency,
    Pipeline,
    Persistence,
}

/// Result of `Controller::run`.
///
/// Carries no live resources; safe to serialize and hand to other tools.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub success: bool,
    pub message: String,
    /// Absolute path of the saved post, on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl GenerationResult {
    pub fn saved(file_path: PathBuf) -> Self {
        Self {
            success: true,
            message: "Blog post generated and saved successfully".to_string(),
            file_path: Some(file_path),
            failure: None,
        }
    }

    pub fn failed(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            file_path: None,
            failure: Some(kind),
        }
    }
}
