//! Settings models.
//!
//! [`FileSettings`] mirrors the optional `blogi.toml` file; [`Settings`] is the
//! resolved, immutable value handed to the controller.

use blogi_protocol::DEFAULT_MODEL;
use serde::Deserialize;
use std::path::PathBuf;

/// Default image-prompt model for the random prompt provider.
pub const DEFAULT_IMAGE_PROMPT_MODEL: &str = "gpt-4o-mini";

/// Bounds applied to the research fan-out and to every network call.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Limits {
    /// How many ranked search results are researched.
    pub max_search_results: usize,
    /// Maximum characters kept from one fetched page.
    pub max_content_chars: usize,
    pub fetch_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_search_results: 3,
            max_content_chars: 10_000,
            fetch_timeout_secs: 30,
            request_timeout_secs: 120,
        }
    }
}

/// API credentials. Any may be absent; the controller decides which ones a
/// run needs.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Credentials {
    pub anthropic_api_key: Option<String>,
    pub brave_search_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub userapi_api_key: Option<String>,
    pub userapi_account_hash: Option<String>,
}

/// Contents of `blogi.toml`.
///
/// # Example
///
/// ```toml
/// posts_dir = "ai_blog/content/posts"
/// model = "claude-3-haiku-20240307"
///
/// [limits]
/// max_search_results = 3
///
/// [credentials]
/// brave_search_api_key = "..."
/// ```
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct FileSettings {
    pub posts_dir: Option<PathBuf>,
    pub prompts_dir: Option<PathBuf>,
    pub model: Option<String>,
    pub image_prompt_model: Option<String>,
    pub limits: Limits,
    pub credentials: Credentials,
}

/// Resolved settings, built once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory generated posts are written to.
    pub posts_dir: PathBuf,
    /// Prompt tree overriding the embedded one, if any.
    pub prompts_dir: Option<PathBuf>,
    /// Completion model used when the agent config keeps the default.
    pub model: String,
    pub image_prompt_model: String,
    pub limits: Limits,
    pub credentials: Credentials,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            posts_dir: PathBuf::from("content/posts"),
            prompts_dir: None,
            model: DEFAULT_MODEL.to_string(),
            image_prompt_model: DEFAULT_IMAGE_PROMPT_MODEL.to_string(),
            limits: Limits::default(),
            credentials: Credentials::default(),
        }
    }
}
