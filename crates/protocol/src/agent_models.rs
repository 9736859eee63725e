//! Agent configuration models.
//!
//! An agent is a named prompt directory (e.g. `topic_researcher`) paired with
//! an [`AgentKind`] that decides which generation pipeline runs for it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default completion model used when the caller does not pick one.
pub const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";

/// The closed set of agent kinds.
///
/// Each kind maps to exactly one generation pipeline.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentKind {
    /// Text-research-driven post: search, fetch, summarize, write.
    #[serde(rename = "blog_researcher_ai_agent")]
    Researcher,

    /// Image-driven post: submit an image job, then write about it.
    #[serde(rename = "blog_artist_ai_agent")]
    Artist,
}

impl AgentKind {
    /// All kinds, in declaration order.
    pub const ALL: [AgentKind; 2] = [AgentKind::Researcher, AgentKind::Artist];

    /// Wire name used on the command line and in serialized configs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Researcher => "blog_researcher_ai_agent",
            Self::Artist => "blog_artist_ai_agent",
        }
    }

    /// Author label written into the generated frontmatter.
    pub fn author(&self) -> &'static str {
        match self {
            Self::Researcher => "AI Agent Researcher",
            Self::Artist => "AI Agent Artist",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentKind {
    type Err = AgentConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AgentConfigError::UnknownKind(s.to_string()))
    }
}

/// Reasons an [`AgentConfig`] is rejected before any work starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentConfigError {
    #[error("Invalid agent_type: {0}. Must be one of: blog_researcher_ai_agent, blog_artist_ai_agent")]
    UnknownKind(String),
    #[error("Agent name must not be empty")]
    MissingName,
    #[error("Topic is required for researcher agent")]
    MissingTopic,
    #[error("Webhook URL is required for artist agent")]
    MissingCallback,
}

/// Everything needed to describe one generation run.
///
/// The value is never mutated after construction. [`AgentConfig::validate`]
/// enforces the per-kind requirements; the controller calls it before
/// touching any resource.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    /// Prompt directory name, e.g. `topic_researcher`.
    pub agent_name: String,

    pub kind: AgentKind,

    /// Research topic. Required for [`AgentKind::Researcher`].
    #[serde(default)]
    pub topic: Option<String>,

    /// Image prompt. Optional for [`AgentKind::Artist`]; a random one is
    /// generated when absent.
    #[serde(default)]
    pub image_prompt: Option<String>,

    /// Webhook notified when the image job finishes. Required for
    /// [`AgentKind::Artist`].
    #[serde(default)]
    pub callback_url: Option<String>,

    /// Completion model identifier.
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl AgentConfig {
    /// Researcher config for `topic` with the default model.
    pub fn researcher(agent_name: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            kind: AgentKind::Researcher,
            topic: Some(topic.into()),
            image_prompt: None,
            callback_url: None,
            model: default_model(),
        }
    }

    /// Artist config posting its image to `callback_url`.
    pub fn artist(agent_name: impl Into<String>, callback_url: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            kind: AgentKind::Artist,
            topic: None,
            image_prompt: None,
            callback_url: Some(callback_url.into()),
            model: default_model(),
        }
    }

    pub fn with_image_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.image_prompt = Some(prompt.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Check the kind-specific requirements.
    ///
    /// Blank strings count as missing.
    pub fn validate(&self) -> Result<(), AgentConfigError> {
        if self.agent_name.trim().is_empty() {
            return Err(AgentConfigError::MissingName);
        }
        match self.kind {
            AgentKind::Researcher if non_blank(&self.topic).is_none() => {
                Err(AgentConfigError::MissingTopic)
            }
            AgentKind::Artist if non_blank(&self.callback_url).is_none() => {
                Err(AgentConfigError::MissingCallback)
            }
            _ => Ok(()),
        }
    }

    /// The topic, if present and not blank.
    pub fn topic(&self) -> Option<&str> {
        non_blank(&self.topic)
    }

    /// The image prompt, if present and not blank.
    pub fn image_prompt(&self) -> Option<&str> {
        non_blank(&self.image_prompt)
    }

    /// The callback URL, if present and not blank.
    pub fn callback_url(&self) -> Option<&str> {
        non_blank(&self.callback_url)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
