//! Template lookup over a prompt directory and the embedded prompt set.

use super::assets;
use super::error::{TemplateError, TemplateResult};
use super::names::{TemplateName, COMMON_DIR};
use super::render::Template;
use blogi_protocol::AgentKind;
use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Where templates are read from.
///
/// A directory-backed store reads `<root>/<agent>/…` and `<root>/_common/…`.
/// A layered store tries the directory first and falls back to the embedded
/// prompt set file by file.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: Option<PathBuf>,
    embedded: bool,
}

impl TemplateStore {
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
            embedded: false,
        }
    }

    pub fn embedded() -> Self {
        Self {
            dir: None,
            embedded: true,
        }
    }

    pub fn layered(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
            embedded: true,
        }
    }

    /// Layered over `dir` when given, embedded only otherwise.
    pub fn for_prompts_dir(dir: Option<&Path>) -> Self {
        match dir {
            Some(dir) => Self::layered(dir),
            None => Self::embedded(),
        }
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Raw text of a template.
    pub async fn load_source(&self, agent: &str, name: TemplateName) -> TemplateResult<String> {
        let relative = name.relative_path(agent);

        if let Some(dir) = &self.dir {
            let path = dir.join(&relative);
            match tokio::fs::read_to_string(&path).await {
                Ok(text) => return non_empty(text, agent, name),
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(source) => return Err(TemplateError::Unreadable { path, source }),
            }
        }

        if self.embedded {
            if let Some(text) = assets::get_prompt(&relative) {
                return non_empty(text, agent, name);
            }
        }

        Err(TemplateError::NotFound {
            agent: agent.to_string(),
            name,
        })
    }

    /// Load and validate a template for an agent of `kind`.
    pub async fn load(
        &self,
        agent: &str,
        name: TemplateName,
        kind: AgentKind,
    ) -> TemplateResult<Template> {
        let source = self.load_source(agent, name).await?;
        Template::parse(name, &source, name.allowed_fields(kind))
    }

    /// Whether a prompt directory exists for `agent`.
    pub fn has_agent(&self, agent: &str) -> bool {
        if !is_agent_name(agent) {
            return false;
        }
        let on_disk = self
            .dir
            .as_ref()
            .is_some_and(|dir| dir.join(agent).is_dir());
        on_disk || (self.embedded && assets::has_embedded_agent(agent))
    }

    /// Agent names available from every source, sorted.
    pub fn list_agents(&self) -> Vec<String> {
        let mut agents = BTreeSet::new();

        if let Some(dir) = &self.dir {
            for entry in WalkDir::new(dir)
                .min_depth(1)
                .max_depth(1)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|entry| entry.file_type().is_dir())
            {
                let name = entry.file_name().to_string_lossy().to_string();
                if is_agent_name(&name) {
                    agents.insert(name);
                }
            }
        }

        if self.embedded {
            agents.extend(assets::embedded_agents());
        }

        agents.into_iter().collect()
    }
}

/// Agent names are single path components that are not shared or hidden.
fn is_agent_name(name: &str) -> bool {
    !name.is_empty()
        && name != COMMON_DIR
        && !name.starts_with('.')
        && !name.starts_with('_')
        && !name.contains(['/', '\\'])
}

fn non_empty(text: String, agent: &str, name: TemplateName) -> TemplateResult<String> {
    if text.trim().is_empty() {
        Err(TemplateError::Empty {
            agent: agent.to_string(),
            name,
        })
    } else {
        Ok(text)
    }
}
