//! The templates one pipeline run needs, loaded up front.

use super::error::{TemplateError, TemplateResult};
use super::names::TemplateName;
use super::render::{Bindings, Template};
use super::store::TemplateStore;
use blogi_protocol::AgentKind;
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct TemplateSet {
    agent: String,
    kind: AgentKind,
    templates: HashMap<TemplateName, Template>,
}

impl TemplateSet {
    /// Load every required template for `kind`, failing on the first one
    /// that is missing or invalid. Optional metadata prompts that fail to
    /// load are left out of the set.
    pub async fn load(store: &TemplateStore, agent: &str, kind: AgentKind) -> TemplateResult<Self> {
        let mut templates = HashMap::new();

        for name in TemplateName::required_for(kind) {
            let template = store.load(agent, *name, kind).await?;
            templates.insert(*name, template);
        }

        for name in TemplateName::OPTIONAL {
            match store.load(agent, name, kind).await {
                Ok(template) => {
                    templates.insert(name, template);
                }
                Err(err) => warn!(template = %name, error = %err, "Metadata prompt unavailable"),
            }
        }

        Ok(Self {
            agent: agent.to_string(),
            kind,
            templates,
        })
    }

    pub fn agent(&self) -> &str {
        &self.agent
    }

    pub fn kind(&self) -> AgentKind {
        self.kind
    }

    pub fn get(&self, name: TemplateName) -> TemplateResult<&Template> {
        self.templates
            .get(&name)
            .ok_or(TemplateError::NotLoaded(name))
    }

    pub fn contains(&self, name: TemplateName) -> bool {
        self.templates.contains_key(&name)
    }

    pub fn render(&self, name: TemplateName, bindings: &Bindings) -> TemplateResult<String> {
        self.get(name)?.render(bindings)
    }
}
