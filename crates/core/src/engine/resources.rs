//! Scoped ownership of the network clients used by one run.

use super::error::{RunError, TeardownError};
use crate::clients::{ClientError, CompletionClient, Connector, ContentFetcher, SearchClient};
use blogi_protocol::AgentKind;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Completion,
    Search,
    WebFetch,
}

impl ResourceKind {
    /// Resources an agent kind needs, in acquisition order.
    pub fn for_agent(kind: AgentKind) -> &'static [ResourceKind] {
        match kind {
            AgentKind::Researcher => &[Self::Completion, Self::Search, Self::WebFetch],
            AgentKind::Artist => &[Self::Completion],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completion => "completion",
            Self::Search => "search",
            Self::WebFetch => "web fetch",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

enum Handle {
    Completion(Arc<dyn CompletionClient>),
    Search(Arc<dyn SearchClient>),
    WebFetch(Arc<dyn ContentFetcher>),
}

impl Handle {
    fn kind(&self) -> ResourceKind {
        match self {
            Self::Completion(_) => ResourceKind::Completion,
            Self::Search(_) => ResourceKind::Search,
            Self::WebFetch(_) => ResourceKind::WebFetch,
        }
    }

    async fn close(&self) -> Result<(), ClientError> {
        match self {
            Self::Completion(client) => client.close().await,
            Self::Search(client) => client.close().await,
            Self::WebFetch(client) => client.close().await,
        }
    }
}

/// Live client handles owned by one run.
///
/// Handles are appended as they are acquired and drained by
/// [`teardown`](Self::teardown), which closes them in reverse order. After a
/// teardown the set is empty and a second teardown succeeds without doing
/// anything.
#[derive(Default)]
pub struct ResourceSet {
    handles: Vec<Handle>,
}

impl ResourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `kinds` in order.
    ///
    /// If one fails, everything opened so far is torn down before the error
    /// is returned, leaving the set empty.
    pub async fn acquire<C>(
        &mut self,
        connector: &C,
        kinds: &[ResourceKind],
        model: &str,
    ) -> Result<(), RunError>
    where
        C: Connector + ?Sized,
    {
        for kind in kinds {
            let opened = match kind {
                ResourceKind::Completion => {
                    connector.open_completion(model).await.map(Handle::Completion)
                }
                ResourceKind::Search => connector.open_search().await.map(Handle::Search),
                ResourceKind::WebFetch => connector.open_fetcher().await.map(Handle::WebFetch),
            };

            match opened {
                Ok(handle) => {
                    debug!(resource = %kind, "Resource acquired");
                    self.handles.push(handle);
                }
                Err(source) => {
                    if let Err(err) = self.teardown().await {
                        warn!(error = %err, "Teardown after failed acquisition reported errors");
                    }
                    return Err(RunError::Acquire {
                        kind: *kind,
                        source,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn completion(&self) -> Option<Arc<dyn CompletionClient>> {
        self.handles.iter().find_map(|handle| match handle {
            Handle::Completion(client) => Some(client.clone()),
            _ => None,
        })
    }

    pub fn search(&self) -> Option<Arc<dyn SearchClient>> {
        self.handles.iter().find_map(|handle| match handle {
            Handle::Search(client) => Some(client.clone()),
            _ => None,
        })
    }

    pub fn fetcher(&self) -> Option<Arc<dyn ContentFetcher>> {
        self.handles.iter().find_map(|handle| match handle {
            Handle::WebFetch(client) => Some(client.clone()),
            _ => None,
        })
    }

    /// Kinds currently held, in acquisition order.
    pub fn kinds(&self) -> Vec<ResourceKind> {
        self.handles.iter().map(Handle::kind).collect()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Close every held handle, last acquired first.
    ///
    /// A failing close does not stop the others; all failures are returned
    /// together.
    pub async fn teardown(&mut self) -> Result<(), TeardownError> {
        let handles = std::mem::take(&mut self.handles);
        let mut failures = Vec::new();

        for handle in handles.into_iter().rev() {
            match handle.close().await {
                Ok(()) => debug!(resource = %handle.kind(), "Resource released"),
                Err(err) => failures.push((handle.kind(), err)),
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(TeardownError { failures })
        }
    }
}

impl Drop for ResourceSet {
    fn drop(&mut self) {
        if !self.handles.is_empty() {
            warn!(
                resources = ?self.kinds(),
                "Resource set dropped without teardown"
            );
        }
    }
}
