//! Scriptable mock clients for testing.
//!
//! Every mock records the calls it receives so tests can assert on call
//! counts, ordering and arguments without touching the network.

use crate::clients::base::{
    ClientError, CompletionClient, ContentFetcher, ImageGenerator, PromptProvider, Resource,
    SearchClient,
};
use crate::clients::connector::Connector;
use async_trait::async_trait;
use blogi_protocol::SearchResult;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Open/close bookkeeping shared by the mock resources.
#[derive(Debug, Default)]
struct Lifecycle {
    closes: AtomicUsize,
    close_error: Option<String>,
}

impl Lifecycle {
    fn close(&self, label: &str) -> Result<(), ClientError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        match &self.close_error {
            Some(reason) => Err(ClientError::Close(label.to_string(), reason.clone())),
            None => Ok(()),
        }
    }

    fn ensure_open(&self, label: &str) -> Result<(), ClientError> {
        if self.closes.load(Ordering::SeqCst) > 0 {
            return Err(ClientError::Closed(label.to_string()));
        }
        Ok(())
    }
}

/// Completion mock answering by prompt prefix.
///
/// Rules are checked in insertion order; the first rule whose prefix matches
/// the prompt decides the reply. Unmatched prompts get the fallback reply.
#[derive(Debug)]
pub struct MockCompletion {
    rules: Vec<(String, Result<String, ClientError>)>,
    fallback: Result<String, ClientError>,
    prompts: Mutex<Vec<String>>,
    lifecycle: Lifecycle,
}

impl Default for MockCompletion {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCompletion {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            fallback: Ok("Mock completion".to_string()),
            prompts: Mutex::new(Vec::new()),
            lifecycle: Lifecycle::default(),
        }
    }

    /// Reply `response` to prompts starting with `prefix`.
    pub fn on(mut self, prefix: &str, response: &str) -> Self {
        self.rules.push((prefix.to_string(), Ok(response.to_string())));
        self
    }

    /// Fail prompts starting with `prefix`.
    pub fn fail_on(mut self, prefix: &str, error: ClientError) -> Self {
        self.rules.push((prefix.to_string(), Err(error)));
        self
    }

    pub fn with_fallback(mut self, fallback: Result<String, ClientError>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_close_error(mut self, reason: &str) -> Self {
        self.lifecycle.close_error = Some(reason.to_string());
        self
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.prompts).len()
    }

    pub fn close_count(&self) -> usize {
        self.lifecycle.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Resource for MockCompletion {
    fn label(&self) -> &'static str {
        "completion"
    }

    async fn close(&self) -> Result<(), ClientError> {
        self.lifecycle.close(self.label())
    }
}

#[async_trait]
impl CompletionClient for MockCompletion {
    async fn ask(&self, prompt: &str) -> Result<String, ClientError> {
        self.lifecycle.ensure_open(self.label())?;
        lock(&self.prompts).push(prompt.to_string());

        self.rules
            .iter()
            .find(|(prefix, _)| prompt.starts_with(prefix.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| self.fallback.clone())
    }
}

/// Search mock returning a fixed result list.
#[derive(Debug)]
pub struct MockSearch {
    results: Result<Vec<SearchResult>, ClientError>,
    queries: Mutex<Vec<String>>,
    lifecycle: Lifecycle,
}

impl MockSearch {
    pub fn new(results: Vec<SearchResult>) -> Self {
        Self {
            results: Ok(results),
            queries: Mutex::new(Vec::new()),
            lifecycle: Lifecycle::default(),
        }
    }

    pub fn failing(error: ClientError) -> Self {
        Self {
            results: Err(error),
            ..Self::new(Vec::new())
        }
    }

    pub fn with_close_error(mut self, reason: &str) -> Self {
        self.lifecycle.close_error = Some(reason.to_string());
        self
    }

    pub fn queries(&self) -> Vec<String> {
        lock(&self.queries).clone()
    }

    pub fn close_count(&self) -> usize {
        self.lifecycle.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Resource for MockSearch {
    fn label(&self) -> &'static str {
        "search"
    }

    async fn close(&self) -> Result<(), ClientError> {
        self.lifecycle.close(self.label())
    }
}

#[async_trait]
impl SearchClient for MockSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ClientError> {
        self.lifecycle.ensure_open(self.label())?;
        lock(&self.queries).push(query.to_string());
        self.results.clone()
    }
}

/// Fetcher mock serving pages from a URL map. Unknown URLs return 404.
#[derive(Debug, Default)]
pub struct MockFetcher {
    pages: HashMap<String, Result<String, ClientError>>,
    fetched: Mutex<Vec<String>>,
    lifecycle: Lifecycle,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, content: &str) -> Self {
        self.pages.insert(url.to_string(), Ok(content.to_string()));
        self
    }

    pub fn failing_page(mut self, url: &str, error: ClientError) -> Self {
        self.pages.insert(url.to_string(), Err(error));
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        lock(&self.fetched).clone()
    }

    pub fn close_count(&self) -> usize {
        self.lifecycle.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Resource for MockFetcher {
    fn label(&self) -> &'static str {
        "web"
    }

    async fn close(&self) -> Result<(), ClientError> {
        self.lifecycle.close(self.label())
    }
}

#[async_trait]
impl ContentFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ClientError> {
        self.lifecycle.ensure_open(self.label())?;
        lock(&self.fetched).push(url.to_string());
        self.pages.get(url).cloned().unwrap_or_else(|| {
            Err(ClientError::HttpStatus {
                status: 404,
                url: url.to_string(),
            })
        })
    }
}

/// Image generator mock recording `(prompt, callback)` submissions.
#[derive(Debug, Default)]
pub struct MockImageGenerator {
    error: Option<ClientError>,
    submissions: Mutex<Vec<(String, String)>>,
}

impl MockImageGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: ClientError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn submissions(&self) -> Vec<(String, String)> {
        lock(&self.submissions).clone()
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn submit(&self, prompt: &str, callback: &str) -> Result<(), ClientError> {
        lock(&self.submissions).push((prompt.to_string(), callback.to_string()));
        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[derive(Debug)]
pub struct MockPromptProvider {
    reply: Result<String, ClientError>,
    calls: AtomicUsize,
}

impl MockPromptProvider {
    pub fn new(reply: Result<String, ClientError>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PromptProvider for MockPromptProvider {
    async fn random_prompt(&self) -> Result<String, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

/// Connector handing out shared mock clients.
///
/// Records every successful `open_*` call by label. `fail_open` makes the
/// open of the resource with that label fail.
pub struct MockConnector {
    pub completion: Arc<MockCompletion>,
    pub search: Arc<MockSearch>,
    pub fetcher: Arc<MockFetcher>,
    pub image: Arc<MockImageGenerator>,
    pub prompts: Arc<MockPromptProvider>,
    fail_open: Option<&'static str>,
    opened: Mutex<Vec<&'static str>>,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    pub fn new() -> Self {
        Self {
            completion: Arc::new(MockCompletion::new()),
            search: Arc::new(MockSearch::new(Vec::new())),
            fetcher: Arc::new(MockFetcher::new()),
            image: Arc::new(MockImageGenerator::new()),
            prompts: Arc::new(MockPromptProvider::new(Ok("A mock image prompt".to_string()))),
            fail_open: None,
            opened: Mutex::new(Vec::new()),
        }
    }

    pub fn with_completion(mut self, completion: MockCompletion) -> Self {
        self.completion = Arc::new(completion);
        self
    }

    pub fn with_search(mut self, search: MockSearch) -> Self {
        self.search = Arc::new(search);
        self
    }

    pub fn with_fetcher(mut self, fetcher: MockFetcher) -> Self {
        self.fetcher = Arc::new(fetcher);
        self
    }

    pub fn with_image(mut self, image: MockImageGenerator) -> Self {
        self.image = Arc::new(image);
        self
    }

    pub fn with_prompts(mut self, prompts: MockPromptProvider) -> Self {
        self.prompts = Arc::new(prompts);
        self
    }

    /// Make opening the resource labelled `label` fail.
    pub fn fail_open(mut self, label: &'static str) -> Self {
        self.fail_open = Some(label);
        self
    }

    /// Labels of the resources opened so far, in order.
    pub fn opened(&self) -> Vec<&'static str> {
        lock(&self.opened).clone()
    }

    fn open(&self, label: &'static str) -> Result<(), ClientError> {
        if self.fail_open == Some(label) {
            return Err(ClientError::Connect(
                label.to_string(),
                "mock open failure".to_string(),
            ));
        }
        lock(&self.opened).push(label);
        Ok(())
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn open_completion(&self, _model: &str) -> Result<Arc<dyn CompletionClient>, ClientError> {
        self.open(self.completion.label())?;
        Ok(self.completion.clone())
    }

    async fn open_search(&self) -> Result<Arc<dyn SearchClient>, ClientError> {
        self.open(self.search.label())?;
        Ok(self.search.clone())
    }

    async fn open_fetcher(&self) -> Result<Arc<dyn ContentFetcher>, ClientError> {
        self.open(self.fetcher.label())?;
        Ok(self.fetcher.clone())
    }

    fn image_generator(&self) -> Result<Arc<dyn ImageGenerator>, ClientError> {
        Ok(self.image.clone())
    }

    fn prompt_provider(&self) -> Result<Arc<dyn PromptProvider>, ClientError> {
        Ok(self.prompts.clone())
    }
}
