//! Test fixtures: a prompt tree on disk, settings with fake credentials and
//! a controller wired to mock clients.

#![allow(dead_code)]

use blogi_core::clients::adapters::{MockCompletion, MockConnector, MockFetcher, MockSearch};
use blogi_core::config::{Credentials, Settings};
use blogi_core::engine::Controller;
use blogi_core::templates::TemplateStore;
use blogi_protocol::SearchResult;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

pub const RESEARCHER: &str = "test_researcher";
pub const ARTIST: &str = "test_artist";

pub const BODY: &str = "## What is a qubit\n\nQuantum computers use qubits.";
pub const EXPECTED_FILENAME: &str = "2024-06-01-Quantum-Computing-Explained-Today-Now.md";

pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

/// Temporary workspace holding a prompt tree and an empty posts directory.
pub struct TestWorkspace {
    pub temp: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let temp = tempfile::tempdir().unwrap();
        write_prompt_tree(&temp.path().join("prompts"));
        Self { temp }
    }

    pub fn prompts_dir(&self) -> PathBuf {
        self.temp.path().join("prompts")
    }

    pub fn posts_dir(&self) -> PathBuf {
        self.temp.path().join("posts")
    }

    /// Settings with every credential set.
    pub fn settings(&self) -> Settings {
        Settings {
            posts_dir: self.posts_dir(),
            prompts_dir: Some(self.prompts_dir()),
            credentials: Credentials {
                anthropic_api_key: Some("test-anthropic".to_string()),
                brave_search_api_key: Some("test-brave".to_string()),
                openai_api_key: Some("test-openai".to_string()),
                userapi_api_key: Some("test-userapi".to_string()),
                userapi_account_hash: Some("test-account".to_string()),
            },
            ..Settings::default()
        }
    }

    /// Controller over `connector`, reading prompts from this workspace only.
    pub fn controller(&self, connector: MockConnector) -> Controller<MockConnector> {
        self.controller_with(self.settings(), connector)
    }

    pub fn controller_with(
        &self,
        settings: Settings,
        connector: MockConnector,
    ) -> Controller<MockConnector> {
        Controller::new(Arc::new(settings), connector)
            .with_store(TemplateStore::from_dir(self.prompts_dir()))
            .with_clock(fixed_today)
    }
}

pub fn write_prompt_tree(root: &Path) {
    let files = [
        (
            "test_researcher/agent_prompt.txt",
            "AGENT PROMPT about {topic} on {today}\n{disclaimer}",
        ),
        (
            "test_researcher/enhanced_prompt.txt",
            "RESEARCH for {topic}:\n{research_summary}",
        ),
        ("test_researcher/disclaimer.txt", "DISCLAIMER: AI generated."),
        (
            "test_researcher/blog_page_template.md",
            "{frontmatter}\n\n{disclaimer}\n\n{content}\n",
        ),
        (
            "test_artist/agent_prompt.txt",
            "AGENT PROMPT for image {image_prompt} on {today}\n{disclaimer}",
        ),
        ("test_artist/enhanced_prompt.txt", "IMAGE DETAILS: {image_prompt}"),
        ("test_artist/disclaimer.txt", "DISCLAIMER: AI art."),
        (
            "test_artist/blog_page_template.md",
            "{frontmatter}\n\n{disclaimer}\n\n{content}\n",
        ),
        (
            "_common/frontmatter.md",
            "---\ntitle: \"{title}\"\ntags: {tags}\ndate: {date}\nauthor: {author}\n---",
        ),
        ("_common/summarize_content.txt", "SUMMARIZE CONTENT"),
        ("_common/summarize_for_title.txt", "TITLE PROMPT\n{content}"),
        ("_common/tags_prompt.txt", "TAGS PROMPT\n{content}"),
        ("_common/five_word_summary.txt", "FILENAME PROMPT\n{content}"),
    ];

    for (relative, content) in files {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }
}

/// Completion mock answering every prompt of the fixture tree.
pub fn scripted_completion() -> MockCompletion {
    MockCompletion::new()
        .on("AGENT PROMPT", BODY)
        .on("SUMMARIZE CONTENT", "A short summary.")
        .on("TITLE PROMPT", "\"Quantum Computing Explained\"")
        .on("TAGS PROMPT", "[\"quantum\", \"computing\"]")
        .on("FILENAME PROMPT", "Quantum Computing Explained Today Now")
}

pub fn search_results() -> Vec<SearchResult> {
    (1..=3)
        .map(|i| {
            SearchResult::new(
                format!("Quantum article {i}"),
                format!("https://example.com/quantum/{i}"),
                format!("About quantum computing, part {i}"),
            )
        })
        .collect()
}

pub fn pages() -> MockFetcher {
    MockFetcher::new()
        .page("https://example.com/quantum/1", "Qubits can be 0 and 1.")
        .page("https://example.com/quantum/2", "Entanglement links qubits.")
        .page("https://example.com/quantum/3", "Error correction is hard.")
}

/// Connector where every call of a researcher run succeeds.
pub fn researcher_connector() -> MockConnector {
    MockConnector::new()
        .with_completion(scripted_completion())
        .with_search(MockSearch::new(search_results()))
        .with_fetcher(pages())
}
