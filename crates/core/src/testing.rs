//! Prompt tree and canned replies shared by unit tests.
//!
//! Every prompt starts with a distinct upper-case marker so mock clients can
//! route replies by prefix.

use crate::clients::adapters::MockCompletion;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

pub const RESEARCHER: &str = "test_researcher";
pub const ARTIST: &str = "test_artist";

pub const BODY: &str = "Quantum computers use qubits.";
pub const TITLE_REPLY: &str = "\"Quantum Computing Explained\"";
pub const TAGS_REPLY: &str = "[\"quantum\", \"computing\"]";
pub const FILENAME_REPLY: &str = "Quantum Computing Explained Today Now";

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
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
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

/// Completion mock answering every prompt of the test tree.
pub fn scripted_completion() -> MockCompletion {
    MockCompletion::new()
        .on("AGENT PROMPT", BODY)
        .on("SUMMARIZE CONTENT", "A short summary.")
        .on("TITLE PROMPT", TITLE_REPLY)
        .on("TAGS PROMPT", TAGS_REPLY)
        .on("FILENAME PROMPT", FILENAME_REPLY)
}
