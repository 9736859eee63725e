//! Title, tags and filename derived from the draft body.
//!
//! Each field comes from its own completion call and falls back to a fixed
//! default on any failure, independently of the other fields.

use crate::clients::CompletionClient;
use crate::templates::{Bindings, Field, TemplateName, TemplateSet};
use chrono::NaiveDate;
use tracing::{debug, warn};

pub const DEFAULT_TITLE: &str = "Default Title Post Is Here";
pub const DEFAULT_FILENAME_STEM: &str = "Default-Title-Post-Is-Here";
pub const DEFAULT_TAGS: &str = "[]";

/// Number of hyphen-separated words in a filename stem.
pub const FILENAME_WORDS: usize = 5;
const FILENAME_PAD: &str = "Update";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMetadata {
    pub title: String,
    pub tags: String,
    pub filename_stem: String,
    pub date: NaiveDate,
}

impl DocumentMetadata {
    pub fn filename(&self) -> String {
        post_filename(self.date, &self.filename_stem)
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `YYYY-MM-DD-<stem>.md`
pub fn post_filename(date: NaiveDate, stem: &str) -> String {
    format!("{}-{stem}.md", format_date(date))
}

/// Normalize a model reply into exactly five hyphen-separated words.
///
/// Whitespace becomes a hyphen, characters other than letters, digits and
/// `_` are dropped, empty words are skipped, extra words are cut and missing
/// ones are filled with `Update`. Returns `None` when no word survives.
pub fn normalize_filename_stem(raw: &str) -> Option<String> {
    let mut words: Vec<String> = raw
        .split(|c: char| c == '-' || c.is_whitespace())
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric() || *c == '_')
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .take(FILENAME_WORDS)
        .collect();

    if words.is_empty() {
        return None;
    }
    words.resize(FILENAME_WORDS, FILENAME_PAD.to_string());
    Some(words.join("-"))
}

/// Render the metadata prompt `name` for `content` and ask for a reply.
async fn ask_field(
    completion: &dyn CompletionClient,
    templates: &TemplateSet,
    name: TemplateName,
    content: &str,
) -> Option<String> {
    let prompt = match templates.render(name, &Bindings::new().with(Field::Content, content)) {
        Ok(prompt) => prompt,
        Err(err) => {
            warn!(template = %name, error = %err, "Metadata prompt unusable, using default");
            return None;
        }
    };

    match completion.ask(&prompt).await {
        Ok(reply) => Some(reply),
        Err(err) => {
            warn!(template = %name, error = %err, "Metadata completion failed, using default");
            None
        }
    }
}

pub async fn generate_title(
    completion: &dyn CompletionClient,
    templates: &TemplateSet,
    content: &str,
) -> String {
    ask_field(completion, templates, TemplateName::TitlePrompt, content)
        .await
        .map(|reply| reply.replace('"', "").trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}

pub async fn generate_tags(
    completion: &dyn CompletionClient,
    templates: &TemplateSet,
    content: &str,
) -> String {
    ask_field(completion, templates, TemplateName::TagsPrompt, content)
        .await
        .map(|reply| reply.trim().to_string())
        .filter(|tags| !tags.is_empty())
        .unwrap_or_else(|| DEFAULT_TAGS.to_string())
}

pub async fn generate_filename_stem(
    completion: &dyn CompletionClient,
    templates: &TemplateSet,
    content: &str,
) -> String {
    ask_field(completion, templates, TemplateName::FiveWordSummary, content)
        .await
        .and_then(|reply| normalize_filename_stem(&reply))
        .unwrap_or_else(|| DEFAULT_FILENAME_STEM.to_string())
}

/// Derive every metadata field for `content`. Never fails.
pub async fn generate_metadata(
    completion: &dyn CompletionClient,
    templates: &TemplateSet,
    content: &str,
    date: NaiveDate,
) -> DocumentMetadata {
    let title = generate_title(completion, templates, content).await;
    let tags = generate_tags(completion, templates, content).await;
    let filename_stem = generate_filename_stem(completion, templates, content).await;
    debug!(%title, %tags, %filename_stem, "Metadata generated");

    DocumentMetadata {
        title,
        tags,
        filename_stem,
        date,
    }
}
