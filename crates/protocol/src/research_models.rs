//! Search results and the research items built from them.

use serde::{Deserialize, Serialize};

/// Placeholder written in place of a summary that could not be produced.
pub const NO_SUMMARY: &str = "No summary available.";

/// One ranked hit returned by the search client.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            description: description.into(),
        }
    }
}

/// One consulted source.
///
/// `content_summary` is `None` when the page could not be fetched or the
/// summary completion failed; the item is kept either way so the research
/// block stays in rank order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ResearchItem {
    pub title: String,
    pub url: String,
    pub description: String,
    pub content_summary: Option<String>,
}

impl ResearchItem {
    pub fn from_result(result: SearchResult, content_summary: Option<String>) -> Self {
        Self {
            title: result.title,
            url: result.url,
            description: result.description,
            content_summary,
        }
    }

    /// Render this item as one block of the research summary.
    pub fn to_block(&self) -> String {
        format!(
            "Source: {}\nURL: {}\n\nDescription:\n{}\n\nDetailed Summary:\n{}",
            self.title,
            self.url,
            self.description,
            self.content_summary.as_deref().unwrap_or(NO_SUMMARY)
        )
    }
}

/// Join research items into the block fed to the enhanced prompt.
pub fn format_research_summary(items: &[ResearchItem]) -> String {
    items
        .iter()
        .map(ResearchItem::to_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}
