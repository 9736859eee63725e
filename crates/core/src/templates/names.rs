//! Template names and the placeholder fields each one may use.

use blogi_protocol::AgentKind;
use std::fmt;
use std::str::FromStr;

/// A value that can be substituted into a template as `{name}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Topic,
    Today,
    Disclaimer,
    ResearchSummary,
    ImagePrompt,
    Title,
    Tags,
    Date,
    Author,
    Frontmatter,
    Content,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Topic => "topic",
            Self::Today => "today",
            Self::Disclaimer => "disclaimer",
            Self::ResearchSummary => "research_summary",
            Self::ImagePrompt => "image_prompt",
            Self::Title => "title",
            Self::Tags => "tags",
            Self::Date => "date",
            Self::Author => "author",
            Self::Frontmatter => "frontmatter",
            Self::Content => "content",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "topic" => Self::Topic,
            "today" => Self::Today,
            "disclaimer" => Self::Disclaimer,
            "research_summary" => Self::ResearchSummary,
            "image_prompt" => Self::ImagePrompt,
            "title" => Self::Title,
            "tags" => Self::Tags,
            "date" => Self::Date,
            "author" => Self::Author,
            "frontmatter" => Self::Frontmatter,
            "content" => Self::Content,
            _ => return Err(()),
        })
    }
}

/// Every template the pipelines know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateName {
    AgentPrompt,
    EnhancedPrompt,
    Disclaimer,
    BlogPage,
    Frontmatter,
    SummarizeContent,
    TitlePrompt,
    TagsPrompt,
    FiveWordSummary,
}

/// Directory holding templates shared by all agents.
pub const COMMON_DIR: &str = "_common";

impl TemplateName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AgentPrompt => "agent_prompt",
            Self::EnhancedPrompt => "enhanced_prompt",
            Self::Disclaimer => "disclaimer",
            Self::BlogPage => "blog_template",
            Self::Frontmatter => "frontmatter",
            Self::SummarizeContent => "summarize_content",
            Self::TitlePrompt => "summarize_for_title",
            Self::TagsPrompt => "tags_prompt",
            Self::FiveWordSummary => "five_word_summary",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::AgentPrompt => "agent_prompt.txt",
            Self::EnhancedPrompt => "enhanced_prompt.txt",
            Self::Disclaimer => "disclaimer.txt",
            Self::BlogPage => "blog_page_template.md",
            Self::Frontmatter => "frontmatter.md",
            Self::SummarizeContent => "summarize_content.txt",
            Self::TitlePrompt => "summarize_for_title.txt",
            Self::TagsPrompt => "tags_prompt.txt",
            Self::FiveWordSummary => "five_word_summary.txt",
        }
    }

    /// Shared templates live in `_common/`, the rest in the agent's directory.
    pub fn is_common(&self) -> bool {
        matches!(
            self,
            Self::Frontmatter
                | Self::SummarizeContent
                | Self::TitlePrompt
                | Self::TagsPrompt
                | Self::FiveWordSummary
        )
    }

    /// Path relative to the prompt root, using `/` separators.
    pub fn relative_path(&self, agent_name: &str) -> String {
        let dir = if self.is_common() { COMMON_DIR } else { agent_name };
        format!("{dir}/{}", self.file_name())
    }

    /// Placeholders this template may reference for an agent of `kind`.
    ///
    /// Every field listed here is bound by the pipeline of that kind, so a
    /// template that passes this check always renders.
    pub fn allowed_fields(&self, kind: AgentKind) -> &'static [Field] {
        use Field::*;
        match (self, kind) {
            (Self::AgentPrompt, AgentKind::Researcher) => &[Topic, Today, Disclaimer],
            (Self::AgentPrompt, AgentKind::Artist) => &[ImagePrompt, Today, Disclaimer],
            (Self::EnhancedPrompt, AgentKind::Researcher) => &[ResearchSummary, Topic],
            (Self::EnhancedPrompt, AgentKind::Artist) => &[ImagePrompt],
            (Self::Disclaimer, _) | (Self::SummarizeContent, _) => &[],
            (Self::BlogPage, _) => &[Frontmatter, Disclaimer, Content],
            (Self::Frontmatter, _) => &[Title, Tags, Date, Author],
            (Self::TitlePrompt, _) | (Self::TagsPrompt, _) | (Self::FiveWordSummary, _) => {
                &[Content]
            }
        }
    }

    /// Templates a pipeline cannot run without.
    pub fn required_for(kind: AgentKind) -> &'static [TemplateName] {
        use TemplateName::*;
        match kind {
            AgentKind::Researcher => &[
                AgentPrompt,
                EnhancedPrompt,
                Disclaimer,
                Frontmatter,
                BlogPage,
                SummarizeContent,
            ],
            AgentKind::Artist => &[AgentPrompt, EnhancedPrompt, Disclaimer, Frontmatter, BlogPage],
        }
    }

    /// Metadata prompts; when one is missing only its field falls back.
    pub const OPTIONAL: [TemplateName; 3] = [
        TemplateName::TitlePrompt,
        TemplateName::TagsPrompt,
        TemplateName::FiveWordSummary,
    ];
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
