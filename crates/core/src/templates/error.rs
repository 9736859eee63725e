//! Error types for template loading and rendering.

use super::names::{Field, TemplateName};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    /// No source holds the template.
    #[error("Template '{name}' not found for agent '{agent}'")]
    NotFound { agent: String, name: TemplateName },

    /// The template exists but is empty.
    #[error("Template '{name}' for agent '{agent}' is empty")]
    Empty { agent: String, name: TemplateName },

    /// The template file exists but could not be read.
    #[error("Failed to read template at {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A placeholder does not name a known field.
    #[error("Template '{name}' uses unknown placeholder '{{{placeholder}}}'")]
    UnknownField {
        name: TemplateName,
        placeholder: String,
    },

    /// A placeholder names a field this template may not use.
    #[error("Template '{name}' may not use placeholder '{{{field}}}'")]
    DisallowedField { name: TemplateName, field: Field },

    /// A `{` without a closing `}` or a lone `}`.
    #[error("Template '{name}' has an unbalanced brace at byte {offset}")]
    UnbalancedBrace { name: TemplateName, offset: usize },

    /// Rendering was asked to fill a field that has no value.
    #[error("Template '{name}' needs a value for '{field}'")]
    Unbound { name: TemplateName, field: Field },

    /// A required template was never loaded into the set.
    #[error("Template '{0}' is not part of this template set")]
    NotLoaded(TemplateName),
}

/// Type alias for Result with TemplateError.
pub type TemplateResult<T> = Result<T, TemplateError>;
