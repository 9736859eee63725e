//! Prompt templates: names, typed placeholders, storage and loading.

pub mod assets;
pub mod error;
pub mod names;
pub mod render;
pub mod set;
pub mod store;

pub use error::{TemplateError, TemplateResult};
pub use names::{Field, TemplateName};
pub use render::{Bindings, Template};
pub use set::TemplateSet;
pub use store::TemplateStore;
