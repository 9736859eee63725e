//! Prompt set embedded in the binary.
//!
//! With the `debug-embed` feature the files are embedded in debug builds
//! too, so tests see exactly what a release binary ships.

use rust_embed::RustEmbed;
use std::collections::BTreeSet;

/// Files under `crates/core/prompts/`.
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/prompts"]
pub struct PromptAssets;

/// Embedded file content by relative path, e.g. `_common/frontmatter.md`.
pub fn get_prompt(path: &str) -> Option<String> {
    PromptAssets::get(path).map(|file| String::from_utf8_lossy(file.data.as_ref()).to_string())
}

/// Whether any embedded file lives under `<agent>/`.
pub fn has_embedded_agent(agent: &str) -> bool {
    let prefix = format!("{agent}/");
    PromptAssets::iter().any(|path| path.starts_with(&prefix))
}

/// Top-level embedded directories, `_common` excluded.
pub fn embedded_agents() -> BTreeSet<String> {
    PromptAssets::iter()
        .filter_map(|path| path.split_once('/').map(|(dir, _)| dir.to_string()))
        .filter(|dir| !dir.starts_with('_'))
        .collect()
}
