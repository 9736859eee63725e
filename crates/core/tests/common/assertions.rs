//! Assertion helpers for saved posts and run results.

#![allow(dead_code)]

use blogi_core::clients::adapters::MockConnector;
use blogi_protocol::{FailureKind, GenerationResult};
use gray_matter::engine::YAML;
use gray_matter::Matter;
use serde::Deserialize;
use std::path::Path;

/// Frontmatter written by the default frontmatter template.
#[derive(Debug, Deserialize)]
pub struct PostFrontmatter {
    pub title: String,
    pub tags: Vec<String>,
    pub date: String,
    pub author: String,
}

/// Read a saved post and split it into frontmatter and body.
pub fn read_post(path: &Path) -> (PostFrontmatter, String) {
    let content = std::fs::read_to_string(path).unwrap();
    let parsed = Matter::<YAML>::new().parse(&content);
    let frontmatter = parsed
        .data
        .expect("post has frontmatter")
        .deserialize()
        .expect("frontmatter has title, tags, date and author");
    (frontmatter, parsed.content)
}

pub fn assert_failed(result: &GenerationResult, kind: FailureKind) {
    assert!(!result.success, "expected failure, got {result:?}");
    assert_eq!(result.failure, Some(kind), "wrong failure kind: {result:?}");
    assert!(result.file_path.is_none());
}

/// Every resource opened by the run was closed exactly once.
pub fn assert_all_released(connector: &MockConnector) {
    let opened = connector.opened();
    let closes = [
        ("completion", connector.completion.close_count()),
        ("search", connector.search.close_count()),
        ("web", connector.fetcher.close_count()),
    ];
    for (label, count) in closes {
        let expected = usize::from(opened.contains(&label));
        assert_eq!(count, expected, "{label} closed {count} time(s)");
    }
}
