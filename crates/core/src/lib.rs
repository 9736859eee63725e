//! # blogi-core
//!
//! Blog post generation for AI agents.
//!
//! This crate provides:
//! - Settings loading from `blogi.toml` and the environment
//! - Service clients (completion, search, web fetch, image generation)
//! - Typed prompt templates with an embedded default prompt set
//! - Researcher and artist generation pipelines
//! - The orchestration controller that owns every client for a run
//!
//! ## Modules
//!
//! - [`config`]: Settings loading
//! - [`clients`]: Client traits, HTTP adapters and mocks
//! - [`templates`]: Template names, parsing, rendering and storage
//! - [`pipeline`]: Generation pipelines and metadata helpers
//! - [`engine`]: Orchestration controller and resource management

pub mod clients;
pub mod config;
pub mod engine;
pub mod pipeline;
pub mod templates;

#[cfg(test)]
mod testing;
