//! # blogi-protocol
//!
//! Shared data models for blogi.
//!
//! This crate defines the values that cross crate boundaries:
//! - What to generate ([`AgentConfig`], [`AgentKind`])
//! - What research was gathered ([`SearchResult`], [`ResearchItem`])
//! - How a run ended ([`GenerationResult`], [`FailureKind`])
//!
//! ## Modules
//!
//! - [`agent_models`]: Agent kinds and run configuration
//! - [`research_models`]: Search hits and research items
//! - [`result_models`]: Terminal run outcome
//!
//! No dependencies on other blogi crates.

pub mod agent_models;
pub mod research_models;
pub mod result_models;

// Re-export all public types for convenience
pub use agent_models::*;
pub use research_models::*;
pub use result_models::*;
