//! Common test utilities for controller and end-to-end tests.
//!
//! - Fixtures: prompt trees, settings, controllers wired to mock clients
//! - Assertions: checks on saved posts and run results

pub mod assertions;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
pub use fixtures::*;
