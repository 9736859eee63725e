//! Settings loading and management.
//!
//! Builds the immutable [`Settings`] value from an optional `blogi.toml` and
//! the environment.

pub mod error;
pub mod loader;
pub mod models;

pub use error::{ConfigError, ConfigResult};
pub use loader::load_settings;
pub use models::{Credentials, Limits, Settings};
