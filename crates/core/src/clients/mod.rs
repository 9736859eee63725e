//! Service clients.
//!
//! This module provides the client traits (one per external service), the
//! HTTP adapters implementing them, and the [`Connector`] that opens them.

pub mod adapters;
pub mod base;
pub mod connector;

pub use base::{
    ClientError, CompletionClient, ContentFetcher, ImageGenerator, PromptProvider, Resource,
    SearchClient,
};
pub use connector::{Connector, HttpConnector};
