//! Client adapter implementations.

mod anthropic;
mod brave;
pub mod mock;
mod openai;
mod userapi;
mod web;

pub use anthropic::AnthropicClient;
pub use brave::BraveSearchClient;
pub use mock::{
    MockCompletion, MockConnector, MockFetcher, MockImageGenerator, MockPromptProvider, MockSearch,
};
pub use openai::OpenAiPromptProvider;
pub use userapi::MidjourneyClient;
pub use web::{extract_main_text, WebContentFetcher};
