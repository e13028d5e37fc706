//! OpenAI Assistants API adapter.

mod client;

pub use client::{OpenAiAssistantClient, OpenAiConfig};
