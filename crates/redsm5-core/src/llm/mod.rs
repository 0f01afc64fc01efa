//! Clients for the local inference server
//!
//! [`LlmClient`] talks to an OpenAI-compatible chat-completion endpoint and
//! an Ollama-style embedding endpoint. Pipeline stages depend on the
//! [`ChatBackend`] and [`EmbeddingBackend`] traits rather than on the client
//! itself, and [`structured`] layers schema-validated output with re-asking on
//! top of any chat backend.

mod backend;
pub mod client;
pub mod error_utils;
mod messages;
pub mod structured;

pub use backend::{ChatBackend, ChatCompletion, ChatRequest, EmbeddingBackend};
pub use client::LlmClient;
pub use messages::{ChatMessage, MessageRole};
pub use structured::{StructuredOutput, request_structured};

#[cfg(test)]
pub use backend::{MockChatBackend, MockEmbeddingBackend};
