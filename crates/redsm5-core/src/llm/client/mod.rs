//! HTTP client for the local inference server
//!
//! Requests run with transport-level retry and exponential backoff. Each
//! attempt holds a permit from the shared
//! [`PermitPool`](crate::concurrency::PermitPool); backoff sleeps do not.

mod chat;
mod constructor;
mod embed;
mod retry;
mod types;

pub use types::LlmClient;
