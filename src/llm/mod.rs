//! Completion API client.
//!
//! Sends prompts to a hosted chat-completion endpoint and returns the raw
//! model text. Failures are terminal per request; no retries are attempted.

use async_trait::async_trait;
use thiserror::Error;

mod groq;

pub use groq::GroqClient;

/// Errors that can occur during completion requests.
#[derive(Debug, Error)]
pub enum LlmError {
    /// No API credential available. Raised before any network I/O so the
    /// caller gets a fast failure distinct from transport errors.
    #[error("API key not configured")]
    NotConfigured,

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// A chat-completion backend.
///
/// The production implementation is [`GroqClient`]; tests substitute a stub
/// returning canned text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a single-user-message prompt and return the raw completion text.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Whether a credential is available. Drives the `/api/status` report.
    fn is_configured(&self) -> bool;
}
