//! Advice port: Trait for the generative advice backend.
//!
//! Implementations wrap an LLM API. Prompt wording is built by the
//! application layer; the backend only turns a prompt into text.

/// Errors raised by an advice backend.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AdviceError {
    #[error("Advice backend unavailable: {0}")]
    Unavailable(String),

    #[error("Advice request rejected: {0}")]
    Rejected(String),

    #[error("Empty advice response")]
    Empty,
}

/// Trait for natural-language advice generation.
pub trait AdviceGenerator: Send + Sync {
    /// Backend name for logs.
    fn name(&self) -> &str;

    /// Generate advice for a prompt.
    ///
    /// # Errors
    /// Returns `AdviceError` if the backend fails or returns nothing.
    fn generate(&self, prompt: &str) -> Result<String, AdviceError>;
}
