//! Error types for the Care Companion domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Collaborator failures
//! have their own type so callers can map them to a user-safe apology without
//! ever showing the technical detail.

use thiserror::Error;

/// The top-level error type for Care Companion operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Collaborator errors ---
    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationFailure),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Input / output ---
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// A text or vision generation call did not produce a reply.
///
/// The engine never retries; it hands this back to the caller, which is
/// expected to present a fixed apology instead of the reason string.
#[derive(Debug, Clone, Error)]
pub enum GenerationFailure {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by generation service, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Generation service not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Generation service returned no text")]
    EmptyResponse,
}

impl GenerationFailure {
    /// The opaque reason string, suitable for logs only.
    pub fn reason(&self) -> String {
        self.to_string()
    }
}
