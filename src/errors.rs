//! Error taxonomy for dossier operations.
//!
//! Validation errors are raised before any store call is issued, so a
//! rejected input never leaves a partial effect behind. Rate limits are the
//! only retryable condition; everything else propagates immediately.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DossierError {
    /// Bad user input, caught before any remote call.
    #[error("validation error: {0}")]
    Validation(String),

    /// The backend rejected the call with a rate-limit response. Retryable.
    #[error("rate limited, try again in a moment")]
    RateLimited,

    /// The requested record does not exist (it may have been deleted).
    #[error("record not found: {0}")]
    NotFound(String),

    /// The AI payload did not match the expected response schema.
    #[error("invalid AI response: {0}")]
    InvalidAiResponse(String),

    /// Document-store failure other than rate limiting or not-found.
    #[error("store error: {0}")]
    Store(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl DossierError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// True for conditions the backoff helper is allowed to retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited)
    }

    /// Human-readable message for the AI schema-mismatch case, kept distinct
    /// from generic failures so the surface can explain what went wrong.
    pub fn schema_mismatch(detail: impl Into<String>) -> Self {
        Self::InvalidAiResponse(format!(
            "the response did not match the expected schema ({}); \
             this can happen when little public data is available",
            detail.into()
        ))
    }
}

pub type Result<T> = std::result::Result<T, DossierError>;
