//! # AppError
//!
//! Centralized error handling for Yelp-Camp.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// Shown instead of the details of an internal failure.
pub const FALLBACK_MESSAGE: &str = "Something went wrong";

/// The primary error type for all yc-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., "Campground", "Review", "Page")
    #[error("{0} not found")]
    NotFound(String),

    /// Submitted payload violates the schema; carries the aggregated message
    #[error("{0}")]
    ValidationError(String),

    /// Infrastructure failure (e.g., DB down, template error)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(what: &str) -> Self {
        Self::NotFound(what.to_string())
    }

    /// HTTP status the error maps to.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::ValidationError(_) => 400,
            Self::Internal(_) => 500,
        }
    }

    /// Message safe to put in front of a visitor.
    pub fn public_message(&self) -> String {
        match self {
            Self::Internal(_) => FALLBACK_MESSAGE.to_string(),
            Self::ValidationError(msg) if msg.trim().is_empty() => FALLBACK_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

/// A specialized Result type for Yelp-Camp logic.
pub type Result<T> = std::result::Result<T, AppError>;
