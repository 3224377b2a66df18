//! Shared error type for the scoring engine.

use thiserror::Error;

/// Errors the engine can signal. `MalformedTransaction` is deliberately not a
/// variant here: a malformed row is logged and skipped by the tagger, it
/// never fails the call (see `spec.md` §7).
#[derive(Debug, Error)]
pub enum EngineError {
    /// Observed transaction history is shorter than the 90-day minimum.
    #[error("insufficient transaction history: {history_days} day(s) observed, 90 required")]
    InsufficientHistory { history_days: i64 },

    /// An arithmetic or invariant violation inside the engine. Should not
    /// occur in normal operation; surfaced as a typed result rather than a
    /// panic so a caller can persist a failure audit and return a 5xx.
    #[error("computation error: {0}")]
    Computation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

/// Result type alias using the engine's error type.
pub type Result<T> = std::result::Result<T, EngineError>;
