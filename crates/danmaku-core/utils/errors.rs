//! Core error type for danmaku-core operations
//!
//! Provides the `CoreError` enum used across the resolver, scheduler and
//! emitter. Scheduler overflow and unknown style tokens are not errors; they
//! are ordinary policy branches and never surface here.
//!
//! # Error Philosophy
//!
//! - Use `thiserror` for structured error handling (no `anyhow` in the library)
//! - Provide enough context to point at the offending record or setting
//! - Keep errors `Clone + PartialEq` so tests can match on them directly
//!
//! # Examples
//!
//! ```rust
//! use danmaku_core::utils::errors::CoreError;
//!
//! let err = CoreError::config("width must be positive");
//! assert!(!err.is_recoverable());
//! assert!(format!("{err}").contains("width"));
//! ```

use core::fmt;
use thiserror::Error;

/// Main error type for danmaku-core operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Layout configuration rejected by validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Raw comment record that cannot enter the pipeline
    #[error("Invalid comment #{index}: {reason}")]
    InvalidComment {
        /// Arrival index of the rejected record
        index: u64,
        /// Why the record was rejected
        reason: String,
    },

    /// Comment filter pattern failed to compile
    #[error("Invalid filter pattern: {0}")]
    Filter(String),

    /// Output sink failed while writing emitted comments
    #[error("Emit error: {0}")]
    Emit(String),
}

impl CoreError {
    /// Create configuration error from message
    pub fn config<T: fmt::Display>(message: T) -> Self {
        Self::Config(message.to_string())
    }

    /// Create invalid comment error for the record at `index`
    pub fn invalid_comment<T: fmt::Display>(index: u64, reason: T) -> Self {
        Self::InvalidComment {
            index,
            reason: reason.to_string(),
        }
    }

    /// Check if error is recoverable
    ///
    /// A rejected record only affects itself; the rest of the run can go on.
    /// Configuration and filter errors invalidate the whole run.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidComment { .. } => true,
            Self::Config(_) | Self::Filter(_) | Self::Emit(_) => false,
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = core::result::Result<T, CoreError>;

impl From<fmt::Error> for CoreError {
    fn from(err: fmt::Error) -> Self {
        Self::Emit(format!("{err}"))
    }
}

#[cfg(feature = "filter")]
impl From<regex::Error> for CoreError {
    fn from(err: regex::Error) -> Self {
        Self::Filter(format!("{err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_creation_methods() {
        let config_err = CoreError::config("bad width");
        assert!(matches!(config_err, CoreError::Config(_)));

        let comment_err = CoreError::invalid_comment(7, "negative start time");
        assert!(matches!(
            comment_err,
            CoreError::InvalidComment { index: 7, .. }
        ));
    }

    #[test]
    fn error_display() {
        let error = CoreError::invalid_comment(3, "start time is NaN");
        let display_str = format!("{error}");
        assert!(display_str.contains("#3"));
        assert!(display_str.contains("NaN"));
    }

    #[test]
    fn error_properties() {
        assert!(CoreError::invalid_comment(0, "x").is_recoverable());
        assert!(!CoreError::config("x").is_recoverable());
        assert!(!CoreError::Emit("x".into()).is_recoverable());
    }

    #[test]
    fn fmt_error_converts_to_emit() {
        let err: CoreError = fmt::Error.into();
        assert!(matches!(err, CoreError::Emit(_)));
    }
}
