//! Engine error types with rich context

use thiserror::Error;

use crate::metadata::AnalysisLevel;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Inspection engine error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Analysis Errors
    // ─────────────────────────────────────────────────────────────
    /// The requested node is missing, not an element, or detached from
    /// the document (before or during analysis).
    #[error("invalid inspection target: {reason}")]
    InvalidTarget { reason: String },

    /// Analysis exceeded the time budget for the requested level.
    ///
    /// Distinct from [`Error::InvalidTarget`] so callers can retry with a
    /// lower analysis level.
    #[error("{level} analysis exceeded its {budget_ms}ms budget")]
    AnalysisTimeout { level: AnalysisLevel, budget_ms: u64 },

    // ─────────────────────────────────────────────────────────────
    // Mode/State Errors
    // ─────────────────────────────────────────────────────────────
    /// An inspection-only operation was called while the mode is disabled.
    #[error("inspection mode is not enabled")]
    NotEnabled,

    // ─────────────────────────────────────────────────────────────
    // Settings/Configuration Errors
    // ─────────────────────────────────────────────────────────────
    /// A settings update failed validation; prior settings are untouched.
    #[error("invalid settings: {message}")]
    InvalidSettings { message: String },

    #[error("configuration error: {message}")]
    Config { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn invalid_target(reason: impl Into<String>) -> Self {
        Self::InvalidTarget {
            reason: reason.into(),
        }
    }

    pub fn analysis_timeout(level: AnalysisLevel) -> Self {
        Self::AnalysisTimeout {
            level,
            budget_ms: level.budget().as_millis() as u64,
        }
    }

    pub fn invalid_settings(message: impl Into<String>) -> Self {
        Self::InvalidSettings {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error is surfaced to the direct caller.
    ///
    /// Structural errors reject the whole operation; everything else is
    /// element-local and degrades to a partial snapshot before ever
    /// reaching a caller.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::InvalidTarget { .. }
                | Error::AnalysisTimeout { .. }
                | Error::NotEnabled
                | Error::InvalidSettings { .. }
        )
    }

    /// Whether retrying the operation may succeed without intervention.
    ///
    /// A timeout can be retried at a lower analysis level; an invalid
    /// target cannot.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::AnalysisTimeout { .. })
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::invalid_target("node is detached");
        assert_eq!(
            err.to_string(),
            "invalid inspection target: node is detached"
        );

        let err = Error::NotEnabled;
        assert!(err.to_string().contains("not enabled"));
    }

    #[test]
    fn test_timeout_message_carries_budget() {
        let err = Error::analysis_timeout(AnalysisLevel::Basic);
        assert!(err.to_string().contains("100ms"));
        let err = Error::analysis_timeout(AnalysisLevel::Comprehensive);
        assert!(err.to_string().contains("500ms"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_is_structural() {
        assert!(Error::invalid_target("gone").is_structural());
        assert!(Error::analysis_timeout(AnalysisLevel::Detailed).is_structural());
        assert!(Error::NotEnabled.is_structural());
        assert!(Error::invalid_settings("bogus level").is_structural());
        assert!(!Error::config("unreadable").is_structural());
    }

    #[test]
    fn test_timeout_is_retryable_invalid_target_is_not() {
        assert!(Error::analysis_timeout(AnalysisLevel::Basic).is_retryable());
        assert!(!Error::invalid_target("gone").is_retryable());
        assert!(!Error::NotEnabled.is_retryable());
    }
}
