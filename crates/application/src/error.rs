//! Poll error taxonomy
//!
//! Every fetch failure falls into one of two classes. There is no fatal
//! class: both are retried on the next scheduled tick.

use thiserror::Error;

/// Classification of a failed poll
#[derive(Debug, Clone, Error)]
pub enum PollError {
    /// The source is not ready yet (auth not accepted, upstream fault).
    /// Retried silently on the next tick without surfacing an error.
    #[error("source not ready: {0}")]
    NotReady(String),

    /// The update failed (bad request, rate limit, transport failure).
    /// Surfaced once; the prior snapshot is kept and the next tick retries.
    #[error("update failed: {0}")]
    UpdateFailed(String),
}

impl PollError {
    /// Whether this failure is retried without being surfaced
    #[must_use]
    pub const fn is_silent(&self) -> bool {
        matches!(self, Self::NotReady(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_ready_is_silent() {
        assert!(PollError::NotReady("401".into()).is_silent());
        assert!(!PollError::UpdateFailed("429".into()).is_silent());
    }

    #[test]
    fn display_includes_cause() {
        let err = PollError::UpdateFailed("HTTP 500".into());
        assert_eq!(err.to_string(), "update failed: HTTP 500");

        let err = PollError::NotReady("unauthorized".into());
        assert_eq!(err.to_string(), "source not ready: unauthorized");
    }
}
