//! Error types.
//!
//! Construction and prefill failures surface as [`ProblemError`];
//! configuration and registry failures as [`SearchError`]. Running out of
//! budget is not an error: algorithms report it as a missing solution.

/// Errors raised while building or seeding a problem instance.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProblemError {
    /// A structural parameter violates the domain's preconditions.
    #[error("invalid {parameter}: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Human-readable cause.
        reason: String,
    },

    /// A prefill seed is out of range, has the wrong shape, or breaks a
    /// domain rule.
    #[error("invalid prefill: {0}")]
    InvalidPrefill(String),

    /// A prefill level outside `[0, 1]`.
    #[error("prefill level must be within [0, 1], got {0}")]
    InvalidLevel(f64),

    /// No complete solution was available to derive a seed from.
    #[error("no seed solution available: {0}")]
    NoSeed(String),
}

impl ProblemError {
    pub(crate) fn parameter(parameter: &'static str, reason: impl Into<String>) -> Self {
        ProblemError::InvalidParameter {
            parameter,
            reason: reason.into(),
        }
    }

    pub(crate) fn prefill(reason: impl Into<String>) -> Self {
        ProblemError::InvalidPrefill(reason.into())
    }
}

/// Errors raised by the algorithm registry and its configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The search configuration failed validation.
    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),

    /// An algorithm name did not match any registry entry.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_error_messages() {
        let err = ProblemError::parameter("num_towers", "need at least 3, got 2");
        assert_eq!(err.to_string(), "invalid num_towers: need at least 3, got 2");

        let err = ProblemError::InvalidLevel(1.5);
        assert_eq!(err.to_string(), "prefill level must be within [0, 1], got 1.5");
    }

    #[test]
    fn test_search_error_messages() {
        let err = SearchError::UnknownAlgorithm("dijkstra".into());
        assert_eq!(err.to_string(), "unknown algorithm: dijkstra");
    }
}
