//! Error types for the QUEKNO routing-benchmark generator.

use thiserror::Error;

/// Unified error type, following spec.md §7's four error kinds.
#[derive(Error, Debug)]
pub enum QnsError {
    // ============ Construction Errors ============
    /// Malformed input to a construction routine: parallel edges, a node
    /// identity of the wrong type, or a sample population too small for the
    /// requested draw.
    #[error("construction invalid: {0}")]
    ConstructionInvalid(String),

    // ============ Chain Invariant Errors ============
    /// A glink chain or assembled circuit violated an internal invariant
    /// (identity permutation at assembly, a strong glink with no front
    /// gates). Indicates a bug in the builder, not bad input.
    #[error("chain invariant violated: {0}")]
    ChainInternalInvariant(String),

    // ============ Router Errors ============
    /// The self-router's true cost disagreed with the chain's predicted
    /// cost, or the gate-count/depth delta did not match the true cost.
    #[error("router mismatch: {0}")]
    RouterMismatch(String),

    // ============ Search Errors ============
    /// Patience was exhausted repeatedly while searching for a strong
    /// glink, and the configured attempt cap was reached.
    #[error("search failed after {0} attempts")]
    SearchFailure(usize),

    // ============ I/O Errors ============
    /// IO error (QASM/result export).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error (config / metrics).
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for QUEKNO operations.
pub type Result<T> = std::result::Result<T, QnsError>;

impl QnsError {
    /// Creates a construction error with the given message.
    pub fn construction(msg: impl Into<String>) -> Self {
        Self::ConstructionInvalid(msg.into())
    }

    /// Creates a chain-invariant error with the given message.
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::ChainInternalInvariant(msg.into())
    }

    /// Creates a router-mismatch error with the given message.
    pub fn router_mismatch(msg: impl Into<String>) -> Self {
        Self::RouterMismatch(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QnsError::construction("parallel edge (0, 1)");
        assert!(err.to_string().contains("parallel edge"));
    }

    #[test]
    fn test_result_type() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(QnsError::SearchFailure(10))
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }

    #[test]
    fn test_search_failure_carries_attempt_count() {
        let err = QnsError::SearchFailure(42);
        assert!(err.to_string().contains("42"));
    }
}
