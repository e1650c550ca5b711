//! Error types for analysis.

/// Errors that can occur while walking a transducer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum AnalyzerError {
    /// The path got deeper than the configured limit, usually because of an
    /// epsilon cycle
    #[error("Traversal exceeded maximum depth of {depth}")]
    TraversalLimitExceeded {
        /// The configured limit
        depth: usize,
    },
}
