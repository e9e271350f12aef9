//! Error types for the minewatch library.

use thiserror::Error;

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors that can occur during series construction or trend fitting.
///
/// The detectors and the statistics engine never error; they degrade
/// numerically instead (empty input yields zeroed statistics, degenerate
/// variance yields empty anomaly lists).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dimension mismatch between parallel sequences.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Computation error (e.g., numerical issues).
    #[error("computation error: {0}")]
    ComputationError(String),
}
