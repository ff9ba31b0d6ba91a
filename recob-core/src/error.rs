//! Error types for recob-core.

use thiserror::Error;

/// Result type alias for recob operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for reconstruction records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Raw edge index outside of `{0, 1}`.
    #[error("invalid cluster edge index: {0}")]
    InvalidEdge(u32),

    /// Raw charge measurement index outside of `{0, 1}`.
    #[error("invalid charge mode index: {0}")]
    InvalidChargeMode(u32),
}
