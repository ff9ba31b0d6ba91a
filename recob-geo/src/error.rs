//! Error types for recob-geo.

use thiserror::Error;

/// Result type alias for geometry identifier operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Geometry identifier errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Integer code that does not name any view.
    #[error("invalid view code: {0}")]
    InvalidView(i32),
}
