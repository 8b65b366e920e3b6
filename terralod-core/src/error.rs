//! Error types for terralod

use thiserror::Error;

/// Main error type for terralod operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to load geometry: {0}")]
    GeometryLoad(String),

    /// A face references a vertex index outside the vertex array. The mesh
    /// is structurally corrupt and no recovery is defined.
    #[error("vertex index {index} out of range (vertex array length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for terralod operations
pub type Result<T> = std::result::Result<T, Error>;
