//! Error types for grid storage and persistence

use thiserror::Error;

/// Failures raised by grid operations and grid decoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A coordinate or window falls outside the grid
    #[error("{what} ({x}, {y}) is out of bounds for {width}x{height} grid")]
    OutOfBounds {
        what: &'static str,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// A width or height that must be positive was not
    #[error("invalid dimensions {width}x{height}: {reason}")]
    InvalidDimension {
        width: usize,
        height: usize,
        reason: String,
    },

    /// Malformed persisted grid data
    #[error("malformed grid data: {0}")]
    Format(String),
}

impl GridError {
    pub(crate) fn out_of_bounds(what: &'static str, x: usize, y: usize, width: usize, height: usize) -> Self {
        Self::OutOfBounds { what, x, y, width, height }
    }

    pub(crate) fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }
}

pub type GridResult<T> = Result<T, GridError>;
