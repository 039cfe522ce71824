//! Error types for layout and view operations
//!
//! Owned-tensor constructors on [`DenseND`](crate::DenseND) report failures
//! through `anyhow`; the metadata layer (layouts and strided views) uses the
//! structured [`ViewError`] so callers can tell a bad request apart from a
//! reshape that is merely not expressible as a view.

use thiserror::Error;

/// Errors raised while building or transforming strided views
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("element count mismatch: expected {expected}, got {actual}")]
    ElementCountMismatch { expected: usize, actual: usize },

    #[error("rank mismatch: expected {expected} dimensions, got {actual}")]
    RankMismatch { expected: usize, actual: usize },

    #[error("invalid permutation {axes:?} for rank {rank}")]
    InvalidPermutation { axes: Vec<usize>, rank: usize },

    #[error("view reaches offset {max_offset} but buffer holds {len} elements")]
    OutOfBounds { max_offset: usize, len: usize },

    #[error("index {index:?} out of range for shape {shape:?}")]
    IndexOutOfRange { index: Vec<usize>, shape: Vec<usize> },

    #[error("shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch { left: Vec<usize>, right: Vec<usize> },

    #[error("tensor storage cannot be viewed as a strided slice: {reason}")]
    UnsupportedStorage { reason: String },
}

/// Result alias for view operations
pub type ViewResult<T> = Result<T, ViewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_count_display() {
        let err = ViewError::ElementCountMismatch {
            expected: 24,
            actual: 25,
        };
        let msg = err.to_string();
        assert!(msg.contains("expected 24"));
        assert!(msg.contains("got 25"));
    }

    #[test]
    fn test_out_of_bounds_display() {
        let err = ViewError::OutOfBounds {
            max_offset: 16,
            len: 16,
        };
        assert!(err.to_string().contains("offset 16"));
    }
}
