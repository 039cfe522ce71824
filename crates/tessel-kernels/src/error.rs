//! Error types for rearrangement kernels
//!
//! Every failure is detected before the first output element is written, so an
//! `Err` never leaves a partially populated destination behind.

use std::fmt;

use tessel_core::{DType, ViewError};

/// Error type for blocked spatial rearrangement
#[derive(Debug, Clone, PartialEq)]
pub enum KernelError {
    /// Block size of zero
    InvalidBlockSize { operation: String, block_size: usize },

    /// Input or output is not a 4-D `(batch, height, width, channel)` tensor
    RankMismatch {
        operation: String,
        parameter: String,
        expected_rank: usize,
        actual_rank: usize,
    },

    /// Divisibility, channel, batch or output-extent violation
    ShapePrecondition {
        operation: String,
        shape: Vec<usize>,
        reason: String,
    },

    /// Crop amounts consume the whole spatial extent of an axis
    BoundaryOverflow {
        operation: String,
        axis: &'static str,
        extent: usize,
        before: usize,
        after: usize,
    },

    /// Input and output element types differ
    DTypeMismatch {
        operation: String,
        input: DType,
        output: DType,
    },

    /// View construction or reshape failure
    View(ViewError),
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::InvalidBlockSize {
                operation,
                block_size,
            } => write!(
                f,
                "{}: invalid block size {}: must be at least 1",
                operation, block_size
            ),

            KernelError::RankMismatch {
                operation,
                parameter,
                expected_rank,
                actual_rank,
            } => write!(
                f,
                "{}: {} must have rank {}, got rank {}",
                operation, parameter, expected_rank, actual_rank
            ),

            KernelError::ShapePrecondition {
                operation,
                shape,
                reason,
            } => write!(f, "{}: shape {:?} rejected: {}", operation, shape, reason),

            KernelError::BoundaryOverflow {
                operation,
                axis,
                extent,
                before,
                after,
            } => write!(
                f,
                "{}: boundary {} + {} exceeds {} extent {}",
                operation, before, after, axis, extent
            ),

            KernelError::DTypeMismatch {
                operation,
                input,
                output,
            } => write!(
                f,
                "{}: element type mismatch, input is {} but output is {}",
                operation, input, output
            ),

            KernelError::View(err) => write!(f, "view error: {}", err),
        }
    }
}

impl std::error::Error for KernelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KernelError::View(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ViewError> for KernelError {
    fn from(err: ViewError) -> Self {
        KernelError::View(err)
    }
}

/// Result type for kernel operations
pub type KernelResult<T> = Result<T, KernelError>;

impl KernelError {
    /// Create an invalid block size error
    pub fn invalid_block_size(operation: impl Into<String>, block_size: usize) -> Self {
        KernelError::InvalidBlockSize {
            operation: operation.into(),
            block_size,
        }
    }

    /// Create a rank mismatch error
    pub fn rank_mismatch(
        operation: impl Into<String>,
        parameter: impl Into<String>,
        expected_rank: usize,
        actual_rank: usize,
    ) -> Self {
        KernelError::RankMismatch {
            operation: operation.into(),
            parameter: parameter.into(),
            expected_rank,
            actual_rank,
        }
    }

    /// Create a shape precondition error
    pub fn shape_precondition(
        operation: impl Into<String>,
        shape: &[usize],
        reason: impl Into<String>,
    ) -> Self {
        KernelError::ShapePrecondition {
            operation: operation.into(),
            shape: shape.to_vec(),
            reason: reason.into(),
        }
    }

    /// Create a boundary overflow error
    pub fn boundary_overflow(
        operation: impl Into<String>,
        axis: &'static str,
        extent: usize,
        before: usize,
        after: usize,
    ) -> Self {
        KernelError::BoundaryOverflow {
            operation: operation.into(),
            axis,
            extent,
            before,
            after,
        }
    }

    /// Create a dtype mismatch error
    pub fn dtype_mismatch(operation: impl Into<String>, input: DType, output: DType) -> Self {
        KernelError::DTypeMismatch {
            operation: operation.into(),
            input,
            output,
        }
    }
}
