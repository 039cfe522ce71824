//! Core type aliases shared across the Tessel stack.
//!
//! - [`Axis`] and [`Rank`] name dimension indices and counts
//! - [`Shape`] and [`Strides`] hold per-axis metadata without heap allocation
//!   for the ranks the rearrangement engine works with (4-D tensors and their
//!   6-D block-decomposed views)
//!
//! # Examples
//!
//! ```
//! use tessel_core::{DenseND, Shape};
//!
//! let tensor = DenseND::<f64>::zeros(&[2, 3, 4, 5]);
//! let shape: Shape = tensor.shape().iter().copied().collect();
//! assert_eq!(shape.len(), 4);
//! ```

use smallvec::SmallVec;

// Re-export the actual DenseND implementation
pub use crate::dense::DenseND;

/// Type alias for tensor axis index.
///
/// Zero-indexed (0 is the first axis).
pub type Axis = usize;

/// Type alias for tensor rank (number of dimensions).
///
/// # Examples
///
/// ```
/// use tessel_core::{Rank, DenseND};
///
/// let tensor = DenseND::<f32>::zeros(&[1, 4, 4, 3]);
/// let rank: Rank = tensor.rank();
/// assert_eq!(rank, 4);
/// ```
pub type Rank = usize;

/// Shape type using SmallVec to avoid heap allocation for common cases.
///
/// Sized for up to 6 dimensions: the block-decomposed view of a 4-D tensor
/// is exactly 6-D. Higher ranks spill to the heap.
pub type Shape = SmallVec<[usize; 6]>;

/// Per-axis element strides, same inline capacity as [`Shape`].
pub type Strides = SmallVec<[usize; 6]>;
