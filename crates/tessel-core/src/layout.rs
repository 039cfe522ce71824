//! Strided layout metadata.
//!
//! A [`Layout`] describes how a logical N-dimensional index maps onto a flat
//! buffer: `offset + Σ index[i] · strides[i]`. It never refers to memory;
//! [`StridedView`](crate::StridedView) pairs a layout with a borrowed slice.
//!
//! # Reshape viability
//!
//! Reshaping reinterprets the logical row-major traversal of a layout under a
//! new shape. Splitting an axis is always expressible by strides alone.
//! Merging a run of axes `d .. d+k` is expressible only if
//!
//! ```text
//! ∀ i = d .. d+k−1:
//!     stride[i] == stride[i+1] * size[i+1]
//! ```
//!
//! [`Layout::reshape`] returns `Ok(None)` when that condition fails, leaving
//! the decision to materialize a copy to the caller.
//!
//! # Examples
//!
//! ```
//! use tessel_core::{Layout, Order};
//!
//! let layout = Layout::contiguous(&[2, 3, 4], Order::RowMajor);
//! assert_eq!(layout.strides(), &[12, 4, 1]);
//! assert_eq!(layout.offset_of(&[1, 2, 3]), 23);
//!
//! // Permuting only reorders metadata
//! let permuted = layout.permute(&[2, 0, 1]).unwrap();
//! assert_eq!(permuted.shape(), &[4, 2, 3]);
//! assert_eq!(permuted.strides(), &[1, 12, 4]);
//!
//! // Merging permuted axes is not expressible as a view
//! assert!(permuted.reshape(&[4, 6]).unwrap().is_none());
//! ```

use smallvec::SmallVec;

use crate::error::{ViewError, ViewResult};
use crate::types::{Shape, Strides};

/// Memory order a layout was created in.
///
/// Logical traversal (reshape, assignment pairing) is always row-major; the
/// tag records how the strides were laid out when the tensor was allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Order {
    /// Row-major layout (C-style): last index varies fastest.
    #[default]
    RowMajor,

    /// Column-major layout (Fortran-style): first index varies fastest.
    ColumnMajor,
}

/// Shape, strides, base offset and order tag of a strided tensor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    shape: Shape,
    strides: Strides,
    offset: usize,
    order: Order,
}

impl Layout {
    /// Dense layout of `shape` in the given memory order, starting at offset 0.
    pub fn contiguous(shape: &[usize], order: Order) -> Self {
        let mut strides: Strides = SmallVec::from_elem(0, shape.len());
        let mut acc = 1usize;
        match order {
            Order::RowMajor => {
                for d in (0..shape.len()).rev() {
                    strides[d] = acc;
                    acc *= shape[d].max(1);
                }
            }
            Order::ColumnMajor => {
                for (d, &size) in shape.iter().enumerate() {
                    strides[d] = acc;
                    acc *= size.max(1);
                }
            }
        }
        Self {
            shape: shape.iter().copied().collect(),
            strides,
            offset: 0,
            order,
        }
    }

    /// Build a layout from explicit parts.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::RankMismatch`] if `strides.len() != shape.len()`.
    pub fn from_parts(
        shape: &[usize],
        strides: &[usize],
        offset: usize,
        order: Order,
    ) -> ViewResult<Self> {
        if shape.len() != strides.len() {
            return Err(ViewError::RankMismatch {
                expected: shape.len(),
                actual: strides.len(),
            });
        }
        Ok(Self {
            shape: shape.iter().copied().collect(),
            strides: strides.iter().copied().collect(),
            offset,
            order,
        })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Total number of logical elements.
    pub fn len(&self) -> usize {
        self.shape.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat buffer offset of `index`. The index is not bounds-checked.
    #[inline]
    pub fn offset_of(&self, index: &[usize]) -> usize {
        debug_assert_eq!(index.len(), self.rank());
        index
            .iter()
            .zip(self.strides.iter())
            .fold(self.offset, |acc, (&i, &s)| acc + i * s)
    }

    /// Bounds-checked variant of [`offset_of`](Self::offset_of).
    pub fn checked_offset_of(&self, index: &[usize]) -> ViewResult<usize> {
        let in_range = index.len() == self.rank()
            && index.iter().zip(self.shape.iter()).all(|(&i, &n)| i < n);
        if !in_range {
            return Err(ViewError::IndexOutOfRange {
                index: index.to_vec(),
                shape: self.shape.to_vec(),
            });
        }
        Ok(self.offset_of(index))
    }

    /// Largest flat offset any index can reach, `None` for empty layouts.
    pub fn max_offset(&self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        Some(
            self.shape
                .iter()
                .zip(self.strides.iter())
                .fold(self.offset, |acc, (&n, &s)| acc + (n - 1) * s),
        )
    }

    /// True when row-major traversal visits `offset .. offset + len` in order.
    ///
    /// Axes of extent 1 are ignored, their stride is never used.
    pub fn is_contiguous(&self) -> bool {
        if self.is_empty() {
            return true;
        }
        let mut expected = 1usize;
        for (&n, &s) in self.shape.iter().zip(self.strides.iter()).rev() {
            if n == 1 {
                continue;
            }
            if s != expected {
                return false;
            }
            expected *= n;
        }
        true
    }

    /// Reorder axes: axis `i` of the result is axis `axes[i]` of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::InvalidPermutation`] unless `axes` is a
    /// permutation of `0..rank`.
    pub fn permute(&self, axes: &[usize]) -> ViewResult<Self> {
        validate_permutation(axes, self.rank())?;
        Ok(Self {
            shape: axes.iter().map(|&a| self.shape[a]).collect(),
            strides: axes.iter().map(|&a| self.strides[a]).collect(),
            offset: self.offset,
            order: self.order,
        })
    }

    /// Reinterpret the row-major traversal of this layout under `new_shape`.
    ///
    /// Returns `Ok(None)` when the new shape cannot be expressed with strides
    /// over the same memory.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::ElementCountMismatch`] if the element counts differ.
    pub fn reshape(&self, new_shape: &[usize]) -> ViewResult<Option<Self>> {
        let len = self.len();
        let new_len: usize = new_shape.iter().product();
        if len != new_len {
            return Err(ViewError::ElementCountMismatch {
                expected: len,
                actual: new_len,
            });
        }
        if len == 0 {
            let mut empty = Self::contiguous(new_shape, self.order);
            empty.offset = self.offset;
            return Ok(Some(empty));
        }

        // Unit axes carry no stride information.
        let old: SmallVec<[(usize, usize); 6]> = self
            .shape
            .iter()
            .zip(self.strides.iter())
            .filter(|(&n, _)| n != 1)
            .map(|(&n, &s)| (n, s))
            .collect();

        let mut strides: Strides = SmallVec::from_elem(1, new_shape.len());
        let (mut oi, mut ni) = (0usize, 0usize);
        while oi < old.len() && ni < new_shape.len() {
            // Grow the smallest pair of axis groups with equal extent.
            let (mut oj, mut nj) = (oi + 1, ni + 1);
            let mut op = old[oi].0;
            let mut np = new_shape[ni];
            while op != np {
                if np < op {
                    np *= new_shape[nj];
                    nj += 1;
                } else {
                    op *= old[oj].0;
                    oj += 1;
                }
            }

            if (oi..oj - 1).any(|k| old[k].1 != old[k + 1].1 * old[k + 1].0) {
                return Ok(None);
            }

            strides[nj - 1] = old[oj - 1].1;
            for k in (ni + 1..nj).rev() {
                strides[k - 1] = strides[k] * new_shape[k];
            }

            oi = oj;
            ni = nj;
        }

        Ok(Some(Self {
            shape: new_shape.iter().copied().collect(),
            strides,
            offset: self.offset,
            order: self.order,
        }))
    }

    /// Decompose a logical row-major position into per-axis coordinates.
    ///
    /// `flat` must be `< self.len()` and `coords.len() == self.rank()`.
    #[inline]
    pub fn unravel(&self, mut flat: usize, coords: &mut [usize]) {
        debug_assert_eq!(coords.len(), self.rank());
        for d in (0..self.rank()).rev() {
            let n = self.shape[d];
            coords[d] = flat % n;
            flat /= n;
        }
    }

    /// Buffer offsets of every element, in logical row-major order.
    pub fn offsets(&self) -> Offsets<'_> {
        Offsets {
            layout: self,
            index: SmallVec::from_elem(0, self.rank()),
            current: self.offset,
            remaining: self.len(),
        }
    }
}

/// Iterator over buffer offsets of a [`Layout`] in logical row-major order.
///
/// Advances like an odometer, so each step costs one stride addition in the
/// common case.
pub struct Offsets<'a> {
    layout: &'a Layout,
    index: Shape,
    current: usize,
    remaining: usize,
}

impl Iterator for Offsets<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.current;
        self.remaining -= 1;

        if self.remaining > 0 {
            let shape = &self.layout.shape;
            let strides = &self.layout.strides;
            for d in (0..shape.len()).rev() {
                self.index[d] += 1;
                self.current += strides[d];
                if self.index[d] < shape[d] {
                    break;
                }
                self.current -= strides[d] * shape[d];
                self.index[d] = 0;
            }
        }

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Offsets<'_> {}

/// Check that `axes` is a permutation of `0..rank`.
pub fn validate_permutation(axes: &[usize], rank: usize) -> ViewResult<()> {
    let invalid = || ViewError::InvalidPermutation {
        axes: axes.to_vec(),
        rank,
    };
    if axes.len() != rank {
        return Err(invalid());
    }
    let mut seen: SmallVec<[bool; 6]> = SmallVec::from_elem(false, rank);
    for &axis in axes {
        if axis >= rank || seen[axis] {
            return Err(invalid());
        }
        seen[axis] = true;
    }
    Ok(())
}

/// Inverse of a permutation: `inverse[axes[i]] == i`.
pub fn invert_permutation(axes: &[usize]) -> ViewResult<SmallVec<[usize; 6]>> {
    validate_permutation(axes, axes.len())?;
    let mut inverse: SmallVec<[usize; 6]> = SmallVec::from_elem(0, axes.len());
    for (i, &a) in axes.iter().enumerate() {
        inverse[a] = i;
    }
    Ok(inverse)
}
