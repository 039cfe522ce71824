//! # tessel-core
//!
//! Strided tensor metadata, borrowed views, owned dense tensors and the element
//! type registry for Tessel.
//!
//! This crate provides the building blocks the rearrangement kernels in
//! `tessel-kernels` are written against:
//!
//! - **Layouts** ([`Layout`]) - shape, strides, offset and order tag, with
//!   metadata-only [`permute`](Layout::permute) and
//!   [`reshape`](Layout::reshape)
//! - **Views** ([`StridedView`], [`StridedViewMut`]) - layouts paired with
//!   borrowed buffers; they never own memory
//! - **Dense tensors** ([`DenseND`]) - owned storage via `scirs2-core`
//! - **Element registry** ([`Element`], [`DType`], [`DynTensor`]) - the closed
//!   set of numeric types kernels are instantiated for
//!
//! ## Core Principles
//!
//! ### SciRS2 Integration
//!
//! Owned storage uses `scirs2-core` (`ndarray_ext`, `numeric`). Direct use of
//! `ndarray` or `num-traits` is not permitted.
//!
//! ### Memory Layout
//!
//! Tensors are created C-contiguous. Permute and split-reshape are zero-copy;
//! merging axes is zero-copy only when strides allow it, and
//! [`Layout::reshape`] says so by returning `None` otherwise.
//!
//! ### Safety
//!
//! No unsafe code. Views check at construction that every reachable offset
//! lies inside the borrowed buffer.
//!
//! ## Quick Start
//!
//! ```
//! use tessel_core::{DenseND, StridedView};
//!
//! let tensor = DenseND::from_vec((0..16).collect::<Vec<i32>>(), &[1, 4, 4, 1]).unwrap();
//! let view = tensor.strided_view().unwrap();
//!
//! // Split the height axis into (2, 2) and move the inner factor outward
//! let split = view.reshape(&[1, 2, 2, 4, 1]).unwrap().unwrap();
//! let moved = split.permute(&[2, 0, 1, 3, 4]).unwrap();
//! assert_eq!(moved.shape(), &[2, 1, 2, 4, 1]);
//! assert_eq!(moved.get(&[1, 0, 0, 0, 0]), Some(&4));
//! ```
//!
//! ## Error Handling
//!
//! Layout and view operations return [`ViewResult`]; owned tensor
//! constructors return `anyhow::Result`.
//!
//! ## Features
//!
//! - `serde`: Serialize/deserialize [`DType`] and [`Order`]

pub mod dense;
pub mod dtype;
pub mod error;
pub mod layout;
pub mod types;
pub mod view;


pub use dtype::{DType, DynTensor, Element};
pub use error::{ViewError, ViewResult};
pub use layout::{invert_permutation, validate_permutation, Layout, Offsets, Order};
pub use types::{Axis, DenseND, Rank, Shape, Strides};
pub use view::{StridedView, StridedViewMut};
