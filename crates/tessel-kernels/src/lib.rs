//! # tessel-kernels
//!
//! Blocked spatial rearrangement for Tessel: the inverse pair
//! **batch-to-space** and **space-to-batch** over 4-D
//! `(batch, height, width, channel)` tensors.
//!
//! ## Overview
//!
//! Space-to-batch zero-pads each image, cuts it into `b × b` tiles and moves
//! tile offset `(bh, bw)` into its own batch entry. Batch-to-space puts the
//! tiles back together and crops the requested boundary.
//!
//! **Key Features:**
//! - **Zero-copy reconciliation** - both layouts are aligned as 6-D views by
//!   reshape and permute alone
//! - **Fast path** - without boundaries the whole call is one bulk assignment
//! - **Strided copy kernel** - boundary-aware crop and zero-pad over any
//!   strided input and output views
//! - **Parallel execution** - rayon fan-out over contiguous outputs
//!   (`parallel` feature, on by default)
//! - **Runtime dispatch** - [`DynTensor`](tessel_core::DynTensor) entry points
//!   for callers that only know the element type at runtime
//!
//! ## Quick Start
//!
//! ```rust
//! use tessel_core::DenseND;
//! use tessel_kernels::{batch_to_space_dense, space_to_batch_dense, BlockDescriptor};
//!
//! let image = DenseND::from_vec((0..16).collect::<Vec<i32>>(), &[1, 4, 4, 1]).unwrap();
//! let desc = BlockDescriptor::new(2);
//!
//! let batch = space_to_batch_dense(&image, &desc).unwrap();
//! assert_eq!(batch.shape(), &[4, 2, 2, 1]);
//!
//! let restored = batch_to_space_dense(&batch, &desc).unwrap();
//! assert_eq!(restored, image);
//! ```
//!
//! ## Paths
//!
//! | Condition | Path | Extra memory |
//! |-----------|------|--------------|
//! | no boundaries | `fast_assign` | none |
//! | boundaries, blocked view merges to 4-D | `kernel_direct` | none |
//! | boundaries, otherwise | `kernel_staged` | one buffer of the space-side size |
//!
//! ## Errors
//!
//! All entry points return [`KernelResult`]. Shapes are validated before any
//! element is written; crops that consume an entire spatial axis are
//! rejected with [`KernelError::BoundaryOverflow`].

pub mod config;
pub mod descriptor;
pub mod dispatch;
pub mod error;
pub mod reconcile;
pub mod shape;
pub mod space_batch;
pub mod strided_copy;
pub mod tracing_support;
pub mod utils;


pub use config::{RearrangeConfig, DEFAULT_MIN_PARALLEL_LEN};
pub use descriptor::BlockDescriptor;
pub use dispatch::{
    batch_to_space_dyn, batch_to_space_dyn_into, space_to_batch_dyn, space_to_batch_dyn_into,
};
pub use error::{KernelError, KernelResult};
pub use reconcile::CopyPath;
pub use shape::{batch_to_space_output_shape, space_to_batch_output_shape, SPATIAL_RANK};
pub use space_batch::{
    batch_to_space, batch_to_space_dense, batch_to_space_with_config, space_to_batch,
    space_to_batch_dense, space_to_batch_with_config,
};
pub use strided_copy::{crop_copy, pad_copy};
