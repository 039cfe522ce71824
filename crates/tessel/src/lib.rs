//! # Tessel - Blocked Spatial Rearrangement
//!
//! Batch-to-space and space-to-batch over strided 4-D tensors, with
//! boundary cropping and zero padding.
//!
//! This is the **meta crate** that re-exports all Tessel components for convenient access.
//!
//! ## Quick Start
//!
//! ```
//! use tessel::prelude::*;
//!
//! let image = DenseND::from_vec((0..16).collect::<Vec<i32>>(), &[1, 4, 4, 1])?;
//! let batch = space_to_batch_dense(&image, &BlockDescriptor::new(2))?;
//! assert_eq!(batch.shape(), &[4, 2, 2, 1]);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Core Views ([`core`])
//!
//! Layouts, borrowed strided views, owned dense tensors and the element-type registry.
//!
//! ```
//! use tessel::core::{Layout, Order};
//!
//! let layout = Layout::contiguous(&[2, 3, 4], Order::RowMajor);
//! let permuted = layout.permute(&[2, 0, 1]).unwrap();
//! assert!(permuted.reshape(&[4, 6]).unwrap().is_none());
//! ```
//!
//! ### Rearrangement Kernels ([`kernels`])
//!
//! Entry points over views, owned tensors and runtime-typed tensors.
//!
//! ```
//! use tessel::core::{DType, DynTensor};
//! use tessel::kernels::{batch_to_space_dyn, BlockDescriptor};
//!
//! let batch = DynTensor::zeros(DType::F64, &[4, 3, 3, 2]);
//! let desc = BlockDescriptor::new(2).with_height(1, 0).with_width(0, 1);
//! let space = batch_to_space_dyn(&batch, &desc).unwrap();
//! assert_eq!(space.shape(), &[1, 5, 5, 2]);
//! ```
//!
//! ## Features
//!
//! - `parallel` (default): rayon fan-out in the copy kernel
//! - `tracing`: structured debug events from every entry point
//! - `serde`: serialization of `DType` and `Order`

// Re-export all components
pub use tessel_core as core;
pub use tessel_kernels as kernels;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use tessel::prelude::*;
    //!
    //! let tensor = DenseND::<f32>::zeros(&[4, 2, 2, 3]);
    //! let desc = BlockDescriptor::new(2);
    //! assert_eq!(batch_to_space_output_shape(tensor.shape(), &desc).unwrap().as_slice(), &[1, 4, 4, 3]);
    //! ```

    // Core types
    pub use crate::core::{
        DType, DenseND, DynTensor, Element, Layout, Order, StridedView, StridedViewMut,
    };

    // Entry points
    pub use crate::kernels::{
        batch_to_space, batch_to_space_dense, batch_to_space_dyn, batch_to_space_output_shape,
        space_to_batch, space_to_batch_dense, space_to_batch_dyn, space_to_batch_output_shape,
        BlockDescriptor, KernelError, KernelResult, RearrangeConfig,
    };
}
