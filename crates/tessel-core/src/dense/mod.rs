//! Dense tensor implementation
//!
//! Owned tensor storage plus the permute and strided-view operations the
//! rearrangement engine needs from it.

// Core type definition
pub mod types;

// Operation modules
mod shape_ops;
mod views;

// Supporting modules
pub mod densend_traits;

// Re-export the main type
pub use types::DenseND;
