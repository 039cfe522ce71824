//! Metadata-only alignment of batch and space layouts
//!
//! A batch tensor `[B·b², H, W, C]` and a space tensor `[B, H·b, W·b, C]`
//! hold the same elements once both are seen as the 6-D blocked shape
//! `[B, H, b, W, b, C]`:
//!
//! ```text
//! batch  [b, b, B, H, W, C]  --permute [2, 3, 0, 4, 1, 5]-->  [B, H, b, W, b, C]
//! space  [B, H, b, W, b, C]  --permute [2, 4, 0, 1, 3, 5]-->  [b, b, B, H, W, C]
//! ```
//!
//! Splitting the batch axis into `[b, b, B]` or a spatial axis into `[H, b]`
//! never needs a copy. Merging the blocked view back to 4-D only works when
//! the strides line up; [`merge_blocks`] reports `None` otherwise.

use tessel_core::Layout;

use crate::error::{KernelError, KernelResult};

/// Axis order taking `[b, b, B, H, W, C]` to `[B, H, b, W, b, C]`.
pub const INTERLEAVE_AXES: [usize; 6] = [2, 3, 0, 4, 1, 5];

/// Inverse of [`INTERLEAVE_AXES`].
pub const DEINTERLEAVE_AXES: [usize; 6] = [2, 4, 0, 1, 3, 5];

/// How a rearrangement moves its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyPath {
    /// No boundaries: one bulk assignment between reconciled 6-D views
    FastAssign,
    /// Copy kernel runs through the merged 4-D view of the batch-side memory
    KernelDirect,
    /// Copy kernel runs against a contiguous working buffer
    KernelStaged,
}

impl CopyPath {
    pub fn as_str(self) -> &'static str {
        match self {
            CopyPath::FastAssign => "fast_assign",
            CopyPath::KernelDirect => "kernel_direct",
            CopyPath::KernelStaged => "kernel_staged",
        }
    }
}

fn split(layout: &Layout, shape: &[usize]) -> KernelResult<Layout> {
    layout.reshape(shape)?.ok_or_else(|| {
        KernelError::shape_precondition(
            "reconcile",
            layout.shape(),
            format!("cannot split into {:?} without a copy", shape),
        )
    })
}

/// Batch layout `[B·b², H, W, C]` split to `[b, b, B, H, W, C]`.
pub fn batch_blocks(batch: &Layout, block: usize) -> KernelResult<Layout> {
    let s = batch.shape();
    split(
        batch,
        &[block, block, s[0] / (block * block), s[1], s[2], s[3]],
    )
}

/// Batch layout `[B·b², H, W, C]` seen as `[B, H, b, W, b, C]`.
pub fn batch_as_space_blocks(batch: &Layout, block: usize) -> KernelResult<Layout> {
    Ok(batch_blocks(batch, block)?.permute(&INTERLEAVE_AXES)?)
}

/// Space layout `[B, H·b, W·b, C]` split to `[B, H, b, W, b, C]`.
pub fn space_blocks(space: &Layout, block: usize) -> KernelResult<Layout> {
    let s = space.shape();
    split(
        space,
        &[s[0], s[1] / block, block, s[2] / block, block, s[3]],
    )
}

/// Space layout `[B, H·b, W·b, C]` seen as `[b, b, B, H, W, C]`.
pub fn space_as_batch_blocks(space: &Layout, block: usize) -> KernelResult<Layout> {
    Ok(space_blocks(space, block)?.permute(&DEINTERLEAVE_AXES)?)
}

/// Merge `[B, H, b, W, b, C]` into `[B, H·b, W·b, C]`, `None` if the strides
/// do not allow it.
pub fn merge_blocks(blocked: &Layout) -> KernelResult<Option<Layout>> {
    let s = blocked.shape();
    Ok(blocked.reshape(&[s[0], s[1] * s[2], s[3] * s[4], s[5]])?)
}

/// Path a call with these boundaries and this merge outcome takes.
pub fn choose_path(unbounded: bool, merged: Option<&Layout>) -> CopyPath {
    match (unbounded, merged) {
        (true, _) => CopyPath::FastAssign,
        (false, Some(_)) => CopyPath::KernelDirect,
        (false, None) => CopyPath::KernelStaged,
    }
}
