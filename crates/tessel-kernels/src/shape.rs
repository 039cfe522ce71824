//! Output shape inference and argument validation
//!
//! All checks run before any data moves. Tensors are 4-D with axes
//! `(batch, height, width, channel)`.

use smallvec::smallvec;
use tessel_core::Shape;

use crate::descriptor::BlockDescriptor;
use crate::error::{KernelError, KernelResult};

pub(crate) const BATCH_TO_SPACE: &str = "batch_to_space";
pub(crate) const SPACE_TO_BATCH: &str = "space_to_batch";

/// Rank of every tensor the rearrangement accepts
pub const SPATIAL_RANK: usize = 4;

fn check_block(operation: &str, desc: &BlockDescriptor) -> KernelResult<()> {
    if desc.block_size == 0 {
        return Err(KernelError::invalid_block_size(operation, desc.block_size));
    }
    Ok(())
}

fn block_area(operation: &str, shape: &[usize], desc: &BlockDescriptor) -> KernelResult<usize> {
    desc.block_area().ok_or_else(|| {
        KernelError::shape_precondition(
            operation,
            shape,
            format!("block² overflows for block size {}", desc.block_size),
        )
    })
}

fn scaled(
    operation: &str,
    shape: &[usize],
    axis: &str,
    extent: usize,
    factor: usize,
) -> KernelResult<usize> {
    extent.checked_mul(factor).ok_or_else(|| {
        KernelError::shape_precondition(operation, shape, format!("{} × {} overflows", axis, factor))
    })
}

fn check_rank(operation: &str, parameter: &str, shape: &[usize]) -> KernelResult<()> {
    if shape.len() != SPATIAL_RANK {
        return Err(KernelError::rank_mismatch(
            operation,
            parameter,
            SPATIAL_RANK,
            shape.len(),
        ));
    }
    Ok(())
}

fn check_crop(
    operation: &str,
    axis: &'static str,
    extent: usize,
    before: usize,
    after: usize,
) -> KernelResult<usize> {
    let total = before.saturating_add(after);
    if total > 0 && total >= extent {
        return Err(KernelError::boundary_overflow(
            operation, axis, extent, before, after,
        ));
    }
    Ok(extent - total)
}

fn padded_blocks(
    operation: &str,
    shape: &[usize],
    axis: &str,
    extent: usize,
    before: usize,
    after: usize,
    block: usize,
) -> KernelResult<usize> {
    let padded = extent
        .checked_add(before)
        .and_then(|n| n.checked_add(after))
        .ok_or_else(|| {
            KernelError::shape_precondition(operation, shape, format!("padded {} overflows", axis))
        })?;
    if padded % block != 0 {
        return Err(KernelError::shape_precondition(
            operation,
            shape,
            format!(
                "padded {} {} is not divisible by block size {}",
                axis, padded, block
            ),
        ));
    }
    Ok(padded / block)
}

/// Shape produced by batch-to-space.
///
/// `[B·b², H, W, C]` becomes `[B, H·b − bottom − top, W·b − left − right, C]`.
///
/// # Errors
///
/// - [`KernelError::InvalidBlockSize`] for a zero block
/// - [`KernelError::RankMismatch`] unless the input is 4-D
/// - [`KernelError::ShapePrecondition`] if the batch is not divisible by `b²`
///   or an extent overflows `usize`
/// - [`KernelError::BoundaryOverflow`] if crops consume an entire spatial axis
///
/// # Examples
///
/// ```
/// use tessel_kernels::{batch_to_space_output_shape, BlockDescriptor};
///
/// let shape = batch_to_space_output_shape(&[8, 2, 3, 5], &BlockDescriptor::new(2)).unwrap();
/// assert_eq!(shape.as_slice(), &[2, 4, 6, 5]);
///
/// let cropped = BlockDescriptor::new(2).with_width(1, 1);
/// let shape = batch_to_space_output_shape(&[8, 2, 3, 5], &cropped).unwrap();
/// assert_eq!(shape.as_slice(), &[2, 4, 4, 5]);
/// ```
pub fn batch_to_space_output_shape(
    input_shape: &[usize],
    desc: &BlockDescriptor,
) -> KernelResult<Shape> {
    check_block(BATCH_TO_SPACE, desc)?;
    check_rank(BATCH_TO_SPACE, "input", input_shape)?;

    let block = desc.block_size;
    let area = block_area(BATCH_TO_SPACE, input_shape, desc)?;
    let batch = input_shape[0];
    if batch % area != 0 {
        return Err(KernelError::shape_precondition(
            BATCH_TO_SPACE,
            input_shape,
            format!("batch {} is not divisible by block² = {}", batch, area),
        ));
    }

    let height = check_crop(
        BATCH_TO_SPACE,
        "height",
        scaled(BATCH_TO_SPACE, input_shape, "height", input_shape[1], block)?,
        desc.bottom,
        desc.top,
    )?;
    let width = check_crop(
        BATCH_TO_SPACE,
        "width",
        scaled(BATCH_TO_SPACE, input_shape, "width", input_shape[2], block)?,
        desc.left,
        desc.right,
    )?;

    Ok(smallvec![batch / area, height, width, input_shape[3]])
}

/// Shape produced by space-to-batch.
///
/// `[B, H, W, C]` becomes
/// `[B·b², (H + bottom + top) / b, (W + left + right) / b, C]`.
///
/// # Errors
///
/// - [`KernelError::InvalidBlockSize`] for a zero block
/// - [`KernelError::RankMismatch`] unless the input is 4-D
/// - [`KernelError::ShapePrecondition`] if a padded spatial extent is not
///   divisible by the block size or an extent overflows `usize`
///
/// # Examples
///
/// ```
/// use tessel_kernels::{space_to_batch_output_shape, BlockDescriptor};
///
/// let desc = BlockDescriptor::new(2).with_height(1, 1);
/// let shape = space_to_batch_output_shape(&[1, 2, 4, 3], &desc).unwrap();
/// assert_eq!(shape.as_slice(), &[4, 2, 2, 3]);
/// ```
pub fn space_to_batch_output_shape(
    input_shape: &[usize],
    desc: &BlockDescriptor,
) -> KernelResult<Shape> {
    check_block(SPACE_TO_BATCH, desc)?;
    check_rank(SPACE_TO_BATCH, "input", input_shape)?;

    let block = desc.block_size;
    let height = padded_blocks(
        SPACE_TO_BATCH,
        input_shape,
        "height",
        input_shape[1],
        desc.bottom,
        desc.top,
        block,
    )?;
    let width = padded_blocks(
        SPACE_TO_BATCH,
        input_shape,
        "width",
        input_shape[2],
        desc.left,
        desc.right,
        block,
    )?;

    let area = block_area(SPACE_TO_BATCH, input_shape, desc)?;
    let batch = scaled(SPACE_TO_BATCH, input_shape, "batch", input_shape[0], area)?;

    Ok(smallvec![batch, height, width, input_shape[3]])
}

/// Check that `output_shape` is exactly the inferred shape.
pub(crate) fn check_output(
    operation: &str,
    output_shape: &[usize],
    expected: &[usize],
) -> KernelResult<()> {
    check_rank(operation, "output", output_shape)?;
    if output_shape != expected {
        return Err(KernelError::shape_precondition(
            operation,
            output_shape,
            format!("output shape must be {:?}", expected),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_to_space_shape() {
        let shape = batch_to_space_output_shape(&[4, 2, 2, 1], &BlockDescriptor::new(2)).unwrap();
        assert_eq!(shape.as_slice(), &[1, 4, 4, 1]);
    }

    #[test]
    fn test_batch_to_space_crop_shape() {
        let desc = BlockDescriptor::new(2).with_height(1, 0).with_width(0, 1);
        let shape = batch_to_space_output_shape(&[4, 2, 2, 3], &desc).unwrap();
        assert_eq!(shape.as_slice(), &[1, 3, 3, 3]);
    }

    #[test]
    fn test_batch_not_divisible() {
        let err = batch_to_space_output_shape(&[3, 2, 2, 1], &BlockDescriptor::new(2)).unwrap_err();
        assert!(matches!(err, KernelError::ShapePrecondition { .. }));
    }

    #[test]
    fn test_crop_overflow_rejected() {
        let desc = BlockDescriptor::new(2).with_height(2, 2);
        let err = batch_to_space_output_shape(&[4, 2, 2, 1], &desc).unwrap_err();
        assert!(matches!(
            err,
            KernelError::BoundaryOverflow {
                axis: "height",
                extent: 4,
                ..
            }
        ));

        let desc = BlockDescriptor::new(1).with_width(5, 0);
        let err = batch_to_space_output_shape(&[1, 4, 4, 1], &desc).unwrap_err();
        assert!(matches!(err, KernelError::BoundaryOverflow { axis: "width", .. }));
    }

    #[test]
    fn test_empty_spatial_without_crop() {
        let shape = batch_to_space_output_shape(&[4, 0, 2, 1], &BlockDescriptor::new(2)).unwrap();
        assert_eq!(shape.as_slice(), &[1, 0, 4, 1]);
    }

    #[test]
    fn test_space_to_batch_shape() {
        let shape = space_to_batch_output_shape(&[1, 4, 4, 1], &BlockDescriptor::new(2)).unwrap();
        assert_eq!(shape.as_slice(), &[4, 2, 2, 1]);
    }

    #[test]
    fn test_space_to_batch_padding_must_divide() {
        let desc = BlockDescriptor::new(2).with_height(1, 0);
        let err = space_to_batch_output_shape(&[1, 4, 4, 1], &desc).unwrap_err();
        assert!(matches!(err, KernelError::ShapePrecondition { .. }));
    }

    #[test]
    fn test_zero_block_and_rank() {
        let err = space_to_batch_output_shape(&[1, 4, 4, 1], &BlockDescriptor::new(0)).unwrap_err();
        assert!(matches!(err, KernelError::InvalidBlockSize { .. }));

        let err = space_to_batch_output_shape(&[4, 4, 1], &BlockDescriptor::new(2)).unwrap_err();
        assert!(matches!(
            err,
            KernelError::RankMismatch {
                actual_rank: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_oversized_block_is_a_precondition_error() {
        let huge = BlockDescriptor::new(1 << (usize::BITS / 2));
        let err = batch_to_space_output_shape(&[4, 2, 2, 1], &huge).unwrap_err();
        assert!(matches!(err, KernelError::ShapePrecondition { .. }));

        let side = 1 << (usize::BITS / 2);
        let err = space_to_batch_output_shape(&[1, side, side, 1], &huge).unwrap_err();
        assert!(matches!(err, KernelError::ShapePrecondition { .. }));

        // b² fits but H·b does not
        let desc = BlockDescriptor::new(4);
        let err = batch_to_space_output_shape(&[16, usize::MAX / 2, 1, 1], &desc).unwrap_err();
        assert!(matches!(err, KernelError::ShapePrecondition { .. }));

        // padded extents divide, but B·b² does not fit
        let desc = BlockDescriptor::new(2);
        let err = space_to_batch_output_shape(&[usize::MAX / 2, 2, 2, 1], &desc).unwrap_err();
        assert!(matches!(err, KernelError::ShapePrecondition { .. }));
    }

    #[test]
    fn test_check_output() {
        assert!(check_output(BATCH_TO_SPACE, &[1, 4, 4, 1], &[1, 4, 4, 1]).is_ok());
        assert!(check_output(BATCH_TO_SPACE, &[1, 4, 4, 2], &[1, 4, 4, 1]).is_err());
        assert!(check_output(BATCH_TO_SPACE, &[4, 4, 1], &[1, 4, 4, 1]).is_err());
    }
}
