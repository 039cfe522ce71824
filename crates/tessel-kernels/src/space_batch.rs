//! Batch-to-space and space-to-batch entry points
//!
//! Each call validates shapes, reconciles the batch-side layout with the
//! space-side layout, then moves data along one of three paths:
//!
//! - **fast assign** when no boundaries are given: a single bulk assignment
//!   between the 6-D blocked views, written in destination order;
//! - **direct kernel** when the blocked view of the batch-side memory merges
//!   back to 4-D: the crop/pad kernel works on it in place;
//! - **staged kernel** otherwise: a contiguous working buffer in space order
//!   is filled first (batch-to-space) or last (space-to-batch).
//!
//! Every argument check runs before the first element is written.

use tessel_core::{DenseND, Element, Layout, Order, StridedView, StridedViewMut, ViewError};

use crate::config::RearrangeConfig;
use crate::descriptor::BlockDescriptor;
use crate::error::KernelResult;
use crate::reconcile::{
    batch_as_space_blocks, batch_blocks, choose_path, merge_blocks, space_as_batch_blocks,
    space_blocks, CopyPath,
};
use crate::shape::{
    batch_to_space_output_shape, check_output, space_to_batch_output_shape, BATCH_TO_SPACE,
    SPACE_TO_BATCH,
};
use crate::strided_copy::{crop_copy, pad_copy};
use crate::tracing_support::record_rearrangement;

/// Rearrange `[B·b², H, W, C]` into `[B, H·b − bottom − top, W·b − left − right, C]`.
///
/// Batch entry `bh·b + bw` of image `n` becomes the spatial tile offset
/// `(bh, bw)` inside every `b × b` block; the descriptor amounts are then
/// cropped from the assembled extent.
///
/// Execution settings come from [`RearrangeConfig::from_env`].
///
/// # Errors
///
/// See [`batch_to_space_output_shape`]; additionally
/// [`KernelError::ShapePrecondition`](crate::KernelError::ShapePrecondition)
/// if `output` does not have the inferred shape.
///
/// # Examples
///
/// ```
/// use tessel_core::{StridedView, StridedViewMut};
/// use tessel_kernels::{batch_to_space, BlockDescriptor};
///
/// let data: Vec<i32> = (0..16).collect();
/// let input = StridedView::contiguous(&data, &[4, 2, 2, 1]).unwrap();
/// let mut out = vec![0; 16];
/// let mut output = StridedViewMut::contiguous(&mut out, &[1, 4, 4, 1]).unwrap();
///
/// batch_to_space(&input, &mut output, &BlockDescriptor::new(2)).unwrap();
/// assert_eq!(&out[..4], &[0, 4, 1, 5]);
/// ```
pub fn batch_to_space<T: Element>(
    input: &StridedView<'_, T>,
    output: &mut StridedViewMut<'_, T>,
    desc: &BlockDescriptor,
) -> KernelResult<()> {
    batch_to_space_with_config(input, output, desc, &RearrangeConfig::from_env())
}

/// [`batch_to_space`] with explicit execution settings.
pub fn batch_to_space_with_config<T: Element>(
    input: &StridedView<'_, T>,
    output: &mut StridedViewMut<'_, T>,
    desc: &BlockDescriptor,
    config: &RearrangeConfig,
) -> KernelResult<()> {
    let expected = batch_to_space_output_shape(input.shape(), desc)?;
    check_output(BATCH_TO_SPACE, output.shape(), &expected)?;

    let block = desc.block_size;
    let source = StridedView::new(
        input.buffer(),
        batch_as_space_blocks(input.layout(), block)?,
    )?;
    let merged = if desc.is_unbounded() {
        None
    } else {
        merge_blocks(source.layout())?
    };
    let path = choose_path(desc.is_unbounded(), merged.as_ref());

    match (path, merged) {
        (CopyPath::FastAssign, _) => {
            let target = space_blocks(output.layout(), block)?;
            StridedViewMut::new(output.buffer_mut(), target)?.assign(&source)?;
        }
        (CopyPath::KernelDirect, Some(merged)) => {
            let merged = StridedView::new(input.buffer(), merged)?;
            crop_copy(
                &merged,
                output,
                desc.bottom,
                desc.top,
                desc.left,
                desc.right,
                config,
            )?;
        }
        _ => {
            let s = source.shape();
            let space_shape = [s[0], s[1] * s[2], s[3] * s[4], s[5]];
            let mut staging = vec![T::zero(); source.len()];
            StridedViewMut::contiguous(&mut staging, s)?.assign(&source)?;

            let staged = StridedView::contiguous(&staging, &space_shape)?;
            crop_copy(
                &staged,
                output,
                desc.bottom,
                desc.top,
                desc.left,
                desc.right,
                config,
            )?;
        }
    }

    record_rearrangement(BATCH_TO_SPACE, path.as_str(), output.len());
    Ok(())
}

/// Rearrange `[B, H, W, C]` into
/// `[B·b², (H + bottom + top) / b, (W + left + right) / b, C]`.
///
/// The input is zero-padded by the descriptor amounts, cut into `b × b`
/// tiles, and tile offset `(bh, bw)` is moved to batch entry
/// `(bh·b + bw)·B + n`. Padding positions receive `T::zero()` and never read
/// input memory.
///
/// Execution settings come from [`RearrangeConfig::from_env`].
///
/// # Errors
///
/// See [`space_to_batch_output_shape`]; additionally
/// [`KernelError::ShapePrecondition`](crate::KernelError::ShapePrecondition)
/// if `output` does not have the inferred shape.
///
/// # Examples
///
/// ```
/// use tessel_core::{StridedView, StridedViewMut};
/// use tessel_kernels::{space_to_batch, BlockDescriptor};
///
/// let data: Vec<u8> = (1..=4).collect();
/// let input = StridedView::contiguous(&data, &[1, 2, 2, 1]).unwrap();
/// let mut out = vec![0u8; 16];
/// let mut output = StridedViewMut::contiguous(&mut out, &[4, 2, 2, 1]).unwrap();
///
/// let desc = BlockDescriptor::new(2).with_uniform(1);
/// space_to_batch(&input, &mut output, &desc).unwrap();
/// // Batch entry 3 holds the odd rows and columns of the padded image
/// assert_eq!(&out[12..], &[1, 0, 0, 0]);
/// assert_eq!(&out[..4], &[0, 0, 0, 4]);
/// ```
pub fn space_to_batch<T: Element>(
    input: &StridedView<'_, T>,
    output: &mut StridedViewMut<'_, T>,
    desc: &BlockDescriptor,
) -> KernelResult<()> {
    space_to_batch_with_config(input, output, desc, &RearrangeConfig::from_env())
}

/// [`space_to_batch`] with explicit execution settings.
pub fn space_to_batch_with_config<T: Element>(
    input: &StridedView<'_, T>,
    output: &mut StridedViewMut<'_, T>,
    desc: &BlockDescriptor,
    config: &RearrangeConfig,
) -> KernelResult<()> {
    let expected = space_to_batch_output_shape(input.shape(), desc)?;
    check_output(SPACE_TO_BATCH, output.shape(), &expected)?;

    let block = desc.block_size;
    let target = batch_blocks(output.layout(), block)?;
    let merged = if desc.is_unbounded() {
        None
    } else {
        merge_blocks(&batch_as_space_blocks(output.layout(), block)?)?
    };
    let path = choose_path(desc.is_unbounded(), merged.as_ref());

    match (path, merged) {
        (CopyPath::FastAssign, _) => {
            let source = StridedView::new(
                input.buffer(),
                space_as_batch_blocks(input.layout(), block)?,
            )?;
            StridedViewMut::new(output.buffer_mut(), target)?.assign(&source)?;
        }
        (CopyPath::KernelDirect, Some(merged)) => {
            let mut merged = StridedViewMut::new(output.buffer_mut(), merged)?;
            pad_copy(
                input,
                &mut merged,
                desc.bottom,
                desc.top,
                desc.left,
                desc.right,
                config,
            )?;
        }
        _ => {
            let t = target.shape();
            let space_shape = [t[2], t[3] * block, t[4] * block, t[5]];
            let mut staging = vec![T::zero(); output.len()];
            pad_copy(
                input,
                &mut StridedViewMut::contiguous(&mut staging, &space_shape)?,
                desc.bottom,
                desc.top,
                desc.left,
                desc.right,
                config,
            )?;

            let staged = Layout::contiguous(&space_shape, Order::RowMajor);
            let source = StridedView::new(&staging, space_as_batch_blocks(&staged, block)?)?;
            StridedViewMut::new(output.buffer_mut(), target)?.assign(&source)?;
        }
    }

    record_rearrangement(SPACE_TO_BATCH, path.as_str(), output.len());
    Ok(())
}

/// Allocating form of [`batch_to_space`] for owned tensors.
///
/// Inputs whose storage is not one memory block (stepped slices, negative
/// strides) are packed into a contiguous copy first.
///
/// # Examples
///
/// ```
/// use tessel_core::DenseND;
/// use tessel_kernels::{batch_to_space_dense, BlockDescriptor};
///
/// let input = DenseND::from_vec((0..16).collect::<Vec<i64>>(), &[4, 2, 2, 1]).unwrap();
/// let output = batch_to_space_dense(&input, &BlockDescriptor::new(2)).unwrap();
/// assert_eq!(output.shape(), &[1, 4, 4, 1]);
/// ```
pub fn batch_to_space_dense<T: Element>(
    input: &DenseND<T>,
    desc: &BlockDescriptor,
) -> KernelResult<DenseND<T>> {
    let shape = batch_to_space_output_shape(input.shape(), desc)?;
    let mut output = DenseND::zeros(&shape);
    with_input_view(input, |view| {
        batch_to_space(view, &mut output.strided_view_mut()?, desc)
    })?;
    Ok(output)
}

/// Allocating form of [`space_to_batch`] for owned tensors.
///
/// Storage that cannot be viewed in place is handled as in
/// [`batch_to_space_dense`].
pub fn space_to_batch_dense<T: Element>(
    input: &DenseND<T>,
    desc: &BlockDescriptor,
) -> KernelResult<DenseND<T>> {
    let shape = space_to_batch_output_shape(input.shape(), desc)?;
    let mut output = DenseND::zeros(&shape);
    with_input_view(input, |view| {
        space_to_batch(view, &mut output.strided_view_mut()?, desc)
    })?;
    Ok(output)
}

/// Run `f` on a strided view of `input`, packing it into a contiguous copy
/// first when its storage cannot be viewed in place.
fn with_input_view<T, F>(input: &DenseND<T>, f: F) -> KernelResult<()>
where
    T: Element,
    F: FnOnce(&StridedView<'_, T>) -> KernelResult<()>,
{
    match input.strided_view() {
        Ok(view) => f(&view),
        Err(ViewError::UnsupportedStorage { .. }) => {
            let packed = input.to_contiguous();
            f(&packed.strided_view()?)
        }
        Err(err) => Err(err.into()),
    }
}
