//! Boundary-aware element copy over a 4-D index space
//!
//! Both kernels walk the *output* index space: every output element is
//! written exactly once and reads at most one input element. Offsets on
//! each side come from that view's own strides, so either view may be
//! permuted or otherwise non-contiguous.
//!
//! When the output is row-major contiguous and large enough, its flat slice
//! is split into disjoint chunks processed on the rayon pool. Other outputs
//! are written sequentially through their strides.

use tessel_core::{Element, StridedView, StridedViewMut};

use crate::config::RearrangeConfig;
use crate::error::{KernelError, KernelResult};
use crate::shape::SPATIAL_RANK;
use crate::utils::unravel4;
#[cfg(feature = "parallel")]
use crate::utils::chunk_len;

const CROP_COPY: &str = "crop_copy";
const PAD_COPY: &str = "pad_copy";

/// Copy the interior of `input` into `output`, dropping the given margins.
///
/// Output `(n, h, w, c)` receives input `(n, h + bottom, w + left, c)`.
/// `output` must have shape `[N, H − bottom − top, W − left − right, C]` for
/// an input of shape `[N, H, W, C]`. Margin elements of the input are never
/// read.
///
/// # Examples
///
/// ```
/// use tessel_core::{StridedView, StridedViewMut};
/// use tessel_kernels::{crop_copy, RearrangeConfig};
///
/// let data: Vec<i32> = (0..16).collect();
/// let input = StridedView::contiguous(&data, &[1, 4, 4, 1]).unwrap();
/// let mut out = vec![0; 4];
/// let mut output = StridedViewMut::contiguous(&mut out, &[1, 2, 2, 1]).unwrap();
///
/// crop_copy(&input, &mut output, 1, 1, 1, 1, &RearrangeConfig::default()).unwrap();
/// assert_eq!(out, vec![5, 6, 9, 10]);
/// ```
pub fn crop_copy<T: Element>(
    input: &StridedView<'_, T>,
    output: &mut StridedViewMut<'_, T>,
    bottom: usize,
    top: usize,
    left: usize,
    right: usize,
    config: &RearrangeConfig,
) -> KernelResult<()> {
    let in_shape = spatial_shape(CROP_COPY, "input", input.shape())?;
    let out_shape = spatial_shape(CROP_COPY, "output", output.shape())?;

    let height = in_shape[1].checked_sub(bottom.saturating_add(top));
    let width = in_shape[2].checked_sub(left.saturating_add(right));
    let expected = match (height, width) {
        (Some(h), Some(w)) => [in_shape[0], h, w, in_shape[3]],
        _ => {
            return Err(KernelError::shape_precondition(
                CROP_COPY,
                input.shape(),
                format!(
                    "crop ({}, {}, {}, {}) exceeds spatial extent",
                    bottom, top, left, right
                ),
            ))
        }
    };
    check_extent(CROP_COPY, &out_shape, &expected)?;

    let src = input.buffer();
    let layout = input.layout();
    fill_indexed(output, &out_shape, config, |[n, h, w, c]| {
        src[layout.offset_of(&[n, h + bottom, w + left, c])]
    });
    Ok(())
}

/// Copy `input` into the interior of `output`, zero-filling the margins.
///
/// Output `(n, h, w, c)` with `bottom ≤ h < H' − top` and
/// `left ≤ w < W' − right` receives input `(n, h − bottom, w − left, c)`;
/// every other output element receives `T::zero()`. `output` must have shape
/// `[N, H + bottom + top, W + left + right, C]` for an input of shape
/// `[N, H, W, C]`.
///
/// # Examples
///
/// ```
/// use tessel_core::{StridedView, StridedViewMut};
/// use tessel_kernels::{pad_copy, RearrangeConfig};
///
/// let data = vec![1.0f32, 2.0];
/// let input = StridedView::contiguous(&data, &[1, 1, 2, 1]).unwrap();
/// let mut out = vec![9.0f32; 8];
/// let mut output = StridedViewMut::contiguous(&mut out, &[1, 2, 4, 1]).unwrap();
///
/// pad_copy(&input, &mut output, 1, 0, 1, 1, &RearrangeConfig::default()).unwrap();
/// assert_eq!(out, vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 0.0]);
/// ```
pub fn pad_copy<T: Element>(
    input: &StridedView<'_, T>,
    output: &mut StridedViewMut<'_, T>,
    bottom: usize,
    top: usize,
    left: usize,
    right: usize,
    config: &RearrangeConfig,
) -> KernelResult<()> {
    let in_shape = spatial_shape(PAD_COPY, "input", input.shape())?;
    let out_shape = spatial_shape(PAD_COPY, "output", output.shape())?;

    let height = in_shape[1]
        .checked_add(bottom)
        .and_then(|n| n.checked_add(top));
    let width = in_shape[2]
        .checked_add(left)
        .and_then(|n| n.checked_add(right));
    let expected = match (height, width) {
        (Some(h), Some(w)) => [in_shape[0], h, w, in_shape[3]],
        _ => {
            return Err(KernelError::shape_precondition(
                PAD_COPY,
                input.shape(),
                "padded extent overflows",
            ))
        }
    };
    check_extent(PAD_COPY, &out_shape, &expected)?;

    let src = input.buffer();
    let layout = input.layout();
    let h_end = out_shape[1] - top;
    let w_end = out_shape[2] - right;
    fill_indexed(output, &out_shape, config, |[n, h, w, c]| {
        if h >= bottom && h < h_end && w >= left && w < w_end {
            src[layout.offset_of(&[n, h - bottom, w - left, c])]
        } else {
            T::zero()
        }
    });
    Ok(())
}

fn spatial_shape(operation: &str, parameter: &str, shape: &[usize]) -> KernelResult<[usize; 4]> {
    match *shape {
        [n, h, w, c] => Ok([n, h, w, c]),
        _ => Err(KernelError::rank_mismatch(
            operation,
            parameter,
            SPATIAL_RANK,
            shape.len(),
        )),
    }
}

fn check_extent(operation: &str, actual: &[usize; 4], expected: &[usize; 4]) -> KernelResult<()> {
    if actual != expected {
        return Err(KernelError::shape_precondition(
            operation,
            actual,
            format!("output shape must be {:?}", expected),
        ));
    }
    Ok(())
}

/// Write `value_at(n, h, w, c)` into every element of `output`.
fn fill_indexed<T, F>(
    output: &mut StridedViewMut<'_, T>,
    shape: &[usize; 4],
    config: &RearrangeConfig,
    value_at: F,
) where
    T: Element,
    F: Fn([usize; 4]) -> T + Sync,
{
    if output.is_empty() {
        return;
    }

    if let Some(slice) = output.as_contiguous_slice_mut() {
        write_slice(slice, shape, config, &value_at);
        return;
    }

    let layout = output.layout().clone();
    let buffer = output.buffer_mut();
    for (flat, offset) in layout.offsets().enumerate() {
        buffer[offset] = value_at(unravel4(flat, shape));
    }
}

#[cfg(feature = "parallel")]
fn write_slice<T, F>(slice: &mut [T], shape: &[usize; 4], config: &RearrangeConfig, value_at: &F)
where
    T: Element,
    F: Fn([usize; 4]) -> T + Sync,
{
    use rayon::prelude::*;

    if !config.use_parallel(slice.len()) {
        write_range(slice, 0, shape, value_at);
        return;
    }

    let chunk = chunk_len(slice.len(), config);
    slice
        .par_chunks_mut(chunk)
        .enumerate()
        .for_each(|(i, part)| write_range(part, i * chunk, shape, value_at));
}

#[cfg(not(feature = "parallel"))]
fn write_slice<T, F>(slice: &mut [T], shape: &[usize; 4], _config: &RearrangeConfig, value_at: &F)
where
    T: Element,
    F: Fn([usize; 4]) -> T + Sync,
{
    write_range(slice, 0, shape, value_at);
}

#[inline]
fn write_range<T, F>(part: &mut [T], base: usize, shape: &[usize; 4], value_at: &F)
where
    F: Fn([usize; 4]) -> T,
{
    for (k, slot) in part.iter_mut().enumerate() {
        *slot = value_at(unravel4(base + k, shape));
    }
}
