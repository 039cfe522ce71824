//! Borrowed strided views over tensor memory.
//!
//! [`StridedView`] and [`StridedViewMut`] pair a [`Layout`] with a borrowed
//! slice. They never own the buffer; the lifetime `'a` ties them to whoever
//! does. Reshape and permute return new views over the same memory, nothing
//! is copied unless a method says so (`to_vec`).
//!
//! # Examples
//!
//! ```
//! use tessel_core::StridedView;
//!
//! let data: Vec<i32> = (0..6).collect();
//! let view = StridedView::contiguous(&data, &[2, 3]).unwrap();
//! let t = view.permute(&[1, 0]).unwrap();
//! assert_eq!(t.shape(), &[3, 2]);
//! assert_eq!(t.to_vec(), vec![0, 3, 1, 4, 2, 5]);
//! ```

use crate::error::{ViewError, ViewResult};
use crate::layout::{Layout, Order};

fn check_bounds(layout: &Layout, len: usize) -> ViewResult<()> {
    match layout.max_offset() {
        Some(max_offset) if max_offset >= len => Err(ViewError::OutOfBounds { max_offset, len }),
        _ => Ok(()),
    }
}

fn contiguous_layout(len: usize, shape: &[usize]) -> ViewResult<Layout> {
    let expected: usize = shape.iter().product();
    if expected != len {
        return Err(ViewError::ElementCountMismatch {
            expected,
            actual: len,
        });
    }
    Ok(Layout::contiguous(shape, Order::RowMajor))
}

/// Read-only strided lens over a borrowed buffer.
#[derive(Debug, Clone)]
pub struct StridedView<'a, T> {
    layout: Layout,
    data: &'a [T],
}

impl<'a, T> StridedView<'a, T> {
    /// Create a view, checking that every reachable offset lies in `data`.
    pub fn new(data: &'a [T], layout: Layout) -> ViewResult<Self> {
        check_bounds(&layout, data.len())?;
        Ok(Self { layout, data })
    }

    /// Row-major view of the whole slice with the given shape.
    pub fn contiguous(data: &'a [T], shape: &[usize]) -> ViewResult<Self> {
        let layout = contiguous_layout(data.len(), shape)?;
        Ok(Self { layout, data })
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    pub fn strides(&self) -> &[usize] {
        self.layout.strides()
    }

    pub fn rank(&self) -> usize {
        self.layout.rank()
    }

    pub fn len(&self) -> usize {
        self.layout.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    /// The underlying buffer, addressed by flat offset.
    pub fn buffer(&self) -> &'a [T] {
        self.data
    }

    /// Element at a logical index, `None` when out of range.
    pub fn get(&self, index: &[usize]) -> Option<&'a T> {
        let offset = self.layout.checked_offset_of(index).ok()?;
        self.data.get(offset)
    }

    /// Element at a flat buffer offset.
    pub fn read(&self, offset: usize) -> Option<&'a T> {
        self.data.get(offset)
    }

    /// View with axes reordered, see [`Layout::permute`].
    pub fn permute(&self, axes: &[usize]) -> ViewResult<Self> {
        Ok(Self {
            layout: self.layout.permute(axes)?,
            data: self.data,
        })
    }

    /// View under a new shape, `Ok(None)` if not expressible without a copy.
    pub fn reshape(&self, new_shape: &[usize]) -> ViewResult<Option<Self>> {
        Ok(self.layout.reshape(new_shape)?.map(|layout| Self {
            layout,
            data: self.data,
        }))
    }

    /// The viewed elements as one slice, if they are row-major contiguous.
    pub fn as_contiguous_slice(&self) -> Option<&'a [T]> {
        if !self.layout.is_contiguous() {
            return None;
        }
        let start = self.layout.offset();
        self.data.get(start..start + self.layout.len())
    }
}

impl<T: Copy> StridedView<'_, T> {
    /// Copy the elements out in logical row-major order.
    pub fn to_vec(&self) -> Vec<T> {
        if let Some(slice) = self.as_contiguous_slice() {
            return slice.to_vec();
        }
        self.layout.offsets().map(|off| self.data[off]).collect()
    }
}

/// Mutable strided lens over a borrowed buffer.
///
/// Distinct logical indices are expected to address distinct offsets; a
/// layout with zero strides on a non-unit axis would alias writes.
#[derive(Debug)]
pub struct StridedViewMut<'a, T> {
    layout: Layout,
    data: &'a mut [T],
}

impl<'a, T> StridedViewMut<'a, T> {
    /// Create a mutable view, checking that every reachable offset lies in `data`.
    pub fn new(data: &'a mut [T], layout: Layout) -> ViewResult<Self> {
        check_bounds(&layout, data.len())?;
        Ok(Self { layout, data })
    }

    /// Row-major mutable view of the whole slice with the given shape.
    pub fn contiguous(data: &'a mut [T], shape: &[usize]) -> ViewResult<Self> {
        let layout = contiguous_layout(data.len(), shape)?;
        Ok(Self { layout, data })
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    pub fn strides(&self) -> &[usize] {
        self.layout.strides()
    }

    pub fn rank(&self) -> usize {
        self.layout.rank()
    }

    pub fn len(&self) -> usize {
        self.layout.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    /// Read-only view of the same elements.
    pub fn as_view(&self) -> StridedView<'_, T> {
        StridedView {
            layout: self.layout.clone(),
            data: &*self.data,
        }
    }

    /// Shorter-lived mutable view of the same elements.
    pub fn reborrow(&mut self) -> StridedViewMut<'_, T> {
        StridedViewMut {
            layout: self.layout.clone(),
            data: &mut *self.data,
        }
    }

    /// Underlying buffer, addressed by flat offset.
    pub fn buffer_mut(&mut self) -> &mut [T] {
        &mut *self.data
    }

    pub fn get(&self, index: &[usize]) -> Option<&T> {
        let offset = self.layout.checked_offset_of(index).ok()?;
        self.data.get(offset)
    }

    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut T> {
        let offset = self.layout.checked_offset_of(index).ok()?;
        self.data.get_mut(offset)
    }

    /// Write `value` at a logical index.
    pub fn set(&mut self, index: &[usize], value: T) -> ViewResult<()> {
        let offset = self.layout.checked_offset_of(index)?;
        self.data[offset] = value;
        Ok(())
    }

    /// Write `value` at a flat buffer offset.
    pub fn write(&mut self, offset: usize, value: T) -> ViewResult<()> {
        let len = self.data.len();
        let slot = self.data.get_mut(offset).ok_or(ViewError::OutOfBounds {
            max_offset: offset,
            len,
        })?;
        *slot = value;
        Ok(())
    }

    /// Mutable view with axes reordered.
    pub fn permuted(&mut self, axes: &[usize]) -> ViewResult<StridedViewMut<'_, T>> {
        let layout = self.layout.permute(axes)?;
        Ok(StridedViewMut {
            layout,
            data: &mut *self.data,
        })
    }

    /// Mutable view under a new shape, `Ok(None)` if not expressible without a copy.
    pub fn reshaped(&mut self, new_shape: &[usize]) -> ViewResult<Option<StridedViewMut<'_, T>>> {
        match self.layout.reshape(new_shape)? {
            Some(layout) => Ok(Some(StridedViewMut {
                layout,
                data: &mut *self.data,
            })),
            None => Ok(None),
        }
    }

    /// Consuming variant of [`permuted`](Self::permuted).
    pub fn into_permuted(self, axes: &[usize]) -> ViewResult<Self> {
        Ok(Self {
            layout: self.layout.permute(axes)?,
            data: self.data,
        })
    }

    /// Consuming variant of [`reshaped`](Self::reshaped); hands the view back
    /// unchanged when the reshape is not expressible.
    pub fn into_reshaped(self, new_shape: &[usize]) -> ViewResult<Result<Self, Self>> {
        match self.layout.reshape(new_shape)? {
            Some(layout) => Ok(Ok(Self {
                layout,
                data: self.data,
            })),
            None => Ok(Err(self)),
        }
    }

    /// The viewed elements as one mutable slice, if row-major contiguous.
    pub fn as_contiguous_slice_mut(&mut self) -> Option<&mut [T]> {
        if !self.layout.is_contiguous() {
            return None;
        }
        let start = self.layout.offset();
        let end = start + self.layout.len();
        self.data.get_mut(start..end)
    }
}

impl<T: Copy> StridedViewMut<'_, T> {
    /// Set every viewed element to `value`.
    pub fn fill(&mut self, value: T) {
        if let Some(slice) = self.as_contiguous_slice_mut() {
            slice.fill(value);
            return;
        }
        for off in self.layout.offsets() {
            self.data[off] = value;
        }
    }

    /// Copy every element of `src` into the same logical position of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::ShapeMismatch`] unless both views have the same shape.
    pub fn assign(&mut self, src: &StridedView<'_, T>) -> ViewResult<()> {
        if self.shape() != src.shape() {
            return Err(ViewError::ShapeMismatch {
                left: self.shape().to_vec(),
                right: src.shape().to_vec(),
            });
        }
        let src_data = src.buffer();
        match (self.layout.is_contiguous(), src.as_contiguous_slice()) {
            (true, Some(from)) => {
                let start = self.layout.offset();
                self.data[start..start + from.len()].copy_from_slice(from);
            }
            _ => {
                for (dst, from) in self.layout.offsets().zip(src.layout().offsets()) {
                    self.data[dst] = src_data[from];
                }
            }
        }
        Ok(())
    }
}
