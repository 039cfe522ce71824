//! Strided lenses over owned tensors
//!
//! Bridges [`DenseND`] storage to the [`StridedView`] abstraction used by the
//! kernels. The view reflects the tensor's actual strides, so a permuted
//! tensor is seen through its permuted layout without a copy.

use super::types::DenseND;
use crate::error::{ViewError, ViewResult};
use crate::layout::{Layout, Order};
use crate::types::Strides;
use crate::view::{StridedView, StridedViewMut};
use scirs2_core::numeric::Num;

fn unsupported(reason: &str) -> ViewError {
    ViewError::UnsupportedStorage {
        reason: reason.to_string(),
    }
}

impl<T> DenseND<T>
where
    T: Clone + Num,
{
    /// Strided layout of this tensor's storage.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::UnsupportedStorage`] for negative strides.
    pub fn layout(&self) -> ViewResult<Layout> {
        let strides = self
            .data
            .strides()
            .iter()
            .map(|&s| usize::try_from(s).map_err(|_| unsupported("negative stride")))
            .collect::<ViewResult<Strides>>()?;
        let order = if self.data.is_standard_layout() {
            Order::RowMajor
        } else if self.data.t().is_standard_layout() {
            Order::ColumnMajor
        } else {
            Order::RowMajor
        };
        Layout::from_parts(self.shape(), &strides, 0, order)
    }

    /// Read-only strided view over the tensor's memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use tessel_core::DenseND;
    ///
    /// let tensor = DenseND::from_vec((0..6).collect::<Vec<i32>>(), &[2, 3]).unwrap();
    /// let transposed = tensor.permute(&[1, 0]).unwrap();
    /// let view = transposed.strided_view().unwrap();
    /// assert_eq!(view.strides(), &[1, 3]);
    /// assert_eq!(view.get(&[2, 1]), Some(&5));
    /// ```
    pub fn strided_view(&self) -> ViewResult<StridedView<'_, T>> {
        let layout = self.layout()?;
        let data = self
            .data
            .as_slice_memory_order()
            .ok_or_else(|| unsupported("elements are not stored in one block"))?;
        StridedView::new(data, layout)
    }

    /// Mutable strided view over the tensor's memory.
    pub fn strided_view_mut(&mut self) -> ViewResult<StridedViewMut<'_, T>> {
        let layout = self.layout()?;
        let data = self
            .data
            .as_slice_memory_order_mut()
            .ok_or_else(|| unsupported("elements are not stored in one block"))?;
        StridedViewMut::new(data, layout)
    }
}
