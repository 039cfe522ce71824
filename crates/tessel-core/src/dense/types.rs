//! Dense tensor type definition and basic operations
//!
//! This module defines the core `DenseND<T>` type and provides basic creation
//! and accessor methods. Shape manipulation and strided views are organized in
//! separate modules.

use scirs2_core::ndarray_ext::{Array, IxDyn};
use scirs2_core::numeric::Num;

/// Dense N-dimensional tensor backed by scirs2_core's ndarray
///
/// This is the owned tensor type in Tessel. The rearrangement kernels never
/// touch it directly; they work through [`StridedView`](crate::StridedView)
/// lenses obtained from [`DenseND::strided_view`] and
/// [`DenseND::strided_view_mut`].
///
/// # Type Parameters
///
/// * `T` - The element type (one of the [`Element`](crate::Element) types for kernel use)
///
/// # Memory Layout
///
/// Tensors are created C-contiguous (row-major). [`permute`](DenseND::permute)
/// keeps the buffer and reorders strides, so a tensor may carry a
/// non-row-major layout.
///
/// # Examples
///
/// ```
/// use tessel_core::DenseND;
///
/// let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
/// assert_eq!(tensor.shape(), &[2, 3, 4]);
/// assert_eq!(tensor.rank(), 3);
/// ```
#[derive(Clone)]
pub struct DenseND<T> {
    /// Underlying ndarray storage (via scirs2_core)
    pub(crate) data: Array<T, IxDyn>,
}

impl<T> DenseND<T>
where
    T: Clone + Num,
{
    /// Wrap an existing ndarray, keeping its strides.
    ///
    /// Sliced or stepped arrays may not be viewable in place; see
    /// [`DenseND::strided_view`].
    pub fn from_array(array: Array<T, IxDyn>) -> Self {
        Self { data: array }
    }

    /// Create a tensor from a vector with given shape
    ///
    /// # Arguments
    ///
    /// * `vec` - Flattened data in row-major order
    /// * `shape` - Target shape
    ///
    /// # Examples
    ///
    /// ```
    /// use tessel_core::DenseND;
    ///
    /// let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    /// let tensor = DenseND::from_vec(data, &[2, 3]).unwrap();
    /// assert_eq!(tensor.shape(), &[2, 3]);
    /// ```
    pub fn from_vec(vec: Vec<T>, shape: &[usize]) -> anyhow::Result<Self> {
        let total: usize = shape.iter().product();
        if vec.len() != total {
            anyhow::bail!(
                "Shape {:?} requires {} elements, but got {}",
                shape,
                total,
                vec.len()
            );
        }
        let array = Array::from_shape_vec(IxDyn(shape), vec)?;
        Ok(Self { data: array })
    }

    /// Get the rank (number of dimensions) of this tensor
    pub fn rank(&self) -> usize {
        self.data.ndim()
    }

    /// Get the shape of this tensor
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Get the total number of elements
    ///
    /// # Examples
    ///
    /// ```
    /// use tessel_core::DenseND;
    ///
    /// let tensor = DenseND::<f32>::zeros(&[2, 3, 4]);
    /// assert_eq!(tensor.len(), 24);
    /// ```
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the tensor is empty (has zero elements)
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check if the tensor is C-contiguous in memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use tessel_core::DenseND;
    ///
    /// let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
    /// assert!(tensor.is_contiguous());
    ///
    /// let permuted = tensor.permute(&[2, 0, 1]).unwrap();
    /// assert!(!permuted.is_contiguous());
    /// ```
    pub fn is_contiguous(&self) -> bool {
        self.data.is_standard_layout()
    }

    /// Create a tensor of zeros
    ///
    /// # Examples
    ///
    /// ```
    /// use tessel_core::DenseND;
    ///
    /// let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
    /// assert_eq!(tensor.get(&[0, 0, 0]), Some(&0.0));
    /// ```
    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            data: Array::zeros(IxDyn(shape)),
        }
    }

    /// Element at `index`, `None` when out of range.
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        self.data.get(IxDyn(index))
    }

    /// Convert the tensor to a flat vector in logical row-major order
    ///
    /// # Examples
    ///
    /// ```
    /// use tessel_core::DenseND;
    ///
    /// let tensor = DenseND::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
    /// assert_eq!(tensor.to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
    /// ```
    pub fn to_vec(&self) -> Vec<T> {
        self.data.iter().cloned().collect()
    }

    /// Fill the tensor with values produced by a function of the index
    ///
    /// # Examples
    ///
    /// ```
    /// use tessel_core::DenseND;
    ///
    /// let mut tensor = DenseND::<f64>::zeros(&[2, 3]);
    /// tensor.fill_with(|idx| (idx[0] + idx[1]) as f64);
    /// assert_eq!(tensor.get(&[1, 2]), Some(&3.0));
    /// ```
    pub fn fill_with<F>(&mut self, mut f: F)
    where
        F: FnMut(&[usize]) -> T,
    {
        let shape = self.shape().to_vec();
        if self.is_empty() {
            return;
        }

        let mut indices = vec![0; shape.len()];
        for i in 0..self.len() {
            // Convert linear index to multi-dimensional index (row-major order)
            let mut remaining = i;
            for d in (0..shape.len()).rev() {
                indices[d] = remaining % shape[d];
                remaining /= shape[d];
            }
            self.data[&indices[..]] = f(&indices);
        }
    }

    /// Create a tensor whose elements are produced by a function of the index
    pub fn from_fn<F>(shape: &[usize], f: F) -> Self
    where
        F: FnMut(&[usize]) -> T,
    {
        let mut tensor = Self::zeros(shape);
        tensor.fill_with(f);
        tensor
    }
}
