//! Shape manipulation on owned tensors: permute and packing

use super::types::DenseND;
use crate::layout::validate_permutation;
use scirs2_core::ndarray_ext::IxDyn;
use scirs2_core::numeric::Num;

impl<T> DenseND<T>
where
    T: Clone + Num,
{
    /// Permute the axes of the tensor without moving data.
    ///
    /// # Errors
    ///
    /// Returns an error if `axes` is not a valid permutation.
    ///
    /// # Examples
    ///
    /// ```
    /// use tessel_core::DenseND;
    ///
    /// let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
    /// let permuted = tensor.permute(&[2, 0, 1]).unwrap();
    /// assert_eq!(permuted.shape(), &[4, 2, 3]);
    /// ```
    pub fn permute(&self, axes: &[usize]) -> anyhow::Result<Self> {
        validate_permutation(axes, self.rank())?;
        let permuted = self.data.clone().permuted_axes(IxDyn(axes));
        Ok(Self { data: permuted })
    }

    /// Copy into a C-contiguous tensor with the same logical content.
    pub fn to_contiguous(&self) -> Self {
        if self.is_contiguous() {
            return self.clone();
        }
        Self {
            data: self.data.as_standard_layout().into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permute_reorders_logical_traversal() {
        let tensor = DenseND::from_vec((0..6).collect::<Vec<i32>>(), &[2, 3]).unwrap();
        let t = tensor.permute(&[1, 0]).unwrap();
        assert_eq!(t.shape(), &[3, 2]);
        assert_eq!(t.to_vec(), vec![0, 3, 1, 4, 2, 5]);
    }

    #[test]
    fn test_permute_invalid() {
        let tensor = DenseND::<f32>::zeros(&[2, 3]);
        assert!(tensor.permute(&[0, 0]).is_err());
        assert!(tensor.permute(&[0]).is_err());
    }

    #[test]
    fn test_to_contiguous() {
        let tensor = DenseND::from_vec((0..6).collect::<Vec<i32>>(), &[2, 3]).unwrap();
        let t = tensor.permute(&[1, 0]).unwrap().to_contiguous();
        assert!(t.is_contiguous());
        assert_eq!(t.to_vec(), vec![0, 3, 1, 4, 2, 5]);
    }
}
