//! Closed registry of supported element types
//!
//! Kernels are generic over [`Element`], which is implemented for exactly the
//! numeric types listed in [`DType`]. Code that only learns the element type
//! at runtime holds a [`DynTensor`] and resolves it with a single `match`.
//!
//! # Examples
//!
//! ```
//! use tessel_core::{DType, DenseND, DynTensor, Element};
//!
//! assert_eq!(<f32 as Element>::DTYPE, DType::F32);
//!
//! let tensor: DynTensor = DenseND::<i16>::zeros(&[1, 2, 2, 1]).into();
//! assert_eq!(tensor.dtype(), DType::I16);
//! assert_eq!(tensor.shape(), &[1, 2, 2, 1]);
//! ```

use std::fmt;

use scirs2_core::numeric::Num;

use crate::dense::DenseND;

/// Runtime tag of a supported element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DType {
    F32,
    F64,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
}

impl DType {
    /// Every supported type, in declaration order.
    pub const ALL: [DType; 10] = [
        DType::F32,
        DType::F64,
        DType::I8,
        DType::I16,
        DType::I32,
        DType::I64,
        DType::U8,
        DType::U16,
        DType::U32,
        DType::U64,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DType::F32 => "f32",
            DType::F64 => "f64",
            DType::I8 => "i8",
            DType::I16 => "i16",
            DType::I32 => "i32",
            DType::I64 => "i64",
            DType::U8 => "u8",
            DType::U16 => "u16",
            DType::U32 => "u32",
            DType::U64 => "u64",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Element types the rearrangement kernels are instantiated for.
///
/// `T::zero()` (from [`Num`]) is the padding value.
pub trait Element: Copy + Num + fmt::Debug + Send + Sync + 'static {
    const DTYPE: DType;
}

/// Owned tensor whose element type is known only at runtime.
#[derive(Clone, Debug, PartialEq)]
pub enum DynTensor {
    F32(DenseND<f32>),
    F64(DenseND<f64>),
    I8(DenseND<i8>),
    I16(DenseND<i16>),
    I32(DenseND<i32>),
    I64(DenseND<i64>),
    U8(DenseND<u8>),
    U16(DenseND<u16>),
    U32(DenseND<u32>),
    U64(DenseND<u64>),
}

macro_rules! register_elements {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const DTYPE: DType = DType::$variant;
            }

            impl From<DenseND<$ty>> for DynTensor {
                fn from(tensor: DenseND<$ty>) -> Self {
                    DynTensor::$variant(tensor)
                }
            }
        )*

        impl DynTensor {
            /// Runtime element type.
            pub fn dtype(&self) -> DType {
                match self {
                    $(DynTensor::$variant(_) => DType::$variant,)*
                }
            }

            pub fn shape(&self) -> &[usize] {
                match self {
                    $(DynTensor::$variant(t) => t.shape(),)*
                }
            }

            pub fn len(&self) -> usize {
                match self {
                    $(DynTensor::$variant(t) => t.len(),)*
                }
            }

            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            /// Zero-filled tensor of the given type and shape.
            pub fn zeros(dtype: DType, shape: &[usize]) -> Self {
                match dtype {
                    $(DType::$variant => DynTensor::$variant(DenseND::<$ty>::zeros(shape)),)*
                }
            }
        }
    };
}

register_elements! {
    f32 => F32,
    f64 => F64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
}
