//! Runtime element-type dispatch over [`DynTensor`]
//!
//! The element type is resolved once, here, by a single `match` over the
//! closed registry; everything below runs monomorphized.

use tessel_core::DynTensor;

use crate::config::RearrangeConfig;
use crate::descriptor::BlockDescriptor;
use crate::error::{KernelError, KernelResult};
use crate::shape::{BATCH_TO_SPACE, SPACE_TO_BATCH};
use crate::space_batch::{
    batch_to_space_dense, batch_to_space_with_config, space_to_batch_dense,
    space_to_batch_with_config,
};

macro_rules! dispatch_one {
    ($input:expr, |$t:ident| $body:expr) => {
        match $input {
            DynTensor::F32($t) => $body.map(DynTensor::from),
            DynTensor::F64($t) => $body.map(DynTensor::from),
            DynTensor::I8($t) => $body.map(DynTensor::from),
            DynTensor::I16($t) => $body.map(DynTensor::from),
            DynTensor::I32($t) => $body.map(DynTensor::from),
            DynTensor::I64($t) => $body.map(DynTensor::from),
            DynTensor::U8($t) => $body.map(DynTensor::from),
            DynTensor::U16($t) => $body.map(DynTensor::from),
            DynTensor::U32($t) => $body.map(DynTensor::from),
            DynTensor::U64($t) => $body.map(DynTensor::from),
        }
    };
}

macro_rules! dispatch_pair {
    ($op:expr, $input:expr, $output:expr, |$i:ident, $o:ident| $body:expr) => {
        match ($input, $output) {
            (DynTensor::F32($i), DynTensor::F32($o)) => $body,
            (DynTensor::F64($i), DynTensor::F64($o)) => $body,
            (DynTensor::I8($i), DynTensor::I8($o)) => $body,
            (DynTensor::I16($i), DynTensor::I16($o)) => $body,
            (DynTensor::I32($i), DynTensor::I32($o)) => $body,
            (DynTensor::I64($i), DynTensor::I64($o)) => $body,
            (DynTensor::U8($i), DynTensor::U8($o)) => $body,
            (DynTensor::U16($i), DynTensor::U16($o)) => $body,
            (DynTensor::U32($i), DynTensor::U32($o)) => $body,
            (DynTensor::U64($i), DynTensor::U64($o)) => $body,
            (i, o) => Err(KernelError::dtype_mismatch($op, i.dtype(), o.dtype())),
        }
    };
}

/// Batch-to-space on a tensor whose element type is known only at runtime.
///
/// # Examples
///
/// ```
/// use tessel_core::{DType, DenseND, DynTensor};
/// use tessel_kernels::{batch_to_space_dyn, BlockDescriptor};
///
/// let input: DynTensor = DenseND::<u16>::zeros(&[8, 1, 1, 3]).into();
/// let output = batch_to_space_dyn(&input, &BlockDescriptor::new(2)).unwrap();
/// assert_eq!(output.dtype(), DType::U16);
/// assert_eq!(output.shape(), &[2, 2, 2, 3]);
/// ```
pub fn batch_to_space_dyn(input: &DynTensor, desc: &BlockDescriptor) -> KernelResult<DynTensor> {
    dispatch_one!(input, |t| batch_to_space_dense(t, desc))
}

/// Space-to-batch on a tensor whose element type is known only at runtime.
pub fn space_to_batch_dyn(input: &DynTensor, desc: &BlockDescriptor) -> KernelResult<DynTensor> {
    dispatch_one!(input, |t| space_to_batch_dense(t, desc))
}

/// Batch-to-space into a caller-allocated tensor.
///
/// # Errors
///
/// [`KernelError::DTypeMismatch`] if `input` and `output` hold different
/// element types, plus everything [`batch_to_space`](crate::batch_to_space)
/// reports.
pub fn batch_to_space_dyn_into(
    input: &DynTensor,
    output: &mut DynTensor,
    desc: &BlockDescriptor,
    config: &RearrangeConfig,
) -> KernelResult<()> {
    dispatch_pair!(BATCH_TO_SPACE, input, output, |i, o| {
        batch_to_space_with_config(&i.strided_view()?, &mut o.strided_view_mut()?, desc, config)
    })
}

/// Space-to-batch into a caller-allocated tensor.
///
/// # Errors
///
/// [`KernelError::DTypeMismatch`] if `input` and `output` hold different
/// element types, plus everything [`space_to_batch`](crate::space_to_batch)
/// reports.
pub fn space_to_batch_dyn_into(
    input: &DynTensor,
    output: &mut DynTensor,
    desc: &BlockDescriptor,
    config: &RearrangeConfig,
) -> KernelResult<()> {
    dispatch_pair!(SPACE_TO_BATCH, input, output, |i, o| {
        space_to_batch_with_config(&i.strided_view()?, &mut o.strided_view_mut()?, desc, config)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_core::{DType, DenseND};

    #[test]
    fn test_dyn_preserves_dtype() {
        for dtype in DType::ALL {
            let input = DynTensor::zeros(dtype, &[1, 4, 4, 2]);
            let batch = space_to_batch_dyn(&input, &BlockDescriptor::new(2)).unwrap();
            assert_eq!(batch.dtype(), dtype);
            assert_eq!(batch.shape(), &[4, 2, 2, 2]);

            let back = batch_to_space_dyn(&batch, &BlockDescriptor::new(2)).unwrap();
            assert_eq!(back, input);
        }
    }

    #[test]
    fn test_dyn_into_values() {
        let input: DynTensor =
            DenseND::from_vec((0..16).map(|x| x as f64).collect(), &[4, 2, 2, 1])
                .unwrap()
                .into();
        let mut output = DynTensor::zeros(DType::F64, &[1, 4, 4, 1]);
        batch_to_space_dyn_into(
            &input,
            &mut output,
            &BlockDescriptor::new(2),
            &RearrangeConfig::default(),
        )
        .unwrap();

        match output {
            DynTensor::F64(t) => assert_eq!(&t.to_vec()[..4], &[0.0, 4.0, 1.0, 5.0]),
            other => panic!("unexpected dtype {}", other.dtype()),
        }
    }

    #[test]
    fn test_dyn_into_dtype_mismatch() {
        let input = DynTensor::zeros(DType::I32, &[1, 2, 2, 1]);
        let mut output = DynTensor::zeros(DType::I64, &[4, 1, 1, 1]);
        let err = space_to_batch_dyn_into(
            &input,
            &mut output,
            &BlockDescriptor::new(2),
            &RearrangeConfig::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            KernelError::dtype_mismatch(SPACE_TO_BATCH, DType::I32, DType::I64)
        );
    }
}
