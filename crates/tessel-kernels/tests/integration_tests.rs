//! Integration tests for tessel-kernels with tessel-core
//!
//! These tests drive the public entry points with DenseND tensors, strided
//! views and runtime-typed tensors from tessel-core.

use scirs2_core::ndarray_ext::{s, Array};
use tessel_core::{DType, DenseND, DynTensor, StridedView, StridedViewMut};
use tessel_kernels::{
    batch_to_space, batch_to_space_dense, batch_to_space_dyn, batch_to_space_dyn_into,
    batch_to_space_output_shape, batch_to_space_with_config, space_to_batch,
    space_to_batch_dense, space_to_batch_dyn, BlockDescriptor, KernelError, RearrangeConfig,
};

#[test]
fn test_batch_to_space_four_batches_into_one_image() {
    // [4, 2, 2, 1], block 2 -> [1, 4, 4, 1]
    let input = DenseND::<f32>::from_vec((0..16).map(|x| x as f32).collect(), &[4, 2, 2, 1])
        .unwrap();
    let output = batch_to_space_dense(&input, &BlockDescriptor::new(2)).unwrap();
    assert_eq!(output.shape(), &[1, 4, 4, 1]);

    for i in 0..4 {
        for j in 0..4 {
            let from = input.get(&[2 * (i % 2) + (j % 2), i / 2, j / 2, 0]).unwrap();
            assert_eq!(output.get(&[0, i, j, 0]), Some(from), "at ({}, {})", i, j);
        }
    }
}

#[test]
fn test_block_one_crop_keeps_interior() {
    // [1, 4, 4, 1] holding 0..15, block 1, crop 1 on every side
    let input = DenseND::from_vec((0..16).collect::<Vec<u8>>(), &[1, 4, 4, 1]).unwrap();
    let desc = BlockDescriptor::new(1).with_uniform(1);

    let output = batch_to_space_dense(&input, &desc).unwrap();
    assert_eq!(output.shape(), &[1, 2, 2, 1]);
    assert_eq!(output.to_vec(), vec![5, 6, 9, 10]);
}

#[test]
fn test_block_one_without_boundaries_is_identity() {
    let input = DenseND::from_vec((0..60).collect::<Vec<i32>>(), &[2, 3, 5, 2]).unwrap();
    let desc = BlockDescriptor::new(1);

    assert_eq!(batch_to_space_dense(&input, &desc).unwrap(), input);
    assert_eq!(space_to_batch_dense(&input, &desc).unwrap(), input);
}

#[test]
fn test_space_to_batch_then_back() {
    let input =
        DenseND::from_vec((0..2 * 6 * 4 * 3).map(|x| x as f64).collect(), &[2, 6, 4, 3]).unwrap();
    let desc = BlockDescriptor::new(2).with_height(1, 1).with_width(2, 2);

    let batch = space_to_batch_dense(&input, &desc).unwrap();
    assert_eq!(batch.shape(), &[8, 4, 4, 3]);

    let restored = batch_to_space_dense(&batch, &desc).unwrap();
    assert_eq!(restored, input);
}

#[test]
fn test_views_into_caller_buffers() {
    let data: Vec<i64> = (1..=36).collect();
    let input = StridedView::contiguous(&data, &[1, 6, 6, 1]).unwrap();
    let desc = BlockDescriptor::new(3);

    let mut batch = vec![0i64; 36];
    let mut batch_view = StridedViewMut::contiguous(&mut batch, &[9, 2, 2, 1]).unwrap();
    space_to_batch(&input, &mut batch_view, &desc).unwrap();

    // Batch entry 0 samples rows 0, 3 and columns 0, 3
    assert_eq!(&batch[..4], &[1, 4, 19, 22]);

    let mut back = vec![0i64; 36];
    let mut back_view = StridedViewMut::contiguous(&mut back, &[1, 6, 6, 1]).unwrap();
    batch_to_space(&StridedView::contiguous(&batch, &[9, 2, 2, 1]).unwrap(), &mut back_view, &desc)
        .unwrap();
    assert_eq!(back, data);
}

#[test]
fn test_permuted_output_view() {
    // Output buffer stored as [1, 4, 4, 1] with height and width swapped
    let input = DenseND::from_vec((0..16).collect::<Vec<i16>>(), &[4, 2, 2, 1]).unwrap();
    let desc = BlockDescriptor::new(2);
    let expected = batch_to_space_dense(&input, &desc).unwrap();

    let mut transposed = DenseND::<i16>::zeros(&[1, 4, 4, 1]);
    {
        let base = transposed.strided_view_mut().unwrap();
        let mut output = base.into_permuted(&[0, 2, 1, 3]).unwrap();
        batch_to_space(&input.strided_view().unwrap(), &mut output, &desc).unwrap();
    }
    let restored = transposed.permute(&[0, 2, 1, 3]).unwrap();
    assert_eq!(restored, expected);
}

#[test]
fn test_sequential_and_parallel_agree_on_large_input() {
    let shape = [2, 64, 64, 3];
    let len: usize = shape.iter().product();
    let input = DenseND::from_vec((0..len as u32).collect(), &shape).unwrap();
    let desc = BlockDescriptor::new(4).with_height(2, 2).with_width(1, 3);

    let batch = space_to_batch_dense(&input, &desc).unwrap();
    let out_shape = batch_to_space_output_shape(batch.shape(), &desc).unwrap();

    let mut seq = DenseND::<u32>::zeros(&out_shape);
    let mut par = DenseND::<u32>::zeros(&out_shape);
    batch_to_space_with_config(
        &batch.strided_view().unwrap(),
        &mut seq.strided_view_mut().unwrap(),
        &desc,
        &RearrangeConfig::sequential(),
    )
    .unwrap();
    batch_to_space_with_config(
        &batch.strided_view().unwrap(),
        &mut par.strided_view_mut().unwrap(),
        &desc,
        &RearrangeConfig::default().with_min_parallel_len(1),
    )
    .unwrap();

    assert_eq!(seq, par);
    assert_eq!(seq, input);
}

#[test]
fn test_dense_input_with_stepped_storage() {
    // Every other column of a [4, 2, 4, 1] buffer: strided, not one memory block
    let mut stepped = Array::from_shape_vec((4, 2, 4, 1), (0..32).collect::<Vec<i32>>()).unwrap();
    stepped.slice_collapse(s![.., .., ..;2, ..]);
    let sliced = DenseND::from_array(stepped.into_dyn());
    assert_eq!(sliced.shape(), &[4, 2, 2, 1]);
    assert!(sliced.strided_view().is_err());

    let packed = sliced.to_contiguous();
    let desc = BlockDescriptor::new(2);

    let space = batch_to_space_dense(&sliced, &desc).unwrap();
    assert_eq!(space, batch_to_space_dense(&packed, &desc).unwrap());
    assert_eq!(space.shape(), &[1, 4, 4, 1]);

    let batch = space_to_batch_dense(&sliced, &desc).unwrap();
    assert_eq!(batch, space_to_batch_dense(&packed, &desc).unwrap());

    let dyn_space = batch_to_space_dyn(&sliced.into(), &desc).unwrap();
    assert_eq!(dyn_space, DynTensor::from(space));
}

#[test]
fn test_dyn_dispatch_roundtrip() {
    let input: DynTensor = DenseND::from_vec((0..32).collect::<Vec<i8>>(), &[2, 2, 4, 2])
        .unwrap()
        .into();
    let desc = BlockDescriptor::new(2);

    let batch = space_to_batch_dyn(&input, &desc).unwrap();
    assert_eq!(batch.dtype(), DType::I8);
    assert_eq!(batch.shape(), &[8, 1, 2, 2]);

    let back = batch_to_space_dyn(&batch, &desc).unwrap();
    assert_eq!(back, input);
}

#[test]
fn test_dyn_into_rejects_mixed_types() {
    let input = DynTensor::zeros(DType::F32, &[4, 1, 1, 1]);
    let mut output = DynTensor::zeros(DType::F64, &[1, 2, 2, 1]);

    let err = batch_to_space_dyn_into(
        &input,
        &mut output,
        &BlockDescriptor::new(2),
        &RearrangeConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        KernelError::DTypeMismatch {
            input: DType::F32,
            output: DType::F64,
            ..
        }
    ));
}

#[test]
fn test_precondition_errors() {
    let input = DenseND::<f64>::zeros(&[3, 2, 2, 1]);
    let err = batch_to_space_dense(&input, &BlockDescriptor::new(2)).unwrap_err();
    assert!(matches!(err, KernelError::ShapePrecondition { .. }));

    let input = DenseND::<f64>::zeros(&[1, 5, 4, 1]);
    let err = space_to_batch_dense(&input, &BlockDescriptor::new(2)).unwrap_err();
    assert!(matches!(err, KernelError::ShapePrecondition { .. }));

    let input = DenseND::<f64>::zeros(&[1, 4, 4]);
    let err = space_to_batch_dense(&input, &BlockDescriptor::new(2)).unwrap_err();
    assert!(matches!(err, KernelError::RankMismatch { .. }));

    let input = DenseND::<f64>::zeros(&[4, 1, 1, 1]);
    let err = batch_to_space_dense(&input, &BlockDescriptor::new(0)).unwrap_err();
    assert!(matches!(err, KernelError::InvalidBlockSize { .. }));

    let input = DenseND::<f64>::zeros(&[4, 1, 1, 1]);
    let err = batch_to_space_dense(&input, &BlockDescriptor::new(2).with_width(1, 1)).unwrap_err();
    assert!(matches!(err, KernelError::BoundaryOverflow { axis: "width", .. }));
}

#[test]
fn test_mismatched_output_shape_is_rejected() {
    let data = vec![1.0f32; 16];
    let input = StridedView::contiguous(&data, &[1, 4, 4, 1]).unwrap();
    let mut out = vec![-1.0f32; 16];
    let mut output = StridedViewMut::contiguous(&mut out, &[4, 2, 2, 1]).unwrap();

    let desc = BlockDescriptor::new(2).with_height(2, 0);
    assert!(space_to_batch(&input, &mut output, &desc).is_err());
    assert!(out.iter().all(|&x| x == -1.0));
}
