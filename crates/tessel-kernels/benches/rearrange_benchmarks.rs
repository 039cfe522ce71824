//! Performance benchmarks for tessel-kernels
//!
//! Run with: cargo bench -p tessel-kernels
//!
//! Benchmarks cover:
//! - Fast-assign path (no boundaries) in both directions
//! - Padded space-to-batch and cropped batch-to-space (kernel paths)
//! - Sequential vs parallel execution of the copy kernel

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tessel_core::DenseND;
use tessel_kernels::*;

fn image(side: usize, channels: usize) -> DenseND<f32> {
    let shape = [4, side, side, channels];
    let len: usize = shape.iter().product();
    DenseND::from_vec((0..len).map(|x| x as f32).collect(), &shape).unwrap()
}

fn bench_fast_assign(c: &mut Criterion) {
    let mut group = c.benchmark_group("fast_assign");

    for &side in [16, 64, 128].iter() {
        let input = image(side, 8);
        let desc = BlockDescriptor::new(2);
        let batch = space_to_batch_dense(&input, &desc).unwrap();
        group.throughput(Throughput::Elements(input.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("space_to_batch", side),
            &side,
            |bencher, _| {
                bencher.iter(|| black_box(space_to_batch_dense(&input, &desc).unwrap()));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("batch_to_space", side),
            &side,
            |bencher, _| {
                bencher.iter(|| black_box(batch_to_space_dense(&batch, &desc).unwrap()));
            },
        );
    }
    group.finish();
}

fn bench_boundaries(c: &mut Criterion) {
    let mut group = c.benchmark_group("boundaries");

    for &side in [16, 64, 128].iter() {
        let input = image(side, 8);
        let desc = BlockDescriptor::new(2).with_uniform(2);
        let batch = space_to_batch_dense(&input, &desc).unwrap();
        group.throughput(Throughput::Elements(batch.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("space_to_batch_padded", side),
            &side,
            |bencher, _| {
                bencher.iter(|| black_box(space_to_batch_dense(&input, &desc).unwrap()));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("batch_to_space_cropped", side),
            &side,
            |bencher, _| {
                bencher.iter(|| black_box(batch_to_space_dense(&batch, &desc).unwrap()));
            },
        );
    }
    group.finish();
}

fn bench_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("crop_copy");

    for &side in [64, 256].iter() {
        let input = image(side, 4);
        let out_shape = [4, side - 2, side - 2, 4];
        let mut out = DenseND::<f32>::zeros(&out_shape);
        group.throughput(Throughput::Elements(out.len() as u64));

        for (name, config) in [
            ("sequential", RearrangeConfig::sequential()),
            ("parallel", RearrangeConfig::default().with_min_parallel_len(1)),
        ] {
            group.bench_with_input(BenchmarkId::new(name, side), &side, |bencher, _| {
                bencher.iter(|| {
                    let view = input.strided_view().unwrap();
                    let mut target = out.strided_view_mut().unwrap();
                    crop_copy(&view, &mut target, 1, 1, 1, 1, &config).unwrap();
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_fast_assign, bench_boundaries, bench_parallel);
criterion_main!(benches);
