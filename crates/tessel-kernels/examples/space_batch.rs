//! Example demonstrating space-to-batch and batch-to-space
//!
//! Space-to-batch folds every `b × b` spatial tile into the batch axis; this is
//! how dilated convolutions are run as ordinary ones. Batch-to-space undoes it.
//!
//! Run with: cargo run --example space_batch -p tessel-kernels [--features tracing]

use tessel_core::DenseND;
use tessel_kernels::tracing_support::{init_tracing, TracingConfig};
use tessel_kernels::{
    batch_to_space_dense, space_to_batch_dense, space_to_batch_output_shape, BlockDescriptor,
};

fn print_image(label: &str, tensor: &DenseND<i32>) {
    let shape = tensor.shape();
    println!("{} {:?}", label, shape);
    for n in 0..shape[0] {
        println!("  batch {}:", n);
        for h in 0..shape[1] {
            let row: Vec<String> = (0..shape[2])
                .map(|w| format!("{:3}", tensor.get(&[n, h, w, 0]).copied().unwrap_or(0)))
                .collect();
            println!("    {}", row.join(" "));
        }
    }
    println!();
}

fn main() -> anyhow::Result<()> {
    // Path events show up with --features tracing and RUST_LOG=tessel_kernels=debug
    init_tracing(TracingConfig::default())?;

    println!("=== Space-to-Batch Example ===\n");

    // 1. Plain rearrangement of a 4×4 image with block 2
    println!("1. Block 2, no padding");
    println!("----------------------");
    let image = DenseND::from_vec((1..=16).collect::<Vec<i32>>(), &[1, 4, 4, 1])?;
    print_image("Image", &image);

    let desc = BlockDescriptor::new(2);
    let batch = space_to_batch_dense(&image, &desc)?;
    print_image("Batch", &batch);

    // 2. Padding makes a 3×3 image divisible by the block
    println!("2. Block 2, pad one row and one column");
    println!("--------------------------------------");
    let small = DenseND::from_vec((1..=9).collect::<Vec<i32>>(), &[1, 3, 3, 1])?;
    let padded = BlockDescriptor::new(2).with_height(0, 1).with_width(1, 0);
    println!(
        "Output shape: {:?}\n",
        space_to_batch_output_shape(small.shape(), &padded)?.as_slice()
    );
    let batch = space_to_batch_dense(&small, &padded)?;
    print_image("Padded batch", &batch);

    // 3. Cropping with the same amounts restores the input
    println!("3. Batch-to-space with matching crops");
    println!("-------------------------------------");
    let restored = batch_to_space_dense(&batch, &padded)?;
    print_image("Restored", &restored);
    println!("Round trip exact: {}", restored == small);

    Ok(())
}
