//! Example demonstrating zero-copy strided views
//!
//! Run with: cargo run --example views -p tessel-core

use tessel_core::{DenseND, Layout, Order, StridedViewMut};

fn main() -> anyhow::Result<()> {
    println!("=== Strided View Example ===\n");

    // 1. Layout arithmetic
    println!("1. Layout");
    println!("---------");
    let layout = Layout::contiguous(&[2, 3, 4], Order::RowMajor);
    println!("shape {:?}, strides {:?}", layout.shape(), layout.strides());
    let permuted = layout.permute(&[2, 0, 1])?;
    println!(
        "permuted shape {:?}, strides {:?}",
        permuted.shape(),
        permuted.strides()
    );

    // 2. Splits are always views, merges only when strides allow
    println!("\n2. Reshape viability");
    println!("--------------------");
    let split = permuted.reshape(&[2, 2, 2, 3])?;
    println!("split [4] -> [2, 2]: view = {}", split.is_some());
    let merged = permuted.reshape(&[4, 6])?;
    println!("merge [2, 3] -> [6]: view = {}", merged.is_some());

    // 3. Views over an owned tensor
    println!("\n3. Views over DenseND");
    println!("---------------------");
    let tensor = DenseND::from_vec((0..12).collect::<Vec<i32>>(), &[3, 4])?;
    let transposed = tensor.permute(&[1, 0])?;
    let view = transposed.strided_view()?;
    println!("transposed logical order: {:?}", view.to_vec());

    let mut target = vec![0; 12];
    StridedViewMut::contiguous(&mut target, &[4, 3])?.assign(&view)?;
    println!("assigned into contiguous buffer: {:?}", target);

    Ok(())
}
