//! Index helpers shared by the copy kernels

use crate::config::RearrangeConfig;

/// Split a flat row-major position of a 4-D shape into `(n, h, w, c)`.
///
/// `flat` must be below the shape's element count.
#[inline]
pub fn unravel4(mut flat: usize, shape: &[usize; 4]) -> [usize; 4] {
    let c = flat % shape[3];
    flat /= shape[3];
    let w = flat % shape[2];
    flat /= shape[2];
    let h = flat % shape[1];
    flat /= shape[1];
    [flat, h, w, c]
}

/// Elements handed to each parallel task.
///
/// Uses `config.chunk_size` when set, otherwise aims for a few chunks per
/// worker thread without going below `min_parallel_len / 4`.
pub fn chunk_len(len: usize, config: &RearrangeConfig) -> usize {
    if let Some(chunk) = config.chunk_size {
        return chunk.max(1);
    }
    let tasks = worker_threads() * 4;
    len.div_ceil(tasks).max(config.min_parallel_len / 4).max(1)
}

#[cfg(feature = "parallel")]
fn worker_threads() -> usize {
    rayon::current_num_threads()
}

#[cfg(not(feature = "parallel"))]
fn worker_threads() -> usize {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unravel4_row_major() {
        let shape = [2, 3, 4, 5];
        assert_eq!(unravel4(0, &shape), [0, 0, 0, 0]);
        assert_eq!(unravel4(1, &shape), [0, 0, 0, 1]);
        assert_eq!(unravel4(5, &shape), [0, 0, 1, 0]);
        assert_eq!(unravel4(20, &shape), [0, 1, 0, 0]);
        assert_eq!(unravel4(60, &shape), [1, 0, 0, 0]);
        assert_eq!(unravel4(119, &shape), [1, 2, 3, 4]);
    }

    #[test]
    fn test_chunk_len_explicit() {
        let config = RearrangeConfig::default().with_chunk_size(128);
        assert_eq!(chunk_len(1_000_000, &config), 128);
    }

    #[test]
    fn test_chunk_len_auto_has_floor() {
        let config = RearrangeConfig::default();
        assert!(chunk_len(10_000, &config) >= 2_500);
        assert!(chunk_len(0, &config.clone().with_min_parallel_len(0)) >= 1);
    }
}
