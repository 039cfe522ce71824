//! # DenseND - Trait Implementations
//!
//! - `Debug`
//! - `PartialEq` (shape and logical content)

use super::types::DenseND;
use scirs2_core::numeric::Num;
use std::fmt;

impl<T: fmt::Debug + Clone + Num> fmt::Debug for DenseND<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DenseND")
            .field("shape", &self.shape())
            .field("rank", &self.rank())
            .field("data", &self.data)
            .finish()
    }
}

impl<T: Clone + Num> PartialEq for DenseND<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.data.iter().eq(other.data.iter())
    }
}
