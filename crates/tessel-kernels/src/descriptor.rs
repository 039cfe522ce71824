//! Block size and boundary amounts of a rearrangement

/// Block edge plus the four spatial boundary amounts.
///
/// For batch-to-space the amounts are crops removed from the assembled
/// spatial extent; for space-to-batch they are zero pads added around the
/// input before it is split into blocks.
///
/// # Examples
///
/// ```
/// use tessel_kernels::BlockDescriptor;
///
/// let desc = BlockDescriptor::new(2).with_height(1, 0).with_width(0, 1);
/// assert_eq!(desc.block_size, 2);
/// assert_eq!((desc.bottom, desc.top), (1, 0));
/// assert!(!desc.is_unbounded());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockDescriptor {
    /// Edge of the square spatial tile moved into the batch axis
    pub block_size: usize,
    /// Amount at the start of the height axis
    pub bottom: usize,
    /// Amount at the end of the height axis
    pub top: usize,
    /// Amount at the start of the width axis
    pub left: usize,
    /// Amount at the end of the width axis
    pub right: usize,
}

impl BlockDescriptor {
    /// Descriptor with no boundary amounts.
    pub fn new(block_size: usize) -> Self {
        Self {
            block_size,
            bottom: 0,
            top: 0,
            left: 0,
            right: 0,
        }
    }

    pub fn with_height(mut self, bottom: usize, top: usize) -> Self {
        self.bottom = bottom;
        self.top = top;
        self
    }

    pub fn with_width(mut self, left: usize, right: usize) -> Self {
        self.left = left;
        self.right = right;
        self
    }

    /// Same amount on all four sides.
    pub fn with_uniform(self, amount: usize) -> Self {
        self.with_height(amount, amount).with_width(amount, amount)
    }

    /// True when all four boundary amounts are zero.
    pub fn is_unbounded(&self) -> bool {
        self.bottom == 0 && self.top == 0 && self.left == 0 && self.right == 0
    }

    /// Number of batch entries one space entry expands to: `block²`.
    ///
    /// `None` when the square does not fit in `usize`.
    pub fn block_area(&self) -> Option<usize> {
        self.block_size.checked_mul(self.block_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_unbounded() {
        let desc = BlockDescriptor::new(3);
        assert!(desc.is_unbounded());
        assert_eq!(desc.block_area(), Some(9));
    }

    #[test]
    fn test_uniform() {
        let desc = BlockDescriptor::new(1).with_uniform(2);
        assert_eq!((desc.bottom, desc.top, desc.left, desc.right), (2, 2, 2, 2));
        assert!(!desc.is_unbounded());
    }

    #[test]
    fn test_block_area_overflow() {
        let desc = BlockDescriptor::new(1 << (usize::BITS / 2));
        assert_eq!(desc.block_area(), None);
    }
}
