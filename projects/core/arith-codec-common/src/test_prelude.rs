//! Common test imports and utilities for the shared codec primitives

// External crates commonly used in tests
pub use rstest::rstest;

pub use alloc::vec;
pub use alloc::vec::Vec;

/// Element type used by grid tests; records where it was written so that traversal
/// order and addressing can be checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Cell {
    pub col: usize,
    pub row: usize,
}

/// Visits every `(col, row)` of a `width` x `height` area in row-major order.
pub(crate) fn all_positions(width: usize, height: usize) -> Vec<(usize, usize)> {
    (0..height)
        .flat_map(|row| (0..width).map(move |col| (col, row)))
        .collect()
}
