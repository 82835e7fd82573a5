//! # Blocked Grid
//!
//! A 2D grid whose elements are stored block by block.
//!
//! ## Memory Layout
//!
//! A `width` x `height` grid with a blocking factor `B` is split into
//! `ceil(width / B)` x `ceil(height / B)` blocks. Blocks are laid out in row-major block order,
//! and each block holds `B * B` slots in row-major order within the block. With `B = 2` and a
//! 5x3 grid:
//!
//! ```text
//!  block (0,0)   block (1,0)   block (2,0)
//!  [ 0] [ 1]     [ 4] [ 5]     [ 8] [--]
//!  [ 2] [ 3]     [ 6] [ 7]     [10] [--]
//!
//!  block (0,1)   block (1,1)   block (2,1)
//!  [12] [13]     [16] [17]     [20] [--]
//!  [--] [--]     [--] [--]     [--] [--]
//! ```
//!
//! Edge blocks that extend past the grid keep their unused slots (`[--]`); they are never
//! visited and never returned by [`BlockedGrid::at`].

use super::{check_element_size, Grid2, GridError};
use alloc::vec;
use alloc::vec::Vec;
use likely_stable::unlikely;

/// Largest number of bytes a single block may occupy when using
/// [`BlockedGrid::with_default_blocking`].
pub const MAX_DEFAULT_BLOCK_BYTES: usize = 64 * 1024;

/// A dense 2D grid stored as square blocks of `block_size` x `block_size` elements.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockedGrid<T> {
    width: usize,
    height: usize,
    block_size: usize,
    blocks_wide: usize,
    cells: Vec<T>,
}

impl<T: Clone + Default> BlockedGrid<T> {
    /// Creates a `width` x `height` grid of default elements with blocks of side `block_size`.
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidArgument`] if `block_size` is zero, `T` is zero-sized, or the
    /// required storage does not fit in memory.
    pub fn new(width: usize, height: usize, block_size: usize) -> Result<Self, GridError> {
        check_element_size::<T>()?;
        if block_size == 0 {
            return Err(GridError::InvalidArgument("block size must be greater than zero"));
        }

        let blocks_wide = width.div_ceil(block_size);
        let blocks_high = height.div_ceil(block_size);
        let len = blocks_wide
            .checked_mul(blocks_high)
            .and_then(|blocks| blocks.checked_mul(block_size))
            .and_then(|slots| slots.checked_mul(block_size))
            .ok_or(GridError::InvalidArgument("grid is too large"))?;

        Ok(Self {
            width,
            height,
            block_size,
            blocks_wide,
            cells: vec![T::default(); len],
        })
    }

    /// Creates a grid using the largest block size whose block fits in
    /// [`MAX_DEFAULT_BLOCK_BYTES`].
    pub fn with_default_blocking(width: usize, height: usize) -> Result<Self, GridError> {
        let block_size = default_block_size(check_element_size::<T>()?);
        Self::new(width, height, block_size)
    }
}

impl<T> BlockedGrid<T> {
    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Size in bytes of one element.
    #[inline]
    pub fn element_size(&self) -> usize {
        core::mem::size_of::<T>()
    }

    /// Side length of one block, in elements.
    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Returns the element at `(col, row)`.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] if `col >= width` or `row >= height`.
    #[inline]
    pub fn at(&self, col: usize, row: usize) -> Result<&T, GridError> {
        let index = self.slot_index(col, row)?;
        Ok(&self.cells[index])
    }

    /// Returns the element at `(col, row)` mutably.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] if `col >= width` or `row >= height`.
    #[inline]
    pub fn at_mut(&mut self, col: usize, row: usize) -> Result<&mut T, GridError> {
        let index = self.slot_index(col, row)?;
        Ok(&mut self.cells[index])
    }

    /// Calls `visit(col, row, element)` for every in-bounds element.
    ///
    /// All elements of one block are visited before moving on to the next block; blocks are
    /// visited in row-major block order.
    pub fn for_each_block_major<F: FnMut(usize, usize, &T)>(&self, mut visit: F) {
        let slots = self.block_size * self.block_size;
        if slots == 0 {
            return;
        }

        for (block, cells) in self.cells.chunks_exact(slots).enumerate() {
            let (origin_col, origin_row) = self.block_origin(block);
            for (slot, cell) in cells.iter().enumerate() {
                let col = origin_col + slot % self.block_size;
                let row = origin_row + slot / self.block_size;
                if col < self.width && row < self.height {
                    visit(col, row, cell);
                }
            }
        }
    }

    /// Same as [`Self::for_each_block_major`], but the visitor may modify each element.
    pub fn for_each_block_major_mut<F: FnMut(usize, usize, &mut T)>(&mut self, mut visit: F) {
        let slots = self.block_size * self.block_size;
        if slots == 0 {
            return;
        }

        let (width, height, block_size, blocks_wide) =
            (self.width, self.height, self.block_size, self.blocks_wide);

        for (block, cells) in self.cells.chunks_exact_mut(slots).enumerate() {
            let origin_col = (block % blocks_wide) * block_size;
            let origin_row = (block / blocks_wide) * block_size;
            for (slot, cell) in cells.iter_mut().enumerate() {
                let col = origin_col + slot % block_size;
                let row = origin_row + slot / block_size;
                if col < width && row < height {
                    visit(col, row, cell);
                }
            }
        }
    }

    /// Top-left `(col, row)` of the block at index `block`.
    #[inline]
    fn block_origin(&self, block: usize) -> (usize, usize) {
        (
            (block % self.blocks_wide) * self.block_size,
            (block / self.blocks_wide) * self.block_size,
        )
    }

    #[inline]
    fn slot_index(&self, col: usize, row: usize) -> Result<usize, GridError> {
        if unlikely(col >= self.width || row >= self.height) {
            return Err(GridError::OutOfBounds {
                col,
                row,
                width: self.width,
                height: self.height,
            });
        }

        let b = self.block_size;
        let block = (row / b) * self.blocks_wide + col / b;
        Ok(block * b * b + (row % b) * b + col % b)
    }
}

impl<T> Grid2<T> for BlockedGrid<T> {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn at(&self, col: usize, row: usize) -> Result<&T, GridError> {
        BlockedGrid::at(self, col, row)
    }

    #[inline]
    fn at_mut(&mut self, col: usize, row: usize) -> Result<&mut T, GridError> {
        BlockedGrid::at_mut(self, col, row)
    }

    fn for_each_default<F: FnMut(usize, usize, &T)>(&self, visit: F) {
        self.for_each_block_major(visit)
    }

    fn for_each_default_mut<F: FnMut(usize, usize, &mut T)>(&mut self, visit: F) {
        self.for_each_block_major_mut(visit)
    }
}

/// `floor(sqrt(MAX_DEFAULT_BLOCK_BYTES / element_size))`, at least 1.
fn default_block_size(element_size: usize) -> usize {
    let cells = MAX_DEFAULT_BLOCK_BYTES / element_size;
    let mut side = 1usize;
    while (side + 1) * (side + 1) <= cells {
        side += 1;
    }
    side
}
