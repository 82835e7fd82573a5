use super::{check_element_size, Grid2, GridError};
use alloc::vec;
use alloc::vec::Vec;
use likely_stable::unlikely;

/// A dense 2D grid stored in a single row-major allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct PlainGrid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Clone + Default> PlainGrid<T> {
    /// Creates a `width` x `height` grid of default elements.
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidArgument`] if `T` is zero-sized or the grid is too large to allocate.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        check_element_size::<T>()?;
        let len = cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![T::default(); len],
        })
    }
}

impl<T> PlainGrid<T> {
    /// Creates a grid where the element at `(col, row)` is `init(col, row)`.
    ///
    /// `init` is called in row-major order.
    pub fn from_fn<F: FnMut(usize, usize) -> T>(
        width: usize,
        height: usize,
        mut init: F,
    ) -> Result<Self, GridError> {
        check_element_size::<T>()?;
        let mut cells = Vec::with_capacity(cell_count(width, height)?);
        for row in 0..height {
            for col in 0..width {
                cells.push(init(col, row));
            }
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

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

    /// Returns the element at `(col, row)`.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] if `col >= width` or `row >= height`.
    #[inline]
    pub fn at(&self, col: usize, row: usize) -> Result<&T, GridError> {
        let index = self.index(col, row)?;
        Ok(&self.cells[index])
    }

    /// Returns the element at `(col, row)` mutably.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] if `col >= width` or `row >= height`.
    #[inline]
    pub fn at_mut(&mut self, col: usize, row: usize) -> Result<&mut T, GridError> {
        let index = self.index(col, row)?;
        Ok(&mut self.cells[index])
    }

    /// Calls `visit(col, row, element)` for every element, row by row.
    pub fn for_each_row_major<F: FnMut(usize, usize, &T)>(&self, mut visit: F) {
        if self.width == 0 {
            return;
        }
        for (row, cells) in self.cells.chunks_exact(self.width).enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                visit(col, row, cell);
            }
        }
    }

    /// Same as [`Self::for_each_row_major`], but the visitor may modify each element.
    pub fn for_each_row_major_mut<F: FnMut(usize, usize, &mut T)>(&mut self, mut visit: F) {
        if self.width == 0 {
            return;
        }
        for (row, cells) in self.cells.chunks_exact_mut(self.width).enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                visit(col, row, cell);
            }
        }
    }

    /// Calls `visit(col, row, element)` for every element, column by column.
    pub fn for_each_col_major<F: FnMut(usize, usize, &T)>(&self, mut visit: F) {
        for col in 0..self.width {
            for row in 0..self.height {
                visit(col, row, &self.cells[row * self.width + col]);
            }
        }
    }

    /// The elements in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// The elements in row-major order, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.cells
    }

    #[inline]
    fn index(&self, col: usize, row: usize) -> Result<usize, GridError> {
        if unlikely(col >= self.width || row >= self.height) {
            return Err(GridError::OutOfBounds {
                col,
                row,
                width: self.width,
                height: self.height,
            });
        }
        Ok(row * self.width + col)
    }
}

impl<T> Grid2<T> for PlainGrid<T> {
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
        PlainGrid::at(self, col, row)
    }

    #[inline]
    fn at_mut(&mut self, col: usize, row: usize) -> Result<&mut T, GridError> {
        PlainGrid::at_mut(self, col, row)
    }

    fn for_each_default<F: FnMut(usize, usize, &T)>(&self, visit: F) {
        self.for_each_row_major(visit)
    }

    fn for_each_default_mut<F: FnMut(usize, usize, &mut T)>(&mut self, visit: F) {
        self.for_each_row_major_mut(visit)
    }
}

fn cell_count(width: usize, height: usize) -> Result<usize, GridError> {
    width
        .checked_mul(height)
        .ok_or(GridError::InvalidArgument("grid is too large"))
}
