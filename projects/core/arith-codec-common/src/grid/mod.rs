//! # Dense 2D Grids
//!
//! Two containers for `width` x `height` elements addressed by `(col, row)`:
//!
//! - [`PlainGrid`]: a single row-major allocation.
//! - [`BlockedGrid`]: elements grouped into square blocks of side `block_size`; each block is
//!   stored contiguously, so visiting one block at a time stays within a small window of memory.
//!
//! Both implement [`Grid2`], which exposes random access plus a *default* traversal order:
//! row-major for [`PlainGrid`], block-major for [`BlockedGrid`]. Code which only needs those
//! capabilities can be written once against [`Grid2`], and [`AnyGrid`] selects the storage at
//! runtime from a [`GridLayout`].
//!
//! ## Usage
//!
//! ```
//! use arith_codec_common::grid::*;
//!
//! let mut grid = AnyGrid::<u32>::new(GridLayout::Blocked, 5, 3).unwrap();
//! grid.for_each_default_mut(|col, row, value| *value = (row * 5 + col) as u32);
//! assert_eq!(*grid.at(4, 2).unwrap(), 14);
//! ```

mod blocked;
mod plain;

pub use blocked::*;
pub use plain::*;

use derive_enum_all_values::AllValues;
use thiserror::Error;

/// Errors raised when creating or indexing a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// The grid cannot be created with the supplied parameters.
    #[error("Invalid grid argument: {0}")]
    InvalidArgument(&'static str),

    /// A `(col, row)` outside of the grid was requested.
    #[error("Grid position ({col}, {row}) is out of bounds for a {width}x{height} grid")]
    OutOfBounds {
        /// Requested column
        col: usize,
        /// Requested row
        row: usize,
        /// Width of the grid
        width: usize,
        /// Height of the grid
        height: usize,
    },
}

/// Selects the storage used by an [`AnyGrid`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, AllValues)]
pub enum GridLayout {
    /// Row-major storage, see [`PlainGrid`].
    Plain,
    /// Block-major storage with the default blocking factor, see [`BlockedGrid`].
    #[default]
    Blocked,
}

/// Random access and default-order traversal over a 2D grid.
pub trait Grid2<T> {
    /// Number of columns.
    fn width(&self) -> usize;

    /// Number of rows.
    fn height(&self) -> usize;

    /// Returns the element at `(col, row)`.
    fn at(&self, col: usize, row: usize) -> Result<&T, GridError>;

    /// Returns the element at `(col, row)` mutably.
    fn at_mut(&mut self, col: usize, row: usize) -> Result<&mut T, GridError>;

    /// Calls `visit(col, row, element)` for every element, in the grid's natural order.
    fn for_each_default<F: FnMut(usize, usize, &T)>(&self, visit: F);

    /// Calls `visit(col, row, element)` for every element, in the grid's natural order,
    /// allowing the element to be modified.
    fn for_each_default_mut<F: FnMut(usize, usize, &mut T)>(&mut self, visit: F);
}

/// A grid whose storage is picked at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyGrid<T> {
    /// Row-major storage
    Plain(PlainGrid<T>),
    /// Block-major storage
    Blocked(BlockedGrid<T>),
}

impl<T: Clone + Default> AnyGrid<T> {
    /// Creates a grid of default elements using the given `layout`.
    ///
    /// [`GridLayout::Blocked`] uses [`BlockedGrid::with_default_blocking`].
    pub fn new(layout: GridLayout, width: usize, height: usize) -> Result<Self, GridError> {
        Ok(match layout {
            GridLayout::Plain => Self::Plain(PlainGrid::new(width, height)?),
            GridLayout::Blocked => Self::Blocked(BlockedGrid::with_default_blocking(width, height)?),
        })
    }
}

impl<T> AnyGrid<T> {
    /// The layout backing this grid.
    pub fn layout(&self) -> GridLayout {
        match self {
            Self::Plain(_) => GridLayout::Plain,
            Self::Blocked(_) => GridLayout::Blocked,
        }
    }
}

impl<T> Grid2<T> for AnyGrid<T> {
    #[inline]
    fn width(&self) -> usize {
        match self {
            Self::Plain(grid) => grid.width(),
            Self::Blocked(grid) => grid.width(),
        }
    }

    #[inline]
    fn height(&self) -> usize {
        match self {
            Self::Plain(grid) => grid.height(),
            Self::Blocked(grid) => grid.height(),
        }
    }

    #[inline]
    fn at(&self, col: usize, row: usize) -> Result<&T, GridError> {
        match self {
            Self::Plain(grid) => grid.at(col, row),
            Self::Blocked(grid) => grid.at(col, row),
        }
    }

    #[inline]
    fn at_mut(&mut self, col: usize, row: usize) -> Result<&mut T, GridError> {
        match self {
            Self::Plain(grid) => grid.at_mut(col, row),
            Self::Blocked(grid) => grid.at_mut(col, row),
        }
    }

    fn for_each_default<F: FnMut(usize, usize, &T)>(&self, visit: F) {
        match self {
            Self::Plain(grid) => grid.for_each_row_major(visit),
            Self::Blocked(grid) => grid.for_each_block_major(visit),
        }
    }

    fn for_each_default_mut<F: FnMut(usize, usize, &mut T)>(&mut self, visit: F) {
        match self {
            Self::Plain(grid) => grid.for_each_row_major_mut(visit),
            Self::Blocked(grid) => grid.for_each_block_major_mut(visit),
        }
    }
}

/// Checks that `T` is not zero-sized, as such grids would store nothing.
#[inline]
pub(crate) fn check_element_size<T>() -> Result<usize, GridError> {
    match core::mem::size_of::<T>() {
        0 => Err(GridError::InvalidArgument("element size must be greater than zero")),
        size => Ok(size),
    }
}
