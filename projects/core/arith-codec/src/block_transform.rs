//! # 2x2 Block Transform
//!
//! Each 2x2 block of luma values
//!
//! ```text
//! y1 y2
//! y3 y4
//! ```
//!
//! is replaced by four cosine coefficients:
//!
//! ```text
//! a = (y4 + y3 + y2 + y1) / 4
//! b = (y4 + y3 - y2 - y1) / 4
//! c = (y4 - y3 + y2 - y1) / 4
//! d = (y4 - y3 - y2 + y1) / 4
//! ```
//!
//! together with the average `pb` and `pr` of the four pixels. The luma part is exactly
//! invertible; averaging chroma is the only loss in this stage.

use crate::color_space::ColorPixel;
use crate::settings::Blocking;
use crate::traverse::try_fill;
use crate::{CodecError, CodecResult};
use arith_codec_common::grid::{BlockedGrid, PlainGrid};
use tracing::debug;

/// Side length of a transform block, in pixels.
pub const BLOCK_SIDE: usize = 2;

/// Transform coefficients and averaged chroma of one 2x2 block.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BlockCoefficients {
    /// Average luma
    pub a: f32,
    /// Vertical luma gradient
    pub b: f32,
    /// Horizontal luma gradient
    pub c: f32,
    /// Diagonal luma gradient
    pub d: f32,
    /// Average blue-difference chroma
    pub pb: f32,
    /// Average red-difference chroma
    pub pr: f32,
}

impl BlockCoefficients {
    /// Transforms the four pixels of a block, given in row-major order.
    pub fn from_pixels(pixels: [ColorPixel; 4]) -> Self {
        let [p1, p2, p3, p4] = pixels;
        let (y1, y2, y3, y4) = (p1.y, p2.y, p3.y, p4.y);

        Self {
            a: (y4 + y3 + y2 + y1) / 4.0,
            b: (y4 + y3 - y2 - y1) / 4.0,
            c: (y4 - y3 + y2 - y1) / 4.0,
            d: (y4 - y3 - y2 + y1) / 4.0,
            pb: (p1.pb + p2.pb + p3.pb + p4.pb) / 4.0,
            pr: (p1.pr + p2.pr + p3.pr + p4.pr) / 4.0,
        }
    }

    /// Reconstructs the pixel at `(col, row)` within the block, each in `0..2`.
    #[inline]
    pub fn pixel(&self, col: usize, row: usize) -> ColorPixel {
        let Self { a, b, c, d, .. } = *self;
        let y = match (col & 1, row & 1) {
            (0, 0) => a - b - c + d,
            (1, 0) => a - b + c - d,
            (0, _) => a + b - c - d,
            _ => a + b + c + d,
        };

        ColorPixel {
            y,
            pb: self.pb,
            pr: self.pr,
        }
    }
}

/// Transforms every 2x2 block of `colors`.
///
/// The result has half the width and half the height of `colors`, with block `(bc, br)`
/// covering pixels `(2 * bc, 2 * br)..=(2 * bc + 1, 2 * br + 1)`.
///
/// # Errors
///
/// [`CodecError::OddDimensions`] if `colors` has an odd width or height.
pub fn forward(colors: BlockedGrid<ColorPixel>) -> CodecResult<PlainGrid<BlockCoefficients>> {
    let (width, height) = (colors.width(), colors.height());
    if width % BLOCK_SIDE != 0 || height % BLOCK_SIDE != 0 {
        return Err(CodecError::OddDimensions { width, height });
    }
    debug!(width, height, "forward block transform");

    let mut blocks = PlainGrid::new(width / BLOCK_SIDE, height / BLOCK_SIDE)?;
    try_fill(&mut blocks, |block_col, block_row, block| {
        let (col, row) = (block_col * BLOCK_SIDE, block_row * BLOCK_SIDE);
        *block = BlockCoefficients::from_pixels([
            *colors.at(col, row)?,
            *colors.at(col + 1, row)?,
            *colors.at(col, row + 1)?,
            *colors.at(col + 1, row + 1)?,
        ]);
        Ok(())
    })?;
    Ok(blocks)
}

/// Rebuilds the luma/chroma grid from its block coefficients.
///
/// Every pixel of a block receives the block's averaged chroma.
pub fn inverse(
    blocks: PlainGrid<BlockCoefficients>,
    blocking: Blocking,
) -> CodecResult<BlockedGrid<ColorPixel>> {
    let width = blocks.width() * BLOCK_SIDE;
    let height = blocks.height() * BLOCK_SIDE;
    debug!(width, height, ?blocking, "inverse block transform");

    let mut colors = blocking.grid(width, height)?;
    try_fill(&mut colors, |col, row, color| {
        let block = blocks.at(col / BLOCK_SIDE, row / BLOCK_SIDE)?;
        *color = block.pixel(col % BLOCK_SIDE, row % BLOCK_SIDE);
        Ok(())
    })?;
    Ok(colors)
}
