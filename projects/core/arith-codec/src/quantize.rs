//! Quantization of block coefficients into the integer ranges stored by a codeword.

use crate::block_transform::BlockCoefficients;
use crate::chroma::{chroma_to_index, index_to_chroma};
use crate::traverse::try_fill;
use crate::CodecResult;
use arith_codec_common::grid::PlainGrid;
use tracing::debug;

/// Largest quantized average luma; `a = 1.0` maps to this value.
pub const LUMA_LEVELS: u16 = 511;

/// Gradient coefficients `b`, `c` and `d` are clamped to `[-GRADIENT_LIMIT, GRADIENT_LIMIT]`.
pub const GRADIENT_LIMIT: f32 = 0.3;

/// Quantized gradient steps per unit of coefficient.
pub const GRADIENT_SCALE: f32 = 50.0;

/// Largest magnitude of a quantized gradient coefficient.
pub const GRADIENT_LEVELS: i32 = 15;

/// The integer form of [`BlockCoefficients`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuantizedBlock {
    /// Average luma, `0..=511`
    pub a: u16,
    /// Vertical gradient, `-15..=15`
    pub b: i8,
    /// Horizontal gradient, `-15..=15`
    pub c: i8,
    /// Diagonal gradient, `-15..=15`
    pub d: i8,
    /// Chroma table index of the average Pb, `0..=15`
    pub pb: u8,
    /// Chroma table index of the average Pr, `0..=15`
    pub pr: u8,
}

/// Quantizes one block.
pub fn quantize_block(block: &BlockCoefficients) -> QuantizedBlock {
    QuantizedBlock {
        a: (block.a.clamp(0.0, 1.0) * f32::from(LUMA_LEVELS)).round() as u16,
        b: quantize_gradient(block.b),
        c: quantize_gradient(block.c),
        d: quantize_gradient(block.d),
        pb: chroma_to_index(block.pb),
        pr: chroma_to_index(block.pr),
    }
}

/// Restores the coefficients of one block.
///
/// # Errors
///
/// [`crate::CodecError::ChromaIndexOutOfRange`] if a chroma index is outside of the
/// chroma table.
pub fn dequantize_block(block: &QuantizedBlock) -> CodecResult<BlockCoefficients> {
    Ok(BlockCoefficients {
        a: (f32::from(block.a) / f32::from(LUMA_LEVELS)).clamp(0.0, 1.0),
        b: f32::from(block.b) / GRADIENT_SCALE,
        c: f32::from(block.c) / GRADIENT_SCALE,
        d: f32::from(block.d) / GRADIENT_SCALE,
        pb: index_to_chroma(usize::from(block.pb))?,
        pr: index_to_chroma(usize::from(block.pr))?,
    })
}

/// Quantizes every block of `blocks`.
pub fn quantize(blocks: PlainGrid<BlockCoefficients>) -> CodecResult<PlainGrid<QuantizedBlock>> {
    debug!(
        blocks_wide = blocks.width(),
        blocks_high = blocks.height(),
        "quantizing"
    );

    let mut quantized = PlainGrid::new(blocks.width(), blocks.height())?;
    try_fill(&mut quantized, |col, row, block| {
        *block = quantize_block(blocks.at(col, row)?);
        Ok(())
    })?;
    Ok(quantized)
}

/// Restores the coefficients of every block of `blocks`.
pub fn dequantize(blocks: PlainGrid<QuantizedBlock>) -> CodecResult<PlainGrid<BlockCoefficients>> {
    debug!(
        blocks_wide = blocks.width(),
        blocks_high = blocks.height(),
        "dequantizing"
    );

    let mut coefficients = PlainGrid::new(blocks.width(), blocks.height())?;
    try_fill(&mut coefficients, |col, row, block| {
        *block = dequantize_block(blocks.at(col, row)?)?;
        Ok(())
    })?;
    Ok(coefficients)
}

#[inline]
fn quantize_gradient(value: f32) -> i8 {
    let scaled = (value.clamp(-GRADIENT_LIMIT, GRADIENT_LIMIT) * GRADIENT_SCALE).round() as i32;
    scaled.clamp(-GRADIENT_LEVELS, GRADIENT_LEVELS) as i8
}
