//! Compression and decompression of whole images.
//!
//! Each stage consumes the container produced by the previous stage, so at most two
//! image-sized containers are alive at any time.

use crate::block_transform::{self, BLOCK_SIDE};
use crate::codeword::{
    read_compressed, write_compressed, CODEWORD_BYTES, HEADER_MAGIC, MAX_DIMENSION_LINE,
};
use crate::color_space::{from_color_space, to_color_space};
use crate::image::Image;
use crate::ppm::{read_ppm, write_ppm};
use crate::quantize::{dequantize, quantize, QuantizedBlock};
use crate::{CodecError, CodecResult, CodecSettings};
use arith_codec_common::grid::PlainGrid;
use std::io::{BufRead, Write};
use tracing::debug;

/// Room reserved for a `P6` header of any image up to 65535 levels.
const PPM_HEADER_CAPACITY: usize = 32;

/// Samples per pixel in a written PPM raster.
const RGB_SAMPLES: usize = 3;

/// Compresses `image` into one quantized block per 2x2 pixel block.
///
/// An odd last column or row is dropped first.
///
/// # Errors
///
/// [`CodecError::EmptyImage`] if no pixels remain after trimming.
pub fn compress_image(
    image: Image,
    settings: &CodecSettings,
) -> CodecResult<PlainGrid<QuantizedBlock>> {
    let image = image.trim_to_even()?;
    check_not_empty(image.width(), image.height())?;
    let colors = to_color_space(image, settings.color_blocking)?;
    let coefficients = block_transform::forward(colors)?;
    quantize(coefficients)
}

/// Reconstructs an image with denominator 255 from its quantized blocks.
///
/// # Errors
///
/// [`CodecError::EmptyImage`] if `blocks` is empty, as no PPM can hold such an image.
pub fn decompress_image(
    blocks: PlainGrid<QuantizedBlock>,
    settings: &CodecSettings,
) -> CodecResult<Image> {
    check_not_empty(blocks.width() * BLOCK_SIDE, blocks.height() * BLOCK_SIDE)?;
    let coefficients = dequantize(blocks)?;
    let colors = block_transform::inverse(coefficients, settings.color_blocking)?;
    from_color_space(colors, settings.pixel_layout)
}

/// Reads a PPM image from `input` and writes its compressed form to `output`.
///
/// Nothing is written unless the whole image was compressed successfully.
pub fn compress<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    settings: &CodecSettings,
) -> CodecResult<()> {
    let image = read_ppm(&mut input, settings.pixel_layout)?;
    debug!(
        width = image.width(),
        height = image.height(),
        denominator = image.denominator(),
        "compressing image"
    );

    let blocks = compress_image(image, settings)?;
    let header_len = HEADER_MAGIC.len() + MAX_DIMENSION_LINE;
    let mut compressed = Vec::with_capacity(header_len + blocks.as_slice().len() * CODEWORD_BYTES);
    write_compressed(&mut compressed, &blocks)?;
    drop(blocks);

    output.write_all(&compressed)?;
    output.flush()?;
    Ok(())
}

/// Reads a compressed image from `input` and writes it to `output` as a raw PPM.
///
/// Nothing is written unless the whole image was decompressed successfully.
pub fn decompress<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    settings: &CodecSettings,
) -> CodecResult<()> {
    let blocks = read_compressed(&mut input)?;
    debug!(
        width = blocks.width() * BLOCK_SIDE,
        height = blocks.height() * BLOCK_SIDE,
        "decompressing image"
    );

    let image = decompress_image(blocks, settings)?;
    let raster_len = image.width() * image.height() * RGB_SAMPLES;
    let mut ppm = Vec::with_capacity(PPM_HEADER_CAPACITY + raster_len);
    write_ppm(&mut ppm, &image)?;
    drop(image);

    output.write_all(&ppm)?;
    output.flush()?;
    Ok(())
}

fn check_not_empty(width: usize, height: usize) -> CodecResult<()> {
    if width == 0 || height == 0 {
        return Err(CodecError::EmptyImage { width, height });
    }
    Ok(())
}
