//! Reading and writing of PPM (portable pixmap) images.
//!
//! Both the raw (`P6`) and plain (`P3`) variants are read, including `#` comments in the header
//! and sample maxima up to 65535; images are always written as raw `P6`.

use crate::error::PpmError;
use crate::image::{Image, Rgb};
use crate::CodecResult;
use arith_codec_common::grid::{Grid2, GridLayout};
use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use std::io::{self, BufRead, Read, Write};
use tracing::trace;

/// Largest sample maximum a PPM image may declare.
pub const MAX_MAXVAL: u32 = u16::MAX as u32;

/// Reads a PPM image, storing its pixels using `layout`.
///
/// # Errors
///
/// [`crate::CodecError::InvalidPpm`] if the input is not a well-formed `P3` or `P6` image.
pub fn read_ppm<R: BufRead>(input: &mut R, layout: GridLayout) -> CodecResult<Image> {
    let mut magic = [0u8; 2];
    fill_exact(input, &mut magic)?;
    let plain = match &magic {
        b"P6" => false,
        b"P3" => true,
        _ => return Err(PpmError::BadMagic.into()),
    };

    let width = read_number(input)? as usize;
    let height = read_number(input)? as usize;
    let maxval = read_number(input)?;
    if width == 0 || height == 0 {
        return Err(PpmError::ZeroDimension.into());
    }
    if maxval == 0 || maxval > MAX_MAXVAL {
        return Err(PpmError::InvalidMaxval(maxval).into());
    }
    let maxval = maxval as u16;
    trace!(width, height, maxval, plain, "read PPM header");

    let pixels = if plain {
        read_plain_raster(input, width, height, maxval)?
    } else {
        match next_byte(input)? {
            Some(byte) if byte.is_ascii_whitespace() => {}
            Some(_) => return Err(PpmError::MissingRasterSeparator.into()),
            None => return Err(PpmError::UnexpectedEof.into()),
        }
        read_raw_raster(input, width, height, maxval)?
    };

    let mut image = Image::new(layout, width, height, maxval)?;
    for (index, pixel) in pixels.into_iter().enumerate() {
        *image.pixels_mut().at_mut(index % width, index / width)? = pixel;
    }
    Ok(image)
}

/// Writes `image` as a raw (`P6`) PPM.
///
/// Samples take two bytes when the image's denominator exceeds 255.
pub fn write_ppm<W: Write>(output: &mut W, image: &Image) -> CodecResult<()> {
    let (width, height) = (image.width(), image.height());
    let denominator = image.denominator();
    writeln!(output, "P6\n{width} {height}\n{denominator}")?;

    let wide = denominator > 0xFF;
    let mut line = Vec::with_capacity(width * 3 * if wide { 2 } else { 1 });
    for row in 0..height {
        line.clear();
        for col in 0..width {
            let pixel = image.pixels().at(col, row)?;
            for sample in [pixel.red, pixel.green, pixel.blue] {
                if wide {
                    line.write_u16::<BigEndian>(sample)?;
                } else {
                    line.push(sample as u8);
                }
            }
        }
        output.write_all(&line)?;
    }
    Ok(())
}

fn read_plain_raster<R: BufRead>(
    input: &mut R,
    width: usize,
    height: usize,
    maxval: u16,
) -> CodecResult<Vec<Rgb>> {
    let count = pixel_count(width, height)?;
    let mut pixels = Vec::new();
    for _ in 0..count {
        let mut samples = [0u16; 3];
        for sample in &mut samples {
            *sample = check_sample(read_number(input)?, maxval)?;
        }
        let [red, green, blue] = samples;
        pixels.push(Rgb::new(red, green, blue));
    }
    Ok(pixels)
}

fn read_raw_raster<R: BufRead>(
    input: &mut R,
    width: usize,
    height: usize,
    maxval: u16,
) -> CodecResult<Vec<Rgb>> {
    let sample_bytes = if maxval > 0xFF { 2 } else { 1 };
    let expected = pixel_count(width, height)?
        .checked_mul(3 * sample_bytes)
        .ok_or(PpmError::NumberTooLarge)?;

    let mut raster = Vec::new();
    input.by_ref().take(expected as u64).read_to_end(&mut raster)?;
    if raster.len() < expected {
        return Err(PpmError::UnexpectedEof.into());
    }

    let pixels = raster
        .chunks_exact(3 * sample_bytes)
        .map(|chunk| -> Result<Rgb, PpmError> {
            let sample = |index: usize| {
                let raw = if sample_bytes == 2 {
                    u32::from(BigEndian::read_u16(&chunk[index * 2..]))
                } else {
                    u32::from(chunk[index])
                };
                check_sample(raw, maxval)
            };
            Ok(Rgb::new(sample(0)?, sample(1)?, sample(2)?))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(pixels)
}

fn pixel_count(width: usize, height: usize) -> Result<usize, PpmError> {
    width.checked_mul(height).ok_or(PpmError::NumberTooLarge)
}

fn check_sample(sample: u32, maxval: u16) -> Result<u16, PpmError> {
    if sample > u32::from(maxval) {
        return Err(PpmError::SampleOutOfRange { sample, maxval });
    }
    Ok(sample as u16)
}

/// Reads an unsigned decimal number, skipping leading whitespace and comments.
fn read_number<R: BufRead>(input: &mut R) -> CodecResult<u32> {
    skip_whitespace_and_comments(input)?;

    let mut value = 0u32;
    let mut digits = 0usize;
    while let Some(byte) = peek_byte(input)? {
        if !byte.is_ascii_digit() {
            break;
        }
        input.consume(1);
        value = value
            .checked_mul(10)
            .and_then(|value| value.checked_add(u32::from(byte - b'0')))
            .ok_or(PpmError::NumberTooLarge)?;
        digits += 1;
    }

    if digits == 0 {
        let error = match peek_byte(input)? {
            Some(_) => PpmError::ExpectedNumber,
            None => PpmError::UnexpectedEof,
        };
        return Err(error.into());
    }
    Ok(value)
}

fn skip_whitespace_and_comments<R: BufRead>(input: &mut R) -> io::Result<()> {
    loop {
        match peek_byte(input)? {
            Some(b'#') => {
                // Comments run to the end of the line.
                while let Some(byte) = next_byte(input)? {
                    if byte == b'\n' {
                        break;
                    }
                }
            }
            Some(byte) if byte.is_ascii_whitespace() => input.consume(1),
            _ => return Ok(()),
        }
    }
}

#[inline]
fn peek_byte<R: BufRead>(input: &mut R) -> io::Result<Option<u8>> {
    Ok(input.fill_buf()?.first().copied())
}

#[inline]
fn next_byte<R: BufRead>(input: &mut R) -> io::Result<Option<u8>> {
    let byte = peek_byte(input)?;
    if byte.is_some() {
        input.consume(1);
    }
    Ok(byte)
}

fn fill_exact<R: BufRead>(input: &mut R, buffer: &mut [u8]) -> CodecResult<()> {
    match input.read_exact(buffer) {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => {
            Err(PpmError::UnexpectedEof.into())
        }
        Err(error) => Err(error.into()),
    }
}
