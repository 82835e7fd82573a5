//! # Codewords
//!
//! A [`QuantizedBlock`] is packed into a 32-bit word and written most significant byte first:
//!
//! ```text
//!  31       23 22   18 17   13 12    8 7  4 3  0
//! +-----------+-------+-------+-------+----+----+
//! |     a     |   b   |   c   |   d   | pb | pr |
//! +-----------+-------+-------+-------+----+----+
//! ```
//!
//! A compressed stream is a two line text header followed by one codeword per 2x2 block, in
//! row-major block order and without any padding.

use crate::error::HeaderError;
use crate::quantize::QuantizedBlock;
use crate::{CodecError, CodecResult};
use arith_codec_common::bitpack::{get_signed, get_unsigned, set_signed, set_unsigned};
use arith_codec_common::grid::PlainGrid;
use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use std::io::{BufRead, Read, Write};
use tracing::trace;

/// Size of one codeword in bytes.
pub const CODEWORD_BYTES: usize = 4;

/// First line of every compressed stream, including its newline.
pub const HEADER_MAGIC: &str = "COMP40 Compressed image format 2\n";

/// Longest accepted dimension line, newline included.
pub const MAX_DIMENSION_LINE: usize = 32;

#[derive(Clone, Copy)]
struct Field {
    width: u32,
    lsb: u32,
}

const A: Field = Field { width: 9, lsb: 23 };
const B: Field = Field { width: 5, lsb: 18 };
const C: Field = Field { width: 5, lsb: 13 };
const D: Field = Field { width: 5, lsb: 8 };
const PB: Field = Field { width: 4, lsb: 4 };
const PR: Field = Field { width: 4, lsb: 0 };

/// Packs `block` into a 32-bit word.
///
/// # Errors
///
/// [`CodecError::Bitpack`] if a field of `block` does not fit its bit width.
pub fn pack(block: &QuantizedBlock) -> CodecResult<u32> {
    let mut word = 0u64;
    word = set_unsigned(word, A.width, A.lsb, u64::from(block.a))?;
    word = set_signed(word, B.width, B.lsb, i64::from(block.b))?;
    word = set_signed(word, C.width, C.lsb, i64::from(block.c))?;
    word = set_signed(word, D.width, D.lsb, i64::from(block.d))?;
    word = set_unsigned(word, PB.width, PB.lsb, u64::from(block.pb))?;
    word = set_unsigned(word, PR.width, PR.lsb, u64::from(block.pr))?;

    // Every field lies below bit 32.
    Ok(word as u32)
}

/// Unpacks a 32-bit word produced by [`pack`].
pub fn unpack(word: u32) -> CodecResult<QuantizedBlock> {
    let word = u64::from(word);
    Ok(QuantizedBlock {
        a: get_unsigned(word, A.width, A.lsb)? as u16,
        b: get_signed(word, B.width, B.lsb)? as i8,
        c: get_signed(word, C.width, C.lsb)? as i8,
        d: get_signed(word, D.width, D.lsb)? as i8,
        pb: get_unsigned(word, PB.width, PB.lsb)? as u8,
        pr: get_unsigned(word, PR.width, PR.lsb)? as u8,
    })
}

/// Encodes `block` as 4 big-endian bytes.
pub fn encode(block: &QuantizedBlock) -> CodecResult<[u8; CODEWORD_BYTES]> {
    let mut bytes = [0u8; CODEWORD_BYTES];
    BigEndian::write_u32(&mut bytes, pack(block)?);
    Ok(bytes)
}

/// Decodes the codeword in the first 4 bytes of `bytes`.
///
/// # Errors
///
/// [`CodecError::TruncatedStream`] if fewer than 4 bytes are available.
pub fn decode(bytes: &[u8]) -> CodecResult<QuantizedBlock> {
    if bytes.len() < CODEWORD_BYTES {
        return Err(CodecError::TruncatedStream {
            expected: CODEWORD_BYTES,
            actual: bytes.len(),
        });
    }
    unpack(BigEndian::read_u32(bytes))
}

/// Writes the stream header for an image of `width` x `height` pixels.
pub fn write_header<W: Write>(output: &mut W, width: usize, height: usize) -> CodecResult<()> {
    writeln!(output, "{HEADER_MAGIC}{width} {height}")?;
    Ok(())
}

/// Reads a stream header and returns the declared `(width, height)` in pixels.
///
/// # Errors
///
/// - [`CodecError::TruncatedStream`] if the input ends inside the header.
/// - [`CodecError::InvalidHeader`] if the header is malformed or declares odd dimensions.
pub fn read_header<R: BufRead>(input: &mut R) -> CodecResult<(usize, usize)> {
    let mut magic = Vec::with_capacity(HEADER_MAGIC.len());
    input
        .by_ref()
        .take(HEADER_MAGIC.len() as u64)
        .read_to_end(&mut magic)?;
    if !HEADER_MAGIC.as_bytes().starts_with(&magic) {
        return Err(HeaderError::Magic.into());
    }
    if magic.len() < HEADER_MAGIC.len() {
        return Err(CodecError::TruncatedStream {
            expected: HEADER_MAGIC.len(),
            actual: magic.len(),
        });
    }

    let mut line = Vec::new();
    input
        .by_ref()
        .take(MAX_DIMENSION_LINE as u64)
        .read_until(b'\n', &mut line)?;
    let Some(dimensions) = line.strip_suffix(b"\n") else {
        if line.len() < MAX_DIMENSION_LINE {
            let actual = HEADER_MAGIC.len() + line.len();
            return Err(CodecError::TruncatedStream {
                expected: actual + 1,
                actual,
            });
        }
        return Err(HeaderError::Dimensions.into());
    };

    let dimensions = core::str::from_utf8(dimensions).map_err(|_| HeaderError::Dimensions)?;
    let (width, height) = dimensions
        .split_once(' ')
        .ok_or(HeaderError::Dimensions)?;
    let (width, height) = (parse_dimension(width)?, parse_dimension(height)?);
    trace!(width, height, "read compressed header");

    if width % 2 != 0 || height % 2 != 0 {
        return Err(HeaderError::OddDimensions { width, height }.into());
    }
    Ok((width as usize, height as usize))
}

/// Writes the header and one codeword per block of `blocks`.
pub fn write_compressed<W: Write>(
    output: &mut W,
    blocks: &PlainGrid<QuantizedBlock>,
) -> CodecResult<()> {
    write_header(output, blocks.width() * 2, blocks.height() * 2)?;
    for block in blocks.as_slice() {
        output.write_u32::<BigEndian>(pack(block)?)?;
    }
    Ok(())
}

/// Reads a header followed by the codewords it announces.
///
/// Bytes after the last codeword are left unread.
///
/// # Errors
///
/// [`CodecError::TruncatedStream`] if the input holds fewer codewords than the header
/// declares, plus any error of [`read_header`].
pub fn read_compressed<R: BufRead>(input: &mut R) -> CodecResult<PlainGrid<QuantizedBlock>> {
    let (width, height) = read_header(input)?;
    let (blocks_wide, blocks_high) = (width / 2, height / 2);
    let expected = blocks_wide
        .checked_mul(blocks_high)
        .and_then(|blocks| blocks.checked_mul(CODEWORD_BYTES))
        .ok_or(HeaderError::Dimensions)?;

    // The grid is only allocated once the whole body has arrived.
    let mut body = Vec::new();
    input.by_ref().take(expected as u64).read_to_end(&mut body)?;
    if body.len() < expected {
        return Err(CodecError::TruncatedStream {
            expected,
            actual: body.len(),
        });
    }

    let mut blocks = PlainGrid::new(blocks_wide, blocks_high)?;
    for (block, codeword) in blocks
        .as_mut_slice()
        .iter_mut()
        .zip(body.chunks_exact(CODEWORD_BYTES))
    {
        *block = decode(codeword)?;
    }
    Ok(blocks)
}

fn parse_dimension(text: &str) -> Result<u32, HeaderError> {
    if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(HeaderError::Dimensions);
    }
    text.parse().map_err(|_| HeaderError::Dimensions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    fn block(a: u16, b: i8, c: i8, d: i8, pb: u8, pr: u8) -> QuantizedBlock {
        QuantizedBlock { a, b, c, d, pb, pr }
    }

    #[rstest]
    #[case::zero(block(0, 0, 0, 0, 0, 0), [0x00, 0x00, 0x00, 0x00])]
    #[case::max_luma(block(511, 0, 0, 0, 0, 0), [0xFF, 0x80, 0x00, 0x00])]
    #[case::extremes(block(511, -15, 15, 0, 15, 0), [0xFF, 0xC5, 0xE0, 0xF0])]
    #[case::negative_one(block(0, -1, -1, -1, 0, 0), [0x00, 0x7F, 0xFF, 0x00])]
    #[case::chroma(block(0, 0, 0, 0, 7, 8), [0x00, 0x00, 0x00, 0x78])]
    fn encode_matches_layout(#[case] block: QuantizedBlock, #[case] expected: [u8; 4]) {
        assert_eq!(encode(&block).unwrap(), expected);
        assert_eq!(decode(&expected).unwrap(), block);
    }

    #[rstest]
    #[case::luma_too_large(block(512, 0, 0, 0, 0, 0))]
    #[case::gradient_too_large(block(0, 16, 0, 0, 0, 0))]
    #[case::gradient_too_small(block(0, 0, -17, 0, 0, 0))]
    #[case::chroma_too_large(block(0, 0, 0, 0, 16, 0))]
    fn out_of_range_fields_overflow(#[case] block: QuantizedBlock) {
        assert!(matches!(encode(&block), Err(CodecError::Bitpack(_))));
    }

    #[rstest]
    #[case::empty(&[])]
    #[case::three_bytes(&[0xFF, 0x00, 0x12])]
    fn short_codeword_is_truncated(#[case] bytes: &[u8]) {
        assert!(matches!(
            decode(bytes),
            Err(CodecError::TruncatedStream { expected: 4, actual }) if actual == bytes.len()
        ));
    }

    #[rstest]
    fn header_round_trip() {
        let mut output = Vec::new();
        write_header(&mut output, 640, 480).unwrap();
        assert_eq!(output, b"COMP40 Compressed image format 2\n640 480\n");
        assert_eq!(read_header(&mut &output[..]).unwrap(), (640, 480));
    }

    #[rstest]
    #[case::wrong_magic(&b"COMP41 Compressed image format 2\n4 2\n"[..], HeaderError::Magic)]
    #[case::ppm_input(&b"P6\n4 2\n255\n"[..], HeaderError::Magic)]
    #[case::missing_height(&b"COMP40 Compressed image format 2\n4\n"[..], HeaderError::Dimensions)]
    #[case::signed_width(&b"COMP40 Compressed image format 2\n+4 2\n"[..], HeaderError::Dimensions)]
    #[case::extra_field(&b"COMP40 Compressed image format 2\n4 2 2\n"[..], HeaderError::Dimensions)]
    #[case::too_large(&b"COMP40 Compressed image format 2\n4294967296 2\n"[..], HeaderError::Dimensions)]
    #[case::overlong(&b"COMP40 Compressed image format 2\n0000000000000000000000000000000000 2\n"[..], HeaderError::Dimensions)]
    #[case::odd(&b"COMP40 Compressed image format 2\n5 2\n"[..], HeaderError::OddDimensions { width: 5, height: 2 })]
    fn malformed_headers_are_rejected(#[case] input: &[u8], #[case] expected: HeaderError) {
        match read_header(&mut &input[..]) {
            Err(CodecError::InvalidHeader(error)) => assert_eq!(error, expected),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[rstest]
    #[case::empty(&b""[..])]
    #[case::partial_magic(&b"COMP40 Comp"[..])]
    #[case::missing_dimensions(&b"COMP40 Compressed image format 2\n"[..])]
    #[case::unterminated_dimensions(&b"COMP40 Compressed image format 2\n4 2"[..])]
    fn short_headers_are_truncated(#[case] input: &[u8]) {
        assert!(matches!(
            read_header(&mut &input[..]),
            Err(CodecError::TruncatedStream { .. })
        ));
    }

    #[rstest]
    fn stream_round_trip() {
        let blocks = PlainGrid::from_fn(3, 2, |col, row| {
            block((col * 100 + row) as u16, col as i8 - 1, -(row as i8), 2, col as u8, 15)
        })
        .unwrap();

        let mut output = Vec::new();
        write_compressed(&mut output, &blocks).unwrap();
        assert!(output.starts_with(b"COMP40 Compressed image format 2\n6 4\n"));
        assert_eq!(output.len(), HEADER_MAGIC.len() + "6 4\n".len() + 6 * CODEWORD_BYTES);

        assert_eq!(read_compressed(&mut &output[..]).unwrap(), blocks);
    }

    #[rstest]
    fn missing_codewords_are_truncated() {
        let mut input = b"COMP40 Compressed image format 2\n4 4\n".to_vec();
        input.extend_from_slice(&[0u8; 15]);
        assert!(matches!(
            read_compressed(&mut &input[..]),
            Err(CodecError::TruncatedStream {
                expected: 16,
                actual: 15
            })
        ));
    }

    #[rstest]
    fn empty_image_has_no_codewords() {
        let input = b"COMP40 Compressed image format 2\n0 0\n";
        let blocks = read_compressed(&mut &input[..]).unwrap();
        assert_eq!((blocks.width(), blocks.height()), (0, 0));
    }
}
