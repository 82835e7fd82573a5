//! Errors raised by the codec.

use arith_codec_common::bitpack::BitpackError;
use arith_codec_common::grid::GridError;
use thiserror::Error;

/// Result type used throughout the codec.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors raised while compressing or decompressing an image.
///
/// Every error aborts the operation; no partial output is produced.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A grid could not be created or was indexed out of bounds.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// A bit field was out of range or a value did not fit its field.
    #[error(transparent)]
    Bitpack(#[from] BitpackError),

    /// The input ended before a complete header or codeword stream was read.
    #[error("Truncated stream: expected at least {expected} bytes, got {actual}")]
    TruncatedStream {
        /// Minimum number of bytes required
        expected: usize,
        /// Number of bytes available
        actual: usize,
    },

    /// The compressed header did not match the expected format.
    #[error("Invalid compressed header: {0}")]
    InvalidHeader(#[from] HeaderError),

    /// The PPM input could not be parsed.
    #[error("Invalid PPM image: {0}")]
    InvalidPpm(#[from] PpmError),

    /// The block transform requires even dimensions.
    #[error("Image dimensions {width}x{height} are not even")]
    OddDimensions {
        /// Width of the offending grid
        width: usize,
        /// Height of the offending grid
        height: usize,
    },

    /// The image has no complete 2x2 block to encode or decode.
    #[error("Image of {width}x{height} pixels has no 2x2 block")]
    EmptyImage {
        /// Width after trimming
        width: usize,
        /// Height after trimming
        height: usize,
    },

    /// A chroma index outside of the chroma table was requested.
    #[error("Chroma index {0} is outside of the chroma table")]
    ChromaIndexOutOfRange(usize),

    /// Two images are too different in size to be compared.
    #[error("Cannot compare a {first_width}x{first_height} image with a {second_width}x{second_height} image")]
    DimensionMismatch {
        /// Width of the first image
        first_width: usize,
        /// Height of the first image
        first_height: usize,
        /// Width of the second image
        second_width: usize,
        /// Height of the second image
        second_height: usize,
    },

    /// Reading or writing a stream failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The part of a compressed header which was malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// The first line is not `COMP40 Compressed image format 2`.
    #[error("missing format line")]
    Magic,

    /// The second line is not `<width> <height>`.
    #[error("malformed dimension line")]
    Dimensions,

    /// The declared dimensions are not both even.
    #[error("dimensions {width}x{height} are not even")]
    OddDimensions {
        /// Declared width
        width: u32,
        /// Declared height
        height: u32,
    },
}

/// Reasons a PPM image is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PpmError {
    /// The file does not start with `P3` or `P6`.
    #[error("unsupported magic number")]
    BadMagic,

    /// The file ended inside the header or raster.
    #[error("unexpected end of file")]
    UnexpectedEof,

    /// A header field or plain sample is not a decimal number.
    #[error("expected a decimal number")]
    ExpectedNumber,

    /// A number does not fit the field it was read for.
    #[error("number is too large")]
    NumberTooLarge,

    /// Width or height is zero.
    #[error("image dimensions must be greater than zero")]
    ZeroDimension,

    /// The maximum sample value is outside `1..=65535`.
    #[error("maximum sample value {0} is outside 1..=65535")]
    InvalidMaxval(u32),

    /// A sample is larger than the declared maximum.
    #[error("sample {sample} exceeds maximum {maxval}")]
    SampleOutOfRange {
        /// The offending sample
        sample: u32,
        /// Declared maximum sample value
        maxval: u16,
    },

    /// A raw image header is not terminated by a single whitespace byte.
    #[error("missing whitespace before raster")]
    MissingRasterSeparator,
}
