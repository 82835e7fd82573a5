//! # Bit Field Packing
//!
//! Extracts and inserts fixed-width fields inside a single 64-bit word.
//!
//! A field is described by its `width` (number of bits, `0..=64`) and `lsb`, the index of its
//! least significant bit. Fields must fit inside the word, i.e. `lsb + width <= 64`, otherwise
//! the operation fails with [`BitpackError::InvalidField`].
//!
//! ```text
//!  63                lsb + width      lsb              0
//! [ untouched bits ][     field bits     ][ untouched ]
//! ```
//!
//! Unsigned fields are zero extended on extraction. Signed fields are stored as two's
//! complement and sign extended from bit `width - 1` of the field on extraction.
//!
//! ## Usage
//!
//! ```
//! use arith_codec_common::bitpack::*;
//!
//! let word = set_unsigned(0, 9, 23, 511).unwrap();
//! let word = set_signed(word, 5, 18, -15).unwrap();
//! assert_eq!(get_unsigned(word, 9, 23).unwrap(), 511);
//! assert_eq!(get_signed(word, 5, 18).unwrap(), -15);
//! ```
//!
//! ## Shifts
//!
//! Shifting a `u64` by 64 is not defined in Rust (it panics in debug builds), yet widths of
//! 64 and shifts by `lsb == 64` are legal here. All shifts in this module saturate to `0` for a
//! shift of 64 or more.

use thiserror::Error;

/// Number of bits in the word the fields live in.
pub const WORD_BITS: u32 = u64::BITS;

/// Errors raised by the bit field operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BitpackError {
    /// The field does not fit inside a 64-bit word.
    #[error("Invalid bit field: width {width} at lsb {lsb} does not fit in a 64-bit word")]
    InvalidField {
        /// Requested field width in bits
        width: u32,
        /// Requested least significant bit
        lsb: u32,
    },

    /// A value does not fit in the requested field width.
    #[error("Overflow packing bits: value does not fit in {width} bits")]
    Overflow {
        /// Width of the field that was being written
        width: u32,
    },
}

/// Returns `true` if `value` can be represented as an unsigned integer of `width` bits.
///
/// Widths of 64 and above accept every value.
#[inline]
pub fn fits_unsigned(value: u64, width: u32) -> bool {
    if width >= WORD_BITS {
        return true;
    }

    value <= shift_left(1, width) - 1
}

/// Returns `true` if `value` can be represented as a two's complement integer of `width` bits.
///
/// A width of `0` only accepts `0`; widths of 64 and above accept every value.
#[inline]
pub fn fits_signed(value: i64, width: u32) -> bool {
    if width >= WORD_BITS {
        return true;
    }
    if width == 0 {
        return value == 0;
    }

    let half = shift_left(1, width - 1) as i64;
    (-half..half).contains(&value)
}

/// Extracts the unsigned `width`-bit field starting at bit `lsb`.
///
/// A width of `0` always yields `0`.
///
/// # Errors
///
/// [`BitpackError::InvalidField`] if `lsb + width > 64`.
#[inline]
pub fn get_unsigned(word: u64, width: u32, lsb: u32) -> Result<u64, BitpackError> {
    check_field(width, lsb)?;
    if width == 0 {
        return Ok(0);
    }

    Ok(shift_right(word, lsb) & field_mask(width))
}

/// Extracts the signed `width`-bit field starting at bit `lsb`, sign extending it.
///
/// A width of `0` always yields `0`.
///
/// # Errors
///
/// [`BitpackError::InvalidField`] if `lsb + width > 64`.
#[inline]
pub fn get_signed(word: u64, width: u32, lsb: u32) -> Result<i64, BitpackError> {
    let raw = get_unsigned(word, width, lsb)?;
    if width == 0 {
        return Ok(0);
    }

    let sign_bit = shift_left(1, width - 1);
    if raw & sign_bit == 0 {
        Ok(raw as i64)
    } else {
        Ok((shift_left(u64::MAX, width) | raw) as i64)
    }
}

/// Returns `word` with the unsigned `width`-bit field at `lsb` replaced by `value`.
///
/// Bits outside `[lsb, lsb + width)` are left untouched. A width of `0` returns `word`
/// unchanged; a width of `64` returns `value` itself.
///
/// # Errors
///
/// - [`BitpackError::InvalidField`] if `lsb + width > 64`.
/// - [`BitpackError::Overflow`] if `value` does not fit in `width` bits.
#[inline]
pub fn set_unsigned(word: u64, width: u32, lsb: u32, value: u64) -> Result<u64, BitpackError> {
    check_field(width, lsb)?;
    if !fits_unsigned(value, width) {
        return Err(BitpackError::Overflow { width });
    }

    if width == 0 {
        return Ok(word);
    }
    if width == WORD_BITS {
        return Ok(value);
    }

    let keep = !shift_left(field_mask(width), lsb);
    Ok(shift_left(value, lsb) | (word & keep))
}

/// Returns `word` with the signed `width`-bit field at `lsb` replaced by `value`.
///
/// The value is reduced to its `width`-bit two's complement pattern and written with
/// [`set_unsigned`].
///
/// # Errors
///
/// - [`BitpackError::InvalidField`] if `lsb + width > 64`.
/// - [`BitpackError::Overflow`] if `value` does not fit in `width` signed bits.
#[inline]
pub fn set_signed(word: u64, width: u32, lsb: u32, value: i64) -> Result<u64, BitpackError> {
    check_field(width, lsb)?;
    if !fits_signed(value, width) {
        return Err(BitpackError::Overflow { width });
    }

    if width == 0 {
        return Ok(word);
    }
    if width == WORD_BITS {
        return Ok(value as u64);
    }

    set_unsigned(word, width, lsb, (value as u64) & field_mask(width))
}

#[inline]
fn check_field(width: u32, lsb: u32) -> Result<(), BitpackError> {
    match width.checked_add(lsb) {
        Some(end) if end <= WORD_BITS => Ok(()),
        _ => Err(BitpackError::InvalidField { width, lsb }),
    }
}

/// Mask of `width` low bits; `width` must be at most 64.
#[inline]
fn field_mask(width: u32) -> u64 {
    if width >= WORD_BITS {
        u64::MAX
    } else {
        shift_left(1, width) - 1
    }
}

/// `value << shift`, yielding `0` once every bit has been shifted out.
#[inline]
fn shift_left(value: u64, shift: u32) -> u64 {
    value.checked_shl(shift).unwrap_or(0)
}

/// `value >> shift` (logical), yielding `0` once every bit has been shifted out.
#[inline]
fn shift_right(value: u64, shift: u32) -> u64 {
    value.checked_shr(shift).unwrap_or(0)
}
