//! Quantization table for average chroma.
//!
//! The table holds 40 monotonically increasing levels. Codewords store chroma as a 4-bit
//! index, so only the first 16 levels are ever produced by [`chroma_to_index`]; the remaining
//! entries extend the table towards the `+0.5` chroma limit and can only be reached through
//! [`index_to_chroma`].

use crate::{CodecError, CodecResult};

/// Number of entries in the chroma table.
pub const CHROMA_TABLE_LEN: usize = 40;

/// Number of entries addressable by a 4-bit codeword field.
pub const ADDRESSABLE_CHROMA_LEVELS: usize = 16;

const CHROMA_TABLE: [f32; CHROMA_TABLE_LEN] = [
    // Addressable levels, denser around zero where most chroma lies.
    -0.35, -0.20, -0.15, -0.10, -0.077, -0.055, -0.033, -0.011, //
    0.011, 0.033, 0.055, 0.077, 0.10, 0.15, 0.20, 0.35, //
    // Extended levels, evenly spaced up to the chroma limit.
    0.35625, 0.3625, 0.36875, 0.375, 0.38125, 0.3875, 0.39375, 0.40, //
    0.40625, 0.4125, 0.41875, 0.425, 0.43125, 0.4375, 0.44375, 0.45, //
    0.45625, 0.4625, 0.46875, 0.475, 0.48125, 0.4875, 0.49375, 0.50,
];

/// Returns the index of the addressable level closest to `chroma`.
///
/// Ties resolve to the lower index. `NaN` maps to index 0.
pub fn chroma_to_index(chroma: f32) -> u8 {
    let mut best = 0usize;
    let mut best_distance = f32::INFINITY;
    for (index, level) in CHROMA_TABLE[..ADDRESSABLE_CHROMA_LEVELS].iter().enumerate() {
        let distance = (chroma - level).abs();
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    best as u8
}

/// Returns the chroma level stored at `index`.
///
/// # Errors
///
/// [`CodecError::ChromaIndexOutOfRange`] if `index >= CHROMA_TABLE_LEN`.
pub fn index_to_chroma(index: usize) -> CodecResult<f32> {
    CHROMA_TABLE
        .get(index)
        .copied()
        .ok_or(CodecError::ChromaIndexOutOfRange(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[rstest]
    fn table_is_strictly_increasing() {
        assert!(CHROMA_TABLE.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[rstest]
    #[case::neutral(0.0, 7)]
    #[case::slightly_positive(0.012, 8)]
    #[case::exact_level(-0.077, 4)]
    #[case::far_negative(-0.5, 0)]
    #[case::far_positive(0.5, 15)]
    #[case::between_levels(0.26, 14)]
    #[case::not_a_number(f32::NAN, 0)]
    fn nearest_addressable_level(#[case] chroma: f32, #[case] expected: u8) {
        assert_eq!(chroma_to_index(chroma), expected);
    }

    #[rstest]
    fn addressable_levels_round_trip() {
        for index in 0..ADDRESSABLE_CHROMA_LEVELS {
            let chroma = index_to_chroma(index).unwrap();
            assert_eq!(chroma_to_index(chroma) as usize, index);
        }
    }

    #[rstest]
    fn extended_levels_are_readable() {
        assert_eq!(index_to_chroma(CHROMA_TABLE_LEN - 1).unwrap(), 0.5);
    }

    #[rstest]
    fn index_past_table_is_rejected() {
        assert!(matches!(
            index_to_chroma(CHROMA_TABLE_LEN),
            Err(CodecError::ChromaIndexOutOfRange(40))
        ));
    }
}
