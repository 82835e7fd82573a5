#![no_main]

// Writing a field and reading it back returns the value and leaves every other bit alone.

use arith_codec_common::bitpack::*;
use libfuzzer_sys::{arbitrary, fuzz_target};

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct FieldWrite {
    pub word: u64,
    pub width: u8,
    pub lsb: u8,
    pub value: u64,
}

fuzz_target!(|input: FieldWrite| {
    let width = u32::from(input.width % 65);
    let lsb = u32::from(input.lsb % 65);
    if width + lsb > WORD_BITS {
        assert!(get_unsigned(input.word, width, lsb).is_err());
        return;
    }

    let mask = if width == 0 {
        0
    } else {
        (u64::MAX >> (WORD_BITS - width)) << lsb
    };

    // Unsigned
    if fits_unsigned(input.value, width) {
        let word = set_unsigned(input.word, width, lsb, input.value).unwrap();
        assert_eq!(get_unsigned(word, width, lsb).unwrap(), input.value);
        assert_eq!(word & !mask, input.word & !mask);
    } else {
        assert!(set_unsigned(input.word, width, lsb, input.value).is_err());
    }

    // Signed
    let signed = input.value as i64;
    if fits_signed(signed, width) {
        let word = set_signed(input.word, width, lsb, signed).unwrap();
        assert_eq!(get_signed(word, width, lsb).unwrap(), signed);
        assert_eq!(word & !mask, input.word & !mask);
    } else {
        assert!(set_signed(input.word, width, lsb, signed).is_err());
    }
});
