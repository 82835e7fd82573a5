#![no_main]

// Every 32-bit word decodes to a block that encodes back to the same bytes.

use arith_codec::codeword::{decode, encode};
use arith_codec::quantize::dequantize_block;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|bytes: [u8; 4]| {
    let block = decode(&bytes).unwrap();
    assert_eq!(encode(&block).unwrap(), bytes);

    // Out of range chroma indices are reported, never looked up.
    let _ = dequantize_block(&block);
});
