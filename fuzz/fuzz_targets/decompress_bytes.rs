#![no_main]

// Arbitrary input must be rejected with an error, never a panic.

use arith_codec::pipeline::decompress;
use arith_codec::CodecSettings;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut output = Vec::new();
    if decompress(data, &mut output, &CodecSettings::default()).is_err() {
        assert!(output.is_empty());
    }
});
