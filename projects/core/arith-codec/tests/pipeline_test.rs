use arith_codec::codeword::{decode, HEADER_MAGIC};
use arith_codec::pipeline::{compress, decompress};
use arith_codec::ppm::{read_ppm, write_ppm};
use arith_codec::quantize::QuantizedBlock;
use arith_codec::{diff, CodecError, CodecSettings, HeaderError, Image, Rgb};
use arith_codec_common::grid::{Grid2, GridLayout};
use rstest::rstest;

fn image_from_fn(width: usize, height: usize, pixel: impl Fn(usize, usize) -> Rgb) -> Image {
    let mut image = Image::new(GridLayout::Plain, width, height, 255).unwrap();
    image
        .pixels_mut()
        .for_each_default_mut(|col, row, value| *value = pixel(col, row));
    image
}

fn to_ppm(image: &Image) -> Vec<u8> {
    let mut ppm = Vec::new();
    write_ppm(&mut ppm, image).unwrap();
    ppm
}

fn compress_bytes(ppm: &[u8]) -> Vec<u8> {
    let mut compressed = Vec::new();
    compress(ppm, &mut compressed, &CodecSettings::default()).unwrap();
    compressed
}

fn decompress_bytes(compressed: &[u8]) -> Image {
    let mut ppm = Vec::new();
    decompress(compressed, &mut ppm, &CodecSettings::default()).unwrap();
    read_ppm(&mut &ppm[..], GridLayout::Plain).unwrap()
}

fn codewords(compressed: &[u8], header: &str) -> Vec<QuantizedBlock> {
    let body = compressed
        .strip_prefix(header.as_bytes())
        .expect("header mismatch");
    assert_eq!(body.len() % 4, 0);
    body.chunks_exact(4).map(|word| decode(word).unwrap()).collect()
}

#[rstest]
fn solid_gray_stays_gray() {
    let gray = image_from_fn(4, 2, |_, _| Rgb::new(128, 128, 128));
    let compressed = compress_bytes(&to_ppm(&gray));

    // a = 257, no gradients, both chroma indices on the smallest positive level.
    let header = format!("{HEADER_MAGIC}4 2\n");
    let body = compressed.strip_prefix(header.as_bytes()).unwrap();
    assert_eq!(body, [0x80, 0x80, 0x00, 0x88, 0x80, 0x80, 0x00, 0x88]);

    let blocks = codewords(&compressed, &header);
    assert!(blocks.iter().all(|block| (block.b, block.c, block.d) == (0, 0, 0)));

    let restored = decompress_bytes(&compressed);
    assert_eq!((restored.width(), restored.height()), (4, 2));
    restored
        .pixels()
        .for_each_default(|_, _, pixel| assert_eq!(*pixel, Rgb::new(132, 125, 133)));
}

#[rstest]
fn odd_input_is_trimmed_before_compression() {
    let image = image_from_fn(5, 3, |col, row| Rgb::new((col * 40) as u16, (row * 90) as u16, 30));
    let compressed = compress_bytes(&to_ppm(&image));
    let blocks = codewords(&compressed, &format!("{HEADER_MAGIC}4 2\n"));
    assert_eq!(blocks.len(), 2);

    let restored = decompress_bytes(&compressed);
    assert_eq!((restored.width(), restored.height()), (4, 2));
}

#[rstest]
fn smooth_image_survives_round_trip() {
    let image = image_from_fn(32, 24, |col, row| {
        Rgb::new((col * 8) as u16, (row * 10) as u16, ((col + row) * 4) as u16)
    });
    let restored = decompress_bytes(&compress_bytes(&to_ppm(&image)));
    assert_eq!((restored.width(), restored.height()), (32, 24));
    assert!(diff::rms_difference(&image, &restored).unwrap() < 0.05);
}

#[rstest]
fn recompression_is_stable() {
    let image = image_from_fn(8, 8, |col, row| Rgb::new((col * 30) as u16, 100, (row * 30) as u16));
    let once = compress_bytes(&to_ppm(&image));
    let restored = decompress_bytes(&once);
    let twice = compress_bytes(&to_ppm(&restored));
    let restored_twice = decompress_bytes(&twice);
    assert!(diff::rms_difference(&restored, &restored_twice).unwrap() < 0.02);
}

#[rstest]
fn truncated_stream_is_rejected() {
    let gray = image_from_fn(4, 4, |_, _| Rgb::new(10, 20, 30));
    let compressed = compress_bytes(&to_ppm(&gray));

    let mut output = Vec::new();
    let result = decompress(
        &compressed[..compressed.len() - 1],
        &mut output,
        &CodecSettings::default(),
    );
    assert!(matches!(
        result,
        Err(CodecError::TruncatedStream {
            expected: 16,
            actual: 15
        })
    ));
    assert!(output.is_empty());
}

#[rstest]
#[case::ppm_given_to_decompress(&b"P6\n2 2\n255\n000000000000"[..], HeaderError::Magic)]
#[case::odd_dimensions(&b"COMP40 Compressed image format 2\n3 2\n\0\0\0\0"[..], HeaderError::OddDimensions { width: 3, height: 2 })]
fn bad_headers_are_rejected(#[case] input: &[u8], #[case] expected: HeaderError) {
    let mut output = Vec::new();
    match decompress(input, &mut output, &CodecSettings::default()) {
        Err(CodecError::InvalidHeader(error)) => assert_eq!(error, expected),
        other => panic!("unexpected result {other:?}"),
    }
    assert!(output.is_empty());
}

#[rstest]
fn extreme_codeword_decodes_to_clamped_pixels() {
    // a = 511, b = -15, c = 15, d = 0, strongest blue and weakest red chroma.
    let mut compressed = format!("{HEADER_MAGIC}2 2\n").into_bytes();
    compressed.extend_from_slice(&[0xFF, 0xC5, 0xE0, 0xF0]);

    let restored = decompress_bytes(&compressed);
    assert_eq!((restored.width(), restored.height()), (2, 2));
    assert_eq!(*restored.pixels().at(1, 0).unwrap(), Rgb::new(255, 255, 255));

    let bottom_left = *restored.pixels().at(0, 1).unwrap();
    assert_eq!(bottom_left.red, 0);
    assert_eq!(bottom_left.blue, 255);
}
