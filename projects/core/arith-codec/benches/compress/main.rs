use arith_codec::pipeline::{compress, compress_image, decompress, decompress_image};
use arith_codec::{Blocking, CodecSettings, CodecSettingsBuilder, Image, Rgb};
use arith_codec_common::grid::{Grid2, GridLayout};
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

fn test_image(layout: GridLayout, width: usize, height: usize) -> Image {
    let mut image = Image::new(layout, width, height, 255).unwrap();
    image.pixels_mut().for_each_default_mut(|col, row, pixel| {
        *pixel = Rgb::new(
            (col % 256) as u16,
            (row % 256) as u16,
            ((col * row) % 256) as u16,
        );
    });
    image
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Compress (1024x1024 RGB)");

    let (width, height) = (1024, 1024);
    group.throughput(Throughput::Bytes((width * height * 3) as u64));

    let configurations = [
        ("plain_pixels", GridLayout::Plain, Blocking::Transform),
        ("blocked_pixels", GridLayout::Blocked, Blocking::Transform),
        ("default_color_blocking", GridLayout::Blocked, Blocking::Default),
    ];

    for (name, layout, blocking) in configurations {
        let settings = CodecSettingsBuilder::new()
            .pixel_layout(layout)
            .color_blocking(blocking)
            .build();
        let image = test_image(layout, width, height);

        group.bench_function(format!("compress_image_{name}"), |b| {
            b.iter(|| black_box(compress_image(image.clone(), &settings).unwrap()))
        });

        let blocks = compress_image(image.clone(), &settings).unwrap();
        group.bench_function(format!("decompress_image_{name}"), |b| {
            b.iter(|| black_box(decompress_image(blocks.clone(), &settings).unwrap()))
        });
    }

    // Whole streams, including PPM parsing and codeword framing.
    let settings = CodecSettings::default();
    let mut ppm = Vec::new();
    arith_codec::ppm::write_ppm(&mut ppm, &test_image(GridLayout::Plain, width, height)).unwrap();
    let mut compressed = Vec::new();
    compress(&ppm[..], &mut compressed, &settings).unwrap();

    group.bench_function("compress_stream", |b| {
        let mut output = Vec::with_capacity(compressed.len());
        b.iter(|| {
            output.clear();
            compress(black_box(&ppm[..]), &mut output, &settings).unwrap();
        })
    });

    group.bench_function("decompress_stream", |b| {
        let mut output = Vec::with_capacity(ppm.len());
        b.iter(|| {
            output.clear();
            decompress(black_box(&compressed[..]), &mut output, &settings).unwrap();
        })
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
