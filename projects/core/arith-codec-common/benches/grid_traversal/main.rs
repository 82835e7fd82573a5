use arith_codec_common::grid::{BlockedGrid, PlainGrid};
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Grid Traversal (2048x2048 u32)");

    // 16MB of cells
    let side = 2048;
    group.throughput(Throughput::Bytes((side * side * size_of::<u32>()) as u64));

    let mut plain = PlainGrid::<u32>::new(side, side).unwrap();
    plain.for_each_row_major_mut(|col, row, value| *value = (col ^ row) as u32);

    let mut blocked = BlockedGrid::<u32>::with_default_blocking(side, side).unwrap();
    blocked.for_each_block_major_mut(|col, row, value| *value = (col ^ row) as u32);

    group.bench_function("plain_row_major", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            plain.for_each_row_major(|_, _, value| sum += *value as u64);
            black_box(sum)
        })
    });

    group.bench_function("plain_col_major", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            plain.for_each_col_major(|_, _, value| sum += *value as u64);
            black_box(sum)
        })
    });

    group.bench_function("blocked_block_major", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            blocked.for_each_block_major(|_, _, value| sum += *value as u64);
            black_box(sum)
        })
    });

    // Random access by (col, row), as a column-major consumer would do it.
    group.bench_function("blocked_col_major_at", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for col in 0..side {
                for row in 0..side {
                    sum += *blocked.at(col, row).unwrap() as u64;
                }
            }
            black_box(sum)
        })
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
