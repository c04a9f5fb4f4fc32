//! Benchmarks for the white-to-transparent classifier and PNG encoding.
//!
//! Run with: cargo bench -p whiteout-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{ImageBuffer, Rgba, RgbaImage};
use whiteout_core::classify::white_to_transparent;
use whiteout_core::pipeline::PngWriter;

/// Half white background, half gradient: a typical scanned-logo shape.
fn sample_image(size: u32) -> RgbaImage {
    ImageBuffer::from_fn(size, size, |x, y| {
        if x < size / 2 {
            Rgba([250, 252, 249, 255])
        } else {
            Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
        }
    })
}

fn benchmark_classify(c: &mut Criterion) {
    let img = sample_image(1024);

    c.bench_function("white_to_transparent_1024", |b| {
        b.iter_batched(
            || img.clone(),
            |img| white_to_transparent(black_box(img), black_box(240)),
            criterion::BatchSize::LargeInput,
        )
    });
}

fn benchmark_encode(c: &mut Criterion) {
    let img = white_to_transparent(sample_image(512), 240);

    c.bench_function("png_encode_512", |b| {
        b.iter(|| PngWriter::encode(black_box(&img), None).unwrap())
    });
}

criterion_group!(benches, benchmark_classify, benchmark_encode);
criterion_main!(benches);
