use criterion::{Criterion, black_box, criterion_group, criterion_main};
use qr_locate::ColorRaster;
use qr_locate::utils::grayscale::{rgb_to_grayscale, rgb_to_grayscale_parallel};

fn gradient_raster(width: u32, height: u32) -> ColorRaster {
    let rgb: Vec<u8> = (0..width * height * 3).map(|i| (i % 251) as u8).collect();
    ColorRaster::from_interleaved(&rgb, width, height).unwrap()
}

fn bench_rgb_to_grayscale_small(c: &mut Criterion) {
    let raster = gradient_raster(100, 100);
    c.bench_function("rgb_to_grayscale_100x100", |b| {
        b.iter(|| rgb_to_grayscale(black_box(&raster)))
    });
}

fn bench_rgb_to_grayscale_medium(c: &mut Criterion) {
    let raster = gradient_raster(640, 480);
    c.bench_function("rgb_to_grayscale_640x480", |b| {
        b.iter(|| rgb_to_grayscale(black_box(&raster)))
    });
}

fn bench_rgb_to_grayscale_large(c: &mut Criterion) {
    let raster = gradient_raster(1920, 1080);
    c.bench_function("rgb_to_grayscale_1920x1080", |b| {
        b.iter(|| rgb_to_grayscale(black_box(&raster)))
    });
}

fn bench_rgb_to_grayscale_parallel_medium(c: &mut Criterion) {
    let raster = gradient_raster(640, 480);
    c.bench_function("rgb_to_grayscale_parallel_640x480", |b| {
        b.iter(|| rgb_to_grayscale_parallel(black_box(&raster)))
    });
}

fn bench_rgb_to_grayscale_parallel_large(c: &mut Criterion) {
    let raster = gradient_raster(1920, 1080);
    c.bench_function("rgb_to_grayscale_parallel_1920x1080", |b| {
        b.iter(|| rgb_to_grayscale_parallel(black_box(&raster)))
    });
}

criterion_group!(
    benches,
    bench_rgb_to_grayscale_small,
    bench_rgb_to_grayscale_medium,
    bench_rgb_to_grayscale_large,
    bench_rgb_to_grayscale_parallel_medium,
    bench_rgb_to_grayscale_parallel_large
);
criterion_main!(benches);
