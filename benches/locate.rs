use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qr_locate::{ColorRaster, DetectorConfig, ThresholdMode, detect_with_config};

/// Light frame with a checkerboard patch a third of its width in the middle
fn scene(width: u32, height: u32) -> ColorRaster {
    let mut raster = ColorRaster::solid(width, height, [225, 220, 205]).unwrap();
    let side = width.min(height) / 3;
    let (x0, y0) = ((width - side) / 2, (height - side) / 2);
    let cell = (side / 25).max(1);
    for y in 0..side {
        for x in 0..side {
            if ((x / cell) + (y / cell)) % 2 == 0 {
                raster.set_pixel((x0 + x) as usize, (y0 + y) as usize, [25, 25, 35]);
            }
        }
    }
    raster
}

fn bench_locate_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate");
    group.sample_size(20);
    for (width, height) in [(320, 240), (640, 480), (1280, 720)] {
        let raster = scene(width, height);
        let label = format!("{width}x{height}");
        group.bench_with_input(BenchmarkId::new("sequential", &label), &raster, |b, r| {
            b.iter(|| detect_with_config(black_box(r), &DetectorConfig::default()))
        });
        let parallel = DetectorConfig::default().with_parallel(true);
        group.bench_with_input(BenchmarkId::new("parallel", &label), &raster, |b, r| {
            b.iter(|| detect_with_config(black_box(r), &parallel))
        });
    }
    group.finish();
}

fn bench_locate_otsu(c: &mut Criterion) {
    let raster = scene(640, 480);
    let config = DetectorConfig::default().with_threshold(ThresholdMode::Otsu);
    c.bench_function("locate_otsu_640x480", |b| {
        b.iter(|| detect_with_config(black_box(&raster), &config))
    });
}

criterion_group!(benches, bench_locate_sizes, bench_locate_otsu);
criterion_main!(benches);
