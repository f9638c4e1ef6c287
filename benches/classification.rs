use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgb, RgbImage};
use palette::Srgb;
use yolk_scan::YolkAnalyzer;

fn synthetic_yolk(width: u32, height: u32) -> RgbImage {
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    let radius = width.min(height) as f32 / 4.0;
    RgbImage::from_fn(width, height, |x, y| {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        if dx * dx + dy * dy <= radius * radius {
            Rgb([253, 168, 1])
        } else {
            Rgb([128, 128, 128])
        }
    })
}

fn benchmark_classify_rgb(c: &mut Criterion) {
    let analyzer = YolkAnalyzer::new();
    c.bench_function("classify_rgb", |b| {
        b.iter(|| analyzer.classify_rgb(black_box(Srgb::new(254, 185, 6))))
    });
}

fn benchmark_classify_point(c: &mut Criterion) {
    let analyzer = YolkAnalyzer::new();
    let image = synthetic_yolk(640, 480);
    c.bench_function("classify_point", |b| {
        b.iter(|| analyzer.classify_point(black_box(&image), black_box(320), black_box(240)))
    });
}

fn benchmark_classify_auto(c: &mut Criterion) {
    let analyzer = YolkAnalyzer::new();
    let image = synthetic_yolk(320, 240);
    c.bench_function("classify_auto_320x240", |b| {
        b.iter(|| analyzer.classify_auto(black_box(&image)))
    });
}

criterion_group!(
    benches,
    benchmark_classify_rgb,
    benchmark_classify_point,
    benchmark_classify_auto
);
criterion_main!(benches);
