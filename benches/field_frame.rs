//! Benchmarks for the per-frame CPU work.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;

use glasscape::config::{DisintegrationConfig, FieldConfig};
use glasscape::disintegration::{placeholder, DisintegrationField};
use glasscape::hologram::HologramRenderer;
use glasscape::particle_field::ParticleField;
use glasscape::surface::{Canvas, DrawList, Surface};

fn bench_particle_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("particle_field");
    let size = Vec2::new(800.0, 600.0);
    let pointer = Vec2::new(400.0, 300.0);

    for count in [40, 80, 160] {
        let config = FieldConfig::default().with_count(count).with_seed(7);

        group.bench_with_input(BenchmarkId::new("tick", count), &config, |b, config| {
            let mut field = ParticleField::with_config(size, config.clone()).unwrap();
            b.iter(|| field.tick(black_box(pointer)))
        });

        group.bench_with_input(BenchmarkId::new("links", count), &config, |b, config| {
            let field = ParticleField::with_config(size, config.clone()).unwrap();
            b.iter(|| black_box(field.links()))
        });
    }

    group.bench_function("frame_draw_list", |b| {
        let mut field =
            ParticleField::with_config(size, FieldConfig::default().with_seed(7)).unwrap();
        let mut surface = DrawList::new(800, 600).unwrap();
        b.iter(|| {
            surface.clear();
            field.frame(black_box(pointer), &mut surface);
        })
    });

    group.bench_function("frame_canvas", |b| {
        let mut field =
            ParticleField::with_config(size, FieldConfig::default().with_seed(7)).unwrap();
        let mut canvas = Canvas::new(800, 600).unwrap();
        b.iter(|| {
            canvas.clear();
            field.frame(black_box(pointer), &mut canvas);
        })
    });

    group.finish();
}

fn bench_hologram(c: &mut Criterion) {
    let renderer = HologramRenderer::default();
    c.bench_function("hologram_frame", |b| {
        let mut t = 0.0f32;
        b.iter(|| {
            t += 1.0 / 60.0;
            black_box(renderer.frame(Vec2::new(400.0, 300.0), t))
        })
    });
}

fn bench_disintegration(c: &mut Criterion) {
    let mut group = c.benchmark_group("disintegration");
    let config = DisintegrationConfig::default().with_seed(7);
    let image = placeholder(600, 600);

    group.bench_function("sample", |b| {
        b.iter(|| black_box(DisintegrationField::from_image(&image, config.clone()).unwrap()))
    });

    group.bench_function("tick", |b| {
        let mut field = DisintegrationField::from_image(&image, config.clone()).unwrap();
        let mut progress = 0.0f32;
        b.iter(|| {
            progress = (progress + 0.01) % 1.0;
            field.tick(black_box(progress));
        })
    });

    group.finish();
}

criterion_group!(benches, bench_particle_field, bench_hologram, bench_disintegration);
criterion_main!(benches);
