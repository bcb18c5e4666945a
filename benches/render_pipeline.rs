use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};

use mandelbrot_explorer::core::actions::cancellation::NeverCancel;
use mandelbrot_explorer::core::actions::generate_pixel_buffer::generate_pixel_buffer::generate_pixel_buffer;
use mandelbrot_explorer::core::data::complex::Complex;
use mandelbrot_explorer::core::fractals::mandelbrot::algorithm::escape_time;
use mandelbrot_explorer::core::fractals::mandelbrot::colour_mapping::palette::Palette;
use mandelbrot_explorer::{
    ColouringMode, GradientPreset, RenderRequest, ViewState, render_frame,
};

const WIDTH: u32 = 320;
const HEIGHT: u32 = 200;
const MAX_ITERATIONS: u32 = 500;

fn request(mode: ColouringMode) -> RenderRequest {
    let view = ViewState::new(WIDTH, HEIGHT).expect("bench viewport is valid");
    let palette = Palette::generate(MAX_ITERATIONS as usize, &GradientPreset::MilkyWay.gradient(), 80);

    RenderRequest {
        pixel_rect: view.pixel_rect(),
        transform: view.combined_matrix(),
        max_iterations: MAX_ITERATIONS,
        mode,
        palette: Arc::new(palette),
    }
}

fn bench_escape_time(c: &mut Criterion) {
    let mut group = c.benchmark_group("escape_time");
    let boundary = Complex::new(-0.75, 0.1);

    group.bench_function("discrete_boundary", |b| {
        b.iter(|| escape_time(black_box(boundary), MAX_ITERATIONS, ColouringMode::Discrete))
    });
    group.bench_function("smooth_boundary", |b| {
        b.iter(|| escape_time(black_box(boundary), MAX_ITERATIONS, ColouringMode::Smooth))
    });

    group.finish();
}

fn bench_render_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_frame");
    group.sample_size(20);

    for mode in [ColouringMode::Discrete, ColouringMode::Smooth] {
        let request = request(mode);
        group.bench_function(mode.display_name(), |b| {
            b.iter(|| render_frame(black_box(&request), &NeverCancel).expect("render succeeds"))
        });
    }

    group.finish();
}

fn bench_composite(c: &mut Criterion) {
    let request = request(ColouringMode::Smooth);
    let frame = render_frame(&request, &NeverCancel).expect("render succeeds");

    c.bench_function("composite_smooth", |b| {
        b.iter(|| {
            generate_pixel_buffer(
                black_box(frame.iterations.values()),
                request.palette.as_ref(),
                request.pixel_rect,
                &NeverCancel,
            )
            .expect("composite succeeds")
        })
    });
}

fn bench_palette(c: &mut Criterion) {
    let gradient = GradientPreset::Sunset.gradient();

    c.bench_function("palette_generate_5000", |b| {
        b.iter(|| Palette::generate(black_box(5000), &gradient, 80))
    });
}

criterion_group!(
    benches,
    bench_escape_time,
    bench_render_frame,
    bench_composite,
    bench_palette
);
criterion_main!(benches);
