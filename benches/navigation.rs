//! Benchmarks for overlay navigation and swipe classification.

use std::hint::black_box;
use std::path::PathBuf;

use criterion::{criterion_group, criterion_main, Criterion};
use egui::{Pos2, TouchId, TouchPhase};

use glidewall::gesture::SwipeTracker;
use glidewall::navigator::{GalleryEntry, ImageSequence, Navigator};

fn sequence(n: usize) -> ImageSequence {
    ImageSequence::new(
        (0..n)
            .map(|i| GalleryEntry {
                path: PathBuf::from(format!("img_{i:05}.jpg")),
                caption: format!("img_{i:05}.jpg"),
            })
            .collect(),
    )
}

fn bench_navigation(c: &mut Criterion) {
    let mut group = c.benchmark_group("navigation");

    group.bench_function("next_with_wraparound_1k", |b| {
        let mut nav = Navigator::new(sequence(1000));
        nav.open(0);
        b.iter(|| {
            nav.next();
            black_box(nav.current_index());
        });
    });

    group.bench_function("open_far_out_of_range", |b| {
        let mut nav = Navigator::new(sequence(1000));
        b.iter(|| {
            nav.open(black_box(usize::MAX / 2));
            black_box(nav.counter_text());
            nav.close();
        });
    });

    group.bench_function("counter_text", |b| {
        let mut nav = Navigator::new(sequence(1000));
        nav.open(500);
        b.iter(|| black_box(nav.counter_text()));
    });

    group.finish();
}

fn bench_gesture(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture");

    group.bench_function("classify_horizontal_swipe", |b| {
        let mut tracker = SwipeTracker::new();
        let id = TouchId(1);
        b.iter(|| {
            tracker.on_touch(id, TouchPhase::Start, Pos2::new(200.0, 100.0));
            for step in 1..=8 {
                tracker.on_touch(
                    id,
                    TouchPhase::Move,
                    Pos2::new(200.0 - step as f32 * 12.0, 100.0),
                );
            }
            black_box(tracker.on_touch(id, TouchPhase::End, Pos2::new(104.0, 100.0)));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_navigation, bench_gesture);
criterion_main!(benches);
