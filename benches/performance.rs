// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Performance benchmarks for Bach
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Notation parsing
//! - Formula generation across the pitch range
//! - Interval arithmetic on spelled pitches
//! - Registry lookups

use bach::music::{
    Chord, Formula, FormulaRegistry, Interval, Pitch, PitchClass, PitchCollection,
    RelativeFormula, Scale, ScaleType, SpellingPolicy,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Benchmark parsing of each notation
fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    group.bench_function("pitch", |b| {
        b.iter(|| black_box("C##4").parse::<Pitch>())
    });

    group.bench_function("interval", |b| {
        b.iter(|| black_box("A4").parse::<Interval>())
    });

    group.bench_function("formula", |b| {
        b.iter(|| black_box("R,M2,m3,4,5,m6,M7").parse::<Formula>())
    });

    group.bench_function("relative_formula", |b| {
        b.iter(|| black_box("1,2,b3,4,5,b6,7").parse::<RelativeFormula>())
    });

    group.bench_function("pitch_collection", |b| {
        b.iter(|| black_box("C3,G3,E4,Bb4,D5").parse::<PitchCollection>())
    });

    group.bench_function("chord_symbol", |b| {
        b.iter(|| Chord::parse(black_box("F#m7b5")))
    });

    group.finish();
}

/// Benchmark lazy generation over the full range
fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let policy = SpellingPolicy::FavorSharps;

    for scale_type in [ScaleType::MajorPentatonic, ScaleType::Major, ScaleType::Chromatic] {
        let formula = match scale_type.formula() {
            Ok(formula) => formula,
            Err(_) => continue,
        };
        group.bench_with_input(
            BenchmarkId::new("ascending", scale_type.id()),
            &formula,
            |b, formula| b.iter(|| formula.generate(black_box(Pitch::MIN), policy).count()),
        );
        group.bench_with_input(
            BenchmarkId::new("descending", scale_type.id()),
            &formula,
            |b, formula| b.iter(|| formula.generate_descending(black_box(Pitch::MAX), policy).count()),
        );
    }

    group.finish();
}

/// Benchmark spelled interval arithmetic
fn bench_intervals(c: &mut Criterion) {
    let mut group = c.benchmark_group("interval");
    let root = Pitch::MIN;
    let intervals = [
        Interval::MINOR_THIRD,
        Interval::PERFECT_FIFTH,
        Interval::AUGMENTED_FOURTH,
        Interval::MAJOR_SEVENTH,
    ];

    group.bench_function("add_interval", |b| {
        b.iter(|| {
            let mut count = 0;
            for interval in intervals.iter() {
                if black_box(root).add_interval(*interval).is_ok() {
                    count += 1;
                }
            }
            black_box(count)
        })
    });

    if let (Ok(lower), Ok(upper)) = ("C4".parse::<Pitch>(), "G5".parse::<Pitch>()) {
        group.bench_function("between", |b| {
            b.iter(|| Interval::between(black_box(lower), black_box(upper)))
        });
    }

    group.bench_function("scale_spelling", |b| {
        let scale = Scale::parse("C#", "harmonic minor");
        b.iter(|| {
            scale
                .as_ref()
                .map(|s| s.pitch_classes(black_box(SpellingPolicy::FavorFlats)).len())
        })
    });

    group.finish();
}

/// Benchmark registry construction and lookups
fn bench_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");

    group.bench_function("with_builtins", |b| b.iter(FormulaRegistry::with_builtins));

    if let Ok(registry) = FormulaRegistry::with_builtins() {
        for key in ["major", "Harmonic Minor", "aeolian"] {
            group.bench_with_input(BenchmarkId::new("scale", key), &key, |b, key| {
                b.iter(|| registry.get_scale(PitchClass::D, black_box(*key)))
            });
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parsing,
    bench_generation,
    bench_intervals,
    bench_registry,
);

criterion_main!(benches);
