//! Criterion benchmarks for the dacwave-core update driver
//!
//! Run with: cargo bench -p dacwave-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use dacwave_core::{Bounds, RampRates, SharedWaveform, SimulatedDac, Waveform, WaveformState};

const TICK_COUNTS: &[usize] = &[100, 1_000, 10_000];

const WAVEFORMS: &[Waveform] = &[
    Waveform::TriangleRising,
    Waveform::Sawtooth,
    Waveform::Sine,
    Waveform::Dc,
];

fn bench_state_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("WaveformState");

    for &waveform in WAVEFORMS {
        for &ticks in TICK_COUNTS {
            group.bench_with_input(BenchmarkId::new(waveform.name(), ticks), &ticks, |b, &n| {
                let mut dac = SimulatedDac::default();
                let mut state = WaveformState::new();
                state.initialize(
                    waveform,
                    Bounds::default(),
                    RampRates::default(),
                    369,
                    &mut dac,
                );
                b.iter(|| {
                    for _ in 0..n {
                        black_box(state.tick(&mut dac));
                    }
                });
            });
        }
    }

    group.finish();
}

fn bench_shared_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("SharedWaveform");

    for &ticks in TICK_COUNTS {
        group.bench_with_input(BenchmarkId::new("triangle", ticks), &ticks, |b, &n| {
            let wave = SharedWaveform::new();
            let mut dac = SimulatedDac::default();
            wave.initialize(
                Waveform::TriangleRising,
                Bounds::default(),
                RampRates::default(),
                369,
                &mut dac,
            );
            b.iter(|| {
                for _ in 0..n {
                    black_box(wave.tick(&mut dac));
                }
            });
        });
    }

    // Configuration write cost, as paid by foreground code.
    group.bench_function("set_rates", |b| {
        let wave = SharedWaveform::new();
        b.iter(|| wave.set_rates(black_box(RampRates::new(10, 12))));
    });

    group.finish();
}

criterion_group!(benches, bench_state_tick, bench_shared_tick);
criterion_main!(benches);
