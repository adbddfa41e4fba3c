//! Integration tests for dacwave-core.
//!
//! Drives the update driver through complete waveform periods against a
//! simulated DAC: the reference triangle and sawtooth scenarios, generator
//! hot-swapping, and configuration interleaved with ticks on a shared state.

use dacwave_core::{
    Bounds, DacOutput, Generator, RampRates, SINE_TABLE, SINE_TABLE_LEN, SharedWaveform,
    SimulatedDac, Waveform, WaveformState,
};

fn run(state: &mut WaveformState, dac: &mut SimulatedDac, ticks: usize) -> Vec<u16> {
    (0..ticks).filter_map(|_| state.tick(&mut *dac)).collect()
}

// ============================================================================
// 1. Reference scenarios
// ============================================================================

#[test]
fn triangle_reference_period() {
    let mut dac = SimulatedDac::default();
    let mut state = WaveformState::new();
    state.initialize(
        Waveform::TriangleRising,
        Bounds::new(369, 1023),
        RampRates::symmetric(10),
        369,
        &mut dac,
    );

    assert_eq!(state.tick(&mut dac), Some(379));
    assert_eq!(state.waveform(), Waveform::TriangleRising);

    // 379 + 10k reaches 1019 after 64 more ticks.
    let climb = run(&mut state, &mut dac, 64);
    assert_eq!(climb.last(), Some(&1019));
    assert_eq!(state.waveform(), Waveform::TriangleRising);

    // 1019 -> 1029 clamps to 1023 and turns around.
    assert_eq!(state.tick(&mut dac), Some(1023));
    assert_eq!(state.waveform(), Waveform::TriangleFalling);
    assert_eq!(state.tick(&mut dac), Some(1013));

    // 1013 - 10k: 1013 .. 373, then 363 clamps to 369.
    let fall = run(&mut state, &mut dac, 64);
    assert_eq!(fall.last(), Some(&373));
    assert_eq!(state.tick(&mut dac), Some(369));
    assert_eq!(state.waveform(), Waveform::TriangleRising);
    assert_eq!(state.tick(&mut dac), Some(379));
}

#[test]
fn triangle_period_repeats_identically() {
    let mut dac = SimulatedDac::default();
    let mut state = WaveformState::new();
    state.initialize(
        Waveform::TriangleRising,
        Bounds::new(369, 1023),
        RampRates::new(10, 7),
        369,
        &mut dac,
    );

    // Find the period by waiting for two returns to min.
    let mut marks = Vec::new();
    for i in 0..10_000usize {
        if state.tick(&mut dac) == Some(369) {
            marks.push(i);
            if marks.len() == 3 {
                break;
            }
        }
    }
    assert_eq!(marks.len(), 3);
    let period = marks[1] - marks[0];
    assert_eq!(marks[2] - marks[1], period);
}

#[test]
fn sawtooth_reference_reset() {
    let mut dac = SimulatedDac::default();
    let mut state = WaveformState::new();
    state.initialize(
        Waveform::Sawtooth,
        Bounds::new(369, 1023),
        RampRates::new(2, 10),
        1022,
        &mut dac,
    );

    assert_eq!(state.tick(&mut dac), Some(369));
    assert_eq!(state.tick(&mut dac), Some(371));
    assert_eq!(state.waveform(), Waveform::Sawtooth);
}

#[test]
fn sawtooth_never_transitions() {
    let mut dac = SimulatedDac::default();
    let mut state = WaveformState::new();
    state.initialize(
        Waveform::Sawtooth,
        Bounds::new(369, 1023),
        RampRates::new(25, 0),
        369,
        &mut dac,
    );

    let codes = run(&mut state, &mut dac, 500);
    let resets = codes.windows(2).filter(|w| w[1] < w[0]).count();
    assert!(resets > 0);
    for w in codes.windows(2) {
        assert!(w[1] == w[0] + 25 || w[1] == 369, "{} -> {}", w[0], w[1]);
    }
    assert_eq!(state.waveform(), Waveform::Sawtooth);
}

#[test]
fn sine_plays_full_table_twice() {
    let mut dac = SimulatedDac::default();
    let mut state = WaveformState::new();
    state.initialize(Waveform::Sine, Bounds::default(), RampRates::default(), 0, &mut dac);

    let codes = run(&mut state, &mut dac, 2 * SINE_TABLE_LEN);
    assert_eq!(&codes[..SINE_TABLE_LEN], &SINE_TABLE[..]);
    assert_eq!(&codes[SINE_TABLE_LEN..], &SINE_TABLE[..]);
}

// ============================================================================
// 2. Generator selection
// ============================================================================

#[test]
fn dc_holds_initial_output() {
    let mut dac = SimulatedDac::default();
    let mut state = WaveformState::new();
    state.initialize(Waveform::Dc, Bounds::default(), RampRates::default(), 800, &mut dac);

    assert!(run(&mut state, &mut dac, 100).is_empty());
    assert_eq!(dac.read(), 800);
    assert_eq!(dac.write_count(), 1);
}

#[test]
fn external_selector_waits_for_a_function() {
    fn double(code: u16) -> u16 {
        code.wrapping_mul(2)
    }

    let mut dac = SimulatedDac::full_range();
    let mut state = WaveformState::new();
    state.initialize(Waveform::External, Bounds::default(), RampRates::default(), 3, &mut dac);
    assert_eq!(state.tick(&mut dac), None);

    state.set_generator(Generator::External(double));
    assert_eq!(run(&mut state, &mut dac, 4), vec![6, 12, 24, 48]);
}

#[test]
fn switching_waveform_continues_from_current_output() {
    let mut dac = SimulatedDac::default();
    let mut state = WaveformState::new();
    state.initialize(
        Waveform::TriangleRising,
        Bounds::new(369, 1023),
        RampRates::symmetric(10),
        369,
        &mut dac,
    );
    run(&mut state, &mut dac, 10);
    assert_eq!(dac.read(), 469);

    state.select(Waveform::TriangleFalling);
    assert_eq!(state.tick(&mut dac), Some(459));

    state.select(Waveform::Sawtooth);
    assert_eq!(state.tick(&mut dac), Some(469));
}

#[test]
fn inverted_bounds_pin_the_triangle() {
    let mut dac = SimulatedDac::default();
    let mut state = WaveformState::new();
    state.initialize(
        Waveform::TriangleRising,
        Bounds::new(800, 400),
        RampRates::symmetric(10),
        600,
        &mut dac,
    );

    // Each edge immediately clamps to its own bound and flips.
    let codes = run(&mut state, &mut dac, 6);
    assert_eq!(codes, vec![400, 800, 400, 800, 400, 800]);
}

// ============================================================================
// 3. Shared state
// ============================================================================

#[test]
fn configuration_between_ticks_takes_effect_next_tick() {
    let wave = SharedWaveform::new();
    let mut dac = SimulatedDac::default();
    wave.initialize(
        Waveform::TriangleRising,
        Bounds::new(369, 1023),
        RampRates::symmetric(10),
        369,
        &mut dac,
    );

    assert_eq!(wave.tick(&mut dac), Some(379));
    wave.set_rising_rate(0);
    assert_eq!(wave.tick(&mut dac), Some(379));
    wave.set_rising_rate(100);
    assert_eq!(wave.tick(&mut dac), Some(479));

    wave.set_max(500);
    assert_eq!(wave.tick(&mut dac), Some(500));
    assert_eq!(wave.waveform(), Waveform::TriangleFalling);
    assert_eq!(wave.bounds(), Bounds::new(369, 500));
}

#[test]
fn shared_cursor_can_be_inspected_and_reset() {
    let wave = SharedWaveform::new();
    let mut dac = SimulatedDac::default();
    wave.initialize(Waveform::Sine, Bounds::default(), RampRates::default(), 0, &mut dac);

    for _ in 0..5 {
        wave.tick(&mut dac);
    }
    assert_eq!(wave.cursor(), 5);
    wave.reset_cursor();
    assert_eq!(wave.tick(&mut dac), Some(SINE_TABLE[0]));

    wave.clear_generator();
    assert_eq!(wave.tick(&mut dac), None);
    assert_eq!(wave.rates(), RampRates::default());
}
