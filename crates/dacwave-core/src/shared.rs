//! Interrupt-safe home for [`WaveformState`].
//!
//! The timer interrupt and foreground configuration code both write the
//! state: configuration replaces bounds, rates and the generator, while the
//! tick advances the cursor and performs the triangle's self-transition.
//! Every access here runs inside a `critical_section`, which on a
//! single-core target masks interrupts. A tick therefore sees each 16-bit
//! field either before or after a configuration write, never half of one,
//! and a generator swap cannot interleave with a self-transition.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::bounds::{Bounds, RampRates};
use crate::generator::{Generator, Waveform};
use crate::output::DacOutput;
use crate::state::WaveformState;

/// [`WaveformState`] shared between a timer interrupt and foreground code.
///
/// `new` is `const`, so the usual home is a `static`:
///
/// ```rust
/// use dacwave_core::{Bounds, RampRates, SharedWaveform, SimulatedDac, Waveform};
///
/// static WAVE: SharedWaveform = SharedWaveform::new();
///
/// let mut dac = SimulatedDac::default();
/// WAVE.initialize(Waveform::Sawtooth, Bounds::new(369, 1023), RampRates::symmetric(2), 1022, &mut dac);
///
/// // In the timer interrupt handler:
/// assert_eq!(WAVE.tick(&mut dac), Some(369));
/// ```
pub struct SharedWaveform {
    inner: Mutex<RefCell<WaveformState>>,
}

impl Default for SharedWaveform {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedWaveform {
    /// Firmware defaults with no generator installed.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(WaveformState::new())),
        }
    }

    /// Run `f` on the state inside one critical section.
    ///
    /// Use this to make several configuration changes appear to the tick as
    /// one. `f` must not call back into this `SharedWaveform`; a nested call
    /// finds the state already borrowed and panics.
    pub fn with<R>(&self, f: impl FnOnce(&mut WaveformState) -> R) -> R {
        critical_section::with(|cs| f(&mut *self.inner.borrow_ref_mut(cs)))
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> WaveformState {
        self.with(|state| *state)
    }

    /// See [`WaveformState::initialize`].
    pub fn initialize<D: DacOutput + ?Sized>(
        &self,
        selector: Waveform,
        bounds: Bounds,
        rates: RampRates,
        initial_output: u16,
        dac: &mut D,
    ) {
        self.with(|state| state.initialize(selector, bounds, rates, initial_output, dac));
    }

    /// Update driver entry point, called once per timer tick.
    ///
    /// See [`WaveformState::tick`]. A [`Generator::External`] function runs
    /// inside the same critical section but with the state released, so it
    /// may reconfigure this `SharedWaveform` (swap the generator, change
    /// bounds or rates). Those changes apply from the next tick.
    #[inline]
    pub fn tick<D: DacOutput + ?Sized>(&self, dac: &mut D) -> Option<u16> {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let active = cell.borrow().active()?;
            if let Generator::External(f) = active {
                let code = f(dac.read());
                dac.write(code);
                Some(code)
            } else {
                cell.borrow_mut().tick(dac)
            }
        })
    }

    /// See [`WaveformState::set_generator`].
    pub fn set_generator(&self, generator: Generator) {
        self.with(|state| state.set_generator(generator));
    }

    /// See [`WaveformState::select`].
    pub fn select(&self, waveform: Waveform) {
        self.with(|state| state.select(waveform));
    }

    /// See [`WaveformState::clear_generator`].
    pub fn clear_generator(&self) {
        self.with(WaveformState::clear_generator);
    }

    /// Selector naming the active generator.
    pub fn waveform(&self) -> Waveform {
        self.with(|state| state.waveform())
    }

    /// See [`WaveformState::set_bounds`].
    pub fn set_bounds(&self, bounds: Bounds) {
        self.with(|state| state.set_bounds(bounds));
    }

    /// Current ramp envelope.
    pub fn bounds(&self) -> Bounds {
        self.with(|state| state.bounds())
    }

    /// See [`WaveformState::set_min`].
    pub fn set_min(&self, min: u16) {
        self.with(|state| state.set_min(min));
    }

    /// See [`WaveformState::set_max`].
    pub fn set_max(&self, max: u16) {
        self.with(|state| state.set_max(max));
    }

    /// See [`WaveformState::set_rates`].
    pub fn set_rates(&self, rates: RampRates) {
        self.with(|state| state.set_rates(rates));
    }

    /// Current step sizes.
    pub fn rates(&self) -> RampRates {
        self.with(|state| state.rates())
    }

    /// See [`WaveformState::set_rising_rate`].
    pub fn set_rising_rate(&self, rising: u16) {
        self.with(|state| state.set_rising_rate(rising));
    }

    /// See [`WaveformState::set_falling_rate`].
    pub fn set_falling_rate(&self, falling: u16) {
        self.with(|state| state.set_falling_rate(falling));
    }

    /// Sine playback position.
    pub fn cursor(&self) -> usize {
        self.with(|state| state.cursor())
    }

    /// See [`WaveformState::reset_cursor`].
    pub fn reset_cursor(&self) {
        self.with(WaveformState::reset_cursor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::SimulatedDac;

    #[test]
    fn static_instance_ticks() {
        static WAVE: SharedWaveform = SharedWaveform::new();
        let mut dac = SimulatedDac::default();
        WAVE.initialize(
            Waveform::TriangleRising,
            Bounds::new(369, 1023),
            RampRates::symmetric(10),
            369,
            &mut dac,
        );
        assert_eq!(WAVE.tick(&mut dac), Some(379));
        assert_eq!(WAVE.waveform(), Waveform::TriangleRising);
    }

    #[test]
    fn external_function_may_swap_the_generator() {
        static WAVE: SharedWaveform = SharedWaveform::new();

        fn hand_over(code: u16) -> u16 {
            WAVE.set_rates(RampRates::symmetric(4));
            WAVE.select(Waveform::TriangleRising);
            code + 1
        }

        let mut dac = SimulatedDac::default();
        WAVE.initialize(
            Waveform::External,
            Bounds::new(369, 1023),
            RampRates::symmetric(10),
            500,
            &mut dac,
        );
        WAVE.set_generator(Generator::External(hand_over));

        assert_eq!(WAVE.tick(&mut dac), Some(501));
        assert_eq!(WAVE.waveform(), Waveform::TriangleRising);
        assert_eq!(WAVE.rates(), RampRates::symmetric(4));
        assert_eq!(WAVE.tick(&mut dac), Some(505));
    }

    #[test]
    fn external_function_may_install_another_external() {
        static WAVE: SharedWaveform = SharedWaveform::new();

        fn ping(code: u16) -> u16 {
            WAVE.set_generator(Generator::External(pong));
            code.wrapping_add(100)
        }

        fn pong(code: u16) -> u16 {
            WAVE.set_generator(Generator::External(ping));
            code.wrapping_sub(50)
        }

        let mut dac = SimulatedDac::default();
        WAVE.initialize(Waveform::External, Bounds::default(), RampRates::default(), 0, &mut dac);
        WAVE.set_generator(Generator::External(ping));

        let codes: Vec<_> = (0..4).filter_map(|_| WAVE.tick(&mut dac)).collect();
        assert_eq!(codes, vec![100, 50, 150, 100]);
    }

    #[test]
    fn grouped_update_is_seen_whole() {
        let wave = SharedWaveform::new();
        wave.with(|state| {
            state.set_bounds(Bounds::new(0, 100));
            state.set_rates(RampRates::new(50, 25));
            state.select(Waveform::Sawtooth);
        });
        let snap = wave.snapshot();
        assert_eq!(snap.bounds(), Bounds::new(0, 100));
        assert_eq!(snap.rates(), RampRates::new(50, 25));
        assert_eq!(snap.waveform(), Waveform::Sawtooth);
    }

    #[test]
    fn tick_from_another_thread_sees_whole_rates() {
        use std::sync::Arc;
        use std::thread;

        let wave = Arc::new(SharedWaveform::new());
        let mut dac = SimulatedDac::full_range();
        wave.initialize(
            Waveform::Sawtooth,
            Bounds::new(0, u16::MAX - 1),
            RampRates::new(0x0101, 0),
            0,
            &mut dac,
        );

        let writer = {
            let wave = Arc::clone(&wave);
            thread::spawn(move || {
                for i in 0..2_000u16 {
                    let rate = if i % 2 == 0 { 0x0101 } else { 0 };
                    wave.set_rising_rate(rate);
                }
            })
        };

        let mut prev = dac.read();
        for _ in 0..2_000 {
            if let Some(code) = wave.tick(&mut dac) {
                let delta = code.wrapping_sub(prev);
                assert!(
                    delta == 0 || delta == 0x0101 || code == 0,
                    "torn step {delta:#06x} from {prev} to {code}"
                );
                prev = code;
            }
        }
        writer.join().unwrap();
    }
}
