//! Waveform state and the per-tick update driver.

use crate::bounds::{
    Bounds, DEFAULT_FALLING_RATE, DEFAULT_MAX, DEFAULT_MIN, DEFAULT_RISING_RATE, RampRates,
};
use crate::generator::{Generator, Waveform};
use crate::output::DacOutput;

/// Everything the update driver needs between ticks.
///
/// Holds the ramp envelope, the step sizes, the sine playback cursor and the
/// active generator. This type is not interrupt-safe on its own; share it
/// with a timer interrupt through [`SharedWaveform`](crate::SharedWaveform).
///
/// # Example
///
/// ```rust
/// use dacwave_core::{Bounds, DacOutput, RampRates, SimulatedDac, Waveform, WaveformState};
///
/// let mut dac = SimulatedDac::default();
/// let mut state = WaveformState::new();
/// state.initialize(Waveform::TriangleRising, Bounds::new(369, 1023), RampRates::symmetric(10), 369, &mut dac);
///
/// assert_eq!(state.tick(&mut dac), Some(379));
/// assert_eq!(dac.read(), 379);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct WaveformState {
    bounds: Bounds,
    rates: RampRates,
    /// Sine playback position; survives waveform switches.
    cursor: usize,
    active: Option<Generator>,
}

impl Default for WaveformState {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveformState {
    /// Firmware defaults with no generator installed.
    pub const fn new() -> Self {
        Self {
            bounds: Bounds::new(DEFAULT_MIN, DEFAULT_MAX),
            rates: RampRates::new(DEFAULT_RISING_RATE, DEFAULT_FALLING_RATE),
            cursor: 0,
            active: None,
        }
    }

    /// Reset every field and write `initial_output` to the DAC once.
    ///
    /// `Dc` and `External` leave no generator installed, so ticks are no-ops
    /// until one is set. Safe to call again at any time.
    pub fn initialize<D: DacOutput + ?Sized>(
        &mut self,
        selector: Waveform,
        bounds: Bounds,
        rates: RampRates,
        initial_output: u16,
        dac: &mut D,
    ) {
        self.bounds = bounds;
        self.rates = rates;
        self.cursor = 0;
        self.active = selector.generator();
        dac.write(initial_output);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            waveform = %selector,
            min = bounds.min,
            max = bounds.max,
            rising = rates.rising,
            falling = rates.falling,
            initial_output,
            "waveform initialized"
        );
    }

    /// Run one timer tick: step the active generator and write the result.
    ///
    /// Returns the written code, or `None` when no generator is active, in
    /// which case the DAC is neither read nor written.
    #[inline]
    pub fn tick<D: DacOutput + ?Sized>(&mut self, dac: &mut D) -> Option<u16> {
        let generator = self.active?;
        let current = dac.read();
        let step = generator.step(current, self.bounds, self.rates, &mut self.cursor);
        if let Some(next) = step.transition {
            self.active = Some(next);
        }
        dac.write(step.code);
        Some(step.code)
    }

    /// Install a generator, built-in or [`Generator::External`].
    pub fn set_generator(&mut self, generator: Generator) {
        self.active = Some(generator);

        #[cfg(feature = "tracing")]
        tracing::debug!(waveform = %generator.waveform(), "generator installed");
    }

    /// Install the built-in generator for `waveform`.
    ///
    /// `Dc` and `External` clear the active generator.
    pub fn select(&mut self, waveform: Waveform) {
        self.active = waveform.generator();

        #[cfg(feature = "tracing")]
        tracing::debug!(%waveform, "waveform selected");
    }

    /// Remove the active generator; the output holds.
    pub fn clear_generator(&mut self) {
        self.active = None;
    }

    /// The active generator, if any.
    pub fn active(&self) -> Option<Generator> {
        self.active
    }

    /// Selector naming the active generator; `Dc` when none is installed.
    pub fn waveform(&self) -> Waveform {
        self.active.map_or(Waveform::Dc, |g| g.waveform())
    }

    /// Replace the ramp envelope. Not validated.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;

        #[cfg(feature = "tracing")]
        tracing::debug!(min = bounds.min, max = bounds.max, "bounds updated");
    }

    /// Current ramp envelope.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Replace only the lower bound.
    pub fn set_min(&mut self, min: u16) {
        self.set_bounds(Bounds::new(min, self.bounds.max));
    }

    /// Replace only the upper bound.
    pub fn set_max(&mut self, max: u16) {
        self.set_bounds(Bounds::new(self.bounds.min, max));
    }

    /// Replace both step sizes. Zero is legal and gives a flat ramp.
    pub fn set_rates(&mut self, rates: RampRates) {
        self.rates = rates;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            rising = rates.rising,
            falling = rates.falling,
            "ramp rates updated"
        );
    }

    /// Current step sizes.
    pub fn rates(&self) -> RampRates {
        self.rates
    }

    /// Replace only the rising step.
    pub fn set_rising_rate(&mut self, rising: u16) {
        self.set_rates(RampRates::new(rising, self.rates.falling));
    }

    /// Replace only the falling step.
    pub fn set_falling_rate(&mut self, falling: u16) {
        self.set_rates(RampRates::new(self.rates.rising, falling));
    }

    /// Sine playback position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Restart sine playback from the first table entry.
    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }
}
