//! Per-tick step functions and the waveform selector.
//!
//! Each generator maps the DAC's current code to the next one. The triangle
//! edges may also ask the update driver to switch to their sibling edge,
//! which is how the triangle oscillates without any outside help.
//!
//! All arithmetic is 16-bit modular. A rate large enough to wrap past the
//! boundary in a single step defeats the boundary check for that tick; the
//! caller chooses rates that cannot do that.

use core::fmt;
use core::str::FromStr;

use crate::bounds::{Bounds, RampRates};
use crate::sine_table::{self, SINE_TABLE};

/// Caller-supplied step function: current code in, next code out.
///
/// Under [`SharedWaveform::tick`](crate::SharedWaveform::tick) the function
/// may call the same `SharedWaveform`'s configuration methods. It must not
/// be invoked from inside [`SharedWaveform::with`](crate::SharedWaveform::with)
/// on the instance it reconfigures.
pub type StepFn = fn(u16) -> u16;

/// Waveform selector used by `initialize` and configuration.
///
/// [`Waveform::Dc`] and [`Waveform::External`] select no built-in stepping:
/// the output holds still until a generator is installed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Waveform {
    /// Hold the current output.
    #[default]
    Dc,
    /// Caller-installed step function, assigned after initialization.
    External,
    /// Triangle, starting on its rising edge.
    TriangleRising,
    /// Triangle, starting on its falling edge.
    TriangleFalling,
    /// Rising ramp with a hard reset to `min`.
    Sawtooth,
    /// Fixed-frequency playback of [`SINE_TABLE`].
    Sine,
}

impl Waveform {
    /// Every selector, in declaration order.
    pub const ALL: [Waveform; 6] = [
        Waveform::Dc,
        Waveform::External,
        Waveform::TriangleRising,
        Waveform::TriangleFalling,
        Waveform::Sawtooth,
        Waveform::Sine,
    ];

    /// Built-in generator for this selector, if any.
    pub const fn generator(self) -> Option<Generator> {
        match self {
            Waveform::Dc | Waveform::External => None,
            Waveform::TriangleRising => Some(Generator::TriangleRising),
            Waveform::TriangleFalling => Some(Generator::TriangleFalling),
            Waveform::Sawtooth => Some(Generator::Sawtooth),
            Waveform::Sine => Some(Generator::Sine),
        }
    }

    /// Stable lowercase identifier, as used in configuration files.
    pub const fn name(self) -> &'static str {
        match self {
            Waveform::Dc => "dc",
            Waveform::External => "external",
            Waveform::TriangleRising => "triangle_rising",
            Waveform::TriangleFalling => "triangle_falling",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Sine => "sine",
        }
    }

    /// Whether this waveform steps within [`Bounds`] using [`RampRates`].
    pub const fn is_ramp(self) -> bool {
        matches!(
            self,
            Waveform::TriangleRising | Waveform::TriangleFalling | Waveform::Sawtooth
        )
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a waveform name is not recognized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseWaveformError;

impl fmt::Display for ParseWaveformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unrecognized waveform name")
    }
}

impl core::error::Error for ParseWaveformError {}

impl FromStr for Waveform {
    type Err = ParseWaveformError;

    /// Accepts the [`Waveform::name`] spelling plus a few short aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let waveform = match s {
            "dc" | "none" => Waveform::Dc,
            "external" | "ext" => Waveform::External,
            "triangle_rising" | "triangle" => Waveform::TriangleRising,
            "triangle_falling" => Waveform::TriangleFalling,
            "sawtooth" | "saw" => Waveform::Sawtooth,
            "sine" => Waveform::Sine,
            _ => return Err(ParseWaveformError),
        };
        Ok(waveform)
    }
}

/// An installable generator: one of the built-ins or a caller function.
#[derive(Clone, Copy, Debug)]
pub enum Generator {
    /// `current + rising`, reflecting at `max`.
    TriangleRising,
    /// `current - falling`, reflecting at `min`.
    TriangleFalling,
    /// `current + rising`, restarting at `min` once past `max`.
    Sawtooth,
    /// Next entry of [`SINE_TABLE`]; ignores the current code.
    Sine,
    /// Caller-supplied step function. Never validated.
    ///
    /// May hot-swap the generator through the shared state; see [`StepFn`].
    External(StepFn),
}

/// Result of one generator step.
#[derive(Clone, Copy, Debug)]
pub struct Step {
    /// Code to write to the DAC.
    pub code: u16,
    /// Generator to install before the next tick, if the step asked for one.
    pub transition: Option<Generator>,
}

impl Step {
    const fn hold(code: u16) -> Self {
        Self {
            code,
            transition: None,
        }
    }

    const fn switch(code: u16, next: Generator) -> Self {
        Self {
            code,
            transition: Some(next),
        }
    }
}

impl Generator {
    /// The selector that names this generator.
    pub const fn waveform(&self) -> Waveform {
        match self {
            Generator::TriangleRising => Waveform::TriangleRising,
            Generator::TriangleFalling => Waveform::TriangleFalling,
            Generator::Sawtooth => Waveform::Sawtooth,
            Generator::Sine => Waveform::Sine,
            Generator::External(_) => Waveform::External,
        }
    }

    /// Compute the next code. `cursor` is only touched by [`Generator::Sine`].
    #[inline]
    pub fn step(&self, current: u16, bounds: Bounds, rates: RampRates, cursor: &mut usize) -> Step {
        match self {
            Generator::TriangleRising => triangle_rising(current, bounds, rates),
            Generator::TriangleFalling => triangle_falling(current, bounds, rates),
            Generator::Sawtooth => Step::hold(sawtooth(current, bounds, rates)),
            Generator::Sine => Step::hold(sine(cursor)),
            Generator::External(f) => Step::hold(f(current)),
        }
    }
}

/// Rising triangle edge. Clamps to `max` and hands over to the falling edge
/// once `max` is reached.
#[inline]
pub fn triangle_rising(current: u16, bounds: Bounds, rates: RampRates) -> Step {
    let next = current.wrapping_add(rates.rising);
    if next >= bounds.max {
        Step::switch(bounds.max, Generator::TriangleFalling)
    } else {
        Step::hold(next)
    }
}

/// Falling triangle edge. Clamps to `min` and hands over to the rising edge
/// once `min` is reached.
#[inline]
pub fn triangle_falling(current: u16, bounds: Bounds, rates: RampRates) -> Step {
    let next = current.wrapping_sub(rates.falling);
    if next <= bounds.min {
        Step::switch(bounds.min, Generator::TriangleRising)
    } else {
        Step::hold(next)
    }
}

/// Sawtooth ramp: restarts at `min` once the step lands past `max`.
#[inline]
pub fn sawtooth(current: u16, bounds: Bounds, rates: RampRates) -> u16 {
    let next = current.wrapping_add(rates.rising);
    if next > bounds.max { bounds.min } else { next }
}

/// Sine playback: return the entry under `cursor` and advance it.
#[inline]
pub fn sine(cursor: &mut usize) -> u16 {
    if *cursor >= SINE_TABLE.len() {
        *cursor = 0;
    }
    let code = SINE_TABLE[*cursor];
    *cursor = sine_table::next_index(*cursor);
    code
}
