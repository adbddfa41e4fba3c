//! dacwave Core - timer-driven DAC waveform generation
//!
//! This crate computes the next code for a digital-to-analog converter on
//! every tick of a hardware timer. It holds the waveform state machine and
//! its per-tick update algorithms; clock, timer and DAC setup stay with the
//! firmware.
//!
//! # Core Abstractions
//!
//! ## Generators
//!
//! - [`Generator`] - Installable step function: triangle edges, sawtooth, sine, or external
//! - [`Waveform`] - Selector used by initialization and configuration
//! - [`triangle_rising`], [`triangle_falling`], [`sawtooth`], [`sine`] - The built-in steps
//!
//! ## State
//!
//! - [`WaveformState`] - Bounds, ramp rates, sine cursor and the active generator
//! - [`SharedWaveform`] - Critical-section wrapper for sharing with a timer interrupt
//! - [`Bounds`] / [`RampRates`] - Ramp envelope and per-tick step sizes
//!
//! ## Output
//!
//! - [`DacOutput`] - Read-back/write access to the converter
//! - [`SimulatedDac`] - In-memory converter for hosts and tests
//! - [`SINE_TABLE`] - Build-time generated sine period
//!
//! # no_std Support
//!
//! The crate is `no_std`. Disable the default `std` feature on targets and
//! link a `critical-section` implementation for the chip (for Cortex-M,
//! `cortex-m` with `critical-section-single-core`):
//!
//! ```toml
//! [dependencies]
//! dacwave-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use dacwave_core::{Bounds, RampRates, SharedWaveform, Waveform};
//!
//! static WAVE: SharedWaveform = SharedWaveform::new();
//!
//! fn main() {
//!     let mut dac = board::dac0();
//!     WAVE.initialize(Waveform::TriangleRising, Bounds::default(), RampRates::default(), 0, &mut dac);
//!     board::start_timer();
//! }
//!
//! #[interrupt]
//! fn TCB0() {
//!     WAVE.tick(&mut board::dac0());
//! }
//! ```
//!
//! # Design Principles
//!
//! - **ISR-cheap**: A tick is a handful of integer ops and one table read
//! - **Fixed point**: DAC codes are `u16`, no floats at run time
//! - **No validation in the tick path**: Bounds and rates are trusted as given

#![cfg_attr(not(feature = "std"), no_std)]

pub mod bounds;
pub mod generator;
pub mod output;
pub mod shared;
pub mod sine_table;
pub mod state;

// Re-export main types at crate root
pub use bounds::{
    Bounds, DEFAULT_FALLING_RATE, DEFAULT_MAX, DEFAULT_MIN, DEFAULT_OUTPUT, DEFAULT_RISING_RATE,
    RampRates,
};
pub use generator::{
    Generator, ParseWaveformError, Step, StepFn, Waveform, sawtooth, sine, triangle_falling,
    triangle_rising,
};
pub use output::{DEFAULT_RESOLUTION_BITS, DacOutput, SimulatedDac};
pub use shared::SharedWaveform;
pub use sine_table::{SINE_TABLE, SINE_TABLE_LEN};
pub use state::WaveformState;
