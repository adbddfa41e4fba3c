//! Configuration and preset management for dacwave generators.
//!
//! Loads and saves generator settings as TOML, ships factory presets, and
//! reports bounds and rates the core would accept but misbehave on.
//!
//! # Features
//!
//! - **Generator files**: Waveform, bounds, rates and initial output in TOML
//! - **Validation**: Inverted bounds and 16-bit wraparound, caught before the ISR sees them
//! - **Factory Presets**: Built-in configurations for the stock waveforms
//!
//! # Example
//!
//! ```rust,no_run
//! use dacwave_config::{GeneratorConfig, validate_config};
//! use dacwave_core::{SimulatedDac, Waveform, WaveformState};
//!
//! let config = GeneratorConfig::load("triangle.toml").unwrap();
//! validate_config(&config).unwrap();
//!
//! let mut dac = SimulatedDac::default();
//! let mut state = WaveformState::new();
//! config.apply_to(&mut state, &mut dac).unwrap();
//!
//! let custom = GeneratorConfig::new("Narrow saw")
//!     .with_waveform(Waveform::Sawtooth)
//!     .with_bounds(400, 600)
//!     .with_rates(5, 0);
//! custom.save("narrow_saw.toml").unwrap();
//! ```

mod error;
mod generator_config;

/// Generator configuration validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use generator_config::{BoundsConfig, DEFAULT_TICK_RATE_HZ, GeneratorConfig, RatesConfig};
pub use validation::{
    ValidationError, ValidationResult, check_ramp, validate_config, validate_waveform,
};
