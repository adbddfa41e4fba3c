//! Generator configuration validation.
//!
//! The core trusts its bounds and rates: an inverted range pins the ramp to
//! one value, and a step that wraps the 16-bit range skips the boundary
//! check for that tick. A ramp that starts outside its bounds can wrap on
//! the first tick too (a falling edge from code 0). This module reports
//! those cases before a configuration reaches the core.
//!
//! Checks assume the worst-case start code, i.e. that the DAC may sit on
//! either bound when the edge begins.
//!
//! # Example
//!
//! ```rust
//! use dacwave_config::{GeneratorConfig, ValidationError, validate_config};
//! use dacwave_core::Waveform;
//!
//! let config = GeneratorConfig::new("bad").with_waveform(Waveform::Sawtooth).with_bounds(900, 100);
//! assert!(matches!(
//!     validate_config(&config),
//!     Err(ValidationError::InvertedBounds { min: 900, max: 100 })
//! ));
//! ```

use dacwave_core::{Bounds, RampRates, Waveform};
use thiserror::Error;

use crate::GeneratorConfig;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Waveform name not recognized.
    #[error("unknown waveform: {0}")]
    UnknownWaveform(String),

    /// `min` above `max`.
    #[error("bounds inverted: min {min} is above max {max}")]
    InvertedBounds {
        /// Configured lower bound.
        min: u16,
        /// Configured upper bound.
        max: u16,
    },

    /// A rising step from `max` wraps past `u16::MAX`.
    #[error("rising rate {rising} can wrap past 65535 from max {max}")]
    RisingOverflow {
        /// Configured upper bound.
        max: u16,
        /// Configured rising step.
        rising: u16,
    },

    /// A falling step from `min` wraps below zero.
    #[error("falling rate {falling} can wrap below 0 from min {min}")]
    FallingUnderflow {
        /// Configured lower bound.
        min: u16,
        /// Configured falling step.
        falling: u16,
    },

    /// Ramp waveform starting outside its bounds.
    #[error("initial output {initial} is outside bounds {min}..={max}")]
    InitialOutsideBounds {
        /// Configured initial DAC code.
        initial: u16,
        /// Configured lower bound.
        min: u16,
        /// Configured upper bound.
        max: u16,
    },

    /// Tick rate of zero.
    #[error("tick rate must be above 0 Hz")]
    ZeroTickRate,

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a waveform name.
pub fn validate_waveform(name: &str) -> ValidationResult<Waveform> {
    name.parse()
        .map_err(|_| ValidationError::UnknownWaveform(name.to_string()))
}

/// Check bounds and rates against what `waveform` actually uses.
///
/// Returns every problem found; an empty list means the ramp reflects or
/// resets cleanly from any start code within the bounds.
pub fn check_ramp(waveform: Waveform, bounds: Bounds, rates: RampRates) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if !waveform.is_ramp() {
        return errors;
    }

    if !bounds.is_ordered() {
        errors.push(ValidationError::InvertedBounds {
            min: bounds.min,
            max: bounds.max,
        });
    }

    // Every ramp has a rising edge; a triangle starting on either edge
    // eventually runs both.
    let uses_falling = matches!(
        waveform,
        Waveform::TriangleRising | Waveform::TriangleFalling
    );

    if bounds.max.checked_add(rates.rising).is_none() {
        errors.push(ValidationError::RisingOverflow {
            max: bounds.max,
            rising: rates.rising,
        });
    }
    if uses_falling && rates.falling > bounds.min {
        errors.push(ValidationError::FallingUnderflow {
            min: bounds.min,
            falling: rates.falling,
        });
    }

    errors
}

/// Validate a complete generator configuration.
pub fn validate_config(config: &GeneratorConfig) -> ValidationResult<()> {
    let mut errors = Vec::new();

    match validate_waveform(&config.waveform) {
        Ok(waveform) => {
            let bounds = config.bounds();
            errors.extend(check_ramp(waveform, bounds, config.rates()));
            // Inverted bounds are already reported and contain nothing.
            if waveform.is_ramp()
                && bounds.is_ordered()
                && !bounds.contains(config.initial_output)
            {
                errors.push(ValidationError::InitialOutsideBounds {
                    initial: config.initial_output,
                    min: bounds.min,
                    max: bounds.max,
                });
            }
        }
        Err(e) => errors.push(e),
    }

    if config.tick_rate_hz == 0 {
        errors.push(ValidationError::ZeroTickRate);
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}
