//! Generator configuration file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use dacwave_core::{
    Bounds, DEFAULT_FALLING_RATE, DEFAULT_MAX, DEFAULT_MIN, DEFAULT_OUTPUT, DEFAULT_RISING_RATE,
    DacOutput, RampRates, SharedWaveform, Waveform, WaveformState,
};

use crate::error::ConfigError;

/// Default tick rate hint: 100 kHz, at which the sine table plays 1 kHz.
pub const DEFAULT_TICK_RATE_HZ: u32 = 100_000;

/// Generator settings as stored on disk.
///
/// Every field but `name` has a default equal to the firmware's power-on
/// constants, so a file only needs to state what it changes.
///
/// # TOML Format
///
/// ```toml
/// name = "Triangle"
/// description = "Symmetric triangle over the default envelope"
/// waveform = "triangle_rising"
/// initial_output = 369
/// tick_rate_hz = 100000
///
/// [bounds]
/// min = 369
/// max = 1023
///
/// [rates]
/// rising = 10
/// falling = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Name of the configuration.
    pub name: String,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Waveform name, parsed with [`Waveform::from_str`](std::str::FromStr).
    #[serde(default = "default_waveform")]
    pub waveform: String,

    /// Code written to the DAC on initialization.
    #[serde(default)]
    pub initial_output: u16,

    /// Timer tick rate. Only used by hosts to put a time base on the output.
    #[serde(default = "default_tick_rate")]
    pub tick_rate_hz: u32,

    /// Ramp envelope.
    #[serde(default)]
    pub bounds: BoundsConfig,

    /// Ramp step sizes.
    #[serde(default)]
    pub rates: RatesConfig,
}

/// `[bounds]` table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoundsConfig {
    /// Lowest ramp code.
    #[serde(default = "default_min")]
    pub min: u16,
    /// Highest ramp code.
    #[serde(default = "default_max")]
    pub max: u16,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
        }
    }
}

impl From<BoundsConfig> for Bounds {
    fn from(b: BoundsConfig) -> Self {
        Bounds::new(b.min, b.max)
    }
}

/// `[rates]` table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RatesConfig {
    /// Rising step per tick.
    #[serde(default = "default_rising")]
    pub rising: u16,
    /// Falling step per tick.
    #[serde(default = "default_falling")]
    pub falling: u16,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            rising: DEFAULT_RISING_RATE,
            falling: DEFAULT_FALLING_RATE,
        }
    }
}

impl From<RatesConfig> for RampRates {
    fn from(r: RatesConfig) -> Self {
        RampRates::new(r.rising, r.falling)
    }
}

fn default_waveform() -> String {
    Waveform::Dc.name().to_string()
}

fn default_tick_rate() -> u32 {
    DEFAULT_TICK_RATE_HZ
}

fn default_min() -> u16 {
    DEFAULT_MIN
}

fn default_max() -> u16 {
    DEFAULT_MAX
}

fn default_rising() -> u16 {
    DEFAULT_RISING_RATE
}

fn default_falling() -> u16 {
    DEFAULT_FALLING_RATE
}

impl GeneratorConfig {
    /// Create a configuration with firmware defaults (DC output).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            waveform: default_waveform(),
            bounds: BoundsConfig::default(),
            rates: RatesConfig::default(),
            initial_output: DEFAULT_OUTPUT,
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the waveform.
    pub fn with_waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform.name().to_string();
        self
    }

    /// Set the ramp envelope.
    pub fn with_bounds(mut self, min: u16, max: u16) -> Self {
        self.bounds = BoundsConfig { min, max };
        self
    }

    /// Set the ramp step sizes.
    pub fn with_rates(mut self, rising: u16, falling: u16) -> Self {
        self.rates = RatesConfig { rising, falling };
        self
    }

    /// Set the initial DAC code.
    pub fn with_initial_output(mut self, code: u16) -> Self {
        self.initial_output = code;
        self
    }

    /// Set the tick rate hint.
    pub fn with_tick_rate(mut self, hz: u32) -> Self {
        self.tick_rate_hz = hz;
        self
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the configuration to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Parsed waveform selector.
    pub fn waveform(&self) -> Result<Waveform, ConfigError> {
        self.waveform
            .parse()
            .map_err(|_| ConfigError::UnknownWaveform(self.waveform.clone()))
    }

    /// Ramp envelope as the core type.
    pub fn bounds(&self) -> Bounds {
        self.bounds.into()
    }

    /// Step sizes as the core type.
    pub fn rates(&self) -> RampRates {
        self.rates.into()
    }

    /// Initialize `state` from this configuration and write the initial code.
    ///
    /// Only the waveform name is checked; run
    /// [`validate_config`](crate::validate_config) first to catch bounds and
    /// rates the core would accept but misbehave on.
    pub fn apply_to<D: DacOutput + ?Sized>(
        &self,
        state: &mut WaveformState,
        dac: &mut D,
    ) -> Result<(), ConfigError> {
        let waveform = self.waveform()?;
        state.initialize(waveform, self.bounds(), self.rates(), self.initial_output, dac);
        Ok(())
    }

    /// Initialize a shared state from this configuration.
    ///
    /// See [`GeneratorConfig::apply_to`].
    pub fn apply<D: DacOutput + ?Sized>(
        &self,
        shared: &SharedWaveform,
        dac: &mut D,
    ) -> Result<(), ConfigError> {
        let waveform = self.waveform()?;
        shared.initialize(waveform, self.bounds(), self.rates(), self.initial_output, dac);
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dacwave_core::SimulatedDac;

    #[test]
    fn new_uses_firmware_defaults() {
        let config = GeneratorConfig::new("Test");
        assert_eq!(config.name, "Test");
        assert!(config.description.is_none());
        assert_eq!(config.waveform().unwrap(), Waveform::Dc);
        assert_eq!(config.bounds(), Bounds::new(369, 1023));
        assert_eq!(config.rates(), RampRates::new(10, 10));
        assert_eq!(config.initial_output, 0);
        assert_eq!(config.tick_rate_hz, 100_000);
    }

    #[test]
    fn minimal_toml_fills_defaults() {
        let config = GeneratorConfig::from_toml("name = \"Minimal\"\n").unwrap();
        assert_eq!(config, GeneratorConfig::new("Minimal"));
    }

    #[test]
    fn partial_tables_keep_other_fields() {
        let toml = r#"
name = "Partial"
waveform = "saw"

[bounds]
max = 800

[rates]
rising = 4
"#;
        let config = GeneratorConfig::from_toml(toml).unwrap();
        assert_eq!(config.waveform().unwrap(), Waveform::Sawtooth);
        assert_eq!(config.bounds(), Bounds::new(369, 800));
        assert_eq!(config.rates(), RampRates::new(4, 10));
    }

    #[test]
    fn to_toml_contains_tables() {
        let config = GeneratorConfig::new("Out")
            .with_description("desc")
            .with_waveform(Waveform::TriangleFalling)
            .with_bounds(100, 200);
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("name = \"Out\""));
        assert!(toml.contains("waveform = \"triangle_falling\""));
        assert!(toml.contains("[bounds]"));
        assert!(toml.contains("min = 100"));

        let parsed = GeneratorConfig::from_toml(&toml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn unknown_waveform_is_reported_on_apply() {
        let mut config = GeneratorConfig::new("Bad");
        config.waveform = "square".to_string();
        let mut state = WaveformState::new();
        let mut dac = SimulatedDac::default();
        let err = config.apply_to(&mut state, &mut dac).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownWaveform(ref w) if w == "square"));
        assert_eq!(dac.write_count(), 0);
    }

    #[test]
    fn apply_initializes_state_and_dac() {
        let config = GeneratorConfig::new("Saw")
            .with_waveform(Waveform::Sawtooth)
            .with_rates(2, 0)
            .with_initial_output(1022);
        let mut state = WaveformState::new();
        let mut dac = SimulatedDac::default();
        config.apply_to(&mut state, &mut dac).unwrap();
        assert_eq!(dac.read(), 1022);
        assert_eq!(state.tick(&mut dac), Some(369));
    }

    #[test]
    fn out_of_range_code_is_a_parse_error() {
        let err = GeneratorConfig::from_toml("name = \"x\"\ninitial_output = 70000\n").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }
}
