//! Shared helpers for CLI commands.

use anyhow::{Context, Result, bail};
use clap::Args;
use dacwave_config::{GeneratorConfig, get_factory_preset, validate_config};
use dacwave_core::{DEFAULT_RESOLUTION_BITS, DacOutput, SharedWaveform, SimulatedDac, Waveform};
use std::path::PathBuf;

/// Where the generator settings come from, plus per-field overrides.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Factory preset name (see `dacwave presets list`)
    #[arg(short, long, conflicts_with = "config")]
    pub preset: Option<String>,

    /// Generator configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the waveform (dc, triangle, triangle_falling, sawtooth, sine)
    #[arg(short, long)]
    pub waveform: Option<String>,

    /// Override the lower ramp bound
    #[arg(long)]
    pub min: Option<u16>,

    /// Override the upper ramp bound
    #[arg(long)]
    pub max: Option<u16>,

    /// Override the rising step per tick
    #[arg(long)]
    pub rising: Option<u16>,

    /// Override the falling step per tick
    #[arg(long)]
    pub falling: Option<u16>,

    /// Override the initial DAC code
    #[arg(long)]
    pub initial: Option<u16>,

    /// DAC resolution in bits
    #[arg(long, default_value_t = DEFAULT_RESOLUTION_BITS)]
    pub bits: u8,

    /// Refuse configurations that fail validation instead of warning
    #[arg(long)]
    pub strict: bool,
}

impl SourceArgs {
    /// Build the effective configuration: preset or file, then overrides.
    pub fn resolve(&self) -> Result<GeneratorConfig> {
        let mut config = if let Some(name) = &self.preset {
            get_factory_preset(name).with_context(|| format!("unknown factory preset '{name}'"))?
        } else if let Some(path) = &self.config {
            GeneratorConfig::load(path)?
        } else {
            GeneratorConfig::new("Command line")
        };

        if let Some(waveform) = &self.waveform {
            let waveform: Waveform = waveform
                .parse()
                .map_err(|_| anyhow::anyhow!("unknown waveform '{waveform}'"))?;
            config = config.with_waveform(waveform);
        }
        if let Some(min) = self.min {
            config.bounds.min = min;
        }
        if let Some(max) = self.max {
            config.bounds.max = max;
        }
        if let Some(rising) = self.rising {
            config.rates.rising = rising;
        }
        if let Some(falling) = self.falling {
            config.rates.falling = falling;
        }
        if let Some(initial) = self.initial {
            config.initial_output = initial;
        }

        if let Err(e) = validate_config(&config) {
            if self.strict {
                return Err(e).context("configuration failed validation");
            }
            tracing::warn!(error = %e, "configuration will not behave as a clean ramp");
        }

        Ok(config)
    }
}

/// Foreground waveform change applied before a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Switch {
    /// Tick index at which the change takes effect.
    pub tick: usize,
    /// Waveform to select.
    pub waveform: Waveform,
}

/// Parse `TICK=WAVEFORM`, e.g. `500=sine`.
pub fn parse_switch(s: &str) -> std::result::Result<Switch, String> {
    let (tick, waveform) = s
        .split_once('=')
        .ok_or_else(|| format!("expected TICK=WAVEFORM, got '{s}'"))?;
    let tick = tick
        .trim()
        .parse()
        .map_err(|_| format!("invalid tick '{tick}'"))?;
    let waveform = waveform
        .trim()
        .parse()
        .map_err(|_| format!("unknown waveform '{waveform}'"))?;
    Ok(Switch { tick, waveform })
}

/// Output of a simulation run.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    /// DAC code after each tick.
    pub codes: Vec<u16>,
    /// Waveform that produced each code.
    pub waveforms: Vec<Waveform>,
    /// Highest code the simulated DAC can hold.
    pub max_code: u16,
}

/// Initialize a shared state from `config` and run `ticks` timer ticks.
///
/// The DAC is read back after every tick, so ticks with no active generator
/// record the held code.
pub fn simulate(
    config: &GeneratorConfig,
    bits: u8,
    ticks: usize,
    switches: &[Switch],
) -> Result<Trace> {
    if ticks == 0 {
        bail!("tick count must be at least 1");
    }

    let wave = SharedWaveform::new();
    let mut dac = SimulatedDac::new(bits);
    config.apply(&wave, &mut dac)?;

    tracing::info!(
        name = %config.name,
        waveform = %config.waveform,
        min = config.bounds.min,
        max = config.bounds.max,
        rising = config.rates.rising,
        falling = config.rates.falling,
        bits,
        ticks,
        "simulating"
    );

    let mut trace = Trace {
        max_code: dac.max_code(),
        ..Trace::default()
    };
    trace
        .codes
        .try_reserve_exact(ticks)
        .and_then(|()| trace.waveforms.try_reserve_exact(ticks))
        .with_context(|| format!("cannot hold a trace of {ticks} ticks"))?;

    for tick in 0..ticks {
        for switch in switches.iter().filter(|s| s.tick == tick) {
            tracing::info!(tick, waveform = %switch.waveform, "switching waveform");
            wave.select(switch.waveform);
        }
        trace.waveforms.push(wave.waveform());
        wave.tick(&mut dac);
        trace.codes.push(dac.read());
    }

    Ok(trace)
}

/// Map a DAC code to `[-1.0, 1.0]` over the converter's full range.
pub fn code_to_sample(code: u16, max_code: u16) -> f32 {
    if max_code == 0 {
        return 0.0;
    }
    (f32::from(code) / f32::from(max_code)) * 2.0 - 1.0
}
