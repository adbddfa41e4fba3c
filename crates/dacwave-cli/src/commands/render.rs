//! Render command: write the simulated DAC output as a WAV file.
//!
//! The tick rate becomes the sample rate, and codes are scaled over the
//! converter's full range rather than the configured ramp bounds.

use super::common::{SourceArgs, Switch, code_to_sample, parse_switch, simulate};
use anyhow::Context;
use clap::Args;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    source: SourceArgs,

    /// Number of timer ticks (samples) to render
    #[arg(short = 'n', long, default_value = "100000")]
    ticks: usize,

    /// Override the tick rate in Hz
    #[arg(long)]
    tick_rate: Option<u32>,

    /// Change the waveform before a tick, e.g. `--switch 500=sine` (repeatable)
    #[arg(long = "switch", value_name = "TICK=WAVEFORM", value_parser = parse_switch)]
    switches: Vec<Switch>,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let mut config = args.source.resolve()?;
    if let Some(hz) = args.tick_rate {
        config = config.with_tick_rate(hz);
    }
    if config.tick_rate_hz == 0 {
        anyhow::bail!("tick rate must be greater than zero to render");
    }

    let trace = simulate(&config, args.source.bits, args.ticks, &args.switches)?;

    let spec = WavSpec {
        channels: 1,
        sample_rate: config.tick_rate_hz,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(&args.output, spec)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    for &code in &trace.codes {
        writer.write_sample(code_to_sample(code, trace.max_code))?;
    }
    writer.finalize()?;

    println!(
        "Rendered {} ticks at {} Hz to {}",
        trace.codes.len(),
        config.tick_rate_hz,
        args.output.display()
    );

    Ok(())
}
