//! Simulate command: print the DAC code after each tick.

use super::common::{SourceArgs, Switch, Trace, parse_switch, simulate};
use anyhow::Context;
use clap::Args;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Number of timer ticks to run
    #[arg(short = 'n', long, default_value = "100")]
    ticks: usize,

    /// Change the waveform before a tick, e.g. `--switch 500=sine` (repeatable)
    #[arg(long = "switch", value_name = "TICK=WAVEFORM", value_parser = parse_switch)]
    switches: Vec<Switch>,

    /// Emit `tick,code,waveform` CSV instead of one code per line
    #[arg(long)]
    csv: bool,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

pub fn run(args: SimulateArgs) -> anyhow::Result<()> {
    let config = args.source.resolve()?;
    let trace = simulate(&config, args.source.bits, args.ticks, &args.switches)?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            write_trace(&mut out, &trace, args.csv)?;
            out.flush()?;
            tracing::info!(path = %path.display(), ticks = trace.codes.len(), "wrote trace");
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            write_trace(&mut out, &trace, args.csv)?;
        }
    }

    Ok(())
}

fn write_trace<W: Write>(out: &mut W, trace: &Trace, csv: bool) -> std::io::Result<()> {
    if csv {
        writeln!(out, "tick,code,waveform")?;
        for (tick, (code, waveform)) in trace.codes.iter().zip(&trace.waveforms).enumerate() {
            writeln!(out, "{tick},{code},{waveform}")?;
        }
    } else {
        for code in &trace.codes {
            writeln!(out, "{code}")?;
        }
    }
    Ok(())
}
