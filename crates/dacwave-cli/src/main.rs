//! dacwave CLI - host-side simulator for dacwave generators.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dacwave")]
#[command(author, version, about = "Timer-driven DAC waveform simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the update driver against a simulated DAC and print the codes
    Simulate(commands::simulate::SimulateArgs),

    /// Run the update driver and write the output as a WAV file
    Render(commands::render::RenderArgs),

    /// List, show, and export factory presets
    Presets(commands::presets::PresetsArgs),

    /// Check a generator configuration file
    Validate(commands::validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so simulated codes on stdout stay machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();
    tracing_log::LogTracer::init().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Render(args) => commands::render::run(args),
        Commands::Presets(args) => commands::presets::run(args),
        Commands::Validate(args) => commands::validate::run(args),
    }
}
