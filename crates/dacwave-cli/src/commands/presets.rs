//! Preset commands: list, show, and export factory presets.

use anyhow::Context;
use clap::{Args, Subcommand};
use dacwave_config::{GeneratorConfig, factory_presets, get_factory_preset};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand, Debug)]
enum PresetsCommand {
    /// List factory presets
    List,

    /// Show a preset as TOML
    Show {
        /// Preset name
        name: String,
    },

    /// Write a preset to a file for customization
    Export {
        /// Preset name
        name: String,

        /// Destination file
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List => list_presets(),
        PresetsCommand::Show { name } => show_preset(&name),
        PresetsCommand::Export { name, path, force } => export_preset(&name, &path, force),
    }
}

fn find_preset(name: &str) -> anyhow::Result<GeneratorConfig> {
    get_factory_preset(name).with_context(|| {
        format!("preset '{name}' not found. Use 'dacwave presets list' to see available presets.")
    })
}

fn list_presets() -> anyhow::Result<()> {
    println!("Factory Presets:");
    println!("================");
    for preset in factory_presets() {
        let desc = preset.description.as_deref().unwrap_or("");
        println!("  {:16} {:16} - {}", preset.name, preset.waveform, desc);
    }
    println!();
    Ok(())
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = find_preset(name)?;
    print!("{}", preset.to_toml()?);
    Ok(())
}

fn export_preset(name: &str, path: &Path, force: bool) -> anyhow::Result<()> {
    let preset = find_preset(name)?;
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }
    preset.save(path)?;
    println!("Exported '{}' to {}", preset.name, path.display());
    Ok(())
}
