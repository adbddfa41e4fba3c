//! Validate command: check a configuration file before flashing or simulating it.

use clap::Args;
use dacwave_config::{GeneratorConfig, ValidationError, validate_config};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Generator configuration file (TOML)
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

pub fn run(args: ValidateArgs) -> anyhow::Result<()> {
    let config = GeneratorConfig::load(&args.file)?;

    match validate_config(&config) {
        Ok(()) => {
            println!("{}: OK ({}, {})", args.file.display(), config.name, config.waveform);
            Ok(())
        }
        Err(ValidationError::Multiple(errors)) => {
            for error in &errors {
                println!("{}: {error}", args.file.display());
            }
            anyhow::bail!("{} validation errors", errors.len())
        }
        Err(error) => {
            println!("{}: {error}", args.file.display());
            anyhow::bail!("validation failed")
        }
    }
}
