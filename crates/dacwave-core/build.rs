//! Generates the sine playback table.
//!
//! One period is sampled at `SINE_TABLE_LEN` points and quantized to DAC
//! codes around a fixed offset, so the table spans exactly the default
//! ramp bounds `[369, 1023]` of a 10-bit converter.

use std::{env, fs::File, io::Write, path::Path};

const SINE_TABLE_LEN: u16 = 100;
const SINE_OFFSET: f64 = 696.0;
const SINE_AMPLITUDE: f64 = 327.0;

fn main() -> std::io::Result<()> {
    println!("cargo::rerun-if-changed=build.rs");

    let out_dir = env::var_os("OUT_DIR")
        .ok_or_else(|| std::io::Error::other("OUT_DIR not set by cargo"))?;
    let table_path = Path::new(&out_dir).join("sine_table.rs");
    let mut table = File::create(table_path)?;

    writeln!(table, "/// Number of entries in [`SINE_TABLE`].")?;
    writeln!(table, "pub const SINE_TABLE_LEN: usize = {SINE_TABLE_LEN};")?;
    writeln!(table)?;
    writeln!(
        table,
        "/// One sine period, offset {SINE_OFFSET}, amplitude {SINE_AMPLITUDE}."
    )?;
    writeln!(table, "pub static SINE_TABLE: [u16; SINE_TABLE_LEN] = [")?;
    for i in 0..SINE_TABLE_LEN {
        let x = f64::from(i) * std::f64::consts::TAU / f64::from(SINE_TABLE_LEN);
        let code = (SINE_OFFSET + x.sin() * SINE_AMPLITUDE).round() as u16;
        writeln!(table, "    {code},")?;
    }
    writeln!(table, "];")?;

    Ok(())
}
