//! Factory presets bundled with the dacwave library.
//!
//! Built-in generator configurations that are always available without
//! external files. They run on the target board's 10-bit DAC with a
//! 100 kHz tick and serve as starting points for custom files.

use crate::GeneratorConfig;

/// Array of factory preset names for external access.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "init",
    "triangle",
    "sawtooth",
    "sine_1k",
    "slow_triangle",
    "fast_saw",
];

/// TOML content for factory presets, embedded at compile time.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("init", INIT_PRESET),
    ("triangle", TRIANGLE_PRESET),
    ("sawtooth", SAWTOOTH_PRESET),
    ("sine_1k", SINE_1K_PRESET),
    ("slow_triangle", SLOW_TRIANGLE_PRESET),
    ("fast_saw", FAST_SAW_PRESET),
];

/// Power-on state: DC at code 0, no generator.
const INIT_PRESET: &str = r#"
name = "Init"
description = "Power-on defaults - DC output, no generator installed"
waveform = "dc"
initial_output = 0
"#;

/// Firmware default triangle.
const TRIANGLE_PRESET: &str = r#"
name = "Triangle"
description = "Symmetric triangle between 1.8 V and full scale, 10 codes per tick"
waveform = "triangle_rising"
initial_output = 369

[bounds]
min = 369
max = 1023

[rates]
rising = 10
falling = 10
"#;

const SAWTOOTH_PRESET: &str = r#"
name = "Sawtooth"
description = "Rising ramp with hard reset, 10 codes per tick"
waveform = "sawtooth"
initial_output = 369

[bounds]
min = 369
max = 1023

[rates]
rising = 10
falling = 10
"#;

/// Table playback; one table period per millisecond at the default tick.
const SINE_1K_PRESET: &str = r#"
name = "Sine 1k"
description = "1 kHz sine from the built-in table at a 100 kHz tick"
waveform = "sine"
tick_rate_hz = 100000
"#;

/// Asymmetric triangle with a gentle fall.
const SLOW_TRIANGLE_PRESET: &str = r#"
name = "Slow Triangle"
description = "Fast attack, slow decay across nearly the full 10-bit range"
waveform = "triangle_rising"
initial_output = 8

[bounds]
min = 8
max = 1023

[rates]
rising = 8
falling = 1
"#;

const FAST_SAW_PRESET: &str = r#"
name = "Fast Saw"
description = "Coarse sawtooth over a narrow window"
waveform = "sawtooth"
initial_output = 512

[bounds]
min = 512
max = 767

[rates]
rising = 32
falling = 0
"#;

/// All factory presets, in [`FACTORY_PRESET_NAMES`] order.
pub fn factory_presets() -> Vec<GeneratorConfig> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| GeneratorConfig::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by name.
///
/// Matches either the internal name (`sine_1k`) or the display name
/// (`Sine 1k`), case-insensitively.
///
/// # Example
///
/// ```rust
/// use dacwave_config::get_factory_preset;
///
/// let preset = get_factory_preset("triangle").unwrap();
/// assert_eq!(preset.name, "Triangle");
/// ```
pub fn get_factory_preset(name: &str) -> Option<GeneratorConfig> {
    let name_lower = name.to_lowercase();

    for (preset_name, toml) in FACTORY_PRESETS_TOML {
        if preset_name.to_lowercase() == name_lower {
            return GeneratorConfig::from_toml(toml).ok();
        }
    }

    // Also try matching against the preset's display name
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| GeneratorConfig::from_toml(toml).ok())
        .find(|preset| preset.name.to_lowercase() == name_lower)
}

/// Internal names of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Check if a name refers to a factory preset (case-insensitive).
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
