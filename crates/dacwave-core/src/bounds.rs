//! Output envelope and ramp step sizes for ramp-based waveforms.

/// Lowest output code after initialization (about 1.8 V at 5 V VDD on a
/// 10-bit converter).
pub const DEFAULT_MIN: u16 = 369;

/// Highest output code after initialization (10-bit full scale).
pub const DEFAULT_MAX: u16 = 0x3FF;

/// Default rising-edge step per tick.
pub const DEFAULT_RISING_RATE: u16 = 10;

/// Default falling-edge step per tick.
pub const DEFAULT_FALLING_RATE: u16 = 10;

/// Default code written to the DAC by `initialize`. A non-zero start acts as
/// a phase offset for ramp waveforms.
pub const DEFAULT_OUTPUT: u16 = 0;

/// Inclusive `[min, max]` output range for triangle and sawtooth generators.
///
/// `min <= max` is a caller precondition. It is not checked here: an
/// inverted range makes the ramp generators pin to one clamped value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bounds {
    /// Lowest code a ramp may reach.
    pub min: u16,
    /// Highest code a ramp may reach.
    pub max: u16,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(DEFAULT_MIN, DEFAULT_MAX)
    }
}

impl Bounds {
    /// Create bounds from inclusive endpoints.
    pub const fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }

    /// Whether `min <= max`.
    pub const fn is_ordered(&self) -> bool {
        self.min <= self.max
    }

    /// Whether `code` lies within `[min, max]`.
    pub const fn contains(&self, code: u16) -> bool {
        code >= self.min && code <= self.max
    }

    /// Distance between the endpoints, or 0 for an inverted range.
    pub const fn span(&self) -> u16 {
        self.max.saturating_sub(self.min)
    }
}

/// Per-tick step magnitudes. Both are unsigned; zero yields a flat ramp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RampRates {
    /// Added per tick on rising edges (triangle and sawtooth).
    pub rising: u16,
    /// Subtracted per tick on the triangle's falling edge.
    pub falling: u16,
}

impl Default for RampRates {
    fn default() -> Self {
        Self::new(DEFAULT_RISING_RATE, DEFAULT_FALLING_RATE)
    }
}

impl RampRates {
    /// Create rates from rising and falling step sizes.
    pub const fn new(rising: u16, falling: u16) -> Self {
        Self { rising, falling }
    }

    /// Same step size on both edges.
    pub const fn symmetric(rate: u16) -> Self {
        Self::new(rate, rate)
    }
}
