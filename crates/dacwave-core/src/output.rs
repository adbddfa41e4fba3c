//! DAC output sink abstraction.

/// The converter the update driver reads from and writes to.
///
/// The sink is the only record of the current output: the core keeps no
/// shadow copy and reads it back fresh on every tick. On hardware this wraps
/// the DAC data register; `write` is expected to reach the pin by the next
/// conversion cycle.
pub trait DacOutput {
    /// The code most recently written.
    fn read(&self) -> u16;

    /// Store a new code.
    fn write(&mut self, code: u16);
}

impl<T: DacOutput + ?Sized> DacOutput for &mut T {
    fn read(&self) -> u16 {
        (**self).read()
    }

    fn write(&mut self, code: u16) {
        (**self).write(code);
    }
}

/// Resolution of the converter on the target board.
pub const DEFAULT_RESOLUTION_BITS: u8 = 10;

/// In-memory DAC with a data register of fixed width.
///
/// Codes wider than the register are truncated on write, like a hardware
/// data register that only latches its low bits.
///
/// # Example
///
/// ```rust
/// use dacwave_core::{DacOutput, SimulatedDac};
///
/// let mut dac = SimulatedDac::new(10);
/// dac.write(0x3FF);
/// assert_eq!(dac.read(), 0x3FF);
/// dac.write(0x400);
/// assert_eq!(dac.read(), 0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulatedDac {
    value: u16,
    mask: u16,
    writes: u64,
}

impl Default for SimulatedDac {
    fn default() -> Self {
        Self::new(DEFAULT_RESOLUTION_BITS)
    }
}

impl SimulatedDac {
    /// Create a DAC with `bits` of resolution (clamped to 1..=16).
    pub const fn new(bits: u8) -> Self {
        let bits = if bits == 0 {
            1
        } else if bits > 16 {
            16
        } else {
            bits
        };
        let mask = if bits == 16 {
            u16::MAX
        } else {
            (1u16 << bits) - 1
        };
        Self {
            value: 0,
            mask,
            writes: 0,
        }
    }

    /// Full 16-bit register, no truncation.
    pub const fn full_range() -> Self {
        Self::new(16)
    }

    /// Highest code the register can hold.
    pub const fn max_code(&self) -> u16 {
        self.mask
    }

    /// Number of writes since construction.
    pub const fn write_count(&self) -> u64 {
        self.writes
    }
}

impl DacOutput for SimulatedDac {
    fn read(&self) -> u16 {
        self.value
    }

    fn write(&mut self, code: u16) {
        self.value = code & self.mask;
        self.writes += 1;
    }
}
