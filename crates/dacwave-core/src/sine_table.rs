//! Precomputed sine playback table.
//!
//! Generated at build time, so playback is a plain indexed read with no
//! floating point on the target. The table covers exactly one period; at a
//! 100 kHz tick it plays back as a 1 kHz tone.
//!
//! Codes are baked in around the default output bounds and are written to
//! the DAC as-is: sine playback ignores [`Bounds`](crate::Bounds).

include!(concat!(env!("OUT_DIR"), "/sine_table.rs"));

/// Advance a playback cursor by one entry, wrapping at the table end.
#[inline]
pub fn next_index(cursor: usize) -> usize {
    let next = cursor + 1;
    if next >= SINE_TABLE_LEN { 0 } else { next }
}
