// Bit-level access to decoded radio messages
// Fields are addressed by absolute bit index, most significant bit first

pub mod buffer;
pub mod crc;
pub mod hex;

pub use buffer::{BitError, CorrectedBitBuffer, Result};
pub use crc::{tsbk_crc, tsbk_crc_ok};
pub use hex::to_hex;

/// Build a contiguous field table `[start, start + 1, ..., end]` at compile time.
///
/// Protocol documents describe most fields as inclusive bit ranges; message
/// types keep their tables as `const` arrays built with this helper.
pub const fn field<const N: usize>(start: usize) -> [usize; N] {
    let mut positions = [0usize; N];
    let mut i = 0;
    while i < N {
        positions[i] = start + i;
        i += 1;
    }
    positions
}

/// Highest bit index referenced by a field table.
pub const fn max_index(positions: &[usize]) -> usize {
    let mut max = 0;
    let mut i = 0;
    while i < positions.len() {
        if positions[i] > max {
            max = positions[i];
        }
        i += 1;
    }
    max
}
