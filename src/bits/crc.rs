// CRC-CCITT check for 96-bit trunking signaling blocks
// Generator x^16 + x^12 + x^5 + 1, register preset to all ones, output inverted

use super::CorrectedBitBuffer;
use crc::{Crc, CRC_16_GENIBUS};

const CCITT: Crc<u16> = Crc::<u16>::new(&CRC_16_GENIBUS);

/// Bytes covered by the CRC (bits 0..80)
pub const TSBK_PROTECTED_BYTES: usize = 10;

/// Number of bits in a TSBK including its trailing CRC
pub const TSBK_BITS: usize = 96;

/// CRC computed over the protected portion of a TSBK.
///
/// Returns `None` when the buffer is too short to hold one.
pub fn tsbk_crc(buffer: &CorrectedBitBuffer) -> Option<u16> {
    buffer
        .get_bytes(0..TSBK_PROTECTED_BYTES)
        .ok()
        .map(|bytes| CCITT.checksum(bytes))
}

/// True when the CRC carried in bits 80..96 matches the computed value
pub fn tsbk_crc_ok(buffer: &CorrectedBitBuffer) -> bool {
    if buffer.require_len(TSBK_BITS).is_err() {
        return false;
    }
    match (tsbk_crc(buffer), buffer.get_int_range(80, 96)) {
        (Some(computed), Ok(carried)) => computed as u32 == carried,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sealed(mut bytes: Vec<u8>) -> CorrectedBitBuffer {
        let crc = CCITT.checksum(&bytes[..TSBK_PROTECTED_BYTES]);
        bytes.truncate(TSBK_PROTECTED_BYTES);
        bytes.extend_from_slice(&crc.to_be_bytes());
        CorrectedBitBuffer::from_bytes(bytes)
    }

    #[test]
    fn test_valid_crc() {
        let buffer = sealed(vec![0xAB, 0x00, 0x00, 0xFF, 0xFF, 0x03, 0x07, 0x00, 0x04, 0xD2, 0, 0]);
        assert!(tsbk_crc_ok(&buffer));
    }

    #[test]
    fn test_single_bit_error_detected() {
        let mut bytes = sealed(vec![0x2B; 12]).as_bytes().to_vec();
        bytes[4] ^= 0x10;
        assert!(!tsbk_crc_ok(&CorrectedBitBuffer::from_bytes(bytes)));
    }

    #[test]
    fn test_short_buffer_fails() {
        let buffer = CorrectedBitBuffer::zeroed(80);
        assert!(!tsbk_crc_ok(&buffer));
        assert!(tsbk_crc(&buffer).is_some());
        assert!(tsbk_crc(&CorrectedBitBuffer::zeroed(72)).is_none());
    }
}
