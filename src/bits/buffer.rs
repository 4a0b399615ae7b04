// Fixed-length bit buffer handed over by the link layer after error correction

use std::fmt;
use std::ops::Range;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BitError {
    #[error("Field references bit {index} but buffer holds {length} bits")]
    FieldOutOfRange { index: usize, length: usize },

    #[error("Field of {bits} bits exceeds the {max} bit accumulator")]
    FieldTooWide { bits: usize, max: usize },

    #[error("Byte range {start}..{end} outside buffer of {length} bytes")]
    ByteRangeOutOfRange {
        start: usize,
        end: usize,
        length: usize,
    },

    #[error("Value {value:#x} does not fit in {bits} bits")]
    ValueTooLarge { value: u64, bits: usize },
}

pub type Result<T> = std::result::Result<T, BitError>;

/// Immutable sequence of bits plus the number of bits an outer FEC stage corrected.
///
/// Bits are packed MSB-first into bytes, so bit 0 is the high bit of byte 0.
#[derive(Clone, PartialEq, Eq)]
pub struct CorrectedBitBuffer {
    data: Vec<u8>,
    len: usize,
    corrected: usize,
}

impl CorrectedBitBuffer {
    /// Buffer of `len` zero bits
    pub fn zeroed(len: usize) -> Self {
        Self {
            data: vec![0u8; len.div_ceil(8)],
            len,
            corrected: 0,
        }
    }

    /// Wrap whole bytes; the bit length is `bytes.len() * 8`
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let data = bytes.into();
        let len = data.len() * 8;
        Self {
            data,
            len,
            corrected: 0,
        }
    }

    /// Pack a sequence of individual bits
    pub fn from_bits(bits: &[bool]) -> Self {
        let mut buffer = Self::zeroed(bits.len());
        for (index, bit) in bits.iter().enumerate() {
            if *bit {
                buffer.data[index / 8] |= 0x80 >> (index % 8);
            }
        }
        buffer
    }

    /// Record how many bits the error-correction stage repaired
    pub fn with_corrected_bits(mut self, corrected: usize) -> Self {
        self.corrected = corrected;
        self
    }

    /// Write `value` into the listed bit positions, MSB first
    pub fn with_int(mut self, positions: &[usize], value: u64) -> Result<Self> {
        if positions.len() < 64 && value >> positions.len() != 0 {
            return Err(BitError::ValueTooLarge {
                value,
                bits: positions.len(),
            });
        }
        if positions.len() > 64 {
            return Err(BitError::FieldTooWide {
                bits: positions.len(),
                max: 64,
            });
        }
        self.check_positions(positions)?;

        let width = positions.len();
        for (i, &index) in positions.iter().enumerate() {
            let bit = (value >> (width - 1 - i)) & 1 == 1;
            let mask = 0x80 >> (index % 8);
            if bit {
                self.data[index / 8] |= mask;
            } else {
                self.data[index / 8] &= !mask;
            }
        }
        Ok(self)
    }

    /// Number of bits in the buffer
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bits repaired by the outer error-correction stage
    pub fn corrected_bit_count(&self) -> usize {
        self.corrected
    }

    /// Fail with `FieldOutOfRange` unless the buffer holds at least `bits` bits
    pub fn require_len(&self, bits: usize) -> Result<()> {
        if bits > self.len {
            return Err(BitError::FieldOutOfRange {
                index: bits - 1,
                length: self.len,
            });
        }
        Ok(())
    }

    /// Read a single bit
    pub fn get(&self, index: usize) -> Result<bool> {
        if index >= self.len {
            return Err(BitError::FieldOutOfRange {
                index,
                length: self.len,
            });
        }
        Ok(self.bit(index))
    }

    /// Pack the bits at `positions` into an integer, first position is the MSB.
    ///
    /// Positions need not be contiguous. At most 32 positions fit.
    pub fn get_int(&self, positions: &[usize]) -> Result<u32> {
        if positions.len() > 32 {
            return Err(BitError::FieldTooWide {
                bits: positions.len(),
                max: 32,
            });
        }
        Ok(self.get_long(positions)? as u32)
    }

    /// Same as [`get_int`](Self::get_int) with a 64 bit accumulator
    pub fn get_long(&self, positions: &[usize]) -> Result<u64> {
        if positions.len() > 64 {
            return Err(BitError::FieldTooWide {
                bits: positions.len(),
                max: 64,
            });
        }
        self.check_positions(positions)?;
        Ok(self.pack(positions))
    }

    /// Read the contiguous half-open bit range `start..end`
    pub fn get_int_range(&self, start: usize, end: usize) -> Result<u32> {
        let positions: Vec<usize> = (start..end).collect();
        self.get_int(&positions)
    }

    /// Contiguous byte accessor for byte-oriented payloads
    pub fn get_bytes(&self, range: Range<usize>) -> Result<&[u8]> {
        let length = self.len / 8;
        if range.start > range.end || range.end > length {
            return Err(BitError::ByteRangeOutOfRange {
                start: range.start,
                end: range.end,
                length,
            });
        }
        Ok(&self.data[range])
    }

    /// Backing bytes, including any padding bits of a partial final byte
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Unchecked field read used after the caller has called `require_len`
    /// with a length covering every position in the table.
    pub(crate) fn int(&self, positions: &[usize]) -> u32 {
        debug_assert!(positions.len() <= 32);
        self.pack(positions) as u32
    }

    pub(crate) fn flag(&self, index: usize) -> bool {
        self.bit(index)
    }

    fn check_positions(&self, positions: &[usize]) -> Result<()> {
        match positions.iter().find(|&&index| index >= self.len) {
            Some(&index) => Err(BitError::FieldOutOfRange {
                index,
                length: self.len,
            }),
            None => Ok(()),
        }
    }

    fn pack(&self, positions: &[usize]) -> u64 {
        positions
            .iter()
            .fold(0u64, |acc, &index| (acc << 1) | self.bit(index) as u64)
    }

    fn bit(&self, index: usize) -> bool {
        self.data[index / 8] & (0x80 >> (index % 8)) != 0
    }
}

impl fmt::Debug for CorrectedBitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CorrectedBitBuffer")
            .field("len", &self.len)
            .field("corrected", &self.corrected)
            .field("data", &super::to_hex(&self.data))
            .finish()
    }
}
