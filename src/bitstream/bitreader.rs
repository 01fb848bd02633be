//! BitReader: reads back a packed bitstream written by BitBuffer.
//!
//! Bits are read most significant first, and reading stops at the valid bit count
//! even when the final byte carries padding.

const BIT_MASK: u8 = 0x80;

/// Reads bits from a byte slice holding `bits` valid bits.
#[derive(Debug)]
pub struct BitReader<'a> {
    buffer: &'a [u8],
    bits: usize,
    cursor: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new BitReader. The valid bit count is clamped to what the slice holds.
    pub fn new(buffer: &'a [u8], bits: usize) -> Self {
        Self {
            buffer,
            bits: bits.min(buffer.len() * 8),
            cursor: 0,
        }
    }

    /// Return bit as Option<usize> (1 or 0), or None if there is no more data to read
    pub fn bit(&mut self) -> Option<usize> {
        if self.cursor >= self.bits {
            return None;
        }
        let bit = (self.buffer[self.cursor / 8] & (BIT_MASK >> (self.cursor % 8))) != 0;
        self.cursor += 1;
        Some(bit as usize)
    }

    /// Count of bits still unread
    pub fn remaining(&self) -> usize {
        self.bits - self.cursor
    }

    /// Position of the next bit to read
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Debugging function to return the current byte and bit index
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor / 8, self.cursor % 8)
    }
}
