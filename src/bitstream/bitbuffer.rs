use std::fmt::{Display, Formatter};

use crate::error::{try_reserve, try_reserve_exact, Result};

const BIT_MASK: u8 = 0x80;

/// Growable buffer of bits, packed most significant bit first.
///
/// Used both for the code of each symbol and for the packed output. A new byte is
/// reserved only when the bit count sits on a byte boundary, so the buffer always
/// holds exactly ceil(len / 8) bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    bytes: Vec<u8>,
    bits: usize,
}

impl BitBuffer {
    /// Create an empty buffer. Nothing is allocated until the first bit arrives.
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            bits: 0,
        }
    }

    /// Create an empty buffer with room for `size` bytes.
    pub fn with_capacity(size: usize) -> Result<Self> {
        let mut bytes = Vec::new();
        try_reserve_exact(&mut bytes, size)?;
        Ok(Self { bytes, bits: 0 })
    }

    /// Number of valid bits.
    pub fn len(&self) -> usize {
        self.bits
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// The packed bytes. The last byte may be only partly valid (see last_bits()).
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Valid bits in the final byte, 0 meaning the final byte is full.
    pub fn last_bits(&self) -> u8 {
        (self.bits % 8) as u8
    }

    /// Append one bit, growing the buffer by a byte on byte boundaries.
    pub fn push_bit(&mut self, bit: bool) -> Result<()> {
        if self.bits % 8 == 0 {
            try_reserve(&mut self.bytes, 1)?;
            self.bytes.push(0);
        }
        if bit {
            self.bytes[self.bits / 8] |= BIT_MASK >> (self.bits % 8);
        }
        self.bits += 1;
        Ok(())
    }

    /// Append every bit of another buffer, one at a time, in order.
    pub fn push_bits(&mut self, other: &BitBuffer) -> Result<()> {
        for bit in other.iter() {
            self.push_bit(bit)?;
        }
        Ok(())
    }

    /// Return bit `index`, or None past the valid bits.
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.bits {
            return None;
        }
        Some(self.bytes[index / 8] & (BIT_MASK >> (index % 8)) != 0)
    }

    /// Overwrite a bit that has already been pushed.
    fn set(&mut self, index: usize, bit: bool) {
        let mask = BIT_MASK >> (index % 8);
        if bit {
            self.bytes[index / 8] |= mask;
        } else {
            self.bytes[index / 8] &= !mask;
        }
    }

    /// Reverse the order of the valid bits in place.
    pub fn reverse(&mut self) {
        if self.bits < 2 {
            return;
        }
        let (mut lo, mut hi) = (0, self.bits - 1);
        while lo < hi {
            // Both indexes are below self.bits
            let a = self.get(lo).unwrap_or_default();
            let b = self.get(hi).unwrap_or_default();
            self.set(lo, b);
            self.set(hi, a);
            lo += 1;
            hi -= 1;
        }
    }

    /// True if every bit of self matches the start of other.
    pub fn is_prefix_of(&self, other: &BitBuffer) -> bool {
        self.bits <= other.bits && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }

    /// Iterate over the valid bits.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.bits).filter_map(move |i| self.get(i))
    }

    /// Debugging function to return the number of bytes.bits held so far
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.bits / 8, self.bits % 8)
    }
}

impl Display for BitBuffer {
    /// Bits as a string of 0s and 1s; an empty buffer shows as "|".
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "|");
        }
        for bit in self.iter() {
            write!(f, "{}", if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::BitBuffer;

    fn from_str(bits: &str) -> BitBuffer {
        let mut bb = BitBuffer::new();
        bits.chars().for_each(|c| bb.push_bit(c == '1').unwrap());
        bb
    }

    #[test]
    fn push_bit_msb_first_test() {
        let bb = from_str("101");
        assert_eq!(bb.as_bytes(), &[0b1010_0000]);
        assert_eq!(bb.len(), 3);
        assert_eq!(bb.last_bits(), 3);
    }

    #[test]
    fn grows_on_byte_boundary_test() {
        let mut bb = BitBuffer::new();
        assert!(bb.as_bytes().is_empty());
        for i in 0..17 {
            bb.push_bit(i % 3 == 0).unwrap();
            assert_eq!(bb.as_bytes().len(), (bb.len() + 7) / 8);
        }
        assert_eq!(bb.as_bytes(), &[0b1001_0010, 0b0100_1001, 0b0000_0000]);
        assert_eq!("[2.1]", &bb.loc());
    }

    #[test]
    fn get_reads_back_pushed_bits_test() {
        let pattern = "1100101011110000101";
        let bb = from_str(pattern);
        for (i, c) in pattern.chars().enumerate() {
            assert_eq!(bb.get(i), Some(c == '1'));
        }
        assert_eq!(bb.get(pattern.len()), None);
        assert_eq!(bb.to_string(), pattern);
    }

    #[test]
    fn reverse_test() {
        let mut bb = from_str("1100000001");
        bb.reverse();
        assert_eq!(bb.to_string(), "1000000011");
        let mut one = from_str("1");
        one.reverse();
        assert_eq!(one.to_string(), "1");
    }

    #[test]
    fn push_bits_unaligned_test() {
        let mut out = from_str("111");
        out.push_bits(&from_str("0000001")).unwrap();
        out.push_bits(&from_str("1")).unwrap();
        assert_eq!(out.len(), 11);
        assert_eq!(out.as_bytes(), &[0b1110_0000, 0b0110_0000]);
    }

    #[test]
    fn prefix_test() {
        assert!(from_str("10").is_prefix_of(&from_str("101")));
        assert!(!from_str("11").is_prefix_of(&from_str("101")));
        assert!(!from_str("1011").is_prefix_of(&from_str("101")));
        assert_eq!(BitBuffer::new().to_string(), "|");
    }
}
