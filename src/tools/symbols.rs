use std::fmt::{Display, Formatter};

use crate::error::{try_reserve_exact, HuffError, Result};

/// Number of bits in each symbol taken from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolWidth {
    /// Two symbols per byte, high nibble first
    Four,
    /// One symbol per byte
    Eight,
    /// Big-endian byte pairs. An odd final byte is paired with a zero byte.
    Sixteen,
}

impl SymbolWidth {
    pub fn bits(self) -> usize {
        match self {
            SymbolWidth::Four => 4,
            SymbolWidth::Eight => 8,
            SymbolWidth::Sixteen => 16,
        }
    }

    /// Count of possible symbol values (2^bits).
    pub fn alphabet_size(self) -> usize {
        1 << self.bits()
    }

    /// How many symbols a buffer of n_bytes holds, counting a padded final word.
    pub fn symbol_count(self, n_bytes: usize) -> usize {
        (n_bytes * 8 + self.bits() - 1) / self.bits()
    }
}

impl TryFrom<u8> for SymbolWidth {
    type Error = HuffError;

    fn try_from(bits: u8) -> Result<Self> {
        match bits {
            4 => Ok(SymbolWidth::Four),
            8 => Ok(SymbolWidth::Eight),
            16 => Ok(SymbolWidth::Sixteen),
            other => Err(HuffError::InvalidWidth(other)),
        }
    }
}

impl Display for SymbolWidth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// Return the `width` bits starting at any bit offset, most significant first.
/// Bits past the end of the data read as zero, which is the 16 bit padding rule.
pub fn read_symbol(data: &[u8], bit_offset: usize, width: SymbolWidth) -> Result<u16> {
    if bit_offset >= data.len() * 8 {
        return Err(HuffError::OffsetOutOfRange {
            offset: bit_offset,
            len: data.len(),
        });
    }
    let mut symbol = 0_u16;
    for pos in bit_offset..bit_offset + width.bits() {
        let byte = data.get(pos / 8).copied().unwrap_or(0);
        symbol = (symbol << 1) | ((byte >> (7 - pos % 8)) & 1) as u16;
    }
    Ok(symbol)
}

/// Iterator over the aligned symbols of a buffer.
#[derive(Debug, Clone)]
pub struct Symbols<'a> {
    data: &'a [u8],
    width: SymbolWidth,
    index: usize,
    count: usize,
}

/// Iterate the symbols of `data` in order. This is the sequence the frequency counter
/// counts and the packer encodes.
pub fn symbols(data: &[u8], width: SymbolWidth) -> Symbols<'_> {
    Symbols {
        data,
        width,
        index: 0,
        count: width.symbol_count(data.len()),
    }
}

impl<'a> Iterator for Symbols<'a> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        if self.index >= self.count {
            return None;
        }
        let i = self.index;
        self.index += 1;
        Some(match self.width {
            SymbolWidth::Four => {
                let byte = self.data[i / 2];
                if i % 2 == 0 {
                    (byte >> 4) as u16
                } else {
                    (byte & 0x0f) as u16
                }
            }
            SymbolWidth::Eight => self.data[i] as u16,
            SymbolWidth::Sixteen => {
                let lo = self.data.get(2 * i + 1).copied().unwrap_or(0);
                (self.data[2 * i] as u16) << 8 | lo as u16
            }
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.count - self.index;
        (left, Some(left))
    }
}

impl<'a> ExactSizeIterator for Symbols<'a> {}

/// Pack symbols back into bytes and cut the result to n_bytes, dropping the padding
/// added to a final partial word.
pub fn symbols_to_bytes(symbols: &[u16], width: SymbolWidth, n_bytes: usize) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    try_reserve_exact(&mut out, (symbols.len() * width.bits() + 7) / 8)?;
    match width {
        SymbolWidth::Four => symbols.chunks(2).for_each(|pair| {
            let lo = pair.get(1).copied().unwrap_or(0);
            out.push(((pair[0] & 0x0f) << 4 | (lo & 0x0f)) as u8)
        }),
        SymbolWidth::Eight => out.extend(symbols.iter().map(|&s| s as u8)),
        SymbolWidth::Sixteen => symbols.iter().for_each(|&s| {
            out.push((s >> 8) as u8);
            out.push(s as u8);
        }),
    }
    out.truncate(n_bytes);
    Ok(out)
}
