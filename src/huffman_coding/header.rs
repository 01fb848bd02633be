//! Size estimate for the header a decoder would need to rebuild a code table.
//!
//! Two layouts are considered and the smaller one wins.
//!
//! Dense (good when most symbols occur):
//! - 1 byte valid bits in the last byte, 1 byte valid bytes in the last word, 1 byte symbol width
//! - for every possible symbol, 1 byte code length (or an escape byte plus 2 bytes when the
//!   length does not fit under the escape value)
//! - every code's bits, back to back, rounded up to a byte
//!
//! Sparse (good when most symbols are missing):
//! - the same 3 bytes, flagged, plus 2 bytes for the number of symbols that occur
//! - for each symbol that occurs, 2 bytes of symbol value and the 1 or 3 byte length
//! - the same code bits, rounded up to a byte

use std::fmt::{Display, Formatter};

use log::debug;

use super::huffman::CodeTable;

/// Fixed bytes ahead of a dense header
pub const DENSE_PREFIX: usize = 3;
/// Fixed bytes ahead of a sparse header
pub const SPARSE_PREFIX: usize = 5;
/// Code lengths at or above this need the escape byte and a 2 byte length
const LEN_ESCAPE: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLayout {
    /// One length entry per possible symbol
    Dense,
    /// Symbol and length entries for occurring symbols only
    Sparse,
}

impl Display for HeaderLayout {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The winning layout and its size in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderEstimate {
    pub layout: HeaderLayout,
    pub bytes: usize,
}

/// Bytes needed to store one code length.
fn len_field(len: usize) -> usize {
    if len < LEN_ESCAPE {
        1
    } else {
        3
    }
}

/// Estimate the smallest header for a table. Ties go to the dense layout.
pub fn estimate_header(table: &CodeTable) -> HeaderEstimate {
    let code_bytes = (table.total_code_bits() + 7) / 8;

    let dense = DENSE_PREFIX + table.code_lens().map(len_field).sum::<usize>() + code_bytes;
    let sparse = SPARSE_PREFIX
        + table
            .code_lens()
            .filter(|&len| len > 0)
            .map(|len| 2 + len_field(len))
            .sum::<usize>()
        + code_bytes;

    debug!(
        "Header estimate: dense {} bytes, sparse {} bytes ({} code bytes)",
        dense, sparse, code_bytes
    );
    if dense <= sparse {
        HeaderEstimate {
            layout: HeaderLayout::Dense,
            bytes: dense,
        }
    } else {
        HeaderEstimate {
            layout: HeaderLayout::Sparse,
            bytes: sparse,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bitstream::bitbuffer::BitBuffer;
    use crate::tools::symbols::SymbolWidth;

    fn code_of_len(len: usize) -> BitBuffer {
        let mut bb = BitBuffer::new();
        (0..len).for_each(|i| bb.push_bit(i % 2 == 1).unwrap());
        bb
    }

    #[test]
    fn empty_table_test() {
        let table = CodeTable::from_data(&[], SymbolWidth::Eight).unwrap();
        let est = estimate_header(&table);
        assert_eq!(est.layout, HeaderLayout::Sparse);
        assert_eq!(est.bytes, SPARSE_PREFIX);
    }

    #[test]
    fn sparse_wins_test() {
        // Two 1 bit codes: dense 3 + 256 + 1, sparse 5 + 2 * 3 + 1
        let table = CodeTable::from_data(&[0x00, 0xFF], SymbolWidth::Eight).unwrap();
        let est = estimate_header(&table);
        assert_eq!(
            est,
            HeaderEstimate {
                layout: HeaderLayout::Sparse,
                bytes: 12
            }
        );
    }

    #[test]
    fn dense_wins_test() {
        // Every nibble occurs equally: sixteen 4 bit codes, 8 code bytes.
        let data: Vec<u8> = (0..=255).collect();
        let table = CodeTable::from_data(&data, SymbolWidth::Four).unwrap();
        let est = estimate_header(&table);
        assert_eq!(est.layout, HeaderLayout::Dense);
        assert_eq!(est.bytes, 3 + 16 + 8);
    }

    #[test]
    fn escape_length_test() {
        let mut codes = vec![BitBuffer::new(); 16];
        codes[0] = code_of_len(300);
        let table = CodeTable::from_parts(SymbolWidth::Four, codes);
        // dense: 3 + 15 + 3 + 38, sparse: 5 + (2 + 3) + 38
        let est = estimate_header(&table);
        assert_eq!(est.layout, HeaderLayout::Sparse);
        assert_eq!(est.bytes, 48);

        let mut codes = vec![BitBuffer::new(); 16];
        codes[3] = code_of_len(254);
        codes[4] = code_of_len(255);
        let table = CodeTable::from_parts(SymbolWidth::Four, codes);
        // code bits 509 -> 64 bytes; dense 3 + 14 + 1 + 3 + 64, sparse 5 + 3 + 5 + 64
        assert_eq!(estimate_header(&table).bytes, 77);
    }

    #[test]
    fn monotone_in_code_bits_test() {
        let mut last = 0;
        for len in 1..600 {
            let mut codes = vec![BitBuffer::new(); 16];
            codes[7] = code_of_len(len);
            codes[8] = code_of_len(1);
            let est = estimate_header(&CodeTable::from_parts(SymbolWidth::Four, codes));
            let prefix = match est.layout {
                HeaderLayout::Dense => DENSE_PREFIX,
                HeaderLayout::Sparse => SPARSE_PREFIX,
            };
            assert!(est.bytes >= prefix);
            assert!(est.bytes >= last, "len {}", len);
            last = est.bytes;
        }
    }
}
