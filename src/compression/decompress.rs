use log::{error, info, trace};

use crate::bitstream::bitreader::BitReader;
use crate::error::{try_reserve, try_reserve_exact, HuffError, Result};
use crate::huffman_coding::huffman::CodeTable;
use crate::tools::symbols::{symbols_to_bytes, SymbolWidth};

/// Index of the root in the node arena
const ROOT: usize = 0;

/// One node of the decode tree. Interior nodes have kids, leaves have a symbol.
#[derive(Debug, Clone, Default)]
struct DecodeNode {
    kids: [Option<usize>; 2],
    sym: Option<u16>,
}

/// Prefix tree rebuilt from a code table, used to walk packed bits back into symbols.
#[derive(Debug)]
pub struct Decoder {
    nodes: Vec<DecodeNode>,
    width: SymbolWidth,
}

impl Decoder {
    /// Build the decode tree. Fails if one code is a prefix of another.
    pub fn new(table: &CodeTable) -> Result<Decoder> {
        let mut nodes = Vec::new();
        try_reserve_exact(&mut nodes, 2 * table.symbol_count() + 1)?;
        nodes.push(DecodeNode::default());

        for (sym, code) in table.codes() {
            let mut idx = ROOT;
            for bit in code.iter() {
                // A leaf on the way down means a shorter code is our prefix
                if nodes[idx].sym.is_some() {
                    return Err(HuffError::NotPrefixFree { symbol: sym });
                }
                idx = match nodes[idx].kids[bit as usize] {
                    Some(next) => next,
                    None => {
                        try_reserve(&mut nodes, 1)?;
                        nodes.push(DecodeNode::default());
                        let next = nodes.len() - 1;
                        nodes[idx].kids[bit as usize] = Some(next);
                        next
                    }
                };
            }
            // The code must end on a fresh leaf
            let end = &mut nodes[idx];
            if end.sym.is_some() || end.kids.iter().any(Option::is_some) {
                return Err(HuffError::NotPrefixFree { symbol: sym });
            }
            end.sym = Some(sym);
        }

        trace!("Decode tree has {} nodes", nodes.len());
        Ok(Decoder {
            nodes,
            width: table.width(),
        })
    }

    pub fn width(&self) -> SymbolWidth {
        self.width
    }

    /// Walk the first n_bits of data through the tree and return the symbols found.
    pub fn decode_symbols(&self, data: &[u8], n_bits: usize) -> Result<Vec<u16>> {
        let mut br = BitReader::new(data, n_bits);
        let mut out = Vec::new();
        let mut idx = ROOT;
        // Start of the code being decoded, for error reports
        let mut code_start = 0;

        while let Some(bit) = br.bit() {
            idx = match self.nodes[idx].kids[bit] {
                Some(next) => next,
                None => {
                    error!("No code matches the bits at {} with {} bits left", br.loc(), br.remaining());
                    return Err(HuffError::CorruptStream { bit: br.position() - 1 });
                }
            };
            if let Some(sym) = self.nodes[idx].sym {
                try_reserve(&mut out, 1)?;
                out.push(sym);
                idx = ROOT;
                code_start = br.position();
            }
        }

        // Ran out of bits in the middle of a code
        if idx != ROOT {
            error!("Bitstream ends inside a code that started at bit {}", code_start);
            return Err(HuffError::CorruptStream { bit: code_start });
        }
        Ok(out)
    }
}

/// Decode n_bits of packed data with the table that packed it, returning n_bytes of output.
/// n_bytes trims the padding of a final 16 bit word or trailing nibble.
pub fn decompress(data: &[u8], n_bits: usize, table: &CodeTable, n_bytes: usize) -> Result<Vec<u8>> {
    let decoder = Decoder::new(table)?;
    let syms = decoder.decode_symbols(data, n_bits)?;
    let out = symbols_to_bytes(&syms, decoder.width(), n_bytes)?;
    info!("Unpacked {} bits into {} symbols, {} bytes", n_bits, syms.len(), out.len());
    Ok(out)
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::bitstream::bitbuffer::BitBuffer;
    use crate::compression::compress::encode;
    use crate::tools::symbols::symbols;

    const WIDTHS: [SymbolWidth; 3] = [SymbolWidth::Four, SymbolWidth::Eight, SymbolWidth::Sixteen];

    fn round_trip(data: &[u8], width: SymbolWidth) -> Vec<u8> {
        let (table, packed) = encode(data, width).unwrap();
        decompress(packed.as_bytes(), packed.len(), &table, data.len()).unwrap()
    }

    #[test]
    fn scenario_round_trip_test() {
        assert_eq!(round_trip(&[0x00, 0xFF], SymbolWidth::Eight), vec![0x00, 0xFF]);
        assert_eq!(round_trip(&[0xAA, 0xAA, 0xAA], SymbolWidth::Four), vec![0xAA; 3]);
        assert_eq!(
            round_trip(&[0x12, 0x34, 0x56], SymbolWidth::Sixteen),
            vec![0x12, 0x34, 0x56]
        );
        assert!(round_trip(&[], SymbolWidth::Eight).is_empty());
    }

    #[test]
    fn symbols_round_trip_test() {
        let data = b"she sells sea shells by the sea shore";
        for width in WIDTHS {
            let (table, packed) = encode(data, width).unwrap();
            let decoder = Decoder::new(&table).unwrap();
            let decoded = decoder.decode_symbols(packed.as_bytes(), packed.len()).unwrap();
            assert_eq!(decoded, symbols(data, width).collect::<Vec<u16>>());
        }
    }

    #[test]
    fn random_round_trip_test() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for len in [1_usize, 2, 3, 17, 256, 1001, 4096] {
            // Skewed data so the codes have mixed lengths
            let data: Vec<u8> = (0..len)
                .map(|_| {
                    let hi: u8 = rng.gen_range(1..=255);
                    rng.gen_range(0..=hi)
                })
                .collect();
            for width in WIDTHS {
                assert_eq!(round_trip(&data, width), data, "len {} width {}", len, width);
            }
        }
    }

    #[test]
    fn truncated_stream_test() {
        let data = b"abcabcabd";
        let (table, packed) = encode(data, SymbolWidth::Eight).unwrap();
        let decoder = Decoder::new(&table).unwrap();
        // Drop the last bit: the final code can no longer finish
        let result = decoder.decode_symbols(packed.as_bytes(), packed.len() - 1);
        assert!(matches!(result, Err(HuffError::CorruptStream { .. })));
    }

    #[test]
    fn stray_bits_test() {
        // Only symbol 'x' with code "0": a 1 bit leads nowhere
        let table = CodeTable::from_data(b"xxx", SymbolWidth::Eight).unwrap();
        let decoder = Decoder::new(&table).unwrap();
        let result = decoder.decode_symbols(&[0b0010_0000], 3);
        assert!(matches!(result, Err(HuffError::CorruptStream { bit: 2 })));
        assert_eq!(decoder.decode_symbols(&[0x00], 2).unwrap(), vec![b'x' as u16; 2]);
    }

    #[test]
    fn rejects_prefix_collision_test() {
        let mut codes = vec![BitBuffer::new(); 16];
        codes[1].push_bit(true).unwrap();
        codes[2].push_bit(true).unwrap();
        codes[2].push_bit(false).unwrap();
        let table = CodeTable::from_parts(SymbolWidth::Four, codes);
        assert!(matches!(
            Decoder::new(&table),
            Err(HuffError::NotPrefixFree { .. })
        ));
    }
}
