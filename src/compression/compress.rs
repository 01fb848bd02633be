use log::{error, info};

use crate::bitstream::bitbuffer::BitBuffer;
use crate::error::{HuffError, Result};
use crate::huffman_coding::huffman::CodeTable;
use crate::tools::symbols::{symbols, SymbolWidth};

/// Pack the input with a finished code table. Every symbol's code is appended bit by bit,
/// most significant first. The returned buffer carries its own valid bit count, which is
/// generally not a multiple of 8.
pub fn compress(data: &[u8], table: &CodeTable) -> Result<BitBuffer> {
    // The packed data is rarely larger than the input, so start with that much room.
    let mut out = BitBuffer::with_capacity(data.len())?;

    for sym in symbols(data, table.width()) {
        match table.code(sym) {
            Some(code) => out.push_bits(code)?,
            None => {
                error!("Symbol {:#x} found in the input has no code", sym);
                return Err(HuffError::MissingCode { symbol: sym });
            }
        }
    }

    info!(
        "Packed {} bytes into {} bits {}",
        data.len(),
        out.len(),
        out.loc()
    );
    Ok(out)
}

/// Count, build and pack in one call. Returns the code table with the packed bits.
pub fn encode(data: &[u8], width: SymbolWidth) -> Result<(CodeTable, BitBuffer)> {
    let table = CodeTable::from_data(data, width)?;
    let packed = compress(data, &table)?;
    Ok((table, packed))
}
