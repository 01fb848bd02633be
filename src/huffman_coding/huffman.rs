use log::{debug, info, trace, warn};

use super::priority_queue::PriorityQueue;
use crate::bitstream::bitbuffer::BitBuffer;
use crate::error::{try_reserve, try_reserve_exact, HuffError, Result};
use crate::tools::freq_count::freqs;
use crate::tools::symbols::SymbolWidth;

/// A group of symbols waiting in the queue. A leaf holds one symbol; a fusion node holds the
/// symbols of its first child followed by those of its second.
#[derive(Debug)]
struct Node {
    weight: u64,
    syms: Vec<u16>,
}

impl Node {
    /// Create a leaf for one symbol
    fn leaf(sym: u16, weight: u64) -> Result<Node> {
        let mut syms = Vec::new();
        try_reserve_exact(&mut syms, 1)?;
        syms.push(sym);
        Ok(Node { weight, syms })
    }

    /// Fuse two nodes, consuming both. The second node's symbols follow the first's.
    fn fuse(mut first: Node, second: Node) -> Result<Node> {
        try_reserve(&mut first.syms, second.syms.len())?;
        first.syms.extend_from_slice(&second.syms);
        first.weight = first
            .weight
            .checked_add(second.weight)
            .ok_or(HuffError::WeightOverflow)?;
        Ok(first)
    }
}

/// Huffman code for every possible symbol of a given width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    width: SymbolWidth,
    codes: Vec<BitBuffer>,
}

impl CodeTable {
    /// Count the symbols in data and build their code table.
    pub fn from_data(data: &[u8], width: SymbolWidth) -> Result<CodeTable> {
        let freqs = freqs(data, width)?;
        build_code_table(&freqs, width)
    }

    /// A table where no symbol has a code yet.
    fn empty(width: SymbolWidth) -> Result<CodeTable> {
        let mut codes = Vec::new();
        try_reserve_exact(&mut codes, width.alphabet_size())?;
        codes.resize_with(width.alphabet_size(), BitBuffer::new);
        Ok(CodeTable { width, codes })
    }

    #[cfg(test)]
    pub(crate) fn from_parts(width: SymbolWidth, codes: Vec<BitBuffer>) -> CodeTable {
        assert_eq!(codes.len(), width.alphabet_size());
        CodeTable { width, codes }
    }

    pub fn width(&self) -> SymbolWidth {
        self.width
    }

    /// The code of a symbol, or None when the symbol never occurred.
    pub fn code(&self, sym: u16) -> Option<&BitBuffer> {
        self.codes.get(sym as usize).filter(|c| !c.is_empty())
    }

    /// Code length in bits of a symbol (0 when it has no code).
    pub fn code_len(&self, sym: u16) -> usize {
        self.codes.get(sym as usize).map_or(0, BitBuffer::len)
    }

    /// Every symbol that has a code, in symbol order.
    pub fn codes(&self) -> impl Iterator<Item = (u16, &BitBuffer)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_empty())
            .map(|(sym, c)| (sym as u16, c))
    }

    /// Code lengths of all 2^width symbols, 0 for the ones without a code.
    pub fn code_lens(&self) -> impl Iterator<Item = usize> + '_ {
        self.codes.iter().map(BitBuffer::len)
    }

    /// Number of symbols that have a code.
    pub fn symbol_count(&self) -> usize {
        self.codes().count()
    }

    /// True when no symbol has a code (built from empty input).
    pub fn is_empty(&self) -> bool {
        self.symbol_count() == 0
    }

    /// Sum of all code lengths.
    pub fn total_code_bits(&self) -> usize {
        self.code_lens().sum()
    }

    /// Bits needed to encode data with the given histogram: sum of count * code length.
    pub fn encoded_bits(&self, freqs: &[u64]) -> Result<u64> {
        freqs
            .iter()
            .zip(self.code_lens())
            .try_fold(0_u64, |total, (&f, len)| {
                f.checked_mul(len as u64)
                    .and_then(|bits| total.checked_add(bits))
            })
            .ok_or(HuffError::WeightOverflow)
    }

    /// True when no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let mut sorted: Vec<&BitBuffer> = self.codes().map(|(_, c)| c).collect();
        // Lexicographic bit order puts any prefix directly before some code it prefixes.
        sorted.sort_by(|a, b| a.iter().cmp(b.iter()));
        sorted.windows(2).all(|w| !w[0].is_prefix_of(w[1]))
    }
}

/// Build a Huffman code table from a histogram of 2^width counts.
///
/// The two lightest nodes are repeatedly taken from a min-priority queue. Every symbol under the
/// first gets a 1 bit and every symbol under the second a 0 bit, and the fused node goes back into
/// the queue. Bits collect from the leaf upward, so once the root is reached each code is reversed
/// to read from the root down, which is what makes the table prefix-free.
///
/// A lone symbol gets the one bit code `0`. An all-zero histogram gives an empty table.
pub fn build_code_table(freqs: &[u64], width: SymbolWidth) -> Result<CodeTable> {
    if freqs.len() != width.alphabet_size() {
        return Err(HuffError::HistogramSize {
            expected: width.alphabet_size(),
            found: freqs.len(),
        });
    }

    let mut table = CodeTable::empty(width)?;

    // Put a leaf in the queue for every symbol that occurs
    let used = freqs.iter().filter(|&&f| f > 0).count();
    let mut queue = PriorityQueue::with_capacity(used)?;
    for (sym, &weight) in freqs.iter().enumerate().filter(|&(_, &f)| f > 0) {
        queue.insert(Node::leaf(sym as u16, weight)?, weight)?;
    }
    info!("Building codes for {} of {} symbols", used, width.alphabet_size());

    // Fuse the two lightest nodes until only the root is left
    let mut merges = 0;
    let root = loop {
        let first = match queue.extract_min() {
            Some((node, _)) => node,
            None => {
                // Only possible on the first pass, the queue is never empty after an insert
                warn!("Histogram is empty, returning an empty code table");
                return Ok(table);
            }
        };
        let second = match queue.extract_min() {
            Some((node, _)) => node,
            None => break first,
        };

        for &sym in &first.syms {
            table.codes[sym as usize].push_bit(true)?;
        }
        for &sym in &second.syms {
            table.codes[sym as usize].push_bit(false)?;
        }
        trace!(
            "Merge {}: {} syms ({}) + {} syms ({})",
            merges,
            first.syms.len(),
            first.weight,
            second.syms.len(),
            second.weight
        );

        let fused = Node::fuse(first, second)?;
        let weight = fused.weight;
        queue.insert(fused, weight)?;
        merges += 1;
    };

    if merges == 0 {
        // Single symbol alphabet. Give it a one bit code so it can still be written.
        table.codes[root.syms[0] as usize].push_bit(false)?;
        debug!("Only symbol {:#x} present, assigned code 0", root.syms[0]);
    }

    // Codes were built leaf first. Flip them so they read from the root.
    table.codes.iter_mut().for_each(BitBuffer::reverse);

    debug!(
        "Built {} codes with {} merges, longest is {} bits",
        used,
        merges,
        table.code_lens().max().unwrap_or(0)
    );
    Ok(table)
}
