use rayon::prelude::*;

use super::symbols::{symbols, SymbolWidth};
use crate::error::{try_vec, Result};

/// Inputs above this size are counted in parallel.
const PAR_THRESHOLD: usize = 64_000;
/// Chunk size for the parallel count. Must be even so 16 bit pairs never straddle chunks.
const PAR_CHUNK: usize = 16_000;

/// Returns a frequency count of the symbols in the input data. The result always has
/// 2^width entries. Uses parallelism when the data set is over 64k.
pub fn freqs(data: &[u8], width: SymbolWidth) -> Result<Vec<u64>> {
    if data.len() > PAR_THRESHOLD {
        // Only the last chunk can have an odd length, so the zero padding still lands once.
        // Each rayon split folds its chunks into one histogram, then the splits are summed.
        data.par_chunks(PAR_CHUNK)
            .fold(
                || try_vec(width.alphabet_size(), 0_u64),
                |acc: Result<Vec<u64>>, chunk| {
                    let mut f = acc?;
                    count_into(&mut f, chunk, width);
                    Ok(f)
                },
            )
            .try_reduce(Vec::new, |mut s, f| {
                if s.is_empty() {
                    return Ok(f);
                }
                s.iter_mut().zip(&f).for_each(|(a, b)| *a += b);
                Ok(s)
            })
    } else {
        let mut f = try_vec(width.alphabet_size(), 0_u64)?;
        count_into(&mut f, data, width);
        Ok(f)
    }
}

/// Add the symbols of one chunk to an existing histogram.
fn count_into(freqs: &mut [u64], chunk: &[u8], width: SymbolWidth) {
    symbols(chunk, width).for_each(|sym| freqs[sym as usize] += 1);
}
