//! Error handling for huffpack.
//!
//! Every failure in the library is reported through [`HuffError`]. None of them are retried:
//! they are either bad input from the caller or resource exhaustion.

use thiserror::Error;

/// Main error type for huffpack
#[derive(Error, Debug)]
pub enum HuffError {
    /// I/O errors from the command line tool
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Symbol width outside of 4, 8 or 16 bits
    #[error("Invalid symbol width {0}: must be 4, 8 or 16 bits")]
    InvalidWidth(u8),

    /// A buffer could not be reserved
    #[error("Memory allocation failed: requested {size} bytes")]
    AllocationFailure {
        /// Number of bytes requested
        size: usize,
    },

    /// Symbol counts too large to sum in 64 bits
    #[error("Symbol weights overflow 64 bits")]
    WeightOverflow,

    /// Histogram length does not match the symbol width
    #[error("Histogram has {found} entries, expected {expected}")]
    HistogramSize { expected: usize, found: usize },

    /// Bit offset past the end of the input
    #[error("Bit offset {offset} is past the end of a {len} byte buffer")]
    OffsetOutOfRange { offset: usize, len: usize },

    /// Symbol in the input has no code in the table
    #[error("Symbol {symbol:#x} has no code in the table")]
    MissingCode { symbol: u16 },

    /// Two codes in a table share a prefix
    #[error("Code for symbol {symbol:#x} collides with another code")]
    NotPrefixFree { symbol: u16 },

    /// Packed bits do not decode with the table
    #[error("Corrupt bitstream at bit {bit}")]
    CorruptStream { bit: usize },

    /// Decoded data differs from the input
    #[error("Round trip mismatch at byte {at}")]
    Mismatch { at: usize },
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, HuffError>;

/// Allocate a vec of `len` copies of `value`, reporting failure instead of aborting.
pub(crate) fn try_vec<T: Clone>(len: usize, value: T) -> Result<Vec<T>> {
    let mut v = Vec::new();
    try_reserve_exact(&mut v, len)?;
    v.resize(len, value);
    Ok(v)
}

/// Reserve room for `additional` more elements (amortized growth).
pub(crate) fn try_reserve<T>(v: &mut Vec<T>, additional: usize) -> Result<()> {
    v.try_reserve(additional)
        .map_err(|_| HuffError::AllocationFailure {
            size: additional.saturating_mul(std::mem::size_of::<T>()),
        })
}

/// Reserve room for exactly `additional` more elements.
pub(crate) fn try_reserve_exact<T>(v: &mut Vec<T>, additional: usize) -> Result<()> {
    v.try_reserve_exact(additional)
        .map_err(|_| HuffError::AllocationFailure {
            size: additional.saturating_mul(std::mem::size_of::<T>()),
        })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn try_vec_test() {
        let v = try_vec(17, 0_u64).unwrap();
        assert_eq!(v, vec![0; 17]);
    }

    #[test]
    fn huge_reservation_fails_test() {
        let mut v: Vec<u64> = Vec::new();
        let err = try_reserve_exact(&mut v, usize::MAX / 4).unwrap_err();
        assert!(matches!(err, HuffError::AllocationFailure { .. }));
    }

    #[test]
    fn error_display_test() {
        assert_eq!(
            HuffError::InvalidWidth(5).to_string(),
            "Invalid symbol width 5: must be 4, 8 or 16 bits"
        );
        assert_eq!(
            HuffError::MissingCode { symbol: 0xab }.to_string(),
            "Symbol 0xab has no code in the table"
        );
    }
}
