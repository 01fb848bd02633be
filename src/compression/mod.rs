//! The compression module applies a finished code table to data.
//!
//! Compression scans the input symbol by symbol at the table's width and appends each symbol's
//! code to a growing bit buffer. The result is a byte buffer plus the count of valid bits in it;
//! the two have to travel together since the last byte is usually only partly used.
//!
//! Decompression rebuilds a prefix tree from the same table and walks the packed bits through it.
//! The caller supplies the original byte count so the padding added to a final 16 bit word (or a
//! trailing nibble) can be dropped again.
//!

pub mod compress;
pub mod decompress;
