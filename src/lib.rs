//! huffpack: Huffman code tables over fixed width symbols.
//!
//! Version 0.1.0
//!
//! Reads the input as a stream of 4, 8 or 16 bit symbols, counts them, builds a Huffman code by
//! repeatedly fusing the two lightest groups of symbols, and packs the input with that code into a
//! bit buffer. The size of the header needed to store the code table next to the packed data can
//! be estimated, and the packed data can be decoded again with the same table.
//!
//! Basic usage:
//!
//! ```
//! use huffpack::compression::{compress::encode, decompress::decompress};
//! use huffpack::huffman_coding::header::estimate_header;
//! use huffpack::tools::symbols::SymbolWidth;
//!
//! let data = b"abracadabra";
//! let (table, packed) = encode(data, SymbolWidth::Eight)?;
//! let header = estimate_header(&table);
//! assert!(packed.len() < data.len() * 8);
//! assert!(header.bytes > 0);
//!
//! let back = decompress(packed.as_bytes(), packed.len(), &table, data.len())?;
//! assert_eq!(back, data);
//! # Ok::<(), huffpack::error::HuffError>(())
//! ```
//!
//! The command line tool `huffpack` reports all of this for a set of files.
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;
