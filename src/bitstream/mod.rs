//! The bitstream module holds the bit level I/O used by huffpack.
//!
//! BitBuffer is the one primitive that writes bits: every Huffman code grows inside a BitBuffer
//! while the tree is being built, and the packed output is a BitBuffer as well. Bits are stored
//! most significant first within each byte, with bytes in the order they were filled.
//!
//! BitReader reads such a buffer back, stopping at the valid bit count rather than at the end of
//! the last (possibly padded) byte.
//!
pub mod bitbuffer;
pub mod bitreader;
