//! The huffman module builds the code tables used by huffpack.
//!
//! A code table is built from a histogram of symbol counts. Symbols that occur become leaves in a
//! min-priority queue, and the two lightest nodes are fused again and again until one node is
//! left. Each symbol's code grows by one bit every time its node takes part in a fusion.
//!
//! Building a table is inherently sequential: every fusion depends on the global minimum left by
//! the one before it.
//!
//! The header module estimates how many bytes it would take to store a table next to the packed
//! data.

pub mod header;
pub mod huffman;
pub mod priority_queue;
