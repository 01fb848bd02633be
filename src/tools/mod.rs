//! The tools module provides the helper functions around the huffman core.
//!
//! The tools are:
//! - cli: Command line interface for huffpack.
//! - freq_count: Frequency count of the symbols in a buffer.
//! - report: Entropy and histogram listings for the command line report.
//! - symbols: Symbol widths and the reading of symbols out of raw bytes.
//!
pub mod cli;
pub mod freq_count;
pub mod report;
pub mod symbols;
