//! The huffman_coding module turns the run-length symbol stream into the
//! packed bit payload and back.
//!
//! The container carries only a frequency table, so the decoder must rebuild
//! the exact code the encoder used from those counts alone. Everything that
//! could go either way is therefore pinned down: the priority order when two
//! tree nodes share a frequency, and the symbol order when canonical bit
//! patterns are handed out. Both sides run the same construction and land on
//! the same code table, bit for bit.
//!
//! - canonical: code-length computation and canonical code assignment.
//! - huffman: code-table-driven encoding and tree-driven decoding.

pub mod canonical;
pub mod huffman;
