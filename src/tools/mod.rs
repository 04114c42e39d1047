//! The tools module provides the byte-level transforms and helpers that sit
//! between the raw input and the Huffman coder.
//!
//! The tools are:
//! - cli: Command line interface for the stinkc binary.
//! - freq_count: Byte frequency counting, multi-threaded for large buffers.
//! - mtf: Move-To-Front transform over the 256 symbol alphabet.
//! - rle: Run-length encoding with a separate count vector.

pub mod cli;
pub mod freq_count;
pub mod mtf;
pub mod rle;
