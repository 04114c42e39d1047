//! stinkc - a lossless block-sorting byte-stream compressor.
//!
//! The codec runs a four-stage pipeline: a Burrows-Wheeler Transform to
//! cluster repeated context, a Move-To-Front transform to map the clusters
//! to small integers, run-length encoding to collapse the runs MTF leaves
//! behind, and a canonical Huffman coder to pack the result into bits. The
//! output is a self-describing container; the decoder rebuilds the exact
//! Huffman code from the frequency table it carries and inverts each stage
//! in turn.
//!
//! The whole codec operates on a single in-memory buffer through two pure
//! functions:
//!
//! ```
//! let packed = stinkc::compress(b"my favourite food is bananas");
//! let restored = stinkc::decompress(&packed).unwrap();
//! assert_eq!(restored, b"my favourite food is bananas");
//! ```
//!
//! Compression never fails; decompression reports exactly how a damaged
//! container is damaged through [`StinkcError`].

pub mod bitstream;
pub mod bwt;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::{compress, decompress};
pub use error::{Result, StinkcError};
