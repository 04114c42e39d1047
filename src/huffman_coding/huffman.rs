//! Code-table-driven encoding and tree-driven decoding.
//!
//! The encoder looks each byte up in the canonical table and streams the bit
//! pattern out. The decoder rebuilds the identical table from the frequency
//! counts, replays every code into a binary tree (0 goes left, 1 goes
//! right), and then walks that tree bit by bit until the reader runs dry.

use log::trace;

use super::canonical::{canonical_codes, code_lengths, CodeWord};
use crate::bitstream::bitreader::BitReader;
use crate::bitstream::bitwriter::BitWriter;
use crate::error::{Result, StinkcError};

/// Decode-side tree node. Children appear on demand while the canonical code
/// table is replayed into the tree; leaves carry the symbol.
#[derive(Default)]
struct TreeNode {
    zero: Option<Box<TreeNode>>,
    one: Option<Box<TreeNode>>,
    symbol: Option<u8>,
}

/// Materialize the decode tree by walking each code word MSB-first from the
/// root and placing the symbol at the leaf.
fn tree_from_codes(table: &[CodeWord; 256]) -> Box<TreeNode> {
    let mut root = Box::new(TreeNode::default());
    for (symbol, code) in table.iter().enumerate() {
        if code.len == 0 {
            continue;
        }
        let mut node = &mut root;
        for pos in (0..code.len).rev() {
            let child = if (code.bits >> pos) & 1 == 1 {
                &mut node.one
            } else {
                &mut node.zero
            };
            node = child.get_or_insert_with(Default::default);
        }
        node.symbol = Some(symbol as u8);
    }
    root
}

/// Huffman-encode `data` onto the bit writer, using the canonical code
/// derived from `freq`. The caller counts `freq` over this same data, so
/// every byte has a code.
pub fn encode(data: &[u8], freq: &[u32; 256], bw: &mut BitWriter) {
    let table = canonical_codes(&code_lengths(freq));
    trace!(
        "code table spans {} symbols",
        table.iter().filter(|code| code.len > 0).count()
    );
    for &byte in data {
        let code = table[byte as usize];
        debug_assert!(code.len > 0, "byte {} has no code", byte);
        bw.write_bits(code.bits, code.len);
    }
}

/// Decode a bit-packed payload back into the symbol stream, reconstructing
/// the code from `freq` alone.
///
/// A walk that falls off the tree, or a stream that ends inside a code word,
/// means the payload does not belong to this frequency table.
pub fn decode(payload: &[u8], padding: u8, freq: &[u32; 256]) -> Result<Vec<u8>> {
    let table = canonical_codes(&code_lengths(freq));
    let root = tree_from_codes(&table);
    let expected: u64 = freq.iter().map(|&count| count as u64).sum();

    // Every code word costs at least one bit, so the payload bounds the
    // output no matter what the frequency table claims.
    let mut out = Vec::with_capacity(expected.min(payload.len() as u64 * 8) as usize);
    let mut br = BitReader::new(payload, padding);
    let mut node = &*root;
    let mut mid_code = false;
    while let Some(bit) = br.bit() {
        let child = if bit == 1 { &node.one } else { &node.zero };
        node = match child.as_deref() {
            Some(next) => next,
            None => {
                return Err(StinkcError::InconsistentMetadata(
                    "payload bits walked off the code tree".to_string(),
                ))
            }
        };
        mid_code = true;
        if let Some(symbol) = node.symbol {
            out.push(symbol);
            node = &*root;
            mid_code = false;
        }
    }
    if mid_code {
        return Err(StinkcError::InconsistentMetadata(
            "payload ended inside a code word".to_string(),
        ));
    }
    Ok(out)
}
