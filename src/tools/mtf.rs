//! Move-To-Front transform over the full byte alphabet.
//!
//! Each input byte is replaced by its position in a working order of all 256
//! values, and that byte then moves to the front of the order. BWT output has
//! strong locality, so the positions skew heavily toward zero, which is what
//! the later run-length and Huffman stages feed on. Starting from the
//! identity order on both sides makes the transform its own structural
//! inverse.

/// Encode data with the Move-To-Front transform.
pub fn mtf_encode(input: &[u8]) -> Vec<u8> {
    let mut order: [u8; 256] = std::array::from_fn(|i| i as u8);
    let mut out = Vec::with_capacity(input.len());

    for &byte in input {
        // The order array always holds all 256 values, so the search cannot fail.
        let pos = order.iter().position(|&b| b == byte).unwrap();
        out.push(pos as u8);
        if pos > 0 {
            order.copy_within(..pos, 1);
            order[0] = byte;
        }
    }
    out
}

/// Invert the Move-To-Front transform.
pub fn mtf_decode(input: &[u8]) -> Vec<u8> {
    let mut order: [u8; 256] = std::array::from_fn(|i| i as u8);
    let mut out = Vec::with_capacity(input.len());

    for &pos in input {
        let byte = order[pos as usize];
        out.push(byte);
        if pos > 0 {
            order.copy_within(..pos as usize, 1);
            order[0] = byte;
        }
    }
    out
}
