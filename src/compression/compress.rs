use log::debug;

use super::metadata::{frame, Metadata};
use crate::bitstream::bitwriter::BitWriter;
use crate::bwt::rotation_sort::bwt_encode;
use crate::huffman_coding::huffman;
use crate::tools::freq_count::freqs;
use crate::tools::mtf::mtf_encode;
use crate::tools::rle::rle_encode;

/// Compress `input` into a self-describing container.
///
/// The pipeline is BWT, Move-To-Front, run-length encoding, then canonical
/// Huffman coding of the run symbols. The run counts, the BWT primary index,
/// the original length and the frequency table travel in the metadata block
/// ahead of the bit payload. Total over every finite input, including the
/// empty one.
pub fn compress(input: &[u8]) -> Vec<u8> {
    let (bwt_data, bwt_index) = bwt_encode(input);
    let mtf_data = mtf_encode(&bwt_data);
    let (rle_symbols, rle_counts) = rle_encode(&mtf_data);
    let freq = freqs(&rle_symbols);

    let mut bw = BitWriter::new(rle_symbols.len());
    huffman::encode(&rle_symbols, &freq, &mut bw);
    let padding = bw.flush();

    debug!(
        "{} bytes in, {} after BWT+MTF, {} runs, {} payload bytes",
        input.len(),
        mtf_data.len(),
        rle_symbols.len(),
        bw.output.len()
    );

    let meta = Metadata {
        encoded_len: bw.output.len() as u64,
        padding,
        original_len: input.len() as u64,
        frequencies: freq
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
            .collect(),
        bwt_index: bwt_index as u32,
        rle_counts,
    };
    frame(&meta.to_bytes(), &bw.output)
}
