use log::debug;

use super::metadata::split;
use crate::bwt::rotation_sort::bwt_decode;
use crate::error::{Result, StinkcError};
use crate::huffman_coding::huffman;
use crate::tools::mtf::mtf_decode;
use crate::tools::rle::rle_decode;

fn inconsistent(message: impl Into<String>) -> StinkcError {
    StinkcError::InconsistentMetadata(message.into())
}

/// Recover the original bytes from a container produced by
/// [`compress`](super::compress::compress).
///
/// The metadata is taken apart first; every structural problem is reported
/// as its own error kind. After parsing, each stage's output is checked
/// against the lengths the metadata promised before the next inverse runs.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let (meta, payload) = split(data)?;

    let mut freq = [0_u32; 256];
    let mut total: u64 = 0;
    for &(symbol, count) in &meta.frequencies {
        // A duplicated symbol pair cannot be trusted; saturate and let the
        // decoded-length check below reject the container.
        freq[symbol as usize] = freq[symbol as usize].saturating_add(count);
        total += count as u64;
    }

    if total == 0 {
        // Only the empty input compresses to an empty frequency table.
        if meta.original_len != 0 || meta.encoded_len != 0 || !meta.rle_counts.is_empty() {
            return Err(inconsistent(
                "frequency table is empty but the container carries data",
            ));
        }
        return Ok(Vec::new());
    }

    let symbols = huffman::decode(payload, meta.padding, &freq)?;
    if symbols.len() as u64 != total {
        return Err(inconsistent(format!(
            "frequency table promises {} symbols, payload decoded to {}",
            total,
            symbols.len()
        )));
    }
    if meta.rle_counts.len() != symbols.len() {
        return Err(inconsistent(format!(
            "{} run counts for {} run symbols",
            meta.rle_counts.len(),
            symbols.len()
        )));
    }

    // Check the expansion size before allocating it. The runs must cover the
    // original input plus the one-byte BWT sentinel.
    let run_total: u64 = meta.rle_counts.iter().map(|&count| count as u64).sum();
    if run_total - 1 != meta.original_len {
        return Err(inconsistent(format!(
            "runs expand to {} bytes, expected original {} plus sentinel",
            run_total, meta.original_len
        )));
    }

    let mtf_data = rle_decode(&symbols, &meta.rle_counts);
    let bwt_data = mtf_decode(&mtf_data);
    if meta.bwt_index as usize >= bwt_data.len() {
        return Err(inconsistent(format!(
            "primary index {} out of range for {} rows",
            meta.bwt_index,
            bwt_data.len()
        )));
    }

    let out = bwt_decode(&bwt_data, meta.bwt_index as usize);
    debug!(
        "{} payload bytes expanded to {} output bytes",
        meta.encoded_len,
        out.len()
    );
    Ok(out)
}
