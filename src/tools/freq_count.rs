//! Byte frequency counting for a slice of u8 data.
//!
//! Builds an array of 256 u32 counts for the block of data handed to `freqs`.
//! Counting goes multi-threaded once the data is past 64k, where the chunked
//! fold starts paying for its overhead.

use rayon::prelude::*;

/// Return a frequency count of every byte value in `data`.
pub fn freqs(data: &[u8]) -> [u32; 256] {
    if data.len() > 64_000 {
        // 16k chunks are pretty much the sweet spot.
        data.par_chunks(16_000)
            .fold(
                || [0_u32; 256],
                |mut counts, chunk| {
                    chunk.iter().for_each(|&b| counts[b as usize] += 1);
                    counts
                },
            )
            .reduce(
                || [0_u32; 256],
                |mut acc, counts| {
                    for (a, c) in acc.iter_mut().zip(counts.iter()) {
                        *a += c;
                    }
                    acc
                },
            )
    } else {
        let mut counts = [0_u32; 256];
        data.iter().for_each(|&b| counts[b as usize] += 1);
        counts
    }
}
