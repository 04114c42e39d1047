use std::cmp::Ordering;

use log::trace;
use rayon::prelude::*;

use crate::tools::freq_count::freqs;

/// Marker byte prepended before the forward transform and stripped after the
/// inverse. The value never needs escaping: the decoder removes exactly one
/// leading byte, so the marker may also occur freely inside real data.
pub const SENTINEL: u8 = b'%';

/// Above this size the rotation sort goes multi-threaded.
const PAR_SORT_MIN: usize = 40_000;

/// Forward Burrows-Wheeler Transform.
///
/// Returns the last column of the sorted rotation matrix of the
/// sentinel-prefixed input, plus the primary index: the row where the
/// un-rotated block sits. An empty input produces an empty column and
/// index 0.
pub fn bwt_encode(input: &[u8]) -> (Vec<u8>, usize) {
    if input.is_empty() {
        return (Vec::new(), 0);
    }

    let mut block = Vec::with_capacity(input.len() + 1);
    block.push(SENTINEL);
    block.extend_from_slice(input);
    let size = block.len();

    // Rotations are (start offset, shared block) pairs; sorting the offsets
    // avoids materializing size * size bytes of rotation text.
    let mut index: Vec<u32> = (0..size as u32).collect();
    trace!("sorting {} rotations", size);
    if size > PAR_SORT_MIN {
        index.par_sort_unstable_by(|&a, &b| rotation_compare(a as usize, b as usize, &block));
    } else {
        index.sort_unstable_by(|&a, &b| rotation_compare(a as usize, b as usize, &block));
    }

    let mut primary = 0_usize;
    let mut bwt = vec![0_u8; size];
    for (row, &start) in index.iter().enumerate() {
        if start == 0 {
            primary = row;
            bwt[row] = block[size - 1];
        } else {
            bwt[row] = block[start as usize - 1];
        }
    }
    (bwt, primary)
}

/// Order two cyclic rotations of `block` by their underlying bytes.
fn rotation_compare(a: usize, b: usize, block: &[u8]) -> Ordering {
    let size = block.len();

    // Race the straight tails against each other first; slice comparison is
    // much faster than byte-at-a-time modular indexing.
    let tail = (size - a).min(size - b);
    let ordering = block[a..a + tail].cmp(&block[b..b + tail]);
    if ordering != Ordering::Equal {
        return ordering;
    }

    // One rotation wrapped. Finish the remaining positions modulo the block.
    let mut i = (a + tail) % size;
    let mut j = (b + tail) % size;
    for _ in tail..size {
        match block[i].cmp(&block[j]) {
            Ordering::Equal => {
                i = (i + 1) % size;
                j = (j + 1) % size;
            }
            unequal => return unequal,
        }
    }
    Ordering::Equal
}

/// Inverse Burrows-Wheeler Transform.
///
/// Rebuilds the original data from the last column and the primary index,
/// dropping the sentinel that the forward transform prepended. The caller
/// must have checked that `primary` is within range.
pub fn bwt_decode(bwt_in: &[u8], primary: usize) -> Vec<u8> {
    if bwt_in.is_empty() {
        return Vec::new();
    }
    debug_assert!(primary < bwt_in.len());
    let size = bwt_in.len();

    // Cumulative counts give each byte value its starting rank in the first
    // column of the sorted rotation matrix.
    let counts = freqs(bwt_in);
    let mut rank = [0_u32; 256];
    for i in 0..255 {
        rank[i + 1] = rank[i] + counts[i];
    }

    // next[row] is the last-column position of the row that continues row.
    // Assigning in last-column order keeps equal bytes in their original
    // relative order, which is exactly the stable first-column sort the
    // inversion depends on.
    let mut next = vec![0_u32; size];
    for (i, &byte) in bwt_in.iter().enumerate() {
        next[rank[byte as usize] as usize] = i as u32;
        rank[byte as usize] += 1;
    }

    // Walk the links. The first byte the walk yields is the sentinel, which
    // is not part of the logical data.
    let mut out = Vec::with_capacity(size - 1);
    let mut row = next[primary] as usize;
    for step in 0..size {
        if step != 0 {
            out.push(bwt_in[row]);
        }
        row = next[row] as usize;
    }
    out
}

#[cfg(test)]
mod test {
    use super::{bwt_decode, bwt_encode};

    #[test]
    fn banana_last_column() {
        let (bwt, primary) = bwt_encode(b"banana");
        assert_eq!(bwt, b"annb%aa");
        assert_eq!(primary, 0);
        assert_eq!(bwt_decode(&bwt, primary), b"banana");
    }

    #[test]
    fn favourite_food_roundtrip() {
        let input = b"my favourite food is bananas";
        let (bwt, primary) = bwt_encode(input);
        assert_eq!(bwt.len(), input.len() + 1);
        assert!(primary < bwt.len());
        assert_eq!(bwt_decode(&bwt, primary), input);
    }

    #[test]
    fn empty_input() {
        let (bwt, primary) = bwt_encode(&[]);
        assert!(bwt.is_empty());
        assert_eq!(primary, 0);
        assert!(bwt_decode(&bwt, primary).is_empty());
    }

    #[test]
    fn single_byte() {
        let (bwt, primary) = bwt_encode(b"a");
        assert_eq!(bwt_decode(&bwt, primary), b"a");
    }

    #[test]
    fn uniform_run() {
        let input = vec![0x61; 512];
        let (bwt, primary) = bwt_encode(&input);
        assert_eq!(bwt_decode(&bwt, primary), input);
    }

    #[test]
    fn data_containing_the_sentinel() {
        let input = b"100% organic %% bananas %";
        let (bwt, primary) = bwt_encode(input);
        assert_eq!(bwt_decode(&bwt, primary), input);
    }

    #[test]
    fn parallel_sort_path_roundtrip() {
        let input: Vec<u8> = (0..50_000_u32)
            .map(|i| (i.wrapping_mul(2654435761) >> 13) as u8)
            .collect();
        let (bwt, primary) = bwt_encode(&input);
        assert_eq!(bwt_decode(&bwt, primary), input);
    }
}
