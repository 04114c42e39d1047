//! The compression module ties the transform stages into the two public
//! operations and defines the container that carries the result.
//!
//! Compression happens in the following steps:
//! - Burrows-Wheeler Transform: permute the data so bytes sharing right
//!   context cluster into runs.
//! - Move To Front transform: map the clustered bytes to small index values.
//! - Run Length Encoding: collapse each maximal run to one symbol and one
//!   count; the counts travel in the metadata.
//! - Huffman coding: encode the run symbols with a canonical prefix code
//!   built from their frequencies.
//!
//! Decompression is the exact inverse, driven entirely by the metadata
//! block: Huffman decoding, run expansion, MTF inversion, BWT inversion.
//! Both operations are pure functions over in-memory buffers; all
//! intermediate state lives and dies inside a single call, so they are
//! freely reentrant.

pub mod compress;
pub mod decompress;
pub mod metadata;

pub use compress::compress;
pub use decompress::decompress;

#[cfg(test)]
mod test {
    use super::{compress, decompress};
    use crate::error::StinkcError;

    const ANCIENT_OAK: &str = "The ancient oak tree stood as a silent sentinel at the \
        edge of the meadow, its gnarled branches reaching skyward like arthritic \
        fingers. Generation after generation had sought shelter beneath its broad \
        canopy, from summer picnics to winter storms. Children had climbed its \
        sturdy limbs, lovers had carved their initials into its weathered bark, and \
        birds had built countless nests among its leaves. Through drought and flood, \
        through war and peace, the tree remained a living testament to resilience \
        and time. Locals claimed it was over three hundred years old, though no one \
        knew for certain. What was known, however, was that the oak had become more \
        than just a tree; it had become a landmark, a meeting place, a character in \
        the story of the town itself. Bobs burgers and fries.";

    fn roundtrip(input: &[u8]) {
        let packed = compress(input);
        assert_eq!(decompress(&packed).unwrap(), input);
    }

    #[test]
    fn empty_input() {
        let packed = compress(b"");
        assert!(!packed.is_empty());
        assert!(decompress(&packed).unwrap().is_empty());
    }

    #[test]
    fn single_byte() {
        roundtrip(b"x");
    }

    #[test]
    fn two_identical_bytes() {
        roundtrip(b"aa");
    }

    #[test]
    fn two_different_bytes() {
        roundtrip(b"ab");
    }

    #[test]
    fn short_prose() {
        roundtrip(b"my favourite food is bananas");
    }

    #[test]
    fn ancient_oak_paragraph() {
        roundtrip(ANCIENT_OAK.as_bytes());
    }

    #[test]
    fn long_single_byte_run() {
        roundtrip(&vec![b'W'; 8192]);
    }

    #[test]
    fn alternating_bytes() {
        let input: Vec<u8> = (0..4096).map(|i| if i % 2 == 0 { 0x00 } else { 0xFF }).collect();
        roundtrip(&input);
    }

    #[test]
    fn all_byte_values_present() {
        let input: Vec<u8> = (0..2048).map(|i| (i % 256) as u8).collect();
        roundtrip(&input);
    }

    #[test]
    fn binary_noise() {
        // Deterministic xorshift noise stands in for arbitrary binary
        // content like a small image file.
        let mut state = 0x2545_F491_4F6C_DD1D_u64;
        let input: Vec<u8> = (0..1024)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                (state >> 24) as u8
            })
            .collect();
        roundtrip(&input);
    }

    #[test]
    fn sentinel_bytes_in_data() {
        roundtrip(b"%%% 100% of %s pass %%%");
    }

    #[test]
    fn container_has_decimal_prefix() {
        let packed = compress(b"abc");
        let sep = packed.iter().position(|&b| b == b'#').unwrap();
        assert!(sep > 0);
        assert!(packed[..sep].iter().all(|b| b.is_ascii_digit()));
        assert_ne!(packed[0], b'0');
    }

    #[test]
    fn garbage_is_rejected_not_panicked() {
        assert!(matches!(
            decompress(b"not a container at all").unwrap_err(),
            StinkcError::MalformedHeader(_)
        ));
    }

    #[test]
    fn truncated_container_is_rejected() {
        let packed = compress(ANCIENT_OAK.as_bytes());
        let sep = packed.iter().position(|&b| b == b'#').unwrap();
        // Cut inside the metadata block.
        assert!(matches!(
            decompress(&packed[..sep + 4]).unwrap_err(),
            StinkcError::TruncatedMetadata { .. }
        ));
        // Cut inside the payload.
        assert!(matches!(
            decompress(&packed[..packed.len() - 1]).unwrap_err(),
            StinkcError::TruncatedPayload { .. }
        ));
    }
}
