//! The self-describing container envelope.
//!
//! Layout: `ascii_decimal(meta_len) || '#' || metadata || payload`. The
//! decimal prefix has no sign, no whitespace and no leading zeros. Metadata
//! is a flat run of tag-length-value records, each `tag (1 byte) || length
//! (u32 LE) || value`. Transitions while reading are driven purely by byte
//! counts, never by sentinel bytes, so binary content inside metadata or
//! payload needs no escaping.

use crate::error::{Result, StinkcError};

/// Separator between the ASCII length prefix and the metadata block.
pub const META_SEPARATOR: u8 = b'#';

const TAG_ENCODED_LEN: u8 = 0x01;
const TAG_PADDING: u8 = 0x02;
const TAG_ORIGINAL_LEN: u8 = 0x03;
const TAG_FREQUENCIES: u8 = 0x04;
const TAG_BWT_INDEX: u8 = 0x05;
const TAG_RLE_COUNTS: u8 = 0x06;

/// Everything the decoder needs besides the bit payload itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// Byte length of the bit-packed payload.
    pub encoded_len: u64,
    /// Unused bits in the final payload byte, 0..=7.
    pub padding: u8,
    /// Byte length of the pre-compression input.
    pub original_len: u64,
    /// (symbol, count) pairs for every symbol in the Huffman input.
    pub frequencies: Vec<(u8, u32)>,
    /// Primary row index of the Burrows-Wheeler transform.
    pub bwt_index: u32,
    /// Run lengths for RLE inversion, parallel to the decoded symbols.
    pub rle_counts: Vec<u32>,
}

fn put_record(out: &mut Vec<u8>, tag: u8, value: &[u8]) {
    out.push(tag);
    out.extend_from_slice(&(value.len() as u32).to_le_bytes());
    out.extend_from_slice(value);
}

fn malformed(message: impl Into<String>) -> StinkcError {
    StinkcError::MalformedMetadata(message.into())
}

impl Metadata {
    /// Serialize the record set. Records are written in tag order; the
    /// parser accepts any order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(32 + self.frequencies.len() * 5 + self.rle_counts.len() * 4);
        put_record(&mut out, TAG_ENCODED_LEN, &self.encoded_len.to_le_bytes());
        put_record(&mut out, TAG_PADDING, &[self.padding]);
        put_record(&mut out, TAG_ORIGINAL_LEN, &self.original_len.to_le_bytes());

        let mut pairs = Vec::with_capacity(self.frequencies.len() * 5);
        for &(symbol, count) in &self.frequencies {
            pairs.push(symbol);
            pairs.extend_from_slice(&(count as i32).to_le_bytes());
        }
        put_record(&mut out, TAG_FREQUENCIES, &pairs);

        put_record(&mut out, TAG_BWT_INDEX, &(self.bwt_index as i32).to_le_bytes());

        let mut counts = Vec::with_capacity(self.rle_counts.len() * 4);
        for &count in &self.rle_counts {
            counts.extend_from_slice(&(count as i32).to_le_bytes());
        }
        put_record(&mut out, TAG_RLE_COUNTS, &counts);
        out
    }

    /// Parse a record set. Every field is required; unknown tags, short
    /// records, non-positive counts and trailing garbage are rejected.
    pub fn from_bytes(data: &[u8]) -> Result<Metadata> {
        let mut encoded_len = None;
        let mut padding = None;
        let mut original_len = None;
        let mut frequencies = None;
        let mut bwt_index = None;
        let mut rle_counts = None;

        let mut pos = 0;
        while pos < data.len() {
            if data.len() - pos < 5 {
                return Err(malformed("record header runs past the end"));
            }
            let tag = data[pos];
            let len = u32::from_le_bytes(data[pos + 1..pos + 5].try_into().unwrap()) as usize;
            pos += 5;
            if data.len() - pos < len {
                return Err(malformed(format!("record {:#04x} value runs past the end", tag)));
            }
            let value = &data[pos..pos + len];
            pos += len;

            match tag {
                TAG_ENCODED_LEN => encoded_len = Some(parse_u64(value, "encoded_len")?),
                TAG_PADDING => {
                    if value.len() != 1 || value[0] > 7 {
                        return Err(malformed("padding must be one byte in 0..=7"));
                    }
                    padding = Some(value[0]);
                }
                TAG_ORIGINAL_LEN => original_len = Some(parse_u64(value, "original_size")?),
                TAG_FREQUENCIES => {
                    if value.len() % 5 != 0 {
                        return Err(malformed("frequency table is not whole 5-byte pairs"));
                    }
                    let mut pairs = Vec::with_capacity(value.len() / 5);
                    for chunk in value.chunks_exact(5) {
                        let count = i32::from_le_bytes(chunk[1..5].try_into().unwrap());
                        if count < 1 {
                            return Err(malformed("frequency count must be positive"));
                        }
                        pairs.push((chunk[0], count as u32));
                    }
                    frequencies = Some(pairs);
                }
                TAG_BWT_INDEX => {
                    let index = parse_i32(value, "bwt_idx")?;
                    if index < 0 {
                        return Err(malformed("bwt_idx must be non-negative"));
                    }
                    bwt_index = Some(index as u32);
                }
                TAG_RLE_COUNTS => {
                    if value.len() % 4 != 0 {
                        return Err(malformed("run counts are not whole 4-byte values"));
                    }
                    let mut counts = Vec::with_capacity(value.len() / 4);
                    for chunk in value.chunks_exact(4) {
                        let count = i32::from_le_bytes(chunk.try_into().unwrap());
                        if count < 1 {
                            return Err(malformed("run count must be positive"));
                        }
                        counts.push(count as u32);
                    }
                    rle_counts = Some(counts);
                }
                other => return Err(malformed(format!("unknown record tag {:#04x}", other))),
            }
        }

        Ok(Metadata {
            encoded_len: encoded_len.ok_or_else(|| malformed("missing encoded_len record"))?,
            padding: padding.ok_or_else(|| malformed("missing padding record"))?,
            original_len: original_len.ok_or_else(|| malformed("missing original_size record"))?,
            frequencies: frequencies.ok_or_else(|| malformed("missing frequency record"))?,
            bwt_index: bwt_index.ok_or_else(|| malformed("missing bwt_idx record"))?,
            rle_counts: rle_counts.ok_or_else(|| malformed("missing run count record"))?,
        })
    }
}

fn parse_u64(value: &[u8], field: &str) -> Result<u64> {
    let bytes: [u8; 8] = value
        .try_into()
        .map_err(|_| malformed(format!("{} must be 8 bytes", field)))?;
    Ok(u64::from_le_bytes(bytes))
}

fn parse_i32(value: &[u8], field: &str) -> Result<i32> {
    let bytes: [u8; 4] = value
        .try_into()
        .map_err(|_| malformed(format!("{} must be 4 bytes", field)))?;
    Ok(i32::from_le_bytes(bytes))
}

/// Assemble the final container from serialized metadata and the payload.
pub fn frame(meta: &[u8], payload: &[u8]) -> Vec<u8> {
    let digits = meta.len().to_string();
    let mut out = Vec::with_capacity(digits.len() + 1 + meta.len() + payload.len());
    out.extend_from_slice(digits.as_bytes());
    out.push(META_SEPARATOR);
    out.extend_from_slice(meta);
    out.extend_from_slice(payload);
    out
}

/// Split a container into parsed metadata and exactly `encoded_len` payload
/// bytes.
pub fn split(data: &[u8]) -> Result<(Metadata, &[u8])> {
    let sep = data
        .iter()
        .position(|&byte| byte == META_SEPARATOR)
        .ok_or_else(|| StinkcError::MalformedHeader("no '#' separator found".to_string()))?;

    let prefix = &data[..sep];
    if prefix.is_empty() || !prefix.iter().all(|byte| byte.is_ascii_digit()) {
        return Err(StinkcError::MalformedHeader(
            "length prefix is not a decimal number".to_string(),
        ));
    }
    // The prefix is pure ASCII digits, so the str conversion cannot fail;
    // parse still guards against a number too large for usize.
    let meta_len: usize = std::str::from_utf8(prefix)
        .map_err(|_| StinkcError::MalformedHeader("length prefix is not ASCII".to_string()))?
        .parse()
        .map_err(|_| StinkcError::MalformedHeader("length prefix does not fit".to_string()))?;

    let rest = &data[sep + 1..];
    if rest.len() < meta_len {
        return Err(StinkcError::TruncatedMetadata {
            expected: meta_len,
            found: rest.len(),
        });
    }
    let meta = Metadata::from_bytes(&rest[..meta_len])?;

    let payload = &rest[meta_len..];
    if (payload.len() as u64) < meta.encoded_len {
        return Err(StinkcError::TruncatedPayload {
            expected: meta.encoded_len as usize,
            found: payload.len(),
        });
    }
    let payload = &payload[..meta.encoded_len as usize];
    Ok((meta, payload))
}

#[cfg(test)]
mod test {
    use super::{frame, split, Metadata};
    use crate::error::StinkcError;

    fn sample() -> Metadata {
        Metadata {
            encoded_len: 3,
            padding: 5,
            original_len: 20,
            frequencies: vec![(0, 12), (97, 8), (255, 1)],
            bwt_index: 4,
            rle_counts: vec![12, 8, 1],
        }
    }

    #[test]
    fn record_set_roundtrip() {
        let meta = sample();
        assert_eq!(Metadata::from_bytes(&meta.to_bytes()).unwrap(), meta);
    }

    #[test]
    fn container_roundtrip() {
        let meta = sample();
        let payload = [0xAA, 0xBB, 0xCC];
        let container = frame(&meta.to_bytes(), &payload);
        let (parsed, split_payload) = split(&container).unwrap();
        assert_eq!(parsed, meta);
        assert_eq!(split_payload, payload);
    }

    #[test]
    fn missing_separator_is_a_header_error() {
        assert!(matches!(
            split(b"12345").unwrap_err(),
            StinkcError::MalformedHeader(_)
        ));
    }

    #[test]
    fn non_decimal_prefix_is_a_header_error() {
        assert!(matches!(
            split(b"12a#rest").unwrap_err(),
            StinkcError::MalformedHeader(_)
        ));
        assert!(matches!(
            split(b"#rest").unwrap_err(),
            StinkcError::MalformedHeader(_)
        ));
    }

    #[test]
    fn short_metadata_is_truncated() {
        let err = split(b"10#abc").unwrap_err();
        assert!(matches!(
            err,
            StinkcError::TruncatedMetadata {
                expected: 10,
                found: 3
            }
        ));
    }

    #[test]
    fn short_payload_is_truncated() {
        let meta = sample();
        let mut container = frame(&meta.to_bytes(), &[0xAA, 0xBB, 0xCC]);
        container.truncate(container.len() - 2);
        assert!(matches!(
            split(&container).unwrap_err(),
            StinkcError::TruncatedPayload {
                expected: 3,
                found: 1
            }
        ));
    }

    #[test]
    fn unknown_tag_is_malformed() {
        let mut bytes = sample().to_bytes();
        bytes.push(0x7F);
        bytes.extend_from_slice(&0_u32.to_le_bytes());
        assert!(matches!(
            Metadata::from_bytes(&bytes).unwrap_err(),
            StinkcError::MalformedMetadata(_)
        ));
    }

    #[test]
    fn zero_run_count_is_malformed() {
        let mut meta = sample();
        meta.rle_counts[1] = 0;
        assert!(matches!(
            Metadata::from_bytes(&meta.to_bytes()).unwrap_err(),
            StinkcError::MalformedMetadata(_)
        ));
    }

    #[test]
    fn missing_record_is_malformed() {
        // Drop the trailing run-count record entirely.
        let bytes = sample().to_bytes();
        let cut = bytes.len() - 5 - 3 * 4;
        assert!(matches!(
            Metadata::from_bytes(&bytes[..cut]).unwrap_err(),
            StinkcError::MalformedMetadata(_)
        ));
    }

    #[test]
    fn oversized_padding_is_malformed() {
        let mut meta = sample();
        meta.padding = 8;
        assert!(matches!(
            Metadata::from_bytes(&meta.to_bytes()).unwrap_err(),
            StinkcError::MalformedMetadata(_)
        ));
    }
}
