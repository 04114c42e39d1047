//! Error types surfaced by the stinkc library.
//!
//! Compression is total and cannot fail. Decompression reports exactly what
//! is wrong with a damaged container: a header that does not parse, metadata
//! that is short or malformed, a payload that is short, or metadata whose
//! fields disagree with each other after parsing. Nothing is retried and
//! nothing is fatal at the process level.

use std::io;
use thiserror::Error;

/// Everything that can go wrong while handling a compressed container.
#[derive(Debug, Error)]
pub enum StinkcError {
    /// I/O error from the underlying reader or writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The ASCII decimal length prefix before `#` could not be parsed.
    #[error("malformed container header: {0}")]
    MalformedHeader(String),

    /// Fewer metadata bytes follow the header than the header promised.
    #[error("truncated metadata: expected {expected} bytes, found {found}")]
    TruncatedMetadata {
        /// Byte count declared by the header.
        expected: usize,
        /// Byte count actually present.
        found: usize,
    },

    /// The metadata record set could not be parsed.
    #[error("malformed metadata: {0}")]
    MalformedMetadata(String),

    /// The bit-packed payload is shorter than the metadata declared.
    #[error("truncated payload: expected {expected} bytes, found {found}")]
    TruncatedPayload {
        /// Byte count declared in the metadata.
        expected: usize,
        /// Byte count actually present.
        found: usize,
    },

    /// Metadata parsed cleanly but its fields contradict each other or the
    /// decoded data (frequency totals, run counts, primary index range).
    #[error("inconsistent metadata: {0}")]
    InconsistentMetadata(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StinkcError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn io_error_converts() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err: StinkcError = io_err.into();
        assert!(matches!(err, StinkcError::Io(_)));
    }

    #[test]
    fn display_names_the_problem() {
        let err = StinkcError::TruncatedMetadata {
            expected: 40,
            found: 12,
        };
        assert!(err.to_string().contains("expected 40"));
        let err = StinkcError::MalformedHeader("no '#' separator found".to_string());
        assert!(err.to_string().contains("malformed container header"));
    }
}
