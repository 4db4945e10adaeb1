//! Error handling for the huffcodec library
//!
//! Every failure is fatal for the current compression or decompression run.
//! Nothing is retried internally and no partial output is returned.

use std::io;
use thiserror::Error;

/// Main error type for the codec
#[derive(Error, Debug)]
pub enum HuffmanError {
    /// A byte in the input has no entry in the code table
    #[error("input consistency error: byte 0x{byte:02x} has no code")]
    InputConsistency {
        /// The byte that could not be encoded
        byte: u8,
    },

    /// Container fields are missing, truncated or contradict each other
    #[error("corrupt container: {message}")]
    CorruptContainer {
        /// What was wrong with the container
        message: String,
    },

    /// The bit walk ran out of payload before every byte was decoded
    #[error("truncated payload: decoded {decoded} of {expected} bytes")]
    TruncatedPayload {
        /// Bytes emitted before the payload ran out
        decoded: usize,
        /// Bytes the container promised
        expected: usize,
    },

    /// I/O errors from the reader/writer helpers
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl HuffmanError {
    pub fn corrupt<S: Into<String>>(message: S) -> Self {
        HuffmanError::CorruptContainer {
            message: message.into(),
        }
    }

    pub fn truncated(decoded: usize, expected: usize) -> Self {
        HuffmanError::TruncatedPayload { decoded, expected }
    }

    /// True for the two errors that mean "this container cannot be trusted".
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            HuffmanError::CorruptContainer { .. } | HuffmanError::TruncatedPayload { .. }
        )
    }
}

impl From<HuffmanError> for io::Error {
    fn from(e: HuffmanError) -> Self {
        match e {
            HuffmanError::Io(inner) => inner,
            other => {
                let kind = match other {
                    HuffmanError::TruncatedPayload { .. } => io::ErrorKind::UnexpectedEof,
                    _ => io::ErrorKind::InvalidData,
                };
                io::Error::new(kind, other.to_string())
            }
        }
    }
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, HuffmanError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            HuffmanError::InputConsistency { byte: 0x41 }.to_string(),
            "input consistency error: byte 0x41 has no code"
        );
        assert_eq!(
            HuffmanError::truncated(3, 10).to_string(),
            "truncated payload: decoded 3 of 10 bytes"
        );
        assert!(HuffmanError::corrupt("x").is_corruption());
        assert!(!HuffmanError::InputConsistency { byte: 0 }.is_corruption());
    }

    #[test]
    fn test_into_io_error() {
        let e: io::Error = HuffmanError::truncated(1, 2).into();
        assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof);

        let e: io::Error = HuffmanError::corrupt("bad").into();
        assert_eq!(e.kind(), io::ErrorKind::InvalidData);

        let e: io::Error = HuffmanError::from(io::Error::new(io::ErrorKind::NotFound, "gone")).into();
        assert_eq!(e.kind(), io::ErrorKind::NotFound);
    }
}
