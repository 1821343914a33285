//! Error types for squash archive operations.

use thiserror::Error;

/// Error type for encoding and decoding squash archives.
#[derive(Debug, Error)]
pub enum SquashError {
    /// Archive bytes do not match the expected structure: wrong magic,
    /// truncated frame, invalid codebook entry, or an unmatchable bit
    /// pattern in a payload.
    #[error("squash file is corrupted: {0}")]
    Corrupted(&'static str),

    /// Header is well formed but carries a format version this codec
    /// does not understand.
    #[error("squash version mismatched: got {0}")]
    VersionMismatch(u32),

    /// Underlying stream read/write failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Broken encoder invariant. Indicates a bug, not bad input.
    #[error("internal error: {0}")]
    Internal(&'static str),
}

impl SquashError {
    /// Returns true if this error indicates a malformed archive rather
    /// than a stream failure.
    pub fn is_corrupted(&self) -> bool {
        matches!(self, SquashError::Corrupted(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_corrupted() {
        assert!(SquashError::Corrupted("bad magic").is_corrupted());
        assert!(!SquashError::VersionMismatch(2).is_corrupted());
        assert!(!SquashError::Internal("missing code").is_corrupted());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            format!("{}", SquashError::Corrupted("bad magic")),
            "squash file is corrupted: bad magic"
        );
        assert_eq!(
            format!("{}", SquashError::VersionMismatch(2)),
            "squash version mismatched: got 2"
        );
        assert_eq!(
            format!("{}", SquashError::Internal("missing code")),
            "internal error: missing code"
        );
    }

    #[test]
    fn test_from_io() {
        let err: SquashError = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe").into();
        assert!(matches!(err, SquashError::Io(_)));
    }
}
