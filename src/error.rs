//! Error type for the few fallible edges of the crate.
//!
//! Almost every operation in this crate clamps instead of failing: durations
//! past the dial limit are pinned to sixty minutes, time shifts stop at zero,
//! and typed input is masked before it is parsed. What remains is parsing a
//! duration string that has no usable digits and writing the bell character
//! to the terminal.

use thiserror::Error;

/// Errors reported by the duration parser and the terminal bell.
#[derive(Debug, Error)]
pub enum Error {
    /// The text could not be read as `MM`, `MM:SS` or `:SS`.
    #[error("invalid duration: {0:?}")]
    InvalidDuration(String),

    /// Writing to the terminal failed.
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_duration_message() {
        let err = Error::InvalidDuration("::".to_string());
        assert_eq!(err.to_string(), "invalid duration: \"::\"");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("gone"));
    }
}
