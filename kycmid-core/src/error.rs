//! Error types for kycmid operations.
//!
//! One error enum covers the whole pipeline: container validation, bit-stream
//! exhaustion during decoding, and file I/O. Every failure is reported to the
//! caller as a distinct, recoverable error; the decoder never produces
//! partial output.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for kycmid operations.
#[derive(Debug, Error)]
pub enum KycError {
    /// I/O error from reading the input container.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The container header or declared sizes are invalid.
    #[error("Malformed container: {message}")]
    MalformedContainer {
        /// Description of the validation failure.
        message: String,
    },

    /// The compressed stream ran out before the declared output length was
    /// produced.
    #[error("Unexpected end of compressed stream at bit {bit_position}")]
    UnexpectedEndOfInput {
        /// Number of bits consumed when the stream ran dry.
        bit_position: u64,
    },

    /// The decoded track could not be written to its destination.
    #[error("Cannot write output {path}: {source}")]
    OutputWrite {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Result type alias for kycmid operations.
pub type Result<T> = std::result::Result<T, KycError>;

impl KycError {
    /// Create a malformed container error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedContainer {
            message: message.into(),
        }
    }

    /// Create an unexpected end-of-input error.
    pub fn unexpected_end(bit_position: u64) -> Self {
        Self::UnexpectedEndOfInput { bit_position }
    }

    /// Create an output write error.
    pub fn output_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::OutputWrite {
            path: path.into(),
            source,
        }
    }
}
