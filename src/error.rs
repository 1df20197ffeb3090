// Error types module

use thiserror::Error;

/// Centralized error type for the reproduction
///
/// Variants follow the three failure classes of the scenario: setup
/// failures (config, local I/O, bucket creation, upload), stream failures
/// while the download is open, and the final byte count mismatch.
#[derive(Error, Debug)]
pub enum ReproError {
    /// Invalid or unreadable scenario configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local file I/O while preparing the payload
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Bucket probe or creation rejected by the backend
    #[error("Failed to create bucket '{bucket}': {message}")]
    CreateBucket { bucket: String, message: String },

    /// Object upload rejected by the backend
    #[error("Failed to upload s3://{bucket}/{key}: {message}")]
    Upload {
        bucket: String,
        key: String,
        message: String,
    },

    /// Uploaded object reports a different length than the local payload
    #[error("Uploaded object has {actual} bytes, expected {expected}")]
    FixtureSizeMismatch { expected: u64, actual: i64 },

    /// GetObject request failed before a stream was returned
    #[error("Failed to open s3://{bucket}/{key}: {message}")]
    OpenStream {
        bucket: String,
        key: String,
        message: String,
    },

    /// Read, timeout, reset or decode failure on the open stream
    #[error("Stream failed after {bytes_read} bytes: {source}")]
    Stream {
        bytes_read: u64,
        #[source]
        source: std::io::Error,
    },

    /// Drained stream length differs from the uploaded payload
    #[error("Byte count mismatch: expected {expected} bytes, read {actual}")]
    ByteCountMismatch { expected: u64, actual: u64 },
}

pub type Result<T> = std::result::Result<T, ReproError>;

impl ReproError {
    /// Whether the error happened while the download stream was open
    pub fn is_stream_failure(&self) -> bool {
        matches!(self, ReproError::Stream { .. })
    }
}
