//! Byte-count verification of a drained stream.

use crate::error::{ReproError, Result};

/// Sum of the byte lengths of all decoded lines
pub fn accumulated_bytes<S: AsRef<str>>(lines: &[S]) -> u64 {
    lines.iter().map(|line| line.as_ref().len() as u64).sum()
}

/// Check the decoded lines add up to `expected` bytes
///
/// Returns the accumulated count on success. A mismatch is a hard failure
/// carrying both values.
pub fn verify_byte_count<S: AsRef<str>>(lines: &[S], expected: u64) -> Result<u64> {
    let actual = accumulated_bytes(lines);
    if actual != expected {
        tracing::error!(expected, actual, "byte count mismatch");
        return Err(ReproError::ByteCountMismatch { expected, actual });
    }
    tracing::debug!(bytes = actual, "byte count verified");
    Ok(actual)
}
