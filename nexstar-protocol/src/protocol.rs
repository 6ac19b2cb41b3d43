use log::warn;

use crate::error::{NexStarError, Result};

/// Every NexStar reply ends with this byte.
pub const TERMINATOR: u8 = b'#';

/// Check a raw reply against the length the command calls for.
///
/// `expected` counts the terminator. On success the payload (everything
/// before the terminator) is returned; on mismatch the raw bytes are
/// dropped and only the two lengths are reported.
pub fn validate_reply(reply: &[u8], expected: usize) -> Result<&[u8]> {
    if reply.len() != expected {
        warn!(
            "reply length mismatch: expected {} bytes, got {}",
            expected,
            reply.len()
        );
        return Err(NexStarError::UnexpectedLength {
            expected,
            actual: reply.len(),
        });
    }
    Ok(&reply[..expected - 1])
}

/// Copy a validated payload into a fixed-size array.
pub fn payload_array<const N: usize>(payload: &[u8]) -> Result<[u8; N]> {
    payload
        .try_into()
        .map_err(|_| NexStarError::UnexpectedLength {
            expected: N + 1,
            actual: payload.len() + 1,
        })
}
