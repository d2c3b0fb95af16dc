//! Reply encoding.
//!
//! Every reply leaving the device is self-checksummed and newline
//! terminated: `<payload>:<two hex digits>\n`. The checksum covers exactly
//! the payload bytes, before the separator is appended.

use heapless::Vec;

use crate::checksum;
use crate::frame::{CHECKSUM_SEPARATOR, TERMINATOR};

/// Capacity of an encoded reply in bytes.
///
/// Sized for `LAYOUT` replies, which carry the full layout description.
pub const MAX_REPLY_SIZE: usize = 512;

/// One encoded, sealed reply line.
pub type ReplyLine = Vec<u8, MAX_REPLY_SIZE>;

/// Reply encoding errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReplyError {
    /// Payload plus checksum suffix does not fit the reply buffer.
    Overflow,
}

/// Seal a payload: append the separator, its checksum and the terminator.
pub fn seal(payload: &[u8]) -> Result<ReplyLine, ReplyError> {
    let mut line = ReplyLine::new();
    line.extend_from_slice(payload)
        .map_err(|_| ReplyError::Overflow)?;
    let sum = checksum::additive(payload);
    line.push(CHECKSUM_SEPARATOR)
        .map_err(|_| ReplyError::Overflow)?;
    line.extend_from_slice(&checksum::to_hex(sum))
        .map_err(|_| ReplyError::Overflow)?;
    line.push(TERMINATOR).map_err(|_| ReplyError::Overflow)?;
    Ok(line)
}
