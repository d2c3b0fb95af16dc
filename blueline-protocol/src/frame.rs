//! Line framing and frame validation.
//!
//! The serial bridge delivers bytes with no alignment guarantees: a frame
//! may arrive in one chunk, byte by byte, or glued to its neighbors. The
//! framer accumulates bytes until a terminator and emits one trimmed line
//! at a time. A line may carry a trailing `:<hex>` checksum suffix, which
//! [`verify`] strips after checking it against the payload.

use heapless::Vec;

use crate::checksum;

/// Frame terminator byte.
pub const TERMINATOR: u8 = b'\n';

/// Separator between a payload and its checksum suffix.
pub const CHECKSUM_SEPARATOR: u8 = b':';

/// Capacity of the receive accumulator in bytes.
///
/// Commands from the app are short; a longer run without a terminator means
/// the stream is desynchronized.
pub const MAX_LINE_SIZE: usize = 256;

/// One extracted line: terminator removed, surrounding whitespace trimmed.
pub type Line = Vec<u8, MAX_LINE_SIZE>;

/// Errors that can occur while framing or validating a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// The accumulator filled before a terminator arrived. The buffered
    /// prefix is dropped and input is discarded until the next terminator.
    Overflow,
    /// Checksum suffix did not match the payload sum.
    ChecksumMismatch,
    /// Checksum suffix was empty or not hexadecimal.
    BadChecksumDigits,
}

/// Incremental line framer over a bounded accumulator.
#[derive(Debug, Clone)]
pub struct LineFramer {
    buffer: Vec<u8, MAX_LINE_SIZE>,
    /// Set after an overflow; input is dropped until the next terminator.
    discarding: bool,
}

impl Default for LineFramer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineFramer {
    /// Create a new framer with an empty accumulator.
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            discarding: false,
        }
    }

    /// Reset the framer, dropping any buffered bytes.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.discarding = false;
    }

    /// Number of bytes currently buffered.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Feed a single byte.
    ///
    /// Returns `Ok(Some(line))` when a terminator completes a line,
    /// `Ok(None)` when more bytes are needed. An overflow is reported once
    /// as `Err`; the truncated tail of that line is dropped and framing
    /// resumes after the next terminator.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line>, FrameError> {
        if byte == TERMINATOR {
            if self.discarding {
                self.discarding = false;
                return Ok(None);
            }
            let line = trimmed(&self.buffer);
            self.buffer.clear();
            return Ok(Some(line));
        }
        if self.discarding {
            return Ok(None);
        }
        if self.buffer.push(byte).is_err() {
            self.buffer.clear();
            self.discarding = true;
            return Err(FrameError::Overflow);
        }
        Ok(None)
    }
}

/// Copy `bytes` with leading and trailing ASCII whitespace removed.
fn trimmed(bytes: &[u8]) -> Line {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |last| last + 1);
    let mut line = Line::new();
    // start..end never exceeds the accumulator's own capacity
    let _ = line.extend_from_slice(&bytes[start..end]);
    line
}

/// Strip and check the optional checksum suffix of a line.
///
/// Splits on the last `:`. A line without a separator is accepted as-is;
/// the checksum is optional per frame. A mismatching or malformed suffix
/// fails validation and the frame is dropped by the caller, with no reply;
/// the protocol does not retransmit.
pub fn verify(line: &[u8]) -> Result<&[u8], FrameError> {
    let Some(sep) = line.iter().rposition(|&b| b == CHECKSUM_SEPARATOR) else {
        return Ok(line);
    };
    let (payload, suffix) = (&line[..sep], &line[sep + 1..]);
    let declared = checksum::parse_hex(suffix).ok_or(FrameError::BadChecksumDigits)?;
    if declared != u32::from(checksum::additive(payload)) {
        return Err(FrameError::ChecksumMismatch);
    }
    Ok(payload)
}
