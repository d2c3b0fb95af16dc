//! Session engine
//!
//! Drives one app connection: bytes in from the bridge, framed lines
//! through validation and command parsing, replies back out. Everything
//! runs synchronously inside [`Session::rx`]; each completed frame is
//! dispatched fully before the next byte is examined, so the receive
//! buffer never holds more than one completed frame.

use core::fmt::Write;

use heapless::String;

use blueline_protocol::frame::{self, FrameError};
use blueline_protocol::reply::{self, MAX_REPLY_SIZE};
use blueline_protocol::{Command, CommandError, ControlEvent, LineFramer, PROTOCOL_VERSION};

use crate::traits::{Panel, Transport};

/// Reply channel handed to [`Panel::state`].
///
/// Each update is sealed and sent immediately. Updates that do not fit the
/// reply buffer are dropped and counted.
pub struct Responder<'a> {
    transport: &'a mut dyn Transport,
    dropped: u32,
}

impl<'a> Responder<'a> {
    fn new(transport: &'a mut dyn Transport) -> Self {
        Self {
            transport,
            dropped: 0,
        }
    }

    /// Send one control update to the app.
    pub fn send(&mut self, update: &ControlEvent<'_>) {
        match update.to_line() {
            Ok(line) => self.transport.send(&line),
            Err(_) => self.dropped = self.dropped.wrapping_add(1),
        }
    }
}

/// Diagnostics counters for one session.
///
/// The protocol drops bad input instead of failing; these counters are the
/// visible trace of what was dropped and why.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionStats {
    /// Completed lines extracted from the byte stream.
    pub lines: u32,
    /// Commands dispatched to the panel or answered directly.
    pub dispatched: u32,
    /// Lines dropped because the receive accumulator overflowed.
    pub overflows: u32,
    /// Frames dropped on checksum mismatch.
    pub checksum_errors: u32,
    /// Frames dropped for a non-hex checksum suffix.
    pub malformed_checksums: u32,
    /// Payloads dropped for bad tokens: missing or non-numeric arguments,
    /// non-UTF-8 bytes.
    pub parse_errors: u32,
    /// Commands with an unrecognized name.
    pub unknown_commands: u32,
    /// Replies dropped because they exceeded the reply buffer.
    pub dropped_replies: u32,
}

/// One app connection bound to a transport and a panel.
pub struct Session<T: Transport, P: Panel> {
    transport: T,
    panel: P,
    framer: LineFramer,
    stats: SessionStats,
}

impl<T: Transport, P: Panel> Session<T, P> {
    /// Create a session over `transport` driving `panel`.
    pub fn new(transport: T, panel: P) -> Self {
        Self {
            transport,
            panel,
            framer: LineFramer::new(),
            stats: SessionStats::default(),
        }
    }

    /// Feed bytes received from the bridge.
    ///
    /// Chunk boundaries carry no meaning: a frame may span any number of
    /// chunks and a chunk may complete several frames. Call this from the
    /// single context that owns the session; dispatch happens inline.
    pub fn rx(&mut self, chunk: &[u8]) {
        for &byte in chunk {
            match self.framer.feed(byte) {
                Ok(Some(line)) => {
                    self.stats.lines = self.stats.lines.wrapping_add(1);
                    self.handle_line(&line);
                }
                Ok(None) => {}
                // the framer only reports overflow; it resyncs itself
                Err(_) => {
                    self.stats.overflows = self.stats.overflows.wrapping_add(1);
                    #[cfg(feature = "defmt")]
                    defmt::warn!("receive buffer overflow, resynchronizing");
                }
            }
        }
    }

    /// Diagnostics counters.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// The panel behind this session.
    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Mutable access to the panel, for timer ticks and the like.
    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    /// The transport behind this session.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn handle_line(&mut self, line: &[u8]) {
        let payload = match frame::verify(line) {
            Ok(payload) => payload,
            Err(FrameError::ChecksumMismatch) => {
                // corruption on the bridge is expected; drop without reply
                self.stats.checksum_errors = self.stats.checksum_errors.wrapping_add(1);
                return;
            }
            Err(_) => {
                self.stats.malformed_checksums = self.stats.malformed_checksums.wrapping_add(1);
                return;
            }
        };

        match Command::parse(payload) {
            Ok(command) => self.dispatch(command),
            Err(CommandError::Empty) => {
                // the app flushes a fresh connection with a bare terminator
            }
            Err(_error) => {
                self.stats.parse_errors = self.stats.parse_errors.wrapping_add(1);
                #[cfg(feature = "defmt")]
                defmt::warn!("dropping malformed command: {}", _error);
            }
        }
    }

    fn dispatch(&mut self, command: Command<'_>) {
        match command {
            Command::Version => {
                let mut payload = String::<MAX_REPLY_SIZE>::new();
                // the version string is short; this cannot overflow
                let _ = write!(payload, "VERSION {}", PROTOCOL_VERSION);
                self.send_payload(payload.as_bytes());
            }
            Command::Layout => {
                let mut payload = String::<MAX_REPLY_SIZE>::new();
                if write!(payload, "LAYOUT {}", self.panel.layout()).is_err() {
                    self.stats.dropped_replies = self.stats.dropped_replies.wrapping_add(1);
                    return;
                }
                self.send_payload(payload.as_bytes());
            }
            Command::State => {
                let mut out = Responder::new(&mut self.transport);
                self.panel.state(&mut out);
                self.stats.dropped_replies = self.stats.dropped_replies.wrapping_add(out.dropped);
            }
            Command::Input(event) => self.panel.event(&event),
            Command::Unknown(_name) => {
                self.stats.unknown_commands = self.stats.unknown_commands.wrapping_add(1);
                #[cfg(feature = "defmt")]
                defmt::warn!("unexpected command: {=str}", _name);
                return;
            }
        }
        self.stats.dispatched = self.stats.dispatched.wrapping_add(1);
    }

    fn send_payload(&mut self, payload: &[u8]) {
        match reply::seal(payload) {
            Ok(line) => self.transport.send(&line),
            Err(_) => {
                self.stats.dropped_replies = self.stats.dropped_replies.wrapping_add(1);
            }
        }
    }
}
