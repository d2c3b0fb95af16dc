//! Blueline wire protocol
//!
//! This crate defines the text protocol between a microcontroller and the
//! Blueline app. The transport is a Bluetooth serial bridge that delivers
//! bytes in arbitrary chunks; the protocol restores message boundaries with
//! a newline terminator and guards each message with an additive checksum.
//!
//! # Frame format
//!
//! ```text
//! ┌────────────────────┬───┬────────────────┬────┐
//! │ PAYLOAD (text)     │ : │ CHECKSUM (hex) │ \n │
//! └────────────────────┴───┴────────────────┴────┘
//! ```
//!
//! The checksum is the 8-bit additive sum of the payload bytes, rendered as
//! two lowercase hex digits. Incoming frames may omit the `:<hex>` suffix
//! (hand-typed commands are accepted unstamped); every outgoing frame
//! carries it.
//!
//! Queries: `VERSION`, `LAYOUT`, `STATE`. Control updates: `SWITCH <id>
//! <ON|OFF>`, `BUTTON <id> <DOWN|UP>`, `SLIDER <id> <int>`,
//! `JOYSTICK <id> <int> <int>`.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod checksum;
pub mod command;
pub mod events;
pub mod frame;
pub mod reply;

pub use command::{Command, CommandError};
pub use events::ControlEvent;
pub use frame::{FrameError, Line, LineFramer, CHECKSUM_SEPARATOR, MAX_LINE_SIZE, TERMINATOR};
pub use reply::{ReplyError, ReplyLine, MAX_REPLY_SIZE};

/// Version string reported to `VERSION` queries.
pub const PROTOCOL_VERSION: &str = "1.0.0";
