//! Board-agnostic session engine for Blueline panels.
//!
//! This crate binds the wire protocol to an application: it owns the
//! receive framer, validates and dispatches incoming commands, and routes
//! replies back through the transport. Hardware specifics stay behind the
//! [`Transport`] and [`Panel`] traits.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod session;
pub mod traits;

pub use blueline_protocol::ControlEvent;
pub use session::{Responder, Session, SessionStats};
pub use traits::{Panel, Transport};
