//! Control updates exchanged with the app.
//!
//! The same `<ELEMENT> <id> <args…>` vocabulary flows in both directions:
//! the app sends an update when the user operates a control, and the device
//! echoes updates back when asked to report its state.

use core::fmt::Write;

use heapless::String;

use crate::reply::{self, ReplyError, ReplyLine, MAX_REPLY_SIZE};

/// A control state update.
///
/// `Switch` and `Button` keep their state argument as text (`ON`/`OFF`,
/// `DOWN`/`UP`); `Slider` and `Joystick` carry decoded integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlEvent<'a> {
    /// Two-state toggle.
    Switch { id: i32, state: &'a str },
    /// Momentary button (`DOWN` on press, `UP` on release).
    Button { id: i32, state: &'a str },
    /// Linear position control.
    Slider { id: i32, value: i32 },
    /// Two-axis stick position.
    Joystick { id: i32, x: i32, y: i32 },
}

impl ControlEvent<'_> {
    /// Element name as it appears on the wire.
    pub fn element(&self) -> &'static str {
        match self {
            ControlEvent::Switch { .. } => "SWITCH",
            ControlEvent::Button { .. } => "BUTTON",
            ControlEvent::Slider { .. } => "SLIDER",
            ControlEvent::Joystick { .. } => "JOYSTICK",
        }
    }

    /// Id of the control this update refers to.
    pub fn id(&self) -> i32 {
        match *self {
            ControlEvent::Switch { id, .. }
            | ControlEvent::Button { id, .. }
            | ControlEvent::Slider { id, .. }
            | ControlEvent::Joystick { id, .. } => id,
        }
    }

    /// Render this update as a reply payload.
    pub fn write_payload(&self, out: &mut String<MAX_REPLY_SIZE>) -> Result<(), ReplyError> {
        match *self {
            ControlEvent::Switch { id, state } | ControlEvent::Button { id, state } => {
                write!(out, "{} {} {}", self.element(), id, state)
            }
            ControlEvent::Slider { id, value } => {
                write!(out, "{} {} {}", self.element(), id, value)
            }
            ControlEvent::Joystick { id, x, y } => {
                write!(out, "{} {} {} {}", self.element(), id, x, y)
            }
        }
        .map_err(|_| ReplyError::Overflow)
    }

    /// Encode this update as a sealed reply line.
    pub fn to_line(&self) -> Result<ReplyLine, ReplyError> {
        let mut payload = String::new();
        self.write_payload(&mut payload)?;
        reply::seal(payload.as_bytes())
    }
}
