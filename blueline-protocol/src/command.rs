//! Command tokenization and the closed command set.

use crate::events::ControlEvent;

/// Reasons a payload fails to parse into a command.
///
/// None of these are fatal: a malformed remote message is dropped and the
/// dispatch loop keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Payload had no tokens. The app terminates a fresh connection with a
    /// bare terminator to flush stale bytes, so this is an expected no-op.
    Empty,
    /// Payload bytes were not valid UTF-8.
    NotUtf8,
    /// A required argument was missing.
    MissingArgument,
    /// An integer argument did not parse.
    InvalidNumber,
}

/// A parsed command.
///
/// The set is closed; names that match nothing land in [`Command::Unknown`]
/// so the caller can account for them without aborting the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command<'a> {
    /// Protocol version query.
    Version,
    /// Panel layout query.
    Layout,
    /// Current-state query; the panel answers with one update per control.
    State,
    /// A control update from the app.
    Input(ControlEvent<'a>),
    /// Anything else.
    Unknown(&'a str),
}

impl<'a> Command<'a> {
    /// Parse a validated frame payload.
    ///
    /// The first whitespace-separated token selects the command
    /// (case-sensitive); arguments sit at fixed positions after it. Tokens
    /// beyond the required positions are ignored.
    pub fn parse(payload: &'a [u8]) -> Result<Self, CommandError> {
        let text = core::str::from_utf8(payload).map_err(|_| CommandError::NotUtf8)?;
        let mut tokens = text.split_ascii_whitespace();
        let name = tokens.next().ok_or(CommandError::Empty)?;
        let command = match name {
            "VERSION" => Command::Version,
            "LAYOUT" => Command::Layout,
            "STATE" => Command::State,
            "SWITCH" => Command::Input(ControlEvent::Switch {
                id: int_arg(&mut tokens)?,
                state: text_arg(&mut tokens)?,
            }),
            "BUTTON" => Command::Input(ControlEvent::Button {
                id: int_arg(&mut tokens)?,
                state: text_arg(&mut tokens)?,
            }),
            "SLIDER" => Command::Input(ControlEvent::Slider {
                id: int_arg(&mut tokens)?,
                value: int_arg(&mut tokens)?,
            }),
            "JOYSTICK" => Command::Input(ControlEvent::Joystick {
                id: int_arg(&mut tokens)?,
                x: int_arg(&mut tokens)?,
                y: int_arg(&mut tokens)?,
            }),
            _ => Command::Unknown(name),
        };
        Ok(command)
    }
}

fn text_arg<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Result<&'a str, CommandError> {
    tokens.next().ok_or(CommandError::MissingArgument)
}

fn int_arg<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Result<i32, CommandError> {
    text_arg(tokens)?
        .parse()
        .map_err(|_| CommandError::InvalidNumber)
}
