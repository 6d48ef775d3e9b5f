//! # Command Parsing
//!
//! Turns one inbound line into a [`Command`].
//!
//! ## Wire Format
//!
//! One JSON object per line:
//!
//! ```text
//! {"action":"button","playerId":1,"button":"A","pressed":true}
//! {"action":"analog","playerId":1,"stick":"left","x":0.5,"y":-0.5}
//! {"action":"disconnect","playerId":1}
//! ```
//!
//! Unknown fields are ignored. `pressed` defaults to `false`, `x` and `y` to
//! `0.0`. A missing, zero, negative or non-integer `playerId` makes the line
//! malformed regardless of the action.

use serde::Deserialize;
use serde_json::Value;

use crate::device::PlayerId;
use crate::error::{PadBridgeError, Result};
use crate::gamepad::report::Side;

/// A validated inbound command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Press or release a source button
    Button {
        player: PlayerId,
        button: String,
        pressed: bool,
    },
    /// Move a stick. `stick` is `None` when the wire named neither stick.
    Analog {
        player: PlayerId,
        stick: Option<Side>,
        x: f64,
        y: f64,
    },
    /// Player left; neutralize and destroy their device
    Disconnect { player: PlayerId },
}

/// Loosely typed view of a line, before validation.
#[derive(Debug, Deserialize)]
struct RawCommand {
    action: Option<String>,
    #[serde(rename = "playerId")]
    player_id: Option<Value>,
    button: Option<String>,
    pressed: Option<bool>,
    stick: Option<String>,
    x: Option<f64>,
    y: Option<f64>,
}

impl Command {
    /// Parses and validates one line.
    ///
    /// # Errors
    ///
    /// - `MalformedCommand`: not a JSON object, a known field has the wrong
    ///   type, the player id is missing or not a positive integer, or a field
    ///   the action requires is missing
    /// - `UnknownAction`: `action` is missing or not one of the three above
    ///
    /// # Examples
    ///
    /// ```
    /// use pad_bridge::bridge::command::Command;
    ///
    /// let command = Command::parse(r#"{"action":"disconnect","playerId":2}"#)?;
    /// assert!(matches!(command, Command::Disconnect { .. }));
    ///
    /// assert!(Command::parse(r#"{"action":"disconnect","playerId":0}"#).is_err());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn parse(line: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(line)
            .map_err(|e| PadBridgeError::MalformedCommand(e.to_string()))?;
        if !value.is_object() {
            return Err(PadBridgeError::MalformedCommand(format!(
                "expected a JSON object, got: {}",
                value
            )));
        }
        let raw = RawCommand::deserialize(value)
            .map_err(|e| PadBridgeError::MalformedCommand(e.to_string()))?;

        let player = parse_player_id(raw.player_id.as_ref())?;

        match raw.action.as_deref() {
            Some("button") => {
                let button = raw.button.ok_or_else(|| {
                    PadBridgeError::MalformedCommand(format!("button command for {} has no button", player))
                })?;
                Ok(Command::Button {
                    player,
                    button,
                    pressed: raw.pressed.unwrap_or(false),
                })
            }
            Some("analog") => {
                let stick = raw.stick.ok_or_else(|| {
                    PadBridgeError::MalformedCommand(format!("analog command for {} has no stick", player))
                })?;
                Ok(Command::Analog {
                    player,
                    stick: Side::from_wire(&stick),
                    x: raw.x.unwrap_or(0.0),
                    y: raw.y.unwrap_or(0.0),
                })
            }
            Some("disconnect") => Ok(Command::Disconnect { player }),
            Some(other) => Err(PadBridgeError::UnknownAction(other.to_string())),
            None => Err(PadBridgeError::UnknownAction("<missing>".to_string())),
        }
    }

    /// Player the command is addressed to.
    pub fn player(&self) -> PlayerId {
        match self {
            Command::Button { player, .. }
            | Command::Analog { player, .. }
            | Command::Disconnect { player } => *player,
        }
    }
}

fn parse_player_id(value: Option<&Value>) -> Result<PlayerId> {
    let value = match value {
        None | Some(Value::Null) => {
            return Err(PadBridgeError::MalformedCommand("missing playerId".to_string()));
        }
        Some(value) => value,
    };

    value
        .as_u64()
        .and_then(|id| u32::try_from(id).ok())
        .and_then(PlayerId::new)
        .ok_or_else(|| PadBridgeError::MalformedCommand(format!("invalid playerId: {}", value)))
}
