//! # Command Dispatcher
//!
//! Routes one command to the device pool through the button table and the
//! axis codec. The dispatcher keeps no state of its own between commands.

use tracing::{debug, info};

use super::command::Command;
use crate::backend::DeviceBackend;
use crate::device::{DevicePool, PlayerId};
use crate::error::Result;
use crate::gamepad::axis::{encode_stick, encode_trigger};
use crate::gamepad::buttons::{translate, TargetControl};
use crate::gamepad::report::Side;

/// What a successfully handled command did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A button or trigger changed and was committed
    Button { player: PlayerId, control: TargetControl, pressed: bool },
    /// A stick moved and was committed
    Stick { player: PlayerId, side: Side, x: i16, y: i16 },
    /// The analog command named no known stick; nothing was touched
    StickIgnored { player: PlayerId },
    /// Disconnect handled; `removed` is false when the player had no device
    Disconnected { player: PlayerId, removed: bool },
}

/// Parses one line and dispatches it.
///
/// # Errors
///
/// Any parse error from [`Command::parse`] or dispatch error from [`dispatch`].
pub fn dispatch_line<B: DeviceBackend>(pool: &mut DevicePool<B>, line: &str) -> Result<Outcome> {
    let command = Command::parse(line)?;
    dispatch(pool, command)
}

/// Applies one command to the pool.
///
/// Each device-touching command performs its mutation and exactly one commit.
///
/// # Errors
///
/// - `UnknownButton`: no device is created or changed
/// - `DeviceBackendUnavailable` / `PlayerLimitReached`: from the pool
pub fn dispatch<B: DeviceBackend>(pool: &mut DevicePool<B>, command: Command) -> Result<Outcome> {
    match command {
        Command::Button { player, button, pressed } => {
            let control = translate(&button)?;
            pool.apply(player, |pad| match control {
                TargetControl::Button(target) if pressed => pad.press_button(target),
                TargetControl::Button(target) => pad.release_button(target),
                TargetControl::Trigger(side) => pad.set_trigger(side, encode_trigger(pressed)),
            })?;

            info!("{} {} {}", player, button, if pressed { "pressed" } else { "released" });
            Ok(Outcome::Button { player, control, pressed })
        }

        Command::Analog { player, stick: None, .. } => {
            debug!("{} analog command names no known stick, ignoring", player);
            Ok(Outcome::StickIgnored { player })
        }

        Command::Analog { player, stick: Some(side), x, y } => {
            let (ex, ey) = encode_stick(x, y);
            pool.apply(player, |pad| pad.set_stick(side, ex, ey))?;

            debug!("{} {}_stick X:{:.2} Y:{:.2}", player, side, x, y);
            Ok(Outcome::Stick { player, side, x: ex, y: ey })
        }

        Command::Disconnect { player } => {
            let removed = pool.remove(player)?;
            if !removed {
                debug!("{} disconnected without a device", player);
            }
            Ok(Outcome::Disconnected { player, removed })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mocks::RecordingBackend;
    use crate::device::pool::DEFAULT_MAX_PLAYERS;
    use crate::error::PadBridgeError;
    use crate::gamepad::axis::{STICK_MAX, STICK_MIN, TRIGGER_MAX};
    use crate::gamepad::report::{PadButton, PadReport};

    fn player(id: u32) -> PlayerId {
        PlayerId::new(id).unwrap()
    }

    fn setup() -> (DevicePool<RecordingBackend>, RecordingBackend) {
        let backend = RecordingBackend::new();
        (DevicePool::new(backend.clone(), DEFAULT_MAX_PLAYERS), backend)
    }

    #[test]
    fn test_button_press_then_release() {
        let (mut pool, backend) = setup();

        dispatch_line(&mut pool, r#"{"action":"button","playerId":1,"button":"A","pressed":true}"#).unwrap();
        let reports = backend.reports_for(player(1));
        assert_eq!(reports.len(), 1, "One commit per command");
        assert!(reports[0].is_pressed(PadButton::B), "Switch A sits where Xbox B is");

        dispatch_line(&mut pool, r#"{"action":"button","playerId":1,"button":"A","pressed":false}"#).unwrap();
        let reports = backend.reports_for(player(1));
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[1], PadReport::NEUTRAL);
    }

    #[test]
    fn test_trigger_buttons_drive_full_scale() {
        let (mut pool, backend) = setup();

        let outcome =
            dispatch_line(&mut pool, r#"{"action":"button","playerId":1,"button":"ZR","pressed":true}"#).unwrap();
        assert_eq!(
            outcome,
            Outcome::Button {
                player: player(1),
                control: TargetControl::Trigger(Side::Right),
                pressed: true,
            }
        );
        let report = backend.last_report(player(1)).unwrap();
        assert_eq!(report.right_trigger, TRIGGER_MAX);
        assert_eq!(report.buttons, 0);

        dispatch_line(&mut pool, r#"{"action":"button","playerId":1,"button":"ZR"}"#).unwrap();
        assert_eq!(backend.last_report(player(1)).unwrap().right_trigger, 0);
    }

    #[test]
    fn test_repeated_press_commits_same_state() {
        let (mut pool, backend) = setup();
        let line = r#"{"action":"button","playerId":1,"button":"L","pressed":true}"#;
        dispatch_line(&mut pool, line).unwrap();
        dispatch_line(&mut pool, line).unwrap();

        let reports = backend.reports_for(player(1));
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0], reports[1]);
    }

    #[test]
    fn test_sl_sr_share_guide() {
        let (mut pool, backend) = setup();
        dispatch_line(&mut pool, r#"{"action":"button","playerId":1,"button":"SL","pressed":true}"#).unwrap();
        dispatch_line(&mut pool, r#"{"action":"button","playerId":1,"button":"SR","pressed":false}"#).unwrap();

        assert!(!backend.last_report(player(1)).unwrap().is_pressed(PadButton::Guide));
    }

    #[test]
    fn test_analog_full_deflection() {
        let (mut pool, backend) = setup();
        let outcome =
            dispatch_line(&mut pool, r#"{"action":"analog","playerId":2,"stick":"left","x":1.0,"y":1.0}"#).unwrap();

        assert_eq!(
            outcome,
            Outcome::Stick {
                player: player(2),
                side: Side::Left,
                x: STICK_MAX,
                y: STICK_MIN,
            }
        );
        let report = backend.last_report(player(2)).unwrap();
        assert_eq!(report.left_stick, (STICK_MAX, STICK_MIN));
        assert_eq!(report.right_stick, (0, 0));
        assert_eq!(backend.reports_for(player(2)).len(), 1);
    }

    #[test]
    fn test_analog_values_are_clamped() {
        let (mut pool, backend) = setup();
        dispatch_line(&mut pool, r#"{"action":"analog","playerId":1,"stick":"right","x":-1.3,"y":-4}"#).unwrap();
        assert_eq!(backend.last_report(player(1)).unwrap().right_stick, (STICK_MIN, STICK_MAX));
    }

    #[test]
    fn test_unknown_stick_touches_nothing() {
        let (mut pool, backend) = setup();
        let outcome =
            dispatch_line(&mut pool, r#"{"action":"analog","playerId":3,"stick":"up","x":1.0}"#).unwrap();

        assert_eq!(outcome, Outcome::StickIgnored { player: player(3) });
        assert!(backend.created().is_empty());
        assert!(pool.is_empty());
    }

    #[test]
    fn test_unknown_button_touches_nothing() {
        let (mut pool, backend) = setup();
        dispatch_line(&mut pool, r#"{"action":"button","playerId":1,"button":"B","pressed":true}"#).unwrap();

        let result = dispatch_line(&mut pool, r#"{"action":"button","playerId":1,"button":"Home","pressed":true}"#);
        assert!(matches!(result, Err(PadBridgeError::UnknownButton(ref name)) if name == "Home"));
        assert_eq!(backend.reports_for(player(1)).len(), 1, "No commit for unknown button");

        let result = dispatch_line(&mut pool, r#"{"action":"button","playerId":2,"button":"Home","pressed":true}"#);
        assert!(result.is_err());
        assert!(!pool.contains(player(2)), "No device for unknown button");
    }

    #[test]
    fn test_disconnect_neutralizes() {
        let (mut pool, backend) = setup();
        dispatch_line(&mut pool, r#"{"action":"button","playerId":1,"button":"X","pressed":true}"#).unwrap();
        dispatch_line(&mut pool, r#"{"action":"analog","playerId":1,"stick":"left","x":0.5,"y":0.5}"#).unwrap();

        let outcome = dispatch_line(&mut pool, r#"{"action":"disconnect","playerId":1}"#).unwrap();
        assert_eq!(outcome, Outcome::Disconnected { player: player(1), removed: true });
        assert_eq!(backend.last_report(player(1)), Some(PadReport::NEUTRAL));
        assert!(pool.is_empty());

        let outcome = dispatch_line(&mut pool, r#"{"action":"disconnect","playerId":1}"#).unwrap();
        assert_eq!(outcome, Outcome::Disconnected { player: player(1), removed: false });
    }

    #[test]
    fn test_disconnect_unknown_player() {
        let (mut pool, backend) = setup();
        let outcome = dispatch_line(&mut pool, r#"{"action":"disconnect","playerId":42}"#).unwrap();
        assert_eq!(outcome, Outcome::Disconnected { player: player(42), removed: false });
        assert!(backend.created().is_empty());
    }

    #[test]
    fn test_two_players_are_independent() {
        let (mut pool, backend) = setup();
        dispatch_line(&mut pool, r#"{"action":"button","playerId":1,"button":"Plus","pressed":true}"#).unwrap();
        let p1_before = backend.reports_for(player(1));

        dispatch_line(&mut pool, r#"{"action":"button","playerId":2,"button":"Minus","pressed":true}"#).unwrap();
        dispatch_line(&mut pool, r#"{"action":"analog","playerId":2,"stick":"right","x":-1,"y":0}"#).unwrap();
        dispatch_line(&mut pool, r#"{"action":"disconnect","playerId":2}"#).unwrap();

        assert_eq!(backend.reports_for(player(1)), p1_before);
        assert!(pool.get(player(1)).unwrap().report().is_pressed(PadButton::Start));
    }

    #[test]
    fn test_malformed_and_unknown_action_touch_nothing() {
        let (mut pool, backend) = setup();
        assert!(matches!(
            dispatch_line(&mut pool, "not json"),
            Err(PadBridgeError::MalformedCommand(_))
        ));
        assert!(matches!(
            dispatch_line(&mut pool, r#"{"action":"jump","playerId":1}"#),
            Err(PadBridgeError::UnknownAction(_))
        ));
        assert!(backend.created().is_empty());
    }
}
