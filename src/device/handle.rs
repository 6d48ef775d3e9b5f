//! # Virtual Device Handle
//!
//! One player's virtual controller: the in-memory report plus the OS device it
//! is committed to.
//!
//! Mutators only touch the in-memory report. [`VirtualGamepad::commit`] sends
//! the whole report as one unit, so callers pair every mutation with exactly
//! one commit (see [`DevicePool::apply`](super::DevicePool::apply)).

use tracing::trace;

use super::PlayerId;
use crate::backend::ReportSink;
use crate::error::{PadBridgeError, Result};
use crate::gamepad::report::{PadButton, PadReport, Side};

/// Handle to one player's virtual controller.
pub struct VirtualGamepad<D: ReportSink> {
    player: PlayerId,
    device: D,
    report: PadReport,
    commits: u64,
}

impl<D: ReportSink> std::fmt::Debug for VirtualGamepad<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualGamepad")
            .field("player", &self.player)
            .field("report", &self.report)
            .field("commits", &self.commits)
            .finish_non_exhaustive()
    }
}

impl<D: ReportSink> VirtualGamepad<D> {
    /// Wraps a freshly created device. The OS device starts at rest, which
    /// matches the neutral in-memory report.
    pub fn new(player: PlayerId, device: D) -> Self {
        Self {
            player,
            device,
            report: PadReport::NEUTRAL,
            commits: 0,
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Current report. Equals the last committed report between commands.
    pub fn report(&self) -> &PadReport {
        &self.report
    }

    /// Number of successful commits on this device.
    pub fn commit_count(&self) -> u64 {
        self.commits
    }

    pub fn is_neutral(&self) -> bool {
        self.report.is_neutral()
    }

    /// Marks `button` pressed. Pressing a held button changes nothing.
    pub fn press_button(&mut self, button: PadButton) {
        self.report.buttons |= button.mask();
    }

    /// Marks `button` released. Releasing a free button changes nothing.
    pub fn release_button(&mut self, button: PadButton) {
        self.report.buttons &= !button.mask();
    }

    /// Replaces one trigger value.
    pub fn set_trigger(&mut self, side: Side, value: u8) {
        match side {
            Side::Left => self.report.left_trigger = value,
            Side::Right => self.report.right_trigger = value,
        }
    }

    /// Replaces one stick position.
    pub fn set_stick(&mut self, side: Side, x: i16, y: i16) {
        match side {
            Side::Left => self.report.left_stick = (x, y),
            Side::Right => self.report.right_stick = (x, y),
        }
    }

    /// Releases every button and centers every axis.
    ///
    /// Must be followed by [`commit`](Self::commit) before the handle is
    /// dropped, or the OS keeps reporting the last non-neutral state.
    pub fn reset_to_neutral(&mut self) {
        self.report = PadReport::NEUTRAL;
    }

    /// Sends the current report to the OS device as one report.
    ///
    /// # Errors
    ///
    /// Returns `DeviceBackendUnavailable` if the device rejects the write. The
    /// handle should be discarded after that.
    pub fn commit(&mut self) -> Result<()> {
        self.device
            .send_report(&self.report)
            .map_err(|source| PadBridgeError::DeviceBackendUnavailable {
                player: self.player,
                source,
            })?;
        self.commits += 1;
        trace!("{} committed report {:?}", self.player, self.report);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockReportSink;
    use mockall::predicate::eq;
    use std::io;

    fn player(id: u32) -> PlayerId {
        PlayerId::new(id).unwrap()
    }

    fn accepting_sink() -> MockReportSink {
        let mut sink = MockReportSink::new();
        sink.expect_send_report().returning(|_| Ok(()));
        sink
    }

    #[test]
    fn test_new_handle_is_neutral() {
        let pad = VirtualGamepad::new(player(1), accepting_sink());
        assert!(pad.is_neutral());
        assert_eq!(pad.commit_count(), 0);
        assert_eq!(pad.player(), player(1));
    }

    #[test]
    fn test_press_is_idempotent() {
        let mut once = VirtualGamepad::new(player(1), accepting_sink());
        once.press_button(PadButton::A);

        let mut twice = VirtualGamepad::new(player(1), accepting_sink());
        twice.press_button(PadButton::A);
        twice.press_button(PadButton::A);

        assert_eq!(once.report(), twice.report());
    }

    #[test]
    fn test_press_release_round_trip() {
        let mut pad = VirtualGamepad::new(player(1), accepting_sink());
        pad.press_button(PadButton::X);
        pad.set_trigger(Side::Left, 255);
        let before = *pad.report();

        pad.press_button(PadButton::Start);
        pad.release_button(PadButton::Start);

        assert_eq!(*pad.report(), before);
        assert!(pad.report().is_pressed(PadButton::X), "Unrelated button must stay held");
    }

    #[test]
    fn test_release_unpressed_button_is_noop() {
        let mut pad = VirtualGamepad::new(player(1), accepting_sink());
        pad.release_button(PadButton::Guide);
        assert!(pad.is_neutral());
    }

    #[test]
    fn test_axes_are_replaced_not_accumulated() {
        let mut pad = VirtualGamepad::new(player(1), accepting_sink());
        pad.set_stick(Side::Right, 100, -100);
        pad.set_stick(Side::Right, 5, 6);
        pad.set_trigger(Side::Right, 200);
        pad.set_trigger(Side::Right, 10);

        assert_eq!(pad.report().right_stick, (5, 6));
        assert_eq!(pad.report().right_trigger, 10);
        assert_eq!(pad.report().left_stick, (0, 0));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut pad = VirtualGamepad::new(player(1), accepting_sink());
        pad.press_button(PadButton::A);
        pad.press_button(PadButton::DPadLeft);
        pad.set_trigger(Side::Left, 255);
        pad.set_stick(Side::Left, 32767, -32767);

        pad.reset_to_neutral();
        assert!(pad.is_neutral());
    }

    #[test]
    fn test_commit_sends_current_report_once() {
        let expected = PadReport {
            buttons: PadButton::B.mask(),
            ..PadReport::NEUTRAL
        };
        let mut sink = MockReportSink::new();
        sink.expect_send_report()
            .with(eq(expected))
            .times(1)
            .returning(|_| Ok(()));

        let mut pad = VirtualGamepad::new(player(4), sink);
        pad.press_button(PadButton::B);
        assert!(pad.commit().is_ok());
        assert_eq!(pad.commit_count(), 1);
    }

    #[test]
    fn test_commit_failure_is_backend_unavailable() {
        let mut sink = MockReportSink::new();
        sink.expect_send_report()
            .times(1)
            .returning(|_| Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone")));

        let mut pad = VirtualGamepad::new(player(2), sink);
        match pad.commit() {
            Err(PadBridgeError::DeviceBackendUnavailable { player: p, .. }) => {
                assert_eq!(p, player(2));
            }
            other => panic!("Expected DeviceBackendUnavailable, got: {:?}", other),
        }
        assert_eq!(pad.commit_count(), 0);
    }
}
