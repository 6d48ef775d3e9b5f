//! # Device Backend Module
//!
//! The boundary to the OS-level virtual controller driver.
//!
//! The bridge needs only two capabilities from a driver:
//! - create one device for a player ([`DeviceBackend`])
//! - push one complete report to that device ([`ReportSink`])
//!
//! A device is destroyed by dropping it.

pub mod uinput;

use std::io;

use crate::device::PlayerId;
use crate::gamepad::report::PadReport;

/// A live virtual controller that accepts complete reports.
#[cfg_attr(test, mockall::automock)]
pub trait ReportSink {
    /// Flush one report to the OS device.
    fn send_report(&mut self, report: &PadReport) -> io::Result<()>;
}

/// Factory for virtual controllers.
pub trait DeviceBackend {
    type Device: ReportSink;

    /// Create the OS device for `player`.
    fn create_device(&mut self, player: PlayerId) -> io::Result<Self::Device>;
}
