//! # uinput Backend
//!
//! Creates one Linux virtual gamepad per player through `/dev/uinput` using
//! the evdev crate.
//!
//! ## Device Layout
//!
//! Each device advertises the layout the kernel `xpad` driver gives a wired
//! Xbox 360 pad, so SDL and Steam Input recognize it without extra mapping.
//!
//! | Report field | evdev Code | Range |
//! |--------------|------------|-------|
//! | Left Stick X / Y | ABS_X / ABS_Y | -32768..32767 |
//! | Right Stick X / Y | ABS_RX / ABS_RY | -32768..32767 |
//! | Left / Right Trigger | ABS_Z / ABS_RZ | 0..255 |
//! | A / B / X / Y | BTN_SOUTH / BTN_EAST / BTN_NORTH / BTN_WEST | 0/1 |
//! | Shoulders | BTN_TL / BTN_TR | 0/1 |
//! | Back / Start / Guide | BTN_SELECT / BTN_START / BTN_MODE | 0/1 |
//! | Thumbs | BTN_THUMBL / BTN_THUMBR | 0/1 |
//! | D-Pad | BTN_DPAD_UP / DOWN / LEFT / RIGHT | 0/1 |
//!
//! Reports keep Y "up positive"; evdev gamepads report Y "down positive". The
//! Y axes are negated on the way out, so rest stays exactly 0.

use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{
    AbsInfo, AbsoluteAxisType, AttributeSet, BusType, EventType, InputEvent, InputId, Key,
    UinputAbsSetup,
};
use std::io;
use tracing::debug;

use super::{DeviceBackend, ReportSink};
use crate::config::DeviceConfig;
use crate::device::PlayerId;
use crate::gamepad::report::{PadButton, PadReport};

/// Stick axis range as advertised to the OS (fuzz 16, flat 128 like xpad).
const STICK_ABS_MIN: i32 = -32768;
const STICK_ABS_MAX: i32 = 32767;
const STICK_FUZZ: i32 = 16;
const STICK_FLAT: i32 = 128;

/// Trigger axis range as advertised to the OS.
const TRIGGER_ABS_MAX: i32 = 255;

/// evdev key code for a target button.
fn key_for(button: PadButton) -> Key {
    match button {
        PadButton::A => Key::BTN_SOUTH,
        PadButton::B => Key::BTN_EAST,
        PadButton::X => Key::BTN_NORTH,
        PadButton::Y => Key::BTN_WEST,
        PadButton::LeftShoulder => Key::BTN_TL,
        PadButton::RightShoulder => Key::BTN_TR,
        PadButton::Back => Key::BTN_SELECT,
        PadButton::Start => Key::BTN_START,
        PadButton::Guide => Key::BTN_MODE,
        PadButton::LeftThumb => Key::BTN_THUMBL,
        PadButton::RightThumb => Key::BTN_THUMBR,
        PadButton::DPadUp => Key::BTN_DPAD_UP,
        PadButton::DPadDown => Key::BTN_DPAD_DOWN,
        PadButton::DPadLeft => Key::BTN_DPAD_LEFT,
        PadButton::DPadRight => Key::BTN_DPAD_RIGHT,
    }
}

/// Flips an up-positive Y value into evdev's down-positive convention.
fn evdev_y(value: i16) -> i32 {
    (-i32::from(value)).min(STICK_ABS_MAX)
}

/// Expands a report into one batch of evdev events.
///
/// Every key and axis is written on each commit. The kernel drops values that
/// did not change, so readers only see real transitions.
pub fn report_events(report: &PadReport) -> Vec<InputEvent> {
    let mut events = Vec::with_capacity(PadButton::ALL.len() + 6);

    for button in PadButton::ALL {
        let value = if report.is_pressed(button) { 1 } else { 0 };
        events.push(InputEvent::new(EventType::KEY, key_for(button).code(), value));
    }

    let axes = [
        (AbsoluteAxisType::ABS_X, i32::from(report.left_stick.0)),
        (AbsoluteAxisType::ABS_Y, evdev_y(report.left_stick.1)),
        (AbsoluteAxisType::ABS_RX, i32::from(report.right_stick.0)),
        (AbsoluteAxisType::ABS_RY, evdev_y(report.right_stick.1)),
        (AbsoluteAxisType::ABS_Z, i32::from(report.left_trigger)),
        (AbsoluteAxisType::ABS_RZ, i32::from(report.right_trigger)),
    ];
    for (axis, value) in axes {
        events.push(InputEvent::new(EventType::ABSOLUTE, axis.0, value));
    }

    events
}

/// Creates uinput gamepads with the configured identity.
#[derive(Debug, Clone)]
pub struct UinputBackend {
    config: DeviceConfig,
}

impl UinputBackend {
    pub fn new(config: DeviceConfig) -> Self {
        Self { config }
    }

    /// Name shown to the OS for one player's device.
    pub fn device_name(&self, player: PlayerId) -> String {
        format!("{} (Player {})", self.config.name, player.get())
    }
}

impl DeviceBackend for UinputBackend {
    type Device = UinputGamepad;

    fn create_device(&mut self, player: PlayerId) -> io::Result<UinputGamepad> {
        let name = self.device_name(player);

        let mut keys = AttributeSet::<Key>::new();
        for button in PadButton::ALL {
            keys.insert(key_for(button));
        }

        let stick = AbsInfo::new(0, STICK_ABS_MIN, STICK_ABS_MAX, STICK_FUZZ, STICK_FLAT, 0);
        let trigger = AbsInfo::new(0, 0, TRIGGER_ABS_MAX, 0, 0, 0);

        let device = VirtualDeviceBuilder::new()?
            .name(&name)
            .input_id(InputId::new(
                BusType::BUS_USB,
                self.config.vendor_id,
                self.config.product_id,
                self.config.version,
            ))
            .with_keys(&keys)?
            .with_absolute_axis(&UinputAbsSetup::new(AbsoluteAxisType::ABS_X, stick))?
            .with_absolute_axis(&UinputAbsSetup::new(AbsoluteAxisType::ABS_Y, stick))?
            .with_absolute_axis(&UinputAbsSetup::new(AbsoluteAxisType::ABS_RX, stick))?
            .with_absolute_axis(&UinputAbsSetup::new(AbsoluteAxisType::ABS_RY, stick))?
            .with_absolute_axis(&UinputAbsSetup::new(AbsoluteAxisType::ABS_Z, trigger))?
            .with_absolute_axis(&UinputAbsSetup::new(AbsoluteAxisType::ABS_RZ, trigger))?
            .build()?;

        debug!("Registered uinput device \"{}\"", name);
        Ok(UinputGamepad { device })
    }
}

/// One player's uinput device. Dropping it destroys the kernel device.
pub struct UinputGamepad {
    device: VirtualDevice,
}

impl std::fmt::Debug for UinputGamepad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UinputGamepad").finish_non_exhaustive()
    }
}

impl ReportSink for UinputGamepad {
    fn send_report(&mut self, report: &PadReport) -> io::Result<()> {
        // emit() terminates the batch with SYN_REPORT
        self.device.emit(&report_events(report))
    }
}
