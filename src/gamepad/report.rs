//! # Target Device Report
//!
//! The fixed shape of the emulated controller: fifteen digital buttons packed
//! into one word, two 8-bit triggers and two 16-bit sticks. The layout follows
//! the XUSB (Xbox 360) gamepad report, so the button bits match that protocol.
//!
//! | Button | Bit |
//! |--------|-----|
//! | D-Pad Up | 0x0001 |
//! | D-Pad Down | 0x0002 |
//! | D-Pad Left | 0x0004 |
//! | D-Pad Right | 0x0008 |
//! | Start | 0x0010 |
//! | Back | 0x0020 |
//! | Left Thumb | 0x0040 |
//! | Right Thumb | 0x0080 |
//! | Left Shoulder | 0x0100 |
//! | Right Shoulder | 0x0200 |
//! | Guide | 0x0400 |
//! | A | 0x1000 |
//! | B | 0x2000 |
//! | X | 0x4000 |
//! | Y | 0x8000 |

use std::fmt;

/// Left or right half of the controller (triggers and sticks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Parses the wire name of a stick (`"left"` or `"right"`).
    ///
    /// Returns `None` for anything else.
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "left" => Some(Side::Left),
            "right" => Some(Side::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// Digital buttons of the target device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadButton {
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    Start,
    Back,
    LeftThumb,
    RightThumb,
    LeftShoulder,
    RightShoulder,
    Guide,
    A,
    B,
    X,
    Y,
}

impl PadButton {
    /// Every target button, in report bit order.
    pub const ALL: [PadButton; 15] = [
        PadButton::DPadUp,
        PadButton::DPadDown,
        PadButton::DPadLeft,
        PadButton::DPadRight,
        PadButton::Start,
        PadButton::Back,
        PadButton::LeftThumb,
        PadButton::RightThumb,
        PadButton::LeftShoulder,
        PadButton::RightShoulder,
        PadButton::Guide,
        PadButton::A,
        PadButton::B,
        PadButton::X,
        PadButton::Y,
    ];

    /// Bit of this button in [`PadReport::buttons`].
    pub const fn mask(self) -> u16 {
        match self {
            PadButton::DPadUp => 0x0001,
            PadButton::DPadDown => 0x0002,
            PadButton::DPadLeft => 0x0004,
            PadButton::DPadRight => 0x0008,
            PadButton::Start => 0x0010,
            PadButton::Back => 0x0020,
            PadButton::LeftThumb => 0x0040,
            PadButton::RightThumb => 0x0080,
            PadButton::LeftShoulder => 0x0100,
            PadButton::RightShoulder => 0x0200,
            PadButton::Guide => 0x0400,
            PadButton::A => 0x1000,
            PadButton::B => 0x2000,
            PadButton::X => 0x4000,
            PadButton::Y => 0x8000,
        }
    }
}

/// Complete state of one virtual controller, committed to the OS as a unit.
///
/// Stick values use the "up is positive" convention on the Y axis.
///
/// # Examples
///
/// ```
/// use pad_bridge::gamepad::report::{PadButton, PadReport};
///
/// let mut report = PadReport::NEUTRAL;
/// report.buttons |= PadButton::A.mask();
/// assert!(report.is_pressed(PadButton::A));
/// assert!(!report.is_neutral());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PadReport {
    /// Pressed buttons, one bit per [`PadButton`]
    pub buttons: u16,
    /// Left trigger magnitude (0-255)
    pub left_trigger: u8,
    /// Right trigger magnitude (0-255)
    pub right_trigger: u8,
    /// Left stick (x, y)
    pub left_stick: (i16, i16),
    /// Right stick (x, y)
    pub right_stick: (i16, i16),
}

impl PadReport {
    /// All buttons released, triggers and sticks at rest.
    pub const NEUTRAL: PadReport = PadReport {
        buttons: 0,
        left_trigger: 0,
        right_trigger: 0,
        left_stick: (0, 0),
        right_stick: (0, 0),
    };

    pub fn is_pressed(&self, button: PadButton) -> bool {
        self.buttons & button.mask() != 0
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }

    pub fn trigger(&self, side: Side) -> u8 {
        match side {
            Side::Left => self.left_trigger,
            Side::Right => self.right_trigger,
        }
    }

    pub fn stick(&self, side: Side) -> (i16, i16) {
        match side {
            Side::Left => self.left_stick,
            Side::Right => self.right_stick,
        }
    }
}
