//! # Button Translation Table
//!
//! Maps source (Switch Pro style) button names onto controls of the target
//! (Xbox 360 style) device.
//!
//! ## Mapping
//!
//! Face buttons keep their physical position rather than their printed letter.
//!
//! | Source | Target |
//! |--------|--------|
//! | A | B |
//! | B | A |
//! | X | Y |
//! | Y | X |
//! | L | Left Shoulder |
//! | R | Right Shoulder |
//! | ZL | Left Trigger (full or zero) |
//! | ZR | Right Trigger (full or zero) |
//! | Plus | Start |
//! | Minus | Back |
//! | L3 | Left Thumb |
//! | R3 | Right Thumb |
//! | DPadUp/Down/Left/Right | D-Pad Up/Down/Left/Right |
//! | SL | Guide |
//! | SR | Guide |
//!
//! SL and SR both land on Guide. The target has no free control left for them,
//! so the collapse is intentional: releasing either one releases Guide.

use std::fmt;
use std::str::FromStr;

use super::report::{PadButton, Side};
use crate::error::{PadBridgeError, Result};

/// Named digital inputs of the source controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalButton {
    A,
    B,
    X,
    Y,
    L,
    R,
    ZL,
    ZR,
    Plus,
    Minus,
    L3,
    R3,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    SL,
    SR,
}

/// What a source button drives on the target device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetControl {
    /// A digital button
    Button(PadButton),
    /// An analog trigger driven to full scale or zero
    Trigger(Side),
}

impl LogicalButton {
    /// Every mapped source button.
    pub const ALL: [LogicalButton; 18] = [
        LogicalButton::A,
        LogicalButton::B,
        LogicalButton::X,
        LogicalButton::Y,
        LogicalButton::L,
        LogicalButton::R,
        LogicalButton::ZL,
        LogicalButton::ZR,
        LogicalButton::Plus,
        LogicalButton::Minus,
        LogicalButton::L3,
        LogicalButton::R3,
        LogicalButton::DPadUp,
        LogicalButton::DPadDown,
        LogicalButton::DPadLeft,
        LogicalButton::DPadRight,
        LogicalButton::SL,
        LogicalButton::SR,
    ];

    /// Wire name of the button.
    pub const fn name(self) -> &'static str {
        match self {
            LogicalButton::A => "A",
            LogicalButton::B => "B",
            LogicalButton::X => "X",
            LogicalButton::Y => "Y",
            LogicalButton::L => "L",
            LogicalButton::R => "R",
            LogicalButton::ZL => "ZL",
            LogicalButton::ZR => "ZR",
            LogicalButton::Plus => "Plus",
            LogicalButton::Minus => "Minus",
            LogicalButton::L3 => "L3",
            LogicalButton::R3 => "R3",
            LogicalButton::DPadUp => "DPadUp",
            LogicalButton::DPadDown => "DPadDown",
            LogicalButton::DPadLeft => "DPadLeft",
            LogicalButton::DPadRight => "DPadRight",
            LogicalButton::SL => "SL",
            LogicalButton::SR => "SR",
        }
    }

    /// Target control this button drives.
    pub const fn target(self) -> TargetControl {
        match self {
            LogicalButton::A => TargetControl::Button(PadButton::B),
            LogicalButton::B => TargetControl::Button(PadButton::A),
            LogicalButton::X => TargetControl::Button(PadButton::Y),
            LogicalButton::Y => TargetControl::Button(PadButton::X),
            LogicalButton::L => TargetControl::Button(PadButton::LeftShoulder),
            LogicalButton::R => TargetControl::Button(PadButton::RightShoulder),
            LogicalButton::ZL => TargetControl::Trigger(Side::Left),
            LogicalButton::ZR => TargetControl::Trigger(Side::Right),
            LogicalButton::Plus => TargetControl::Button(PadButton::Start),
            LogicalButton::Minus => TargetControl::Button(PadButton::Back),
            LogicalButton::L3 => TargetControl::Button(PadButton::LeftThumb),
            LogicalButton::R3 => TargetControl::Button(PadButton::RightThumb),
            LogicalButton::DPadUp => TargetControl::Button(PadButton::DPadUp),
            LogicalButton::DPadDown => TargetControl::Button(PadButton::DPadDown),
            LogicalButton::DPadLeft => TargetControl::Button(PadButton::DPadLeft),
            LogicalButton::DPadRight => TargetControl::Button(PadButton::DPadRight),
            LogicalButton::SL | LogicalButton::SR => TargetControl::Button(PadButton::Guide),
        }
    }
}

impl FromStr for LogicalButton {
    type Err = PadBridgeError;

    fn from_str(name: &str) -> Result<Self> {
        LogicalButton::ALL
            .into_iter()
            .find(|button| button.name() == name)
            .ok_or_else(|| PadBridgeError::UnknownButton(name.to_string()))
    }
}

impl fmt::Display for LogicalButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolves a wire button name to its target control.
///
/// # Errors
///
/// Returns `UnknownButton` for names outside the table. Matching is exact and
/// case-sensitive.
///
/// # Examples
///
/// ```
/// use pad_bridge::gamepad::buttons::{translate, TargetControl};
/// use pad_bridge::gamepad::report::{PadButton, Side};
///
/// assert_eq!(translate("A")?, TargetControl::Button(PadButton::B));
/// assert_eq!(translate("ZR")?, TargetControl::Trigger(Side::Right));
/// assert!(translate("Home").is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn translate(name: &str) -> Result<TargetControl> {
    name.parse::<LogicalButton>().map(LogicalButton::target)
}
