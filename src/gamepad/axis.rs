//! # Axis Codec
//!
//! Converts normalized wire values into the target device's fixed-point ranges.
//!
//! ## Value Ranges
//!
//! - Wire stick input: -1.0 to 1.0 (float), +Y points down
//! - Target stick output: -32767 to 32767 (`i16`), +Y points up
//! - Target trigger output: 0 to 255 (`u8`)
//!
//! Out-of-range input is clamped to the nearest bound, never rejected. Transport
//! noise slightly past ±1.0 is common and must not cost the player a command.
//!
//! ## Usage
//!
//! ```
//! use pad_bridge::gamepad::axis::{encode_stick, encode_trigger, STICK_MAX, STICK_MIN};
//!
//! // Full right, full down on the wire
//! assert_eq!(encode_stick(1.0, 1.0), (STICK_MAX, STICK_MIN));
//!
//! assert_eq!(encode_trigger(true), 255);
//! assert_eq!(encode_trigger(false), 0);
//! ```

/// Largest encoded stick value.
pub const STICK_MAX: i16 = i16::MAX;

/// Smallest encoded stick value. Symmetric with [`STICK_MAX`], so -32768 is never produced.
pub const STICK_MIN: i16 = -STICK_MAX;

/// Fully pressed trigger.
pub const TRIGGER_MAX: u8 = u8::MAX;

/// Encodes one normalized axis value (-1.0 to 1.0) as a stick coordinate.
///
/// Values outside the range are clamped; NaN encodes as rest (0).
///
/// # Examples
///
/// ```
/// use pad_bridge::gamepad::axis::encode_axis;
///
/// assert_eq!(encode_axis(0.0), 0);
/// assert_eq!(encode_axis(0.5), 16384);
/// assert_eq!(encode_axis(-0.5), -16384);
/// assert_eq!(encode_axis(7.0), 32767);
/// ```
#[must_use]
pub fn encode_axis(value: f64) -> i16 {
    if value.is_nan() {
        return 0;
    }
    let clamped = value.clamp(-1.0, 1.0);
    (clamped * f64::from(STICK_MAX)).round() as i16
}

/// Encodes a wire stick position into target coordinates.
///
/// The Y axis is sign-inverted: the wire reports "down" as positive while the
/// target reports "up" as positive. This is fixed policy, not configuration.
#[must_use]
pub fn encode_stick(x: f64, y: f64) -> (i16, i16) {
    (encode_axis(x), encode_axis(-y))
}

/// Encodes a digital button as an analog trigger: full scale or zero.
#[must_use]
pub const fn encode_trigger(pressed: bool) -> u8 {
    if pressed {
        TRIGGER_MAX
    } else {
        0
    }
}
