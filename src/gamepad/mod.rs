//! # Gamepad Module
//!
//! The target controller shape and the pure translations into it.
//!
//! This module handles:
//! - The fixed report layout of the emulated device
//! - Translating source button names into target controls
//! - Encoding normalized stick and trigger values

pub mod axis;
pub mod buttons;
pub mod report;
