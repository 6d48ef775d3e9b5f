//! # Pad Bridge Library
//!
//! Project abstract controller commands onto per-player virtual gamepads.
//!
//! This library provides the translation from a line-delimited JSON command
//! stream (Switch Pro style buttons, normalized sticks) into Xbox 360 style
//! virtual controllers exposed to the OS, one device per player.

pub mod backend;
pub mod bridge;
pub mod config;
pub mod device;
pub mod error;
pub mod gamepad;
