//! # Bridge Module
//!
//! Everything between the inbound line stream and the device pool.
//!
//! This module handles:
//! - Reading command lines off stdin without blocking shutdown
//! - Validating each line into a typed command
//! - Dispatching commands through the button table and axis codec
//! - Running the session and draining devices on exit

pub mod command;
pub mod dispatcher;
pub mod input;
pub mod supervisor;

pub use command::Command;
pub use supervisor::{SessionSummary, StopReason, Supervisor};
