//! # Device Module
//!
//! Per-player virtual controllers and the pool that owns them.
//!
//! This module handles:
//! - Holding each player's report and committing it to the OS device
//! - Creating devices lazily on a player's first command
//! - Neutralizing and destroying devices on disconnect and shutdown

pub mod handle;
pub mod pool;

use std::fmt;
use std::num::NonZeroU32;

pub use handle::VirtualGamepad;
pub use pool::DevicePool;

/// Identifier of a connected player, assigned by the upstream sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(NonZeroU32);

impl PlayerId {
    /// Returns `None` for 0, which is never a valid player.
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}
