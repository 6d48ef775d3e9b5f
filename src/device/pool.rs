//! # Device Pool
//!
//! Maps player ids to their virtual controllers. The pool is the only owner of
//! device resources: it creates a device on a player's first command and
//! destroys it on disconnect or shutdown, always neutralizing it first.
//!
//! ## Lifecycle
//!
//! ```text
//!   first command ──> create ──> apply/commit ... ──> remove (reset + commit) ──> drop
//!                        │                                     ▲
//!                        └── commit failure ───────────────────┘ (entry dropped, no reset)
//! ```
//!
//! The pool is driven by a single task and is not shared, so it holds no locks.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{error, info, warn};

use super::handle::VirtualGamepad;
use super::PlayerId;
use crate::backend::DeviceBackend;
use crate::error::{PadBridgeError, Result};

/// Default cap on simultaneously live devices.
pub const DEFAULT_MAX_PLAYERS: usize = 8;

/// Owns every player's virtual controller.
pub struct DevicePool<B: DeviceBackend> {
    backend: B,
    devices: HashMap<PlayerId, VirtualGamepad<B::Device>>,
    max_players: usize,
}

impl<B: DeviceBackend> DevicePool<B> {
    /// Creates an empty pool. No device exists until a player sends a command.
    ///
    /// # Arguments
    ///
    /// * `backend` - Driver used to create OS devices
    /// * `max_players` - Maximum number of live devices (at least 1)
    pub fn new(backend: B, max_players: usize) -> Self {
        Self {
            backend,
            devices: HashMap::new(),
            max_players: max_players.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.devices.contains_key(&player)
    }

    pub fn max_players(&self) -> usize {
        self.max_players
    }

    /// Read-only view of one player's controller.
    pub fn get(&self, player: PlayerId) -> Option<&VirtualGamepad<B::Device>> {
        self.devices.get(&player)
    }

    /// Snapshot of live player ids in ascending order.
    ///
    /// Shutdown iterates this snapshot rather than the map, so removal during
    /// iteration cannot skip entries.
    pub fn player_ids(&self) -> Vec<PlayerId> {
        let mut ids: Vec<PlayerId> = self.devices.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Returns the player's controller, creating it on first use.
    ///
    /// # Errors
    ///
    /// - `PlayerLimitReached`: the pool is full and `player` is new
    /// - `DeviceBackendUnavailable`: the OS device could not be created
    ///
    /// Neither error inserts an entry.
    pub fn get_or_create(&mut self, player: PlayerId) -> Result<&mut VirtualGamepad<B::Device>> {
        let live = self.devices.len();

        match self.devices.entry(player) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                if live >= self.max_players {
                    return Err(PadBridgeError::PlayerLimitReached {
                        player,
                        limit: self.max_players,
                    });
                }

                let device = self
                    .backend
                    .create_device(player)
                    .map_err(|source| PadBridgeError::DeviceBackendUnavailable { player, source })?;

                info!("Created virtual gamepad for {}", player);
                Ok(entry.insert(VirtualGamepad::new(player, device)))
            }
        }
    }

    /// Applies one mutation to a player's controller and commits it.
    ///
    /// The device is created if needed. Exactly one commit follows the
    /// mutation. If the commit fails the entry is dropped, since its OS device
    /// is no longer usable; other players are untouched.
    ///
    /// # Errors
    ///
    /// Any error from [`get_or_create`](Self::get_or_create) or from the commit.
    pub fn apply<F>(&mut self, player: PlayerId, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut VirtualGamepad<B::Device>),
    {
        let pad = self.get_or_create(player)?;
        mutate(pad);

        let committed = pad.commit();
        if let Err(err) = committed {
            self.devices.remove(&player);
            error!("Dropped virtual gamepad for {}: {}", player, err);
            return Err(err);
        }
        Ok(())
    }

    /// Neutralizes and destroys a player's controller.
    ///
    /// Returns `Ok(false)` for unknown players; that is not an error and no
    /// device is created.
    ///
    /// # Errors
    ///
    /// Returns `DeviceBackendUnavailable` if the neutral report could not be
    /// committed. The entry is dropped either way.
    pub fn remove(&mut self, player: PlayerId) -> Result<bool> {
        let Some(mut pad) = self.devices.remove(&player) else {
            return Ok(false);
        };

        pad.reset_to_neutral();
        pad.commit()?;
        info!("Removed virtual gamepad for {}", player);
        Ok(true)
    }

    /// Removes every controller, continuing past individual failures.
    ///
    /// Returns the number of devices that were neutralized cleanly.
    pub fn drain(&mut self) -> usize {
        let mut released = 0;
        for player in self.player_ids() {
            match self.remove(player) {
                Ok(_) => released += 1,
                Err(err) => warn!("Could not neutralize {} during shutdown: {}", player, err),
            }
        }
        released
    }
}

impl<B: DeviceBackend> Drop for DevicePool<B> {
    fn drop(&mut self) {
        if !self.devices.is_empty() {
            let released = self.drain();
            info!("Released {} virtual gamepad(s) on pool drop", released);
        }
    }
}
