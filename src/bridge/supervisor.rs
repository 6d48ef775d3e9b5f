//! # Lifecycle Supervisor
//!
//! Drives the read loop and guarantees cleanup on every exit path.
//!
//! ## States
//!
//! ```text
//! Running ──(end of stream | shutdown signal | read failure)──> Draining ──> Stopped
//! ```
//!
//! - **Running**: one line at a time, in arrival order. Each line is handled to
//!   completion (mutation + commit) before the next one is received.
//! - **Draining**: every live device is neutralized and destroyed. A failure on
//!   one device is logged and the rest are still drained.
//! - **Stopped**: terminal.
//!
//! Per-command errors never leave `Running`.

use std::fmt;
use std::future::Future;
use tracing::{error, info, warn};

use super::dispatcher::dispatch_line;
use super::input::LineReceiver;
use crate::backend::DeviceBackend;
use crate::device::DevicePool;
use crate::error::PadBridgeError;

/// Supervisor state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Running,
    Draining,
    Stopped,
}

/// Why the read loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EndOfStream,
    Interrupted,
    ReadFailure,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::EndOfStream => f.write_str("end of input"),
            StopReason::Interrupted => f.write_str("interrupted"),
            StopReason::ReadFailure => f.write_str("read failure"),
        }
    }
}

/// Counters for one session, reported at exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub reason: StopReason,
    pub commands_applied: u64,
    pub commands_rejected: u64,
    pub devices_released: usize,
}

/// Owns the device pool for the lifetime of the session.
pub struct Supervisor<B: DeviceBackend> {
    pool: DevicePool<B>,
    state: LifecycleState,
    applied: u64,
    rejected: u64,
}

impl<B: DeviceBackend> Supervisor<B> {
    pub fn new(pool: DevicePool<B>) -> Self {
        Self {
            pool,
            state: LifecycleState::Running,
            applied: 0,
            rejected: 0,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn pool(&self) -> &DevicePool<B> {
        &self.pool
    }

    /// Runs the session until the stream ends, fails, or `shutdown` completes,
    /// then drains the pool.
    ///
    /// # Arguments
    ///
    /// * `inbound` - Lines from [`spawn_line_reader`](super::input::spawn_line_reader)
    /// * `shutdown` - Resolves when the process should stop
    ///
    /// # Returns
    ///
    /// Summary of the session. Cleanup has always run by the time this returns.
    pub async fn run<F>(&mut self, mut inbound: LineReceiver, shutdown: F) -> SessionSummary
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        self.state = LifecycleState::Running;
        info!("Waiting for commands...");

        let reason = loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => {
                    info!("Shutting down...");
                    break StopReason::Interrupted;
                }

                next = inbound.recv() => match next {
                    Some(Ok(line)) => self.handle_line(&line),
                    Some(Err(e)) => {
                        error!("{}", PadBridgeError::StreamReadFailure(e));
                        break StopReason::ReadFailure;
                    }
                    None => {
                        info!("Command stream closed");
                        break StopReason::EndOfStream;
                    }
                },
            }
        };

        let devices_released = self.drain();

        SessionSummary {
            reason,
            commands_applied: self.applied,
            commands_rejected: self.rejected,
            devices_released,
        }
    }

    /// Handles one inbound line. Errors are logged and counted, never raised.
    pub fn handle_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        match dispatch_line(&mut self.pool, line) {
            Ok(_) => self.applied += 1,
            Err(err) => {
                self.rejected += 1;
                match err {
                    PadBridgeError::DeviceBackendUnavailable { .. } => error!("{}", err),
                    PadBridgeError::MalformedCommand(_) => warn!("{} (line: {})", err, line),
                    _ => warn!("{}", err),
                }
            }
        }
    }

    fn drain(&mut self) -> usize {
        self.state = LifecycleState::Draining;
        let live = self.pool.len();
        info!("Releasing {} virtual gamepad(s)", live);

        let released = self.pool.drain();

        self.state = LifecycleState::Stopped;
        info!("Cleanup complete");
        released
    }
}
