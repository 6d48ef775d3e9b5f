//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! Every section and key is optional; a missing file section falls back to the
//! built-in defaults.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::device::pool::DEFAULT_MAX_PLAYERS;
use crate::error::{PadBridgeError, Result};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "PAD_BRIDGE_CONFIG";

/// Longest accepted device name. uinput allows 80 bytes including the
/// " (Player N)" suffix and the trailing NUL.
const MAX_DEVICE_NAME_LEN: usize = 60;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Identity of the virtual controllers shown to the OS
#[derive(Debug, Deserialize, Clone)]
pub struct DeviceConfig {
    #[serde(default = "default_device_name")]
    pub name: String,

    #[serde(default = "default_vendor_id")]
    pub vendor_id: u16,

    #[serde(default = "default_product_id")]
    pub product_id: u16,

    #[serde(default = "default_version")]
    pub version: u16,
}

/// Command handling limits
#[derive(Debug, Deserialize, Clone)]
pub struct BridgeConfig {
    #[serde(default = "default_max_players")]
    pub max_players: usize,

    #[serde(default = "default_inbound_queue_depth")]
    pub inbound_queue_depth: usize,
}

/// Diagnostic output settings
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub ansi: bool,
}

// Default value functions
fn default_device_name() -> String { "Pad Bridge Virtual Gamepad".to_string() }
fn default_vendor_id() -> u16 { 0x045e }
fn default_product_id() -> u16 { 0x028e }
fn default_version() -> u16 { 0x0110 }

fn default_max_players() -> usize { DEFAULT_MAX_PLAYERS }
fn default_inbound_queue_depth() -> usize { 64 }

fn default_log_level() -> String { "info".to_string() }

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: default_device_name(),
            vendor_id: default_vendor_id(),
            product_id: default_product_id(),
            version: default_version(),
        }
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            max_players: default_max_players(),
            inbound_queue_depth: default_inbound_queue_depth(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            ansi: false,
        }
    }
}

fn invalid(message: &str) -> PadBridgeError {
    PadBridgeError::Config(toml::de::Error::custom(message))
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pad_bridge::config::Config;
    ///
    /// let config = Config::load("pad-bridge.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        let name = self.device.name.trim();
        if name.is_empty() {
            return Err(invalid("device name cannot be empty"));
        }

        if self.device.name.len() > MAX_DEVICE_NAME_LEN {
            return Err(invalid("device name must be at most 60 bytes"));
        }

        if self.device.name.contains('\0') {
            return Err(invalid("device name cannot contain NUL bytes"));
        }

        if self.bridge.max_players == 0 || self.bridge.max_players > 64 {
            return Err(invalid("max_players must be between 1 and 64"));
        }

        if self.bridge.inbound_queue_depth == 0 || self.bridge.inbound_queue_depth > 4096 {
            return Err(invalid("inbound_queue_depth must be between 1 and 4096"));
        }

        if !["trace", "debug", "info", "warn", "error"].contains(&self.logging.level.as_str()) {
            return Err(invalid("log level must be one of: trace, debug, info, warn, error"));
        }

        Ok(())
    }
}
