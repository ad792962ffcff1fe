//! Bridge configuration (mediabridge.toml)

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::intent::{actions, schemes};

/// Default configuration file name
pub const CONFIG_FILE: &str = "mediabridge.toml";

/// Top-level configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub receiver: ReceiverConfig,
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Receiver registration
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReceiverConfig {
    /// Action routed to the media-mounted handler
    #[serde(default = "default_mounted_action")]
    pub mounted_action: String,
    /// Data scheme the receiver's filter requires
    #[serde(default = "default_data_scheme")]
    pub data_scheme: String,
    /// Fully qualified name of the Java receiver shim
    #[serde(default = "default_java_class")]
    pub java_class: String,
}

fn default_mounted_action() -> String {
    actions::MEDIA_MOUNTED.to_string()
}

fn default_data_scheme() -> String {
    schemes::FILE.to_string()
}

fn default_java_class() -> String {
    "org.mediabridge.MediaBridgeReceiver".to_string()
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            mounted_action: default_mounted_action(),
            data_scheme: default_data_scheme(),
            java_class: default_java_class(),
        }
    }
}

/// Startup media wait
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct MediaConfig {
    /// How long startup waits for external storage, in milliseconds
    #[serde(default = "default_wait_timeout_ms")]
    pub wait_timeout_ms: u64,
}

fn default_wait_timeout_ms() -> u64 {
    30_000
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            wait_timeout_ms: default_wait_timeout_ms(),
        }
    }
}

impl MediaConfig {
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }
}

/// Log output
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Tag used by the platform logger
    #[serde(default = "default_tag")]
    pub tag: String,
    /// Maximum level: trace, debug, info, warn or error
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_tag() -> String {
    "mediabridge".to_string()
}

fn default_level() -> String {
    "debug".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            tag: default_tag(),
            level: default_level(),
        }
    }
}

impl BridgeConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a file, or from `mediabridge.toml` inside a directory
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE)
        } else {
            path.to_path_buf()
        };
        let content = fs::read_to_string(&config_path)?;
        tracing::debug!(path = %config_path.display(), "Loaded bridge configuration");
        Self::from_toml_str(&content)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
