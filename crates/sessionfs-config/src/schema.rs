//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Session store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory holding one file per session.
    #[serde(default = "default_save_path")]
    pub save_path: PathBuf,

    /// Session lifetime in seconds, handed to the store as-is.
    #[serde(default = "default_lifetime")]
    pub lifetime: u64,

    /// Max lifetime used by `gc` when none is given on the command line.
    #[serde(default = "default_lifetime")]
    pub gc_max_lifetime: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            save_path: default_save_path(),
            lifetime: default_lifetime(),
            gc_max_lifetime: default_lifetime(),
        }
    }
}

fn default_save_path() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".sessionfs").join("sessions"))
        .unwrap_or_else(|| PathBuf::from("/tmp/sessionfs/sessions"))
}

fn default_lifetime() -> u64 {
    1440
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `sessionfs_store=debug`.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for daily-rotated log files. Console only when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
