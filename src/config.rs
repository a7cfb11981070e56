use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

const DEFAULT_ATTEMPT_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    pub listen: String,

    #[serde(rename = "http_path")]
    pub path: String,

    #[serde(default = "default_attempt_timeout_ms")]
    pub attempt_timeout_ms: u64,

    #[serde(default)]
    pub drain_stragglers: bool,
}

fn default_attempt_timeout_ms() -> u64 {
    DEFAULT_ATTEMPT_TIMEOUT_MS
}

impl ServerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let mut config: ServerConfig = toml::from_str(raw)?;
        if config.path.trim().is_empty() {
            return Err(ConfigError::EmptyPath);
        }
        config.path = clean_path(&config.path);
        Ok(config)
    }

    /// `None` when attempts may hang for as long as the target keeps them open.
    pub fn attempt_timeout(&self) -> Option<Duration> {
        match self.attempt_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

/// Lexically normalises a route path: rooted, no empty or `.` segments,
/// `..` resolved against its parent, no trailing slash.
pub fn clean_path(raw: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in raw.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    format!("/{}", segments.join("/"))
}
