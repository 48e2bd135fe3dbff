//! Session configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_STORAGE_KEY: &str = "user";
pub const DEFAULT_LATENCY_MS: u64 = 1000;
pub const DEFAULT_AVATAR_BASE_URL: &str = "https://api.dicebear.com/7.x/initials/svg";
pub const DEFAULT_DISPLAY_NAME: &str = "John Doe";
const STORAGE_DIR: &str = "signbridge";
const STORAGE_FILE: &str = "local_storage.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Storage key the signed-in user is persisted under.
    pub storage_key: String,
    /// Backing file for `FileStore`.
    pub storage_path: PathBuf,
    /// Simulated verification delay for `login`/`signup`.
    pub latency: Duration,
    pub avatar_base_url: String,
    /// Display name given to users created by `login`.
    pub default_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            storage_path: default_storage_path(),
            latency: Duration::from_millis(DEFAULT_LATENCY_MS),
            avatar_base_url: DEFAULT_AVATAR_BASE_URL.to_owned(),
            default_name: DEFAULT_DISPLAY_NAME.to_owned(),
        }
    }
}

impl SessionConfig {
    /// Build typed session config from environment variables.
    ///
    /// Optional:
    /// - `SIGNBRIDGE_STORAGE_KEY`: default `user`
    /// - `SIGNBRIDGE_STORAGE_PATH`: default `<local data dir>/signbridge/local_storage.json`
    /// - `SIGNBRIDGE_LATENCY_MS`: default 1000
    /// - `SIGNBRIDGE_AVATAR_BASE_URL`: default DiceBear initials endpoint
    /// - `SIGNBRIDGE_DEFAULT_NAME`: default `John Doe`
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let latency_ms = env_parse_u64("SIGNBRIDGE_LATENCY_MS", DEFAULT_LATENCY_MS)?;

        Ok(Self {
            storage_key: env_non_empty("SIGNBRIDGE_STORAGE_KEY").unwrap_or(defaults.storage_key),
            storage_path: env_non_empty("SIGNBRIDGE_STORAGE_PATH").map_or(defaults.storage_path, PathBuf::from),
            latency: Duration::from_millis(latency_ms),
            avatar_base_url: env_non_empty("SIGNBRIDGE_AVATAR_BASE_URL")
                .map_or(defaults.avatar_base_url, |v| v.trim_end_matches('/').to_owned()),
            default_name: env_non_empty("SIGNBRIDGE_DEFAULT_NAME").unwrap_or(defaults.default_name),
        })
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse_u64(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env_non_empty(key) {
        Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid { var: key, value: raw }),
        None => Ok(default),
    }
}

fn default_storage_path() -> PathBuf {
    dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")).join(STORAGE_DIR).join(STORAGE_FILE)
}
