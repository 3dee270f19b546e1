//! Front-end configuration.
//!
//! Holds the last username entered at the login prompt and an optional idle
//! timeout override. Session state is never written here.
//!
//! Configuration is stored at `~/.config/portalgate/config.json`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::session::IDLE_TIMEOUT;

/// Application name used for the config directory path
const APP_NAME: &str = "portalgate";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Longest idle timeout a config file may ask for (one week)
const MAX_IDLE_TIMEOUT_MINUTES: i64 = 7 * 24 * 60;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub last_username: Option<String>,
    pub idle_timeout_minutes: Option<i64>,
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Configured idle timeout, falling back to 30 minutes when unset or not
    /// positive and capped at one week
    pub fn idle_timeout(&self) -> Duration {
        match self.idle_timeout_minutes {
            Some(minutes) if minutes > 0 => {
                let minutes = minutes.min(MAX_IDLE_TIMEOUT_MINUTES) as u64;
                Duration::from_secs(minutes * 60)
            }
            _ => IDLE_TIMEOUT,
        }
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("portalgate-test-{}-{}", std::process::id(), name))
            .join(CONFIG_FILE)
    }

    #[test]
    fn test_idle_timeout_default() {
        assert_eq!(Config::default().idle_timeout(), IDLE_TIMEOUT);
        let config = Config {
            idle_timeout_minutes: Some(0),
            ..Default::default()
        };
        assert_eq!(config.idle_timeout(), IDLE_TIMEOUT);
        let config = Config {
            idle_timeout_minutes: Some(5),
            ..Default::default()
        };
        assert_eq!(config.idle_timeout(), Duration::from_secs(300));
    }

    #[test]
    fn test_idle_timeout_is_capped() {
        let week = Duration::from_secs(7 * 24 * 60 * 60);
        for minutes in [i64::MAX, 200_000_000_000_000, MAX_IDLE_TIMEOUT_MINUTES + 1] {
            let config = Config {
                idle_timeout_minutes: Some(minutes),
                ..Default::default()
            };
            assert_eq!(config.idle_timeout(), week);
        }
    }

    #[test]
    fn test_huge_idle_timeout_keeps_sessions_valid() {
        use crate::auth::CredentialStore;
        use crate::session::{ManualClock, MemoryStore, SessionManager};

        let config = Config {
            idle_timeout_minutes: Some(200_000_000_000_000),
            ..Default::default()
        };
        let mut manager = SessionManager::new(MemoryStore::new(), ManualClock::new(0))
            .with_idle_timeout(config.idle_timeout());
        let user = CredentialStore::builtin()
            .find("drdo-admin", "secure@123")
            .cloned()
            .unwrap();
        manager.create(&user);
        assert!(manager.is_valid());
    }

    #[test]
    fn test_missing_file_loads_default() {
        let path = scratch_path("missing");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let path = scratch_path("roundtrip");
        let config = Config {
            last_username: Some("drdo-hr".to_string()),
            idle_timeout_minutes: None,
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = scratch_path("corrupt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();
        assert!(Config::load_from(&path).is_err());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
