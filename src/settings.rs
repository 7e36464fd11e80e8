use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{GrocerError, Result};

pub const DATA_DIR_ENV: &str = "GROCER_DATA_DIR";
pub const DB_FILE: &str = "grocer.db";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub data_dir: String,
    /// Requester ids allowed to use the tracker. Empty means no restriction.
    #[serde(default)]
    pub allowed_users: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir().to_string_lossy().to_string(),
            allowed_users: Vec::new(),
        }
    }
}

impl Settings {
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(DB_FILE)
    }

    /// Returns false if the user was already allowed.
    pub fn allow_user(&mut self, id: &str) -> bool {
        let id = id.trim();
        if id.is_empty() || self.allowed_users.iter().any(|u| u == id) {
            return false;
        }
        self.allowed_users.push(id.to_string());
        true
    }

    /// Returns false if the user was not on the list.
    pub fn deny_user(&mut self, id: &str) -> bool {
        let before = self.allowed_users.len();
        self.allowed_users.retain(|u| u != id.trim());
        self.allowed_users.len() != before
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("grocer")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("grocer")
}

/// Settings exactly as stored in `settings.json`. Unreadable files fall back
/// to defaults.
pub fn load_stored_settings() -> Settings {
    let path = settings_path();
    if !path.exists() {
        return Settings::default();
    }
    let content = std::fs::read_to_string(&path).unwrap_or_default();
    serde_json::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
        Settings::default()
    })
}

/// Stored settings with `GROCER_DATA_DIR` taking precedence over the data
/// directory.
pub fn load_settings() -> Settings {
    let mut settings = load_stored_settings();
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            settings.data_dir = dir;
        }
    }
    settings
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| GrocerError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn get_db_path() -> PathBuf {
    load_settings().db_path()
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_roundtrip() {
        let settings = Settings {
            data_dir: "/tmp/grocer".to_string(),
            allowed_users: vec!["111".to_string()],
        };
        let json = serde_json::to_string_pretty(&settings).unwrap();
        let loaded: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_allow_list_defaults_to_empty() {
        let s: Settings = serde_json::from_str(r#"{"data_dir": "/tmp/grocer"}"#).unwrap();
        assert!(s.allowed_users.is_empty());
        assert_eq!(s.db_path(), PathBuf::from("/tmp/grocer").join("grocer.db"));
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert!(s.allowed_users.is_empty());
        assert!(s.data_dir.ends_with("grocer"));
    }

    #[test]
    fn test_allow_and_deny_user() {
        let mut s = Settings::default();
        assert!(s.allow_user("111"));
        assert!(!s.allow_user(" 111 "));
        assert!(!s.allow_user(""));
        assert_eq!(s.allowed_users, vec!["111"]);
        assert!(s.deny_user("111"));
        assert!(!s.deny_user("111"));
        assert!(s.allowed_users.is_empty());
    }
}
