//! Session configuration loaded from JSON.
//!
//! Every field is optional in the file; missing fields fall back to the
//! built-in session (Henrik with an AK-47 against the Giant Boss at 60 fps).

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const PLAYER_BASE_HEALTH: u32 = 250;
pub const BOSS_HEALTH: u32 = 450;
pub const DEFAULT_TARGET_FPS: u32 = 60;
const MAX_TARGET_FPS: u32 = 240;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("config validation failed: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    #[serde(default = "default_player_name")]
    pub player_name: String,
    #[serde(default = "default_player_health")]
    pub player_max_health: u32,
    #[serde(default = "default_starting_weapon")]
    pub starting_weapon: String,
    #[serde(default = "default_boss_name")]
    pub boss_name: String,
    #[serde(default = "default_boss_health")]
    pub boss_max_health: u32,
    #[serde(default = "default_target_fps")]
    pub target_fps: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            player_name: default_player_name(),
            player_max_health: PLAYER_BASE_HEALTH,
            starting_weapon: default_starting_weapon(),
            boss_name: default_boss_name(),
            boss_max_health: BOSS_HEALTH,
            target_fps: DEFAULT_TARGET_FPS,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_name.trim().is_empty() {
            return Err(ConfigError::Invalid("player_name is empty".to_string()));
        }
        if self.boss_name.trim().is_empty() {
            return Err(ConfigError::Invalid("boss_name is empty".to_string()));
        }
        if self.player_max_health == 0 {
            return Err(ConfigError::Invalid(
                "player_max_health must be > 0".to_string(),
            ));
        }
        if self.boss_max_health == 0 {
            return Err(ConfigError::Invalid(
                "boss_max_health must be > 0".to_string(),
            ));
        }
        if self.starting_weapon.is_empty() {
            return Err(ConfigError::Invalid(
                "starting_weapon is empty".to_string(),
            ));
        }
        if self.target_fps == 0 || self.target_fps > MAX_TARGET_FPS {
            return Err(ConfigError::Invalid(format!(
                "target_fps must be in 1..={MAX_TARGET_FPS}, got {}",
                self.target_fps
            )));
        }
        Ok(())
    }
}

pub fn parse_session_config(raw: &str) -> Result<SessionConfig, serde_json::Error> {
    serde_json::from_str(raw)
}

pub fn load_session_config(path: &Path) -> Result<SessionConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_session_config(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

/// Load `path` if it exists, otherwise use the built-in session. A file that
/// exists but does not load is still an error.
pub fn load_session_config_or_default(path: &Path) -> Result<SessionConfig, ConfigError> {
    if path.exists() {
        let config = load_session_config(path)?;
        log::info!("Session config loaded from {}", path.display());
        Ok(config)
    } else {
        log::warn!(
            "Session config '{}' not found, using built-in defaults",
            path.display()
        );
        Ok(SessionConfig::default())
    }
}

fn default_player_name() -> String {
    "Henrik".to_string()
}

fn default_boss_name() -> String {
    "Giant Boss".to_string()
}

fn default_starting_weapon() -> String {
    "ak47".to_string()
}

const fn default_player_health() -> u32 {
    PLAYER_BASE_HEALTH
}

const fn default_boss_health() -> u32 {
    BOSS_HEALTH
}

const fn default_target_fps() -> u32 {
    DEFAULT_TARGET_FPS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "fia_config_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn empty_object_yields_defaults() {
        let config = parse_session_config("{}").expect("should parse");
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.player_max_health, 250);
        assert_eq!(config.boss_max_health, 450);
        assert_eq!(config.starting_weapon, "ak47");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config =
            parse_session_config(r#"{ "starting_weapon": "thunder", "target_fps": 30 }"#)
                .expect("should parse");
        assert_eq!(config.starting_weapon, "thunder");
        assert_eq!(config.target_fps, 30);
        assert_eq!(config.player_name, "Henrik");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(parse_session_config(r#"{ "player_hp": 10 }"#).is_err());
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = SessionConfig {
            target_fps: 0,
            ..SessionConfig::default()
        };
        let err = config.validate().expect_err("zero fps should fail");
        assert!(err.to_string().contains("target_fps"));

        config.target_fps = 60;
        config.boss_max_health = 0;
        assert!(config.validate().is_err());

        config.boss_max_health = 450;
        config.player_name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_from_disk_validates() {
        let path = temp_file_path("invalid");
        fs::write(&path, r#"{ "player_max_health": 0 }"#).expect("write temp file");
        let err = load_session_config(&path).expect_err("zero health should fail");
        assert!(matches!(err, ConfigError::Invalid(_)));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let path = temp_file_path("garbage");
        fs::write(&path, "not json").expect("write temp file");
        let err = load_session_config(&path).expect_err("garbage should fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("fia_config_test_garbage"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = temp_file_path("missing");
        let config = load_session_config_or_default(&path).expect("defaults");
        assert_eq!(config, SessionConfig::default());
    }
}
