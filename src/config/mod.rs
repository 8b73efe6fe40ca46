use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::date::{DEFAULT_UTC_OFFSET_HOURS, offset_from_hours};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Overrides the configuration file location.
pub const CONFIG_ENV: &str = "CAMPUSCTL_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_base_url: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// Hours east of UTC used to read legacy backend timestamps.
    #[serde(default = "default_offset_hours")]
    pub utc_offset_hours: i32,
    #[serde(default = "default_session_file")]
    pub session_file: String,
    #[serde(default)]
    pub storage_url: String,
    #[serde(default = "default_bucket")]
    pub storage_bucket: String,
    #[serde(default)]
    pub storage_anon_key: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_url() -> String {
    "http://localhost:8080/api".to_string()
}
fn default_timeout() -> u64 {
    15
}
fn default_offset_hours() -> i32 {
    DEFAULT_UTC_OFFSET_HOURS
}
fn default_session_file() -> String {
    Config::config_dir()
        .join("session.json")
        .to_string_lossy()
        .to_string()
}
fn default_bucket() -> String {
    "event-images".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_url(),
            request_timeout_secs: default_timeout(),
            utc_offset_hours: default_offset_hours(),
            session_file: default_session_file(),
            storage_url: String::new(),
            storage_bucket: default_bucket(),
            storage_anon_key: String::new(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".campusctl")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        match env::var(CONFIG_ENV) {
            Ok(p) if !p.trim().is_empty() => PathBuf::from(p),
            _ => Self::config_dir().join("campusctl.conf"),
        }
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    /// Write the default configuration. An existing file is kept unless
    /// `force` is set.
    pub fn init(force: bool) -> AppResult<PathBuf> {
        let path = Self::config_file();
        if path.exists() && !force {
            return Err(AppError::Config(format!(
                "configuration already exists at {} (use --force to overwrite)",
                path.display()
            )));
        }

        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }

        let yaml = serde_yaml::to_string(&Self::default()).map_err(|_| AppError::ConfigSave)?;
        fs::write(&path, yaml).map_err(|_| AppError::ConfigSave)?;
        success(format!("Config file: {}", path.display()));
        Ok(path)
    }

    /// Fixed offset used to interpret backend dates.
    pub fn offset(&self) -> AppResult<FixedOffset> {
        offset_from_hours(self.utc_offset_hours).ok_or_else(|| {
            AppError::Config(format!(
                "utc_offset_hours out of range: {}",
                self.utc_offset_hours
            ))
        })
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_uses_defaults() {
        let cfg: Config = serde_yaml::from_str("api_base_url: http://example.org/api\n").unwrap();
        assert_eq!(cfg.api_base_url, "http://example.org/api");
        assert_eq!(cfg.request_timeout_secs, 15);
        assert_eq!(cfg.utc_offset_hours, -5);
        assert_eq!(cfg.storage_bucket, "event-images");
        assert_eq!(cfg.offset().unwrap().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn missing_api_url_uses_default() {
        let cfg: Config = serde_yaml::from_str("utc_offset_hours: -3\n").unwrap();
        assert_eq!(cfg.api_base_url, "http://localhost:8080/api");
        assert_eq!(cfg.utc_offset_hours, -3);
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        let cfg = Config {
            utc_offset_hours: 30,
            ..Config::default()
        };
        assert!(matches!(cfg.offset(), Err(AppError::Config(_))));
    }
}
