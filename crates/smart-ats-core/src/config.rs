use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::mode::AnalysisMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmartAtsConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout. Unset means the transport default applies.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,

    /// Value of an authenticated session cookie (`session=...`), if the user
    /// logged in through a browser and wants to reuse that session.
    #[serde(default)]
    pub session_cookie: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExportConfig {
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_transition_delay")]
    pub transition_delay_ms: u64,

    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,

    #[serde(default = "default_mode")]
    pub default_mode: AnalysisMode,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}
fn default_transition_delay() -> u64 {
    50
}
fn default_tick_rate() -> u64 {
    100
}
fn default_mode() -> AnalysisMode {
    AnalysisMode::Ats
}

impl Default for SmartAtsConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            export: ExportConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
            session_cookie: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            transition_delay_ms: default_transition_delay(),
            tick_rate_ms: default_tick_rate(),
            default_mode: default_mode(),
        }
    }
}

impl ExportConfig {
    /// Directory exported reports are written to: the configured directory,
    /// else the user's download directory, else the working directory.
    pub fn resolved_download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl SmartAtsConfig {
    /// Load config from ~/.config/smart-ats/config.toml, creating defaults if missing.
    pub fn load() -> crate::error::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(|e| {
                crate::error::SmartAtsError::Config(format!("Failed to read config: {e}"))
            })?;
            Self::from_toml(&contents)
        } else {
            let config = SmartAtsConfig::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Parse a config document. Missing tables and keys take their defaults.
    pub fn from_toml(contents: &str) -> crate::error::Result<Self> {
        toml::from_str(contents).map_err(|e| {
            crate::error::SmartAtsError::Config(format!("Failed to parse config: {e}"))
        })
    }

    /// Save config to disk.
    pub fn save(&self) -> crate::error::Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self).map_err(|e| {
            crate::error::SmartAtsError::Config(format!("Failed to serialize config: {e}"))
        })?;
        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    /// Get the config file path.
    pub fn config_path() -> crate::error::Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            crate::error::SmartAtsError::Config("Could not determine config directory".into())
        })?;
        Ok(config_dir.join("smart-ats").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = SmartAtsConfig::from_toml("").unwrap();
        assert_eq!(config.server.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.server.timeout_seconds, None);
        assert_eq!(config.ui.transition_delay_ms, 50);
        assert_eq!(config.ui.default_mode, AnalysisMode::Ats);
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config = SmartAtsConfig::from_toml(
            r#"
            [server]
            base_url = "https://ats.example.com"
            timeout_seconds = 30

            [ui]
            default_mode = "basic"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.base_url, "https://ats.example.com");
        assert_eq!(config.server.timeout_seconds, Some(30));
        assert_eq!(config.ui.default_mode, AnalysisMode::Basic);
        assert_eq!(config.ui.tick_rate_ms, 100);
        assert!(config.export.download_dir.is_none());
    }

    #[test]
    fn invalid_document_is_a_config_error() {
        let err = SmartAtsConfig::from_toml("[server\nbase_url = 1").unwrap_err();
        assert!(matches!(err, crate::error::SmartAtsError::Config(_)));
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = SmartAtsConfig::default();
        config.export.download_dir = Some(PathBuf::from("/tmp/reports"));
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = SmartAtsConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.export.resolved_download_dir(), PathBuf::from("/tmp/reports"));
    }
}
