use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::preferences::Theme;

pub const DEFAULT_CONFIG_PATH: &str = "config/pytutor.json";
pub const API_URL_ENV: &str = "PYTUTOR_API_URL";
pub const RESPONDER_ENV: &str = "PYTUTOR_RESPONDER";

/// Which responder answers chat messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResponderMode {
    /// Canned replies and the local code scanner
    #[default]
    Mock,
    /// The tutoring backend at `api_url`
    Remote,
}

impl FromStr for ResponderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(ResponderMode::Mock),
            "remote" => Ok(ResponderMode::Remote),
            other => Err(format!("Unknown responder mode: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub responder: ResponderMode,
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub latency_min_ms: u64,
    pub latency_max_ms: u64,
    pub data_path: String,
    pub default_theme: Theme,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            responder: ResponderMode::Mock,
            api_url: "http://localhost:8000/api".to_string(),
            request_timeout_secs: 30,
            latency_min_ms: 800,
            latency_max_ms: 2000,
            data_path: "data/pytutor.db".to_string(),
            default_theme: Theme::Dark,
        }
    }
}

impl AppConfig {
    /// Apply `PYTUTOR_*` environment variables on top of the file values.
    pub fn apply_env(&mut self) {
        self.apply_overrides(env::var(API_URL_ENV).ok(), env::var(RESPONDER_ENV).ok());
    }

    fn apply_overrides(&mut self, api_url: Option<String>, responder: Option<String>) {
        if let Some(api_url) = api_url.filter(|url| !url.trim().is_empty()) {
            self.api_url = api_url;
        }
        if let Some(raw) = responder {
            match raw.parse() {
                Ok(mode) => self.responder = mode,
                Err(err) => log::warn!("Ignoring {RESPONDER_ENV}: {err}"),
            }
        }
    }
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}

pub fn save_config(path: &str, config: &AppConfig) -> std::io::Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let config = load_config(path.to_str().unwrap());

        assert_eq!(config.responder, ResponderMode::Mock);
        assert_eq!(config.api_url, "http://localhost:8000/api");
        assert_eq!((config.latency_min_ms, config.latency_max_ms), (800, 2000));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pytutor.json");
        fs::write(&path, r#"{"responder": "remote", "default_theme": "light"}"#).unwrap();

        let config = load_config(path.to_str().unwrap());

        assert_eq!(config.responder, ResponderMode::Remote);
        assert_eq!(config.default_theme, Theme::Light);
        assert_eq!(config.data_path, "data/pytutor.db");
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pytutor.json");
        fs::write(&path, "responder = remote").unwrap();

        let config = load_config(path.to_str().unwrap());

        assert_eq!(config.responder, ResponderMode::Mock);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("pytutor.json");
        let path = path.to_str().unwrap();
        let config = AppConfig {
            api_url: "http://tutor.internal/api".to_string(),
            latency_min_ms: 0,
            ..AppConfig::default()
        };

        save_config(path, &config).unwrap();
        let loaded = load_config(path);

        assert_eq!(loaded.api_url, "http://tutor.internal/api");
        assert_eq!(loaded.latency_min_ms, 0);
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = AppConfig::default();

        config.apply_overrides(
            Some("http://10.0.0.5:8000/api".to_string()),
            Some("Remote".to_string()),
        );

        assert_eq!(config.api_url, "http://10.0.0.5:8000/api");
        assert_eq!(config.responder, ResponderMode::Remote);
    }

    #[test]
    fn invalid_overrides_are_ignored() {
        let mut config = AppConfig::default();

        config.apply_overrides(Some("  ".to_string()), Some("oracle".to_string()));

        assert_eq!(config.api_url, "http://localhost:8000/api");
        assert_eq!(config.responder, ResponderMode::Mock);
    }
}
