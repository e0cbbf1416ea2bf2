//! Configuration management for marquee
//!
//! Handles config file loading/saving, API key resolution and pipeline
//! tunables. Config is stored at ~/.config/marquee/config.toml

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::pipeline::search::DEFAULT_DEBOUNCE;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// TMDB API key (bearer token)
    pub tmdb_api_key: Option<String>,
    /// Search debounce window in milliseconds
    pub search_debounce_ms: Option<u64>,
}

impl Config {
    /// Get config file path (~/.config/marquee/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("marquee").join("config.toml"))
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Self {
        Self::path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::path().ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    /// Resolve the TMDB API key: environment variable `TMDB_API_KEY` wins
    /// over the config file.
    pub fn tmdb_api_key(&self) -> Option<String> {
        std::env::var("TMDB_API_KEY")
            .ok()
            .or_else(|| self.tmdb_api_key.clone())
    }

    /// The debounce window for the search pipeline.
    pub fn debounce_window(&self) -> Duration {
        self.search_debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.tmdb_api_key.is_none());
        assert_eq!(config.debounce_window(), DEFAULT_DEBOUNCE);
    }

    #[test]
    fn test_debounce_override() {
        let config = Config {
            search_debounce_ms: Some(150),
            ..Config::default()
        };
        assert_eq!(config.debounce_window(), Duration::from_millis(150));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config {
            tmdb_api_key: Some("abc123".into()),
            search_debounce_ms: Some(250),
        };
        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.tmdb_api_key.as_deref(), Some("abc123"));
        assert_eq!(parsed.search_debounce_ms, Some(250));
    }
}
