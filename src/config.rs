use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_REQUEST_DELAY_MS, DEFAULT_SYMBOLS, DEFAULT_TIMEOUT_SECS,
    SYMBOLS_ENV,
};

const CONFIG_FILE: &str = "config.yaml";

/// Runtime configuration, read from `~/.stockdash/config.yaml` and the environment
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub symbols: Vec<String>,
    pub request_delay_ms: u64,
    pub timeout_secs: u64,
    /// Provider key. Usually supplied through the environment rather than the file.
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: String::from(DEFAULT_BASE_URL),
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            request_delay_ms: DEFAULT_REQUEST_DELAY_MS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            api_key: None,
        }
    }
}

impl Config {
    /// Load from the default location, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_dir(&config_dir())?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load `config.yaml` from `dir`, falling back to defaults when it is absent
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Apply overrides using `lookup` to read variables
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key.trim().to_string());
        }

        if let Some(raw) = lookup(SYMBOLS_ENV) {
            let symbols = parse_symbols(&raw);
            if !symbols.is_empty() {
                self.symbols = symbols;
            }
        }
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `~/.stockdash`, or `./.stockdash` when there is no home directory
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".stockdash")
}

fn parse_symbols(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_when_file_missing() {
        let dir = tempdir().unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.symbols.len(), 5);
        assert_eq!(config.request_delay(), Duration::from_millis(200));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("config.yaml"),
            "symbols: [NVDA, AMD]\nrequest_delay_ms: 50\n",
        )
        .unwrap();

        let config = Config::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.symbols, vec!["NVDA", "AMD"]);
        assert_eq!(config.request_delay_ms, 50);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("config.yaml"), "symbols: {{{").unwrap();
        assert!(Config::load_from_dir(dir.path()).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (API_KEY_ENV, " demo-key "),
            (SYMBOLS_ENV, "ibm, , nflx"),
        ]);
        let mut config = Config::default();
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.api_key.as_deref(), Some("demo-key"));
        assert_eq!(config.symbols, vec!["IBM", "NFLX"]);
    }

    #[test]
    fn test_blank_env_key_is_ignored() {
        let mut config = Config::default();
        config.api_key = Some("from-file".into());
        config.apply_env(|k| (k == API_KEY_ENV).then(|| "   ".to_string()));
        assert_eq!(config.api_key.as_deref(), Some("from-file"));
    }
}
