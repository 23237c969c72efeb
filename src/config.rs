//! Runtime configuration.
//!
//! Layered: built-in defaults, then an optional TOML file, then environment
//! variables.

use crate::error::{CardError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read from the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "gitcard.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_theme: String,
    pub github: GithubConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub user_agent: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
    /// `Cache-Control` value sent with fetched cards
    pub cache_control: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_theme: crate::svg::theme::DEFAULT_THEME_ID.to_string(),
            github: GithubConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com/graphql".to_string(),
            token: None,
            user_agent: concat!("gitcard/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
            cache_control: "s-maxage=3600, stale-while-revalidate".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CardError::Config(e.to_string()))
    }

    /// Load configuration. An explicit `path` must exist; the default file
    /// is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::read_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::read_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "reading config");
        let content = fs::read_to_string(path)
            .map_err(|e| CardError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Override fields from `GITHUB_TOKEN`, `GITCARD_ADDR` and `GITCARD_THEME`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(token) = non_empty("GITHUB_TOKEN") {
            self.github.token = Some(token);
        }
        if let Some(addr) = non_empty("GITCARD_ADDR") {
            self.server.addr = addr;
        }
        if let Some(theme) = non_empty("GITCARD_THEME") {
            self.default_theme = theme;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            default_theme = "dark"

            [server]
            addr = "0.0.0.0:8080"
            "#,
        )
        .unwrap();
        assert_eq!(config.default_theme, "dark");
        assert_eq!(config.server.addr, "0.0.0.0:8080");
        assert_eq!(config.server.cache_control, ServerConfig::default().cache_control);
        assert_eq!(config.github, GithubConfig::default());
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let err = Config::from_toml_str("default_theme = [").unwrap_err();
        assert!(matches!(err, CardError::Config(_)));
    }

    #[test]
    fn environment_overrides_file() {
        let env: HashMap<&str, &str> = [("GITHUB_TOKEN", "ghp_x"), ("GITCARD_ADDR", " ")]
            .into_iter()
            .collect();
        let mut config = Config::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.github.token.as_deref(), Some("ghp_x"));
        // blank values are ignored
        assert_eq!(config.server.addr, ServerConfig::default().addr);
    }
}
