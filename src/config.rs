//! Client configuration.
//!
//! Values come from an optional YAML file and are then overridden by
//! environment variables. Nothing about the service location is hardcoded
//! into the store itself.

use crate::model::Limits;
use crate::store::ReconcilePolicy;
use camino::{Utf8Path, Utf8PathBuf};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{env, fmt::Display, str::FromStr, time::Duration};
use thiserror::Error;
use tracing::{info, warn};

pub const BASE_URL_VAR: &str = "RECIPES_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "RECIPES_API_TIMEOUT_SECS";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Yaml {
        path: Utf8PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(reqwest::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root URL of the recipe service.
    pub base_url: String,
    /// Per-request timeout, covering connect through the end of the body.
    pub timeout_secs: u64,
    pub policy: ReconcilePolicy,
    pub limits: Limits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            policy: ReconcilePolicy::default(),
            limits: Limits::default(),
        }
    }
}

impl Config {
    /// Defaults overridden by the process environment.
    pub fn load() -> Self {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    /// Reads a YAML config file. Missing keys take their defaults.
    pub fn from_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies environment overrides, looking variables up through `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(BASE_URL_VAR) {
            Some(url) => self.base_url = url,
            None => info!("{BASE_URL_VAR} not set, using {}", self.base_url),
        }
        if let Some(timeout) = try_parse::<u64>(TIMEOUT_VAR, lookup(TIMEOUT_VAR)) {
            self.timeout_secs = timeout;
        }
        self
    }

    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }
        Ok(url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn try_parse<T: FromStr>(key: &str, value: Option<String>) -> Option<T>
where
    T::Err: Display,
{
    let value = value?;
    value
        .trim()
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value {value:?}: {e}, ignoring");
        })
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.policy, ReconcilePolicy::Reload);
        assert_eq!(config.limits.max_ingredients, 20);
        assert_eq!(config.limits.max_steps, 15);
        assert_eq!(config.limits.max_recipes, 100);
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::default().with_overrides(lookup(&[
            (BASE_URL_VAR, "https://recipes.example.com"),
            (TIMEOUT_VAR, " 5 "),
        ]));
        assert_eq!(config.base_url, "https://recipes.example.com");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_timeout_is_ignored() {
        let config = Config::default().with_overrides(lookup(&[(TIMEOUT_VAR, "soon")]));
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp_dir.path().join("catalog.yaml")).unwrap();
        fs::write(
            &path,
            indoc! {r#"
                base_url: http://api.internal:9000/v1
                timeout_secs: 10
                policy: apply-response
                limits:
                  max_recipes: 5
            "#},
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.base_url, "http://api.internal:9000/v1");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.policy, ReconcilePolicy::ApplyResponse);
        assert_eq!(config.limits.max_recipes, 5);
        assert_eq!(config.limits.max_ingredients, 20);
    }

    #[test]
    fn test_from_missing_file() {
        let result = Config::from_file(Utf8Path::new("/nonexistent/catalog.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_from_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp_dir.path().join("catalog.yaml")).unwrap();
        fs::write(&path, "timeout_secs: [not, a, number]").unwrap();

        let result = Config::from_file(&path);
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn test_parsed_base_url() {
        let config = Config::default();
        assert_eq!(
            config.parsed_base_url().unwrap().as_str(),
            "http://localhost:8000/"
        );

        let bad = Config {
            base_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            bad.parsed_base_url(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }
}
