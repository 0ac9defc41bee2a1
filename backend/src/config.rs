//! Server configuration.
//!
//! Values come from `thinkcyber.toml` (or the file named by `THINKCYBER_CONFIG`) when it exists,
//! then from `THINKCYBER_*` environment variables, which win over the file.

use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_ENV: &str = "THINKCYBER_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "thinkcyber.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Base URL of the platform REST API every `/api` route forwards to.
    pub backend_url: String,
    pub request_timeout_secs: u64,
    /// Open the admin UI in the default browser after start-up.
    pub open_browser: bool,
    pub max_upload_bytes: usize,
    pub json_limit_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            backend_url: "http://localhost:8081/api".to_string(),
            request_timeout_secs: 15,
            open_browser: true,
            max_upload_bytes: 5 * 1024 * 1024,
            json_limit_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Applies `THINKCYBER_*` overrides looked up through `lookup`.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = lookup("THINKCYBER_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("THINKCYBER_PORT") {
            self.port = parse_env("THINKCYBER_PORT", port)?;
        }
        if let Some(url) = lookup("THINKCYBER_BACKEND_URL") {
            self.backend_url = url;
        }
        if let Some(secs) = lookup("THINKCYBER_REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = parse_env("THINKCYBER_REQUEST_TIMEOUT_SECS", secs)?;
        }
        if let Some(open) = lookup("THINKCYBER_OPEN_BROWSER") {
            self.open_browser = match open.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        key: "THINKCYBER_OPEN_BROWSER",
                        value: open,
                    })
                }
            };
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.backend_url.starts_with("http://") || self.backend_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "backend_url must be an http(s) URL, got '{}'",
                self.backend_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { key, value })
}

/// Reads `path` if it exists; a missing file yields the defaults.
pub fn load_file(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// File, then environment, then validation.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = std::env::var(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
    let mut config = load_file(&path)?;
    config.apply_overrides(|key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = tempdir().unwrap();
        let config = load_file(&temp.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("thinkcyber.toml");
        std::fs::write(
            &path,
            r#"
port = 9000
backend_url = "https://api.thinkcyber.example/v1"
open_browser = false
"#,
        )
        .unwrap();

        let config = load_file(&path).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.backend_url, "https://api.thinkcyber.example/v1");
        assert!(!config.open_browser);
        assert_eq!(config.request_timeout_secs, 15);
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("thinkcyber.toml");
        std::fs::write(&path, "port = \"not a number\"").unwrap();
        assert!(matches!(load_file(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let env: HashMap<&str, &str> = [
            ("THINKCYBER_PORT", "7000"),
            ("THINKCYBER_BACKEND_URL", "http://10.0.0.5/api"),
            ("THINKCYBER_OPEN_BROWSER", "off"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.port, 7000);
        assert_eq!(config.backend_url, "http://10.0.0.5/api");
        assert!(!config.open_browser);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn test_bad_env_value_is_rejected() {
        let mut config = Config::default();
        let result = config.apply_overrides(|key| {
            (key == "THINKCYBER_PORT").then(|| "eighty".to_string())
        });
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnv {
                key: "THINKCYBER_PORT",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_non_http_backend() {
        let config = Config {
            backend_url: "ftp://files".into(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }
}
