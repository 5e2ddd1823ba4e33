//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Name of the per-directory config file
pub const LOCAL_CONFIG_FILE: &str = "casedesk.yaml";

/// Keys accepted in config files, with a short description
pub const CONFIG_KEYS: &[(&str, &str)] = &[
    ("database", "Path of the SQLite case database"),
    ("bind", "Listen address of the search service"),
    ("gateway_bind", "Listen address of the gateway service"),
    ("upstream", "Base URL the gateway forwards searches to"),
    ("request_timeout_secs", "Per-request timeout for lookups and upstream calls"),
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Partial config as found in one layer (file or environment)
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigLayer {
    database: Option<PathBuf>,
    bind: Option<String>,
    gateway_bind: Option<String>,
    upstream: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Effective casedesk configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub database: PathBuf,
    pub bind: String,
    pub gateway_bind: String,
    pub upstream: String,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from("database/cases.db"),
            bind: "0.0.0.0:5000".to_string(),
            gateway_bind: "127.0.0.1:3000".to_string(),
            upstream: "http://localhost:5000".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    ///
    /// 1. Built-in defaults
    /// 2. Global user config (`~/.config/casedesk/config.yaml`)
    /// 3. Local config (`./casedesk.yaml`)
    /// 4. Environment variables (`CASEDESK_*`)
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(global_path) = Self::global_config_path() {
            if let Some(layer) = read_layer(&global_path)? {
                config.merge(layer);
            }
        }

        if let Some(layer) = read_layer(Path::new(LOCAL_CONFIG_FILE))? {
            config.merge(layer);
        }

        config.merge(env_layer(|key| std::env::var(key).ok())?);

        Ok(config)
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "casedesk")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another layer into this one (other takes precedence)
    fn merge(&mut self, other: ConfigLayer) {
        if let Some(database) = other.database {
            self.database = database;
        }
        if let Some(bind) = other.bind {
            self.bind = bind;
        }
        if let Some(gateway_bind) = other.gateway_bind {
            self.gateway_bind = gateway_bind;
        }
        if let Some(upstream) = other.upstream {
            self.upstream = upstream;
        }
        if let Some(timeout) = other.request_timeout_secs {
            self.request_timeout_secs = timeout;
        }
    }

    /// Parsed listen address of the search service
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        parse_addr("bind", &self.bind)
    }

    /// Parsed listen address of the gateway
    pub fn gateway_addr(&self) -> Result<SocketAddr, ConfigError> {
        parse_addr("gateway_bind", &self.gateway_bind)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

fn parse_addr(key: &str, value: &str) -> Result<SocketAddr, ConfigError> {
    value.parse().map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
        key: key.to_string(),
        reason: format!("'{}' is not a socket address ({})", value, e),
    })
}

fn read_layer(path: &Path) -> Result<Option<ConfigLayer>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_layer(path, &contents).map(Some)
}

fn parse_layer(path: &Path, contents: &str) -> Result<ConfigLayer, ConfigError> {
    if contents.trim().is_empty() {
        return Ok(ConfigLayer::default());
    }
    serde_yml::from_str(contents).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn env_layer(lookup: impl Fn(&str) -> Option<String>) -> Result<ConfigLayer, ConfigError> {
    let request_timeout_secs = match lookup("CASEDESK_TIMEOUT_SECS") {
        Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
            key: "CASEDESK_TIMEOUT_SECS".to_string(),
            reason: format!("'{}' is not a whole number of seconds", raw),
        })?),
        None => None,
    };

    Ok(ConfigLayer {
        database: lookup("CASEDESK_DB").map(PathBuf::from),
        bind: lookup("CASEDESK_BIND"),
        gateway_bind: lookup("CASEDESK_GATEWAY_BIND"),
        upstream: lookup("CASEDESK_UPSTREAM"),
        request_timeout_secs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.database, PathBuf::from("database/cases.db"));
        assert_eq!(config.bind_addr().unwrap().port(), 5000);
        assert_eq!(config.gateway_addr().unwrap().port(), 3000);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_file_layer_overrides_defaults() {
        let layer = parse_layer(
            Path::new("casedesk.yaml"),
            "database: /var/lib/casedesk/cases.db\nrequest_timeout_secs: 3\n",
        )
        .unwrap();

        let mut config = Config::default();
        config.merge(layer);

        assert_eq!(config.database, PathBuf::from("/var/lib/casedesk/cases.db"));
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(config.bind, "0.0.0.0:5000");
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = parse_layer(Path::new("casedesk.yaml"), "databse: typo.db\n").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_env_layer_takes_precedence() {
        let env: HashMap<&str, &str> = [
            ("CASEDESK_DB", "/tmp/env.db"),
            ("CASEDESK_UPSTREAM", "http://10.0.0.2:5000"),
            ("CASEDESK_TIMEOUT_SECS", "30"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.merge(parse_layer(Path::new("casedesk.yaml"), "database: file.db\n").unwrap());
        config.merge(env_layer(|key| env.get(key).map(|v| v.to_string())).unwrap());

        assert_eq!(config.database, PathBuf::from("/tmp/env.db"));
        assert_eq!(config.upstream, "http://10.0.0.2:5000");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_env_layer_rejects_bad_timeout() {
        let err = env_layer(|key| (key == "CASEDESK_TIMEOUT_SECS").then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_invalid_bind_address() {
        let config = Config {
            bind: "localhost".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.bind_addr(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
