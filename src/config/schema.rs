//! Configuration schema definitions.
//!
//! This module defines the configuration structure for the Metasploit module
//! data backend. All types derive Serde traits for deserialization from the
//! TOML config file.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use url::Url;

/// Root configuration document.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Metasploit module data backend.
    pub metasploit: MetasploitConf,
}

/// Kind of store serving the Metasploit module data.
///
/// Only [`BackendType::Http`] changes behaviour here; the database kinds are
/// passed through untouched to whatever opens the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum BackendType {
    /// Local embedded SQLite file.
    SqliteFile,
    Mysql,
    Postgres,
    Redis,
    /// Remote HTTP service.
    Http,
}

impl BackendType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendType::SqliteFile => "sqlite-file",
            BackendType::Mysql => "mysql",
            BackendType::Postgres => "postgres",
            BackendType::Redis => "redis",
            BackendType::Http => "http",
        }
    }
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend type text that matches none of the known kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown backend type {0:?} (expected sqlite-file, mysql, postgres, redis or http)")]
pub struct UnknownBackendType(pub String);

impl FromStr for BackendType {
    type Err = UnknownBackendType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            // "sqlite3" is the historical spelling still found in older configs.
            "sqlite-file" | "sqlite3" => Ok(BackendType::SqliteFile),
            "mysql" => Ok(BackendType::Mysql),
            "postgres" => Ok(BackendType::Postgres),
            "redis" => Ok(BackendType::Redis),
            "http" => Ok(BackendType::Http),
            other => Err(UnknownBackendType(other.to_string())),
        }
    }
}

impl TryFrom<String> for BackendType {
    type Error = UnknownBackendType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BackendType> for String {
    fn from(kind: BackendType) -> Self {
        kind.as_str().to_string()
    }
}

/// Metasploit module data backend configuration.
///
/// `url` and `sqlite3_path` are read from the config file but never
/// serialized, so the record can be printed or logged without leaking a
/// connection string.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct MetasploitConf {
    /// Backend kind (`type` in the config file). `None` until resolved.
    #[serde(
        rename = "type",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_backend_type"
    )]
    pub backend_type: Option<BackendType>,

    /// HTTP base URL (e.g. "http://metasploit-dictionary.com:1324") or a DB
    /// connection string.
    #[serde(skip_serializing)]
    pub url: Option<String>,

    /// Path to the local SQLite file.
    #[serde(skip_serializing)]
    pub sqlite3_path: Option<PathBuf>,

    /// Health check settings for HTTP mode.
    pub health: HealthCheckConfig,
}

impl MetasploitConf {
    /// Whether module data is fetched from a remote HTTP service.
    pub fn is_fetch_via_http(&self) -> bool {
        self.backend_type == Some(BackendType::Http)
    }

    /// The URL, if set to something non-empty.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }

    /// The SQLite path, if set to something non-empty.
    pub fn sqlite3_path(&self) -> Option<&Path> {
        self.sqlite3_path
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }

    pub(crate) fn has_url(&self) -> bool {
        self.url().is_some()
    }

    pub(crate) fn has_sqlite3_path(&self) -> bool {
        self.sqlite3_path().is_some()
    }
}

/// A blank `type` in the file means unset, like an absent one.
fn deserialize_backend_type<'de, D>(deserializer: D) -> Result<Option<BackendType>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw
            .parse::<BackendType>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Health check configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Path appended to the backend URL.
    pub path: String,

    /// Verbose connection logging on the HTTP client.
    pub debug: bool,

    /// Proxy to route the probe through.
    pub proxy: Option<Url>,

    /// Request timeout in seconds. `None` keeps the client default.
    pub timeout_secs: Option<u64>,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            path: "/health".to_string(),
            debug: false,
            proxy: None,
            timeout_secs: None,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
