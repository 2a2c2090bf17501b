//! Environment variable access.
//!
//! Resolution reads the environment through [`EnvSource`] so tests can feed
//! a fixed set of variables instead of mutating the process environment.

use std::collections::BTreeMap;

/// Env var: backend type.
pub const METASPLOITDB_TYPE: &str = "METASPLOITDB_TYPE";
/// Env var: HTTP base URL or DB connection string.
pub const METASPLOITDB_URL: &str = "METASPLOITDB_URL";
/// Env var: local SQLite file path.
pub const METASPLOITDB_SQLITE3_PATH: &str = "METASPLOITDB_SQLITE3_PATH";

/// A source of environment variables.
pub trait EnvSource {
    /// Value of `name`, or `None` if unset or not valid unicode.
    fn var(&self, name: &str) -> Option<String>;

    /// Value of `name` only when set to a non-empty string.
    fn non_empty(&self, name: &str) -> Option<String> {
        self.var(name).filter(|value| !value.is_empty())
    }
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// In-memory environment.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: BTreeMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`MapEnv::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) {
        self.vars.remove(name);
    }
}

impl EnvSource for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}
