//! Layered resolution of the backend configuration.
//!
//! Precedence, highest first:
//! 1. Environment variables (`METASPLOITDB_*`)
//! 2. Values already on the record (usually from the config file)
//! 3. Defaults

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::env::{
    EnvSource, ProcessEnv, METASPLOITDB_SQLITE3_PATH, METASPLOITDB_TYPE, METASPLOITDB_URL,
};
use crate::config::loader::ConfigError;
use crate::config::schema::{BackendType, MetasploitConf};

/// File name of the default SQLite store, placed in the working directory.
pub const DEFAULT_SQLITE3_FILE: &str = "go-msfdb.sqlite3";

/// Non-fatal problem hit while filling defaults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveWarning {
    #[error("could not determine working directory ({error}); sqlite3 path defaults to {}", .fallback.display())]
    WorkingDirUnavailable { error: String, fallback: PathBuf },
}

/// Outcome of a successful [`MetasploitConf::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub warnings: Vec<ResolveWarning>,
}

impl Resolution {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

impl MetasploitConf {
    /// Fill unset fields with defaults, looking up the process working
    /// directory if a default path is needed.
    pub fn apply_defaults(&mut self) -> Vec<ResolveWarning> {
        self.apply_defaults_with(std::env::current_dir)
    }

    /// Fill unset fields with defaults.
    ///
    /// `current_dir` is called at most once, and only when neither a URL nor
    /// a SQLite path is set. If it fails the path falls back to a bare
    /// relative file name and a warning is returned.
    pub fn apply_defaults_with<F>(&mut self, current_dir: F) -> Vec<ResolveWarning>
    where
        F: FnOnce() -> io::Result<PathBuf>,
    {
        let mut warnings = Vec::new();

        if self.backend_type.is_none() {
            self.backend_type = Some(BackendType::SqliteFile);
        }

        if !self.has_url() && !self.has_sqlite3_path() {
            let path = match current_dir() {
                Ok(wd) => wd.join(DEFAULT_SQLITE3_FILE),
                Err(e) => {
                    let fallback = PathBuf::from(DEFAULT_SQLITE3_FILE);
                    tracing::warn!(
                        error = %e,
                        fallback = %fallback.display(),
                        "Could not determine working directory for default sqlite3 path"
                    );
                    warnings.push(ResolveWarning::WorkingDirUnavailable {
                        error: e.to_string(),
                        fallback: fallback.clone(),
                    });
                    fallback
                }
            };
            self.sqlite3_path = Some(path);
        }

        warnings
    }

    /// Apply `METASPLOITDB_*` overrides from the process environment, then
    /// defaults.
    pub fn resolve(&mut self) -> Result<Resolution, ConfigError> {
        self.resolve_from(&ProcessEnv)
    }

    /// Apply overrides from `env`, then defaults.
    ///
    /// Every variable set to a non-empty value replaces the field,
    /// whatever it held before. An unrecognised backend type is rejected
    /// before anything on the record changes.
    pub fn resolve_from<E: EnvSource>(&mut self, env: &E) -> Result<Resolution, ConfigError> {
        let backend_type = match env.non_empty(METASPLOITDB_TYPE) {
            Some(raw) => match raw.parse::<BackendType>() {
                Ok(kind) => Some(kind),
                Err(_) => {
                    return Err(ConfigError::UnknownBackendType {
                        value: raw,
                        origin: METASPLOITDB_TYPE.to_string(),
                    })
                }
            },
            None => None,
        };

        if let Some(kind) = backend_type {
            tracing::debug!(variable = METASPLOITDB_TYPE, backend_type = %kind, "Environment override applied");
            self.backend_type = Some(kind);
        }
        if let Some(url) = env.non_empty(METASPLOITDB_URL) {
            tracing::debug!(variable = METASPLOITDB_URL, "Environment override applied");
            self.url = Some(url);
        }
        if let Some(path) = env.non_empty(METASPLOITDB_SQLITE3_PATH) {
            tracing::debug!(variable = METASPLOITDB_SQLITE3_PATH, "Environment override applied");
            self.sqlite3_path = Some(PathBuf::from(path));
        }

        let warnings = self.apply_defaults();
        Ok(Resolution { warnings })
    }
}
