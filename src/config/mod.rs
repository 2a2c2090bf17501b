//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → MetasploitConf::resolve (resolve.rs)
//!         METASPLOITDB_* env vars (env.rs) override file values
//!         → defaults fill whatever is still unset
//!     → MetasploitConf (resolved, read-only from here on)
//!     → passed by reference to the health check and the DB client factory
//! ```
//!
//! # Design Decisions
//! - No global: the resolved record is owned by the caller and handed out
//! - Env always beats the file; defaults never overwrite a set field
//! - Connection strings are never serialized

pub mod env;
pub mod loader;
pub mod resolve;
pub mod schema;

pub use env::{EnvSource, MapEnv, ProcessEnv};
pub use loader::{load_config, load_or_default, ConfigError};
pub use resolve::{Resolution, ResolveWarning, DEFAULT_SQLITE3_FILE};
pub use schema::{
    BackendType, Config, HealthCheckConfig, MetasploitConf, ObservabilityConfig,
    UnknownBackendType,
};
