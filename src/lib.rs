//! Configuration and health checking for the Metasploit module data backend.

pub mod config;
pub mod health;
pub mod observability;

pub use config::{BackendType, Config, MetasploitConf};
pub use health::HealthCheckError;
