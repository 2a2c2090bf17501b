//! Observability subsystem.
//!
//! Structured logging through `tracing`. Resolution and health checks emit
//! events with fields (`variable`, `url`, `reason`); connection strings are
//! never logged by resolution.

pub mod logging;

pub use logging::init_tracing;
