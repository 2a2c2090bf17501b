//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! MetasploitConf::check_health (check.rs)
//!     type != http → Ok, no I/O
//!     type == http → GET {url}{path} through an HttpProbe (probe.rs)
//!         200            → Ok
//!         anything else  → HealthCheckError { url, reason }
//! ```
//!
//! # Design Decisions
//! - One request per check; no retry, no cached result
//! - The probe is a trait so the HTTP client can be swapped in tests
//! - The check only reports; callers decide whether failure is fatal

pub mod check;
pub mod probe;

pub use check::{HealthCheckError, HealthFailure};
pub use probe::{HttpProbe, ReqwestProbe, TransportError};
