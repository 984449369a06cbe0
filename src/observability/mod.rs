//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! loader and resolver produce:
//!     → tracing events with structured fields
//!
//! Consumers:
//!     → logging.rs subscriber (stderr, filtered by RUST_LOG)
//! ```
//!
//! # Design Decisions
//! - Structured fields rather than formatted strings
//! - Logs go to stderr so command output on stdout stays machine-readable

pub mod logging;

pub use logging::init_logging;
