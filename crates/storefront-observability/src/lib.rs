//! Observability for the storefront.
//!
//! This crate provides:
//! - `LogLevel` / `LogFormat` - Logging settings as they appear in config
//! - `init_logging` - Installs the global `tracing` subscriber

mod logging;

pub use logging::*;
