//! Library side of the `kempt` binary: argument parsing, rc file loading,
//! the parallel file driver, its text-level host and status reporting.

pub mod args;
pub mod commands;
pub mod driver;
pub mod host;
pub mod rc;
pub mod reporter;
pub mod tracing_config;
