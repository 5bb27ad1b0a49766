//! Common types and utilities for the kempt source rewriters.
//!
//! This crate provides foundational types used across all kempt crates:
//! - Source spans (`Span`) as byte offsets into the original text
//! - Line/column locations (`Position`, `Location`)
//! - Rewrite limits and thresholds
//! - JSON-with-comments helpers for `tsconfig.json` and `.kemptrc.json`
//! - `ConfigError` for config files read from disk

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::{Location, Position, Span};

// Centralized limits and thresholds
pub mod limits;

// JSONC parsing for config files
pub mod jsonc;
pub use jsonc::{JsoncError, parse_jsonc};

// Reading config files from disk
pub mod config;
pub use config::{ConfigError, read_jsonc_file};

// Panic payload helpers for plugin boundaries
pub mod panic;
pub use panic::panic_message;
