//! Core detection engine for keygate.
//!
//! This crate scans `TypeScript`/`JavaScript` source for secrets that are
//! about to ship in a build: known provider credentials, high-entropy
//! literals, base64-wrapped secrets, and server-only environment variables
//! referenced from client code. It's designed to be embedded in CLIs and
//! CI pipelines.
//!
//! # Main Types
//!
//! - [`Scanner`] - Runs all detectors against content and produces findings
//! - [`PatternRegistry`] - Compiled catalog patterns with keyword pre-filtering
//! - [`Finding`] - A detected exposure with location and education material
//! - [`ScanConfig`] - User configuration loaded from `.keygate.toml`
//!
//! # Error Handling
//!
//! This crate uses [`thiserror`] for structured, typed errors that library
//! consumers can match on:
//!
//! - [`PatternError`] - Pattern compilation failures
//! - [`ConfigError`] - Configuration loading/parsing failures
//! - [`KeygateError`] - Top-level error enum combining the above
//!
//! The CLI crate (`keygate_cli`) uses `anyhow` for error propagation.

/// Base64 grammar checks and decoded-plaintext inspection.
pub mod base64;
/// Client-reachability policy and `process.env` exposure analysis.
pub mod client;
/// User configuration loaded from `.keygate.toml`.
pub mod config;
/// Shannon entropy calculation over character distributions.
pub mod entropy;
/// Error types for pattern compilation and configuration.
pub mod error;
/// Types representing detected exposures and their locations.
pub mod finding;
/// Compiled pattern catalog with keyword pre-filtering.
pub mod pattern;
pub(crate) mod placeholder;
/// Common re-exports for internal use.
pub mod prelude;
/// The scanning pipeline: detectors, aggregation, and suppression.
pub mod scanner;
#[cfg(test)]
pub(crate) mod test_utils;
/// Text utilities for line boundary detection.
pub mod text;

pub use config::{ConfigError, ConfigOverlay, ScanConfig, SeverityOverride};
pub use error::{KeygateError, PatternError};
pub use finding::{Finding, FindingKind, ProviderKind, Severity, Span};
pub use pattern::{Pattern, PatternRegistry};
pub use scanner::{ScanResult, Scanner};

/// Default filename for keygate configuration.
pub const CONFIG_FILENAME: &str = ".keygate.toml";
