//! Secret pattern catalog for the keygate scanner.
//!
//! This crate provides the static pattern definitions for detecting
//! provider-specific secrets, plus the registry that the scanning engine
//! compiles them from.

mod pattern;
mod provider;
/// Secret detection providers, one module per service.
pub mod providers;
mod registry;

pub use pattern::{ParseSeverityError, PatternDef, ProviderKind, Risk, Severity};
pub use provider::Provider;
pub use registry::ProviderRegistry;
