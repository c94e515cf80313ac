//! Convenience re-exports of the most commonly used types.

pub use crate::config::{ConfigError, ConfigOverlay, ScanConfig, SeverityOverride};
pub use crate::error::{KeygateError, PatternError};
pub use crate::finding::{Finding, FindingKind, ProviderKind, Severity, Span};
pub use crate::pattern::{Pattern, PatternRegistry};
pub use crate::scanner::{ScanResult, Scanner};
