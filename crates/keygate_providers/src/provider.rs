//! Provider trait for pattern definitions.

use crate::pattern::{PatternDef, ProviderKind};

/// A provider of secret detection patterns.
///
/// Each provider contributes one or more `PatternDef` entries for a single
/// service (or for the service-agnostic generic shapes).
pub trait Provider: Send + Sync {
    /// Returns the service this provider detects secrets for.
    fn kind(&self) -> ProviderKind;

    /// Returns the unique identifier for this provider (e.g. `"stripe"`).
    fn id(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Returns the human-readable display name (e.g. `"Stripe"`).
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Returns the static slice of pattern definitions this provider contributes.
    fn patterns(&self) -> &'static [PatternDef];
}
