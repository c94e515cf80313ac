//! Provider registry for accessing all builtin providers.

use std::collections::HashMap;

use crate::pattern::{PatternDef, ProviderKind};
use crate::provider::Provider;
use crate::providers::builtin_providers;

/// Central registry of all builtin secret detection providers.
pub struct ProviderRegistry {
    providers: Vec<&'static dyn Provider>,
    patterns_by_id: HashMap<&'static str, &'static PatternDef>,
}

impl ProviderRegistry {
    /// Creates a registry pre-loaded with all builtin providers.
    #[must_use]
    pub fn builtin() -> Self {
        let providers = builtin_providers();
        let mut patterns_by_id = HashMap::new();

        for provider in &providers {
            for pattern in provider.patterns() {
                patterns_by_id.insert(pattern.id, pattern);
            }
        }

        Self {
            providers,
            patterns_by_id,
        }
    }

    /// Returns an iterator over every pattern definition across all providers.
    pub fn all_patterns(&self) -> impl Iterator<Item = &'static PatternDef> {
        self.providers.iter().flat_map(|p| p.patterns().iter())
    }

    /// Returns an iterator over patterns belonging to the given provider.
    pub fn patterns_for(&self, kind: ProviderKind) -> impl Iterator<Item = &'static PatternDef> {
        self.all_patterns().filter(move |p| p.provider == kind)
    }

    /// Looks up a pattern definition by its `"provider/name"` identifier.
    #[must_use]
    pub fn pattern(&self, id: &str) -> Option<&'static PatternDef> {
        self.patterns_by_id.get(id).copied()
    }

    /// Returns the total number of patterns across all providers.
    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.providers.iter().map(|p| p.patterns().len()).sum()
    }

    /// Returns the underlying slice of registered providers.
    #[must_use]
    pub fn providers(&self) -> &[&'static dyn Provider] {
        &self.providers
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("provider_count", &self.providers.len())
            .field("pattern_count", &self.pattern_count())
            .finish_non_exhaustive()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
