//! Pattern definition types for secret detection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid severity string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSeverityError {
    invalid_value: Box<str>,
}

impl ParseSeverityError {
    fn new(value: &str) -> Self {
        Self {
            invalid_value: value.into(),
        }
    }

    /// Returns the invalid value that caused the parse failure.
    #[must_use]
    pub fn invalid_value(&self) -> &str {
        &self.invalid_value
    }
}

impl fmt::Display for ParseSeverityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid severity '{}': expected 'warning' or 'error'",
            self.invalid_value
        )
    }
}

impl std::error::Error for ParseSeverityError {}

/// How a finding affects the scan verdict.
///
/// A scan fails exactly when at least one `Error` finding survives
/// filtering; `Warning` findings are reported but never block a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Reported but does not fail the scan.
    Warning,
    /// Fails the scan.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Warning => "warning",
            Self::Error => "error",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            _ => Err(ParseSeverityError::new(s)),
        }
    }
}

/// Risk tier of an exposed credential type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Risk {
    /// Limited blast radius - scoped or revocable credentials.
    Medium,
    /// Broad access to sensitive resources.
    High,
    /// Full administrative, billing, or database access.
    Critical,
}

impl Risk {
    /// All risk tiers in ascending order.
    pub const ALL: [Self; 3] = [Self::Medium, Self::High, Self::Critical];

    /// Maps a risk tier to the report severity it carries by default.
    ///
    /// Only `Medium` downgrades to a warning; `High` and `Critical`
    /// exposures block the build.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::Medium => Severity::Warning,
            Self::High | Self::Critical => Severity::Error,
        }
    }

    /// Returns the lowercase string identifier for this tier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The service a pattern belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Supabase service-role keys and JWTs.
    Supabase,
    /// Stripe secret and restricted API keys.
    Stripe,
    /// AWS access keys and secret access keys.
    Aws,
    /// Firebase API keys and service account credentials.
    Firebase,
    /// Service-agnostic secret shapes (API keys, tokens, private keys).
    Generic,
}

impl ProviderKind {
    /// Returns the lowercase string identifier used in pattern IDs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Supabase => "supabase",
            Self::Stripe => "stripe",
            Self::Aws => "aws",
            Self::Firebase => "firebase",
            Self::Generic => "generic",
        }
    }

    /// Returns the human-readable display name for this provider.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Supabase => "Supabase",
            Self::Stripe => "Stripe",
            Self::Aws => "AWS",
            Self::Firebase => "Firebase",
            Self::Generic => "Generic Secrets",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single pattern definition for detecting a specific type of secret.
#[derive(Debug, Clone)]
pub struct PatternDef {
    /// Unique identifier in `"provider/name"` format (e.g. `"stripe/live-secret-key"`).
    pub id: &'static str,
    /// The service this pattern belongs to.
    pub provider: ProviderKind,
    /// Short human-readable name (e.g. `"Stripe Live Secret Key"`).
    pub name: &'static str,
    /// Longer description of what this pattern detects.
    pub description: &'static str,
    /// How damaging an exposure of this secret type is.
    pub risk: Risk,
    /// The regular expression used to match this secret.
    pub regex: &'static str,
    /// Keywords for Aho-Corasick pre-filtering.
    pub keywords: &'static [&'static str],
    /// Why this exposure matters and what to do about it.
    pub education: &'static str,
    /// Link to the provider's key-management documentation.
    pub reference: &'static str,
}

/// Creates a `PatternDef` from named fields.
#[macro_export]
macro_rules! pattern {
    (
        id: $id:expr,
        provider: $provider:expr,
        name: $name:expr,
        description: $description:expr,
        risk: $risk:expr,
        regex: $regex:expr,
        keywords: $keywords:expr,
        education: $education:expr,
        reference: $reference:expr $(,)?
    ) => {
        $crate::pattern::PatternDef {
            id: $id,
            provider: $provider,
            name: $name,
            description: $description,
            risk: $risk,
            regex: $regex,
            keywords: $keywords,
            education: $education,
            reference: $reference,
        }
    };
}
