//! Scan configuration loaded from `.keygate.toml`.
//!
//! User configuration is an overlay: every field is optional, and the
//! resolved [`ScanConfig`] is produced by merging the overlay over built-in
//! defaults. List fields concatenate - user entries add exceptions, they
//! never remove the built-in ones.

use std::path::{Path, PathBuf};

use keygate_providers::{ProviderKind, Risk};
use serde::{Deserialize, Serialize};

use crate::finding::{FindingKind, Severity};

/// Per-kind severity override parsed from the `[severity]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityOverride {
    /// Findings of this kind fail the scan.
    Error,
    /// Findings of this kind are reported but do not fail the scan.
    Warning,
    /// Findings of this kind are dropped entirely.
    Off,
}

/// The `[severity]` table: one optional override per finding kind.
///
/// An unset field means the kind keeps its built-in default severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct KindOverrides {
    /// Override for catalog pattern findings.
    pub known_patterns: Option<SeverityOverride>,
    /// Override for entropy findings.
    pub high_entropy: Option<SeverityOverride>,
    /// Override for base64 findings.
    pub base64_secrets: Option<SeverityOverride>,
    /// Override for client exposure findings.
    pub client_side_secrets: Option<SeverityOverride>,
}

impl KindOverrides {
    /// Returns the configured override for `kind`, if any.
    #[must_use]
    pub const fn for_kind(self, kind: FindingKind) -> Option<SeverityOverride> {
        match kind {
            FindingKind::KnownPattern => self.known_patterns,
            FindingKind::HighEntropy => self.high_entropy,
            FindingKind::Base64Secret => self.base64_secrets,
            FindingKind::ClientSideSecret => self.client_side_secrets,
        }
    }

    /// Merges `user` over `self`; set fields in `user` win.
    #[must_use]
    const fn merged_with(self, user: Self) -> Self {
        Self {
            known_patterns: or(user.known_patterns, self.known_patterns),
            high_entropy: or(user.high_entropy, self.high_entropy),
            base64_secrets: or(user.base64_secrets, self.base64_secrets),
            client_side_secrets: or(user.client_side_secrets, self.client_side_secrets),
        }
    }
}

const fn or(first: Option<SeverityOverride>, second: Option<SeverityOverride>) -> Option<SeverityOverride> {
    match first {
        Some(value) => Some(value),
        None => second,
    }
}

/// The resolved `[providers]` table: which catalog providers run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderToggles {
    /// Supabase patterns.
    pub supabase: bool,
    /// Stripe patterns.
    pub stripe: bool,
    /// AWS patterns.
    pub aws: bool,
    /// Firebase patterns.
    pub firebase: bool,
    /// Generic secret-shape patterns.
    pub generic: bool,
}

impl Default for ProviderToggles {
    fn default() -> Self {
        Self {
            supabase: true,
            stripe: true,
            aws: true,
            firebase: true,
            generic: true,
        }
    }
}

impl ProviderToggles {
    /// Returns `true` if patterns from `kind` should run.
    #[must_use]
    pub const fn is_enabled(self, kind: ProviderKind) -> bool {
        match kind {
            ProviderKind::Supabase => self.supabase,
            ProviderKind::Stripe => self.stripe,
            ProviderKind::Aws => self.aws,
            ProviderKind::Firebase => self.firebase,
            ProviderKind::Generic => self.generic,
        }
    }
}

/// The `[ignore]` table of the user overlay.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreOverlay {
    /// Additional glob patterns for files to skip.
    pub files: Vec<String>,
    /// Additional value substrings that suppress findings.
    pub patterns: Vec<String>,
    /// Additional `file:line` locations that suppress findings.
    pub lines: Vec<String>,
}

/// The `[thresholds]` table of the user overlay.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ThresholdOverlay {
    /// Entropy score above which a literal is flagged.
    pub entropy_score: Option<f64>,
    /// Minimum length for entropy and base64 candidates.
    pub min_secret_length: Option<usize>,
}

/// The `[providers]` table of the user overlay.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderOverlay {
    /// Supabase patterns.
    pub supabase: Option<bool>,
    /// Stripe patterns.
    pub stripe: Option<bool>,
    /// AWS patterns.
    pub aws: Option<bool>,
    /// Firebase patterns.
    pub firebase: Option<bool>,
    /// Generic secret-shape patterns.
    pub generic: Option<bool>,
}

/// User configuration as written in `.keygate.toml`. Every field is
/// optional; missing tables fall back to defaults on merge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOverlay {
    /// Suppression lists.
    pub ignore: IgnoreOverlay,
    /// Per-kind severity overrides.
    pub severity: KindOverrides,
    /// Detection thresholds.
    pub thresholds: ThresholdOverlay,
    /// Provider enable flags.
    pub providers: ProviderOverlay,
}

/// Resolved scan configuration: built-in defaults merged with the overlay.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Glob patterns for files excluded from discovery.
    pub ignored_files: Vec<String>,
    /// Substrings that suppress findings whose matched value (or snippet)
    /// contains them, case-insensitively.
    pub ignored_values: Vec<String>,
    /// `file:line` locations where findings are suppressed.
    pub ignored_lines: Vec<String>,
    /// Per-kind severity overrides.
    pub overrides: KindOverrides,
    /// Entropy score above which a literal is flagged.
    pub entropy_threshold: f64,
    /// Minimum length for entropy and base64 candidates.
    pub min_secret_length: usize,
    /// Which catalog providers run.
    pub providers: ProviderToggles,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ignored_files: vec![
                "**/*.test.ts".into(),
                "**/*.spec.ts".into(),
                "**/node_modules/**".into(),
                "**/dist/**".into(),
            ],
            ignored_values: vec![
                "your_api_key".into(),
                "example_".into(),
                "_example".into(),
                "demo_".into(),
                "_demo".into(),
                "mock_".into(),
                "_mock".into(),
                "placeholder_".into(),
                "_placeholder".into(),
                "xxx".into(),
                "yyy".into(),
                "zzz".into(),
            ],
            ignored_lines: Vec::new(),
            overrides: KindOverrides::default(),
            entropy_threshold: 3.5,
            min_secret_length: 20,
            providers: ProviderToggles::default(),
        }
    }
}

impl ScanConfig {
    /// Loads configuration from a `.keygate.toml` file, merged over defaults.
    ///
    /// Returns the default configuration if the file does not exist. A file
    /// that exists but cannot be read or parsed is an error; callers decide
    /// whether to fall back.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let overlay: ConfigOverlay = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::default().merged_with(overlay))
    }

    /// Parses an overlay from a TOML string and merges it over defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let overlay: ConfigOverlay = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        Ok(Self::default().merged_with(overlay))
    }

    /// Merges a user overlay over this configuration.
    ///
    /// Lists concatenate; scalar fields are replaced when set.
    #[must_use]
    pub fn merged_with(mut self, overlay: ConfigOverlay) -> Self {
        self.ignored_files.extend(overlay.ignore.files);
        self.ignored_values.extend(overlay.ignore.patterns);
        self.ignored_lines.extend(overlay.ignore.lines);

        self.overrides = self.overrides.merged_with(overlay.severity);

        if let Some(score) = overlay.thresholds.entropy_score {
            self.entropy_threshold = score;
        }
        if let Some(length) = overlay.thresholds.min_secret_length {
            self.min_secret_length = length;
        }

        self.providers = ProviderToggles {
            supabase: overlay.providers.supabase.unwrap_or(self.providers.supabase),
            stripe: overlay.providers.stripe.unwrap_or(self.providers.stripe),
            aws: overlay.providers.aws.unwrap_or(self.providers.aws),
            firebase: overlay.providers.firebase.unwrap_or(self.providers.firebase),
            generic: overlay.providers.generic.unwrap_or(self.providers.generic),
        };

        self
    }

    /// Resolves the severity a new finding of `kind` carries.
    ///
    /// An explicit `error`/`warning` override wins; otherwise `KnownPattern`
    /// findings take their risk tier's severity and the remaining kinds use
    /// their built-in default. `off` does not change severity - findings of
    /// a disabled kind are removed in the filter stage instead.
    #[must_use]
    pub fn severity_for(&self, kind: FindingKind, risk: Option<Risk>) -> Severity {
        match self.overrides.for_kind(kind) {
            Some(SeverityOverride::Error) => Severity::Error,
            Some(SeverityOverride::Warning) => Severity::Warning,
            Some(SeverityOverride::Off) | None => risk.map_or_else(|| kind.default_severity(), Risk::severity),
        }
    }

    /// Returns `false` if findings of `kind` are configured `off`.
    #[must_use]
    pub fn is_kind_enabled(&self, kind: FindingKind) -> bool {
        self.overrides.for_kind(kind) != Some(SeverityOverride::Off)
    }
}

/// Errors that can occur when reading or parsing a `.keygate.toml` file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read from disk.
    #[error("failed to read config '{path}': {source}")]
    Read {
        /// Path to the config file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file contained invalid TOML or unexpected values.
    #[error("failed to parse config '{path}': {source}")]
    Parse {
        /// Path to the config file that could not be parsed.
        path: PathBuf,
        /// The underlying TOML deserialization error.
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    /// Returns the file path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}
