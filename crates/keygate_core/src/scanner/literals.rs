//! High-entropy string literal detection.
//!
//! Extracts quoted string literals long enough to be interesting, discards
//! candidates that are obviously prose, paths, URLs, or markup, and flags
//! the remainder whose Shannon entropy exceeds the configured threshold.

use std::path::Path;

use regex::Regex;

use crate::config::ScanConfig;
use crate::entropy::is_high_entropy;
use crate::error::PatternError;
use crate::finding::{Finding, FindingKind, Span};
use crate::placeholder::is_placeholder;
use crate::text::line_at;

const MESSAGE: &str = "High-entropy string detected (possible secret or API key)";

/// A candidate with more whitespace-separated tokens than this is treated
/// as prose, not a credential.
const MAX_PROSE_TOKENS: usize = 3;

const PATH_EXTENSIONS: &[&str] = &[
    ".ts", ".tsx", ".js", ".jsx", ".json", ".css", ".scss", ".html", ".md", ".svg", ".png", ".jpg",
    ".jpeg", ".gif", ".webp", ".ico", ".woff", ".woff2",
];

/// Substrings that mark a candidate as an identifier from UI code rather
/// than a credential.
const IDENTIFIER_WORDS: &[&str] = &[
    "component", "navbar", "styles", "module", "page", "layout", "import", "export",
];

/// Builds the literal extraction regexes, one per quote style.
pub(crate) fn build_regexes(min_length: usize) -> Result<Vec<Regex>, PatternError> {
    [
        format!("'([^']{{{min_length},}})'"),
        format!("\"([^\"]{{{min_length},}})\""),
        format!("`([^`]{{{min_length},}})`"),
    ]
    .iter()
    .map(|source| {
        Regex::new(source).map_err(|source| PatternError::InvalidRegex {
            id: "heuristic/quoted-literal".to_string(),
            source,
        })
    })
    .collect()
}

/// Scans quoted string literals in `content` for high-entropy values.
pub(crate) fn scan(regexes: &[Regex], config: &ScanConfig, path: &Path, content: &str) -> Vec<Finding> {
    let mut findings = Vec::new();

    for regex in regexes {
        for captures in regex.captures_iter(content) {
            let Some(group) = captures.get(1) else {
                continue;
            };
            let candidate = group.as_str();

            if should_skip(candidate) {
                continue;
            }
            if !is_high_entropy(candidate, config.entropy_threshold, config.min_secret_length) {
                continue;
            }
            let Some(span) = Span::from_byte_range(content, group.start(), group.end()) else {
                continue;
            };

            findings.push(Finding {
                kind: FindingKind::HighEntropy,
                severity: config.severity_for(FindingKind::HighEntropy, None),
                path: path.into(),
                span,
                message: MESSAGE.to_string(),
                snippet: line_at(content, group.start()).into(),
                provider: None,
                matched_value: Some(candidate.into()),
                education: "High-entropy strings are statistically random, which is the signature \
                            of generated credentials. If this value is a real secret, move it to a \
                            server-side environment variable. If it is not, suppress it via the \
                            ignore list.",
                reference: "https://owasp.org/www-community/vulnerabilities/Use_of_hard-coded_password",
            });
        }
    }

    findings
}

/// Returns `true` for candidates that are clearly not credentials.
fn should_skip(candidate: &str) -> bool {
    if is_placeholder(candidate) {
        return true;
    }
    if candidate.contains(' ') && candidate.split_whitespace().count() > MAX_PROSE_TOKENS {
        return true;
    }
    if candidate.starts_with("./") || candidate.starts_with("../") || candidate.starts_with("@/") {
        return true;
    }

    let lowered = candidate.to_lowercase();
    if lowered.starts_with("http://")
        || lowered.starts_with("https://")
        || lowered.starts_with("www.")
        || lowered.contains("w3.org")
    {
        return true;
    }
    // A file reference needs both a separator and a known extension; a bare
    // random name ending in ".svg" could still be a disguised credential.
    if lowered.contains('/') && PATH_EXTENSIONS.iter().any(|ext| lowered.ends_with(ext)) {
        return true;
    }
    if lowered.contains("viewbox") || lowered.contains("xmlns") {
        return true;
    }
    IDENTIFIER_WORDS.iter().any(|word| lowered.contains(word))
}
