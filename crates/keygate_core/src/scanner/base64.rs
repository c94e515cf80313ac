//! Encoded secret detection.

use std::path::Path;

use regex::Regex;

use crate::base64::decode_and_check;
use crate::config::ScanConfig;
use crate::error::PatternError;
use crate::finding::{Finding, FindingKind, Span};
use crate::text::line_at;

/// Builds the regex that extracts quoted base64-shaped candidates.
pub(crate) fn build_candidate_regex(min_length: usize) -> Result<Regex, PatternError> {
    let source = format!("['\"`]([A-Za-z0-9+/]{{{min_length},}}={{0,2}})['\"`]");
    Regex::new(&source).map_err(|source| PatternError::InvalidRegex {
        id: "heuristic/base64-candidate".to_string(),
        source,
    })
}

/// Scans quoted base64 candidates, decoding each and flagging those whose
/// plaintext contains credential vocabulary.
pub(crate) fn scan(candidate_regex: &Regex, config: &ScanConfig, path: &Path, content: &str) -> Vec<Finding> {
    let mut findings = Vec::new();

    for captures in candidate_regex.captures_iter(content) {
        let Some(group) = captures.get(1) else {
            continue;
        };

        let Some(hit) = decode_and_check(group.as_str()) else {
            continue;
        };
        let Some(span) = Span::from_byte_range(content, group.start(), group.end()) else {
            continue;
        };

        findings.push(Finding {
            kind: FindingKind::Base64Secret,
            severity: config.severity_for(FindingKind::Base64Secret, None),
            path: path.into(),
            span,
            message: format!(
                "Base64-encoded secret detected (contains keywords: {})",
                hit.keywords.join(", ")
            ),
            snippet: line_at(content, group.start()).into(),
            provider: None,
            matched_value: Some(group.as_str().into()),
            education: "Base64 is an encoding, not encryption. Anyone who can read the bundle \
                        can decode this value back to plaintext. Store the secret in a \
                        server-side environment variable instead.",
            reference: "https://owasp.org/www-project-web-security-testing-guide/",
        });
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::Severity;

    fn scan_default(content: &str) -> Vec<Finding> {
        let config = ScanConfig::default();
        let regex = build_candidate_regex(config.min_secret_length).unwrap();
        scan(&regex, &config, Path::new("src/env.ts"), content)
    }

    #[test]
    fn flags_encoded_api_secret_as_warning() {
        // base64("api_secret_value")
        let findings = scan_default("const v = 'YXBpX3NlY3JldF92YWx1ZQ==';\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::Base64Secret);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert!(findings[0].message.contains("secret"));
        assert!(findings[0].message.contains("api"));
    }

    #[test]
    fn ignores_base64_with_benign_plaintext() {
        // base64("hello world this is fine")
        assert!(scan_default("const v = 'aGVsbG8gd29ybGQgdGhpcyBpcyBmaW5l';\n").is_empty());
    }

    #[test]
    fn ignores_unquoted_candidates() {
        assert!(scan_default("// YXBpX3NlY3JldF92YWx1ZQ==\n").is_empty());
    }

    #[test]
    fn ignores_short_candidates() {
        // base64("key") is far below the candidate length floor.
        assert!(scan_default("const v = 'a2V5';\n").is_empty());
    }

    #[test]
    fn matched_value_is_the_encoded_form() {
        let findings = scan_default("const v = \"YXBpX3NlY3JldF92YWx1ZQ==\";\n");
        assert_eq!(findings[0].matched_value.as_deref(), Some("YXBpX3NlY3JldF92YWx1ZQ=="));
    }

    #[test]
    fn span_points_at_the_candidate() {
        let findings = scan_default("const v = `YXBpX3NlY3JldF92YWx1ZQ==`;\n");
        assert_eq!(findings[0].line(), 1);
        assert_eq!(findings[0].column(), 12);
    }
}
