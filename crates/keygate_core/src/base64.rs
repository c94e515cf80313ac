//! Base64 content inspection.
//!
//! Encoding a secret does not hide it. This module recognises strings with
//! base64 shape, decodes them, and looks for credential vocabulary in the
//! plaintext.

use std::sync::LazyLock;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;

/// Candidates shorter than this are too ambiguous to decode.
pub const MIN_BASE64_LENGTH: usize = 20;

const DECODED_PREVIEW_LIMIT: usize = 100;

/// Vocabulary that marks decoded plaintext as credential-bearing.
const SECRET_KEYWORDS: &[&str] = &[
    "password",
    "passwd",
    "pwd",
    "secret",
    "private",
    "key",
    "token",
    "api",
    "auth",
    "credential",
    "access",
    "service_role",
    "admin",
];

static BASE64_GRAMMAR: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9+/]{4})*(?:[A-Za-z0-9+/]{2}==|[A-Za-z0-9+/]{3}=)?$").ok()
});

/// Returns `true` if `s` is long enough and shaped like base64: groups of
/// four alphabet characters with an optional padded tail.
#[must_use]
pub fn is_base64(s: &str) -> bool {
    if s.len() < MIN_BASE64_LENGTH {
        return false;
    }
    BASE64_GRAMMAR.as_ref().is_some_and(|re| re.is_match(s))
}

/// Result of decoding a base64 candidate that turned out to be a secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base64Hit {
    /// Keywords found in the decoded plaintext, in catalog order.
    pub keywords: Vec<&'static str>,
    /// Decoded plaintext, truncated to a safe preview length.
    pub decoded_preview: String,
}

/// Decodes a base64 candidate and checks the plaintext for secret keywords.
///
/// Returns `None` when the candidate is not base64, does not decode, the
/// plaintext is not UTF-8, or no keyword appears. The keyword search is
/// case-insensitive.
#[must_use]
pub fn decode_and_check(s: &str) -> Option<Base64Hit> {
    if !is_base64(s) {
        return None;
    }

    let bytes = STANDARD.decode(s).ok()?;
    let decoded = String::from_utf8(bytes).ok()?;
    let lowered = decoded.to_lowercase();

    let keywords: Vec<&'static str> = SECRET_KEYWORDS
        .iter()
        .copied()
        .filter(|keyword| lowered.contains(keyword))
        .collect();

    if keywords.is_empty() {
        return None;
    }

    let decoded_preview = if decoded.chars().count() > DECODED_PREVIEW_LIMIT {
        decoded.chars().take(DECODED_PREVIEW_LIMIT).collect()
    } else {
        decoded
    };

    Some(Base64Hit {
        keywords,
        decoded_preview,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_base64_rejects_short_strings() {
        assert!(!is_base64("YWJj"));
        assert!(!is_base64(""));
    }

    #[test]
    fn is_base64_accepts_unpadded_multiple_of_four() {
        assert!(is_base64("YXBpX3NlY3JldF92YWx1"));
    }

    #[test]
    fn is_base64_accepts_padded_tails() {
        assert!(is_base64("YXBpX3NlY3JldF92YWx1ZQ=="));
        assert!(is_base64("c2VjcmV0X3Bhc3N3b3Jk"));
    }

    #[test]
    fn is_base64_rejects_invalid_alphabet() {
        assert!(!is_base64("this is not base64 at all!"));
        assert!(!is_base64("YXBpX3NlY3JldF92YWx1_Q=="));
    }

    #[test]
    fn is_base64_rejects_misaligned_length() {
        assert!(!is_base64("YXBpX3NlY3JldF92YWx1Z"));
    }

    #[test]
    fn decode_and_check_flags_encoded_api_secret() {
        // base64("api_secret_value")
        let hit = decode_and_check("YXBpX3NlY3JldF92YWx1ZQ==").unwrap();
        assert!(hit.keywords.contains(&"secret"));
        assert!(hit.keywords.contains(&"api"));
        assert_eq!(hit.decoded_preview, "api_secret_value");
    }

    #[test]
    fn decode_and_check_ignores_benign_plaintext() {
        // base64("hello world this is fine")
        assert!(decode_and_check("aGVsbG8gd29ybGQgdGhpcyBpcyBmaW5l").is_none());
    }

    #[test]
    fn decode_and_check_is_case_insensitive() {
        // base64("DB_PASSWORD=hunter2aaa")
        let hit = decode_and_check("REJfUEFTU1dPUkQ9aHVudGVyMmFhYQ==").unwrap();
        assert!(hit.keywords.contains(&"password"));
    }

    #[test]
    fn decode_and_check_rejects_non_utf8_plaintext() {
        // Decodes to bytes that are not valid UTF-8.
        assert!(decode_and_check("/////////////////////w==").is_none());
    }

    #[test]
    fn decode_and_check_truncates_long_plaintext() {
        let plaintext = format!("password={}", "a".repeat(200));
        let encoded = STANDARD.encode(&plaintext);
        let hit = decode_and_check(&encoded).unwrap();
        assert_eq!(hit.decoded_preview.chars().count(), 100);
    }
}
