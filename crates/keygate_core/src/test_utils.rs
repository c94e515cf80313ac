//! Test utilities for `keygate_core` (compiled only during testing).

use std::path::Path;

use crate::finding::{Finding, FindingKind, Span};

pub fn make_finding(kind: FindingKind, path: &str, line: u32) -> Finding {
    Finding {
        kind,
        severity: kind.default_severity(),
        path: Path::new(path).into(),
        span: Span::new(line, 1, 0, 10),
        message: "test finding".into(),
        snippet: "const value = 'redacted'".into(),
        provider: None,
        matched_value: Some("redacted_test_value".into()),
        education: "",
        reference: "",
    }
}
