//! Client exposure analysis using tree-sitter.
//!
//! Regex detectors find secrets that look like secrets. This module finds
//! a different failure mode: server-only environment variables referenced
//! from code that ships to the browser. The file-level policy decides
//! whether a file is client-reachable; the AST pass then extracts every
//! `process.env.*` member access and flags names with secret vocabulary.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

use tree_sitter::{Language, Parser, Query, QueryCursor, StreamingIterator as _};

use crate::config::ScanConfig;
use crate::finding::{Finding, FindingKind, Span};
use crate::text::line_at;

/// Env var name markers that frameworks deliberately inline into bundles.
const PUBLIC_MARKERS: &[&str] = &["NEXT_PUBLIC_", "PUBLIC_"];

/// Vocabulary that marks an env var name as server-only.
const SECRET_NAME_KEYWORDS: &[&str] = &[
    "SECRET",
    "KEY",
    "TOKEN",
    "PASSWORD",
    "PRIVATE",
    "API_KEY",
    "SERVICE_ROLE",
    "ADMIN",
    "CREDENTIAL",
    "AUTH",
    "DATABASE_URL",
    "DB_PASSWORD",
];

/// Captures every `a.b.c` member access; the scan checks in Rust that the
/// object is exactly `process.env`.
const ENV_ACCESS_QUERY: &str = r"(member_expression
  object: (member_expression) @object
  property: (property_identifier) @name)";

/// Grammar variants for client-reachable source files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ClientLanguage {
    JavaScript,
    TypeScript,
    Tsx,
}

impl ClientLanguage {
    fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext {
            "js" | "jsx" | "mjs" | "cjs" => Some(Self::JavaScript),
            "ts" => Some(Self::TypeScript),
            "tsx" => Some(Self::Tsx),
            _ => None,
        }
    }

    fn tree_sitter_language(self) -> Language {
        match self {
            Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

// `tree_sitter::Parser` is not `Send`, so each thread gets its own instance.
thread_local! {
    static PARSERS: RefCell<HashMap<ClientLanguage, Parser>> = RefCell::new(HashMap::new());
}

/// Returns `true` if `path` (with `content`) is reachable from the browser.
///
/// Framework `app/` directory files count only when they opt in with a
/// `'use client'` directive and are not `.server.*` modules. Conventional
/// client locations (`components/`, `pages/`, `public/`, `src/client/`)
/// count unconditionally.
#[must_use]
pub fn is_client_file(path: &Path, content: &str) -> bool {
    let segments: Vec<&str> = path.iter().filter_map(|s| s.to_str()).collect();

    if segments
        .iter()
        .any(|s| *s == "components" || *s == "pages" || *s == "public")
    {
        return true;
    }
    if segments.windows(2).any(|pair| pair == ["src", "client"]) {
        return true;
    }

    if segments.iter().any(|s| *s == "app") {
        if is_server_module(path) {
            return false;
        }
        return has_use_client_directive(content);
    }

    false
}

fn is_server_module(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| {
            name.ends_with(".server.ts")
                || name.ends_with(".server.tsx")
                || name.ends_with(".server.js")
                || name.ends_with(".server.jsx")
        })
}

fn has_use_client_directive(content: &str) -> bool {
    let head = content.trim_start();
    head.starts_with("'use client'") || head.starts_with("\"use client\"")
}

/// Returns `true` if an env var name carries secret vocabulary and is not
/// a deliberately public one. A public marker anywhere in the name wins,
/// so `SERVER_PUBLIC_KEY` is never flagged.
fn is_server_only_name(name: &str) -> bool {
    if PUBLIC_MARKERS.iter().any(|marker| name.contains(marker)) {
        return false;
    }
    let upper = name.to_uppercase();
    SECRET_NAME_KEYWORDS.iter().any(|keyword| upper.contains(keyword))
}

/// Extracts `process.env.*` accesses to server-only names from `content`.
///
/// Returns name and byte range pairs in source order. Unparseable content
/// yields nothing; a broken file cannot leak through the bundle anyway.
fn extract_env_accesses(language: ClientLanguage, content: &str) -> Vec<(String, usize, usize)> {
    let ts_language = language.tree_sitter_language();
    let bytes = content.as_bytes();

    let tree = PARSERS.with(|parsers| {
        let mut parsers = parsers.borrow_mut();
        let parser = parsers.entry(language).or_insert_with(|| {
            let mut p = Parser::new();
            #[expect(clippy::expect_used, reason = "grammar is compiled into the binary and always valid")]
            p.set_language(&language.tree_sitter_language())
                .expect("built-in grammar should always be loadable");
            p
        });
        parser.parse(bytes, None)
    });

    let Some(tree) = tree else {
        return Vec::new();
    };
    let Ok(query) = Query::new(&ts_language, ENV_ACCESS_QUERY) else {
        return Vec::new();
    };
    let Some(object_idx) = query.capture_index_for_name("object") else {
        return Vec::new();
    };
    let Some(name_idx) = query.capture_index_for_name("name") else {
        return Vec::new();
    };

    let mut cursor = QueryCursor::new();
    let mut accesses = Vec::new();

    let mut matches = cursor.matches(&query, tree.root_node(), bytes);
    while let Some(m) = matches.next() {
        let mut object_text: Option<&str> = None;
        let mut name_text: Option<&str> = None;
        let mut name_start = 0;
        let mut name_end = 0;

        for capture in m.captures {
            let node = capture.node;
            let Ok(text) = std::str::from_utf8(&bytes[node.byte_range()]) else {
                continue;
            };
            if capture.index == object_idx {
                object_text = Some(text);
            } else if capture.index == name_idx {
                name_text = Some(text);
                name_start = node.start_byte();
                name_end = node.end_byte();
            }
        }

        if object_text != Some("process.env") {
            continue;
        }
        let Some(name) = name_text else {
            continue;
        };

        accesses.push((name.to_string(), name_start, name_end));
    }

    accesses
}

/// Scans a client-reachable file for server-only env var references.
///
/// Files outside the client-reachable set produce no findings.
pub(crate) fn scan(config: &ScanConfig, path: &Path, content: &str) -> Vec<Finding> {
    if !is_client_file(path, content) {
        return Vec::new();
    }
    let Some(language) = ClientLanguage::from_path(path) else {
        return Vec::new();
    };

    let mut findings = Vec::new();

    for (name, byte_start, byte_end) in extract_env_accesses(language, content) {
        if !is_server_only_name(&name) {
            continue;
        }
        let Some(span) = Span::from_byte_range(content, byte_start, byte_end) else {
            continue;
        };

        findings.push(Finding {
            kind: FindingKind::ClientSideSecret,
            severity: config.severity_for(FindingKind::ClientSideSecret, None),
            path: path.into(),
            span,
            message: format!("Server-only environment variable \"{name}\" used in client-side code"),
            snippet: line_at(content, byte_start).into(),
            provider: None,
            matched_value: Some(name.into()),
            education: "Environment variables referenced from client components are inlined \
                        into the JavaScript bundle at build time and shipped to every visitor. \
                        Read this value in a server component or API route instead, or rename \
                        it with a public prefix if it is genuinely safe to expose.",
            reference: "https://nextjs.org/docs/app/building-your-application/configuring/environment-variables",
        });
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::Severity;

    #[test]
    fn components_directory_is_client_reachable() {
        assert!(is_client_file(Path::new("src/components/Nav.tsx"), ""));
        assert!(is_client_file(Path::new("components/Button.jsx"), ""));
    }

    #[test]
    fn pages_and_public_directories_are_client_reachable() {
        assert!(is_client_file(Path::new("pages/index.tsx"), ""));
        assert!(is_client_file(Path::new("public/widget.js"), ""));
    }

    #[test]
    fn src_client_directory_is_client_reachable() {
        assert!(is_client_file(Path::new("src/client/analytics.ts"), ""));
        assert!(!is_client_file(Path::new("src/server/client.ts"), ""));
    }

    #[test]
    fn app_directory_requires_use_client_directive() {
        let directive = "'use client'\nexport default function Page() {}";
        assert!(is_client_file(Path::new("app/dashboard/page.tsx"), directive));
        assert!(!is_client_file(
            Path::new("app/dashboard/page.tsx"),
            "export default function Page() {}"
        ));
    }

    #[test]
    fn app_directory_accepts_double_quoted_directive() {
        assert!(is_client_file(Path::new("app/page.tsx"), "\"use client\";\nexport {}"));
    }

    #[test]
    fn server_modules_in_app_directory_are_not_client() {
        assert!(!is_client_file(Path::new("app/data.server.ts"), "'use client'\n"));
        assert!(!is_client_file(Path::new("app/data.server.tsx"), "'use client'\n"));
    }

    #[test]
    fn plain_library_files_are_not_client() {
        assert!(!is_client_file(Path::new("src/lib/db.ts"), ""));
        assert!(!is_client_file(Path::new("scripts/migrate.ts"), ""));
    }

    #[test]
    fn server_only_names_require_secret_vocabulary() {
        assert!(is_server_only_name("STRIPE_SECRET_KEY"));
        assert!(is_server_only_name("DATABASE_URL"));
        assert!(is_server_only_name("serviceRoleToken".to_uppercase().as_str()));
        assert!(!is_server_only_name("APP_VERSION"));
        assert!(!is_server_only_name("NODE_ENV"));
    }

    #[test]
    fn public_markers_are_never_server_only() {
        assert!(!is_server_only_name("NEXT_PUBLIC_API_KEY"));
        assert!(!is_server_only_name("PUBLIC_AUTH_DOMAIN"));
        assert!(!is_server_only_name("SERVER_PUBLIC_KEY"));
    }

    fn scan_default(path: &str, content: &str) -> Vec<Finding> {
        scan(&ScanConfig::default(), Path::new(path), content)
    }

    #[test]
    fn flags_secret_env_access_in_component() {
        let content = "export function Pay() {\n  const key = process.env.STRIPE_SECRET_KEY;\n  return key;\n}\n";
        let findings = scan_default("src/components/Pay.tsx", content);

        assert_eq!(findings.len(), 1);
        let finding = &findings[0];
        assert_eq!(finding.kind, FindingKind::ClientSideSecret);
        assert_eq!(finding.severity, Severity::Error);
        assert_eq!(finding.line(), 2);
        assert_eq!(finding.matched_value.as_deref(), Some("STRIPE_SECRET_KEY"));
        assert!(finding.message.contains("STRIPE_SECRET_KEY"));
    }

    #[test]
    fn flags_access_in_use_client_app_file() {
        let content = "'use client'\nconst token = process.env.AUTH_TOKEN;\n";
        let findings = scan_default("app/settings/page.tsx", content);
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn ignores_public_env_vars_in_client_code() {
        let content = "const url = process.env.NEXT_PUBLIC_API_KEY;\n";
        assert!(scan_default("src/components/Api.ts", content).is_empty());
    }

    #[test]
    fn ignores_public_marker_anywhere_in_name() {
        let content = "const key = process.env.SERVER_PUBLIC_KEY;\n";
        assert!(scan_default("src/components/Keys.tsx", content).is_empty());
    }

    #[test]
    fn ignores_benign_env_vars_in_client_code() {
        let content = "const mode = process.env.NODE_ENV;\n";
        assert!(scan_default("src/components/Mode.tsx", content).is_empty());
    }

    #[test]
    fn ignores_secret_access_in_server_code() {
        let content = "const key = process.env.STRIPE_SECRET_KEY;\n";
        assert!(scan_default("src/lib/stripe.ts", content).is_empty());
    }

    #[test]
    fn ignores_lookalike_member_chains() {
        let content = "const v = config.process.env.SECRET_KEY;\n";
        assert!(scan_default("src/components/Conf.ts", content).is_empty());
    }

    #[test]
    fn reports_each_distinct_access() {
        let content = "'use client'\nconst a = process.env.DB_PASSWORD;\nconst b = process.env.ADMIN_TOKEN;\n";
        let findings = scan_default("app/admin/page.tsx", content);
        assert_eq!(findings.len(), 2);
    }

    #[test]
    fn jsx_files_parse_with_javascript_grammar() {
        let content = "export const Widget = () => <div>{process.env.API_SECRET}</div>;\n";
        let findings = scan_default("components/Widget.jsx", content);
        assert_eq!(findings.len(), 1);
    }
}
