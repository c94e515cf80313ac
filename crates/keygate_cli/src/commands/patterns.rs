//! Patterns command - lists the built-in detection catalog.

use console::style;
use keygate_core::prelude::*;
use keygate_providers::Risk;

use crate::ui::{colors, indicators, print_command_header, severity_style, truncate_with_ellipsis};

const NAME_TRUNCATE_WIDTH: usize = 35;
const DESCRIPTION_WIDTH: usize = 60;

const PROVIDER_ORDER: [ProviderKind; 5] = [
    ProviderKind::Supabase,
    ProviderKind::Stripe,
    ProviderKind::Aws,
    ProviderKind::Firebase,
    ProviderKind::Generic,
];

/// Lists built-in detection patterns, optionally filtered by provider.
pub fn run(provider_filter: Option<&str>, verbose: bool) -> super::Result {
    print_command_header("patterns");

    let registry = PatternRegistry::builtin()?;
    let provider = parse_provider_filter(provider_filter)?;
    let patterns: Vec<&Pattern> = registry
        .patterns()
        .iter()
        .filter(|p| provider.is_none_or(|kind| p.provider() == kind))
        .collect();

    if patterns.is_empty() {
        print_no_matches(provider_filter);
        return Ok(());
    }

    print_count(patterns.len());

    if verbose {
        print_verbose(&patterns);
    } else {
        print_catalog(&patterns);
    }

    Ok(())
}

fn parse_provider_filter(s: Option<&str>) -> super::Result<Option<ProviderKind>> {
    s.map(parse_provider).transpose()
}

fn parse_provider(s: &str) -> super::Result<ProviderKind> {
    PROVIDER_ORDER
        .into_iter()
        .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| anyhow::anyhow!("invalid provider '{s}' - use: supabase, stripe, aws, firebase, generic"))
}

fn print_count(count: usize) {
    println!("{}", colors::muted().apply_to(format!("{count} patterns")));
}

fn print_no_matches(provider: Option<&str>) {
    match provider {
        Some(p) => println!(
            "{} {} {}",
            colors::muted().apply_to("○"),
            colors::secondary().apply_to("no patterns match"),
            colors::emphasis().apply_to(format!("--provider {p}"))
        ),
        None => println!(
            "{} {}",
            colors::muted().apply_to("○"),
            colors::secondary().apply_to("no patterns")
        ),
    }
}

fn print_catalog(patterns: &[&Pattern]) {
    for provider in PROVIDER_ORDER {
        let rows: Vec<&&Pattern> = patterns.iter().filter(|p| p.provider() == provider).collect();
        if rows.is_empty() {
            continue;
        }

        println!();
        println!(
            "{} {}",
            style(provider.name()).bold(),
            colors::muted().apply_to(format!("({})", rows.len()))
        );

        for pattern in rows {
            print_pattern_row(pattern);
        }
    }
}

fn print_pattern_row(pattern: &Pattern) {
    println!(
        "  {} {:<8} {}  {}",
        risk_style(pattern.risk()).apply_to("●"),
        risk_style(pattern.risk()).apply_to(pattern.risk().as_str()),
        colors::accent().apply_to(pattern.id()),
        colors::secondary().apply_to(truncate_with_ellipsis(pattern.name(), NAME_TRUNCATE_WIDTH))
    );
}

fn print_verbose(patterns: &[&Pattern]) {
    for pattern in patterns {
        print_pattern_detail(pattern);
    }
}

fn print_pattern_detail(pattern: &Pattern) {
    println!();
    println!(
        "{} {} {} {} {} {}",
        risk_style(pattern.risk()).apply_to("●"),
        style(pattern.id()).bold(),
        colors::muted().apply_to("·"),
        risk_style(pattern.risk()).apply_to(pattern.risk().as_str()),
        colors::muted().apply_to("·"),
        colors::muted().apply_to(pattern.provider().name())
    );

    for line in wrap_text(pattern.description(), DESCRIPTION_WIDTH) {
        println!("  {}", colors::secondary().apply_to(&line));
    }

    println!(
        "  {} {}",
        colors::info().apply_to(indicators::INFO),
        colors::secondary().apply_to(pattern.education())
    );
    println!("    {}", colors::muted().apply_to(pattern.reference()));
}

fn risk_style(risk: Risk) -> console::Style {
    severity_style(risk.severity())
}

fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if current_line.len() + 1 + word.len() <= width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            lines.push(current_line);
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_provider_accepts_known_names() {
        assert_eq!(parse_provider("stripe").unwrap(), ProviderKind::Stripe);
        assert_eq!(parse_provider("AWS").unwrap(), ProviderKind::Aws);
    }

    #[test]
    fn parse_provider_rejects_unknown_names() {
        assert!(parse_provider("azure").is_err());
    }

    #[test]
    fn wrap_text_respects_width() {
        let lines = wrap_text("one two three four five six seven", 10);
        assert!(lines.iter().all(|l| l.len() <= 10));
        assert_eq!(lines.join(" "), "one two three four five six seven");
    }

    #[test]
    fn wrap_text_keeps_short_text_on_one_line() {
        assert_eq!(wrap_text("short text", 60), vec!["short text"]);
    }
}
