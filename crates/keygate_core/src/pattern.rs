//! Compiled pattern catalog with keyword pre-filtering.
//!
//! Provider crates describe patterns as static data; this module compiles
//! their regexes and builds an Aho-Corasick keyword automaton so the
//! scanner can cheaply decide which patterns to evaluate against a file.

use std::collections::HashMap;
use std::fmt;

use aho_corasick::AhoCorasick;
use keygate_providers::{PatternDef, ProviderKind, ProviderRegistry, Risk};
use regex::Regex;

use crate::config::ProviderToggles;
use crate::error::PatternError;

/// A catalog pattern with its regex compiled, ready for scanning.
#[derive(Debug, Clone)]
pub struct Pattern {
    def: &'static PatternDef,
    regex: Regex,
}

impl Pattern {
    fn from_def(def: &'static PatternDef) -> Result<Self, PatternError> {
        let regex = Regex::new(def.regex).map_err(|source| PatternError::InvalidRegex {
            id: def.id.to_string(),
            source,
        })?;
        Ok(Self { def, regex })
    }

    /// Returns the pattern identifier (e.g. `"stripe/live-secret-key"`).
    #[must_use]
    pub const fn id(&self) -> &'static str {
        self.def.id
    }

    /// Returns the provider this pattern belongs to.
    #[must_use]
    pub const fn provider(&self) -> ProviderKind {
        self.def.provider
    }

    /// Returns the short human-readable name shown in findings.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.def.name
    }

    /// Returns the longer description of what the pattern detects.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.def.description
    }

    /// Returns the risk tier assigned to matches.
    #[must_use]
    pub const fn risk(&self) -> Risk {
        self.def.risk
    }

    /// Returns the compiled regular expression.
    #[must_use]
    pub const fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Returns the explanation of why this exposure matters.
    #[must_use]
    pub const fn education(&self) -> &'static str {
        self.def.education
    }

    /// Returns the remediation documentation link.
    #[must_use]
    pub const fn reference(&self) -> &'static str {
        self.def.reference
    }

    /// Returns the keywords used for pre-filtering.
    #[must_use]
    pub const fn keywords(&self) -> &'static [&'static str] {
        self.def.keywords
    }
}

/// Indexed collection of compiled patterns with Aho-Corasick pre-filtering.
///
/// The registry builds a keyword automaton at construction time. Patterns
/// that declare keywords are only evaluated against content containing at
/// least one of them; keyword-less patterns are evaluated unconditionally.
pub struct PatternRegistry {
    patterns: Vec<Pattern>,
    keyword_automaton: Option<AhoCorasick>,
    keyword_to_patterns: Vec<Vec<usize>>,
    patterns_without_keywords: Vec<usize>,
}

impl fmt::Debug for PatternRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternRegistry")
            .field("patterns", &self.patterns.len())
            .field("patterns_without_keywords", &self.patterns_without_keywords.len())
            .finish_non_exhaustive()
    }
}

impl PatternRegistry {
    /// Compiles every built-in provider pattern.
    pub fn builtin() -> Result<Self, PatternError> {
        Self::with_toggles(ProviderToggles::default())
    }

    /// Compiles built-in patterns from providers enabled in `toggles`.
    pub fn with_toggles(toggles: ProviderToggles) -> Result<Self, PatternError> {
        let providers = ProviderRegistry::builtin();
        let patterns = providers
            .all_patterns()
            .filter(|def| toggles.is_enabled(def.provider))
            .map(Pattern::from_def)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(patterns))
    }

    /// Creates a registry from a list of patterns, building the keyword index.
    #[must_use]
    pub fn new(patterns: Vec<Pattern>) -> Self {
        let keyword_index = build_keyword_index(&patterns);
        let keyword_automaton = build_automaton(&keyword_index.keywords);

        Self {
            patterns,
            keyword_automaton,
            keyword_to_patterns: keyword_index.keyword_to_patterns,
            patterns_without_keywords: keyword_index.patterns_without_keywords,
        }
    }

    /// Returns all patterns as a slice.
    #[must_use]
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Looks up a pattern by its ID string.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.id() == id)
    }

    /// Returns the total number of patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns `true` if the registry contains no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Selects the patterns worth evaluating against `content`.
    ///
    /// Runs the keyword automaton once over the content and returns indices
    /// of patterns whose keywords appeared, plus all keyword-less patterns.
    /// Indices are returned sorted and deduplicated.
    #[must_use]
    pub(crate) fn select_matching(&self, content: &str) -> Vec<usize> {
        let mut selected: Vec<usize> = self.patterns_without_keywords.clone();

        if let Some(automaton) = &self.keyword_automaton {
            for hit in automaton.find_iter(content) {
                selected.extend_from_slice(&self.keyword_to_patterns[hit.pattern().as_usize()]);
            }
        }

        selected.sort_unstable();
        selected.dedup();
        selected
    }
}

struct KeywordIndex {
    keywords: Vec<String>,
    keyword_to_patterns: Vec<Vec<usize>>,
    patterns_without_keywords: Vec<usize>,
}

fn build_keyword_index(patterns: &[Pattern]) -> KeywordIndex {
    let mut keywords = Vec::new();
    let mut keyword_to_patterns: Vec<Vec<usize>> = Vec::new();
    let mut patterns_without_keywords = Vec::new();
    let mut keyword_positions: HashMap<&'static str, usize> = HashMap::new();

    for (pattern_idx, pattern) in patterns.iter().enumerate() {
        if pattern.keywords().is_empty() {
            patterns_without_keywords.push(pattern_idx);
            continue;
        }

        for &keyword in pattern.keywords() {
            if let Some(&existing_idx) = keyword_positions.get(keyword) {
                keyword_to_patterns[existing_idx].push(pattern_idx);
            } else {
                keyword_positions.insert(keyword, keywords.len());
                keywords.push(keyword.to_string());
                keyword_to_patterns.push(vec![pattern_idx]);
            }
        }
    }

    KeywordIndex {
        keywords,
        keyword_to_patterns,
        patterns_without_keywords,
    }
}

fn build_automaton(keywords: &[String]) -> Option<AhoCorasick> {
    if keywords.is_empty() {
        return None;
    }

    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .match_kind(aho_corasick::MatchKind::LeftmostLongest)
        .build(keywords)
        .ok()
}
