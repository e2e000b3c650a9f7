//! Section Detector
//!
//! Finds heading-like lines and maps their titles onto the canonical proposal
//! sections. Whether a line is a heading at all is decided by
//! [`heading_text`], kept separate so its edge cases can be tested alone.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::config::HeadingSettings;
use crate::scoring::lexicon::Lexicon;

lazy_static! {
    static ref LEADING_ORDINAL: Regex =
        Regex::new(r"^(?:\d+(?:\.\d+)*[.)]?|[IVXivx]+[.)]|[A-Za-z][.)])\s+").unwrap();
}

/// Canonical proposal sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    ProblemStatement,
    ProposedSolution,
    BusinessImpact,
    ImplementationPlan,
    SuccessMetrics,
}

impl Section {
    /// Sections every proposal is expected to have
    pub const REQUIRED: [Section; 4] = [
        Section::ProblemStatement,
        Section::ProposedSolution,
        Section::BusinessImpact,
        Section::ImplementationPlan,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::ProblemStatement => "Problem Statement",
            Section::ProposedSolution => "Proposed Solution",
            Section::BusinessImpact => "Business Impact",
            Section::ImplementationPlan => "Implementation Plan",
            Section::SuccessMetrics => "Success Metrics",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which canonical sections a document has
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionReport {
    pub found: BTreeSet<Section>,
    /// Required sections that were not found. `SuccessMetrics` is optional and
    /// never listed here.
    pub missing: BTreeSet<Section>,
}

impl SectionReport {
    pub fn has(&self, section: Section) -> bool {
        self.found.contains(&section)
    }

    /// Build a report by scanning every heading in `text`
    pub fn scan(text: &str, lexicon: &Lexicon, limits: &HeadingSettings) -> Self {
        let mut found = BTreeSet::new();
        for title in headings(text, limits) {
            found.extend(lexicon.sections_for_heading(title));
        }
        let missing = Section::REQUIRED
            .iter()
            .copied()
            .filter(|s| !found.contains(s))
            .collect();
        Self { found, missing }
    }
}

/// Detect canonical sections using the built-in lexicon and heading limits
pub fn detect_sections(text: &str) -> SectionReport {
    SectionReport::scan(text, Lexicon::standard(), &HeadingSettings::default())
}

/// Title of a heading-like line, or `None` for body text.
///
/// A line is a heading when it is
/// - a markdown ATX heading (`#` to `######`, a space, then text),
/// - a fully bold line (`**Title**`), or
/// - a short plain line with no sentence punctuation at the end that either
///   ends with `:` or capitalises every word longer than three letters.
///   A `:` anywhere before the end makes it a `Label: value` body line.
///
/// Leading ordinals (`1.`, `2)`, `IV.`) and a trailing `:` are stripped.
pub fn heading_text<'a>(line: &'a str, limits: &HeadingSettings) -> Option<&'a str> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.starts_with('#') {
        let hashes = trimmed.chars().take_while(|c| *c == '#').count();
        let rest = &trimmed[hashes..];
        if hashes > 6 || !rest.starts_with(char::is_whitespace) {
            return None;
        }
        return clean_title(rest.trim_end_matches('#'));
    }

    if let Some(inner) = trimmed
        .strip_prefix("**")
        .and_then(|s| s.strip_suffix("**"))
        .or_else(|| trimmed.strip_prefix("__").and_then(|s| s.strip_suffix("__")))
    {
        if inner.contains("**") || !within_limits(inner, limits) {
            return None;
        }
        return clean_title(inner);
    }

    if !trimmed.starts_with(char::is_alphanumeric) || !within_limits(trimmed, limits) {
        return None;
    }
    if trimmed.ends_with(['.', '!', '?', ',', ';']) {
        return None;
    }
    if trimmed.trim_end_matches(':').contains(':') {
        return None;
    }
    if trimmed.ends_with(':') || is_title_case(trimmed) {
        return clean_title(trimmed);
    }
    None
}

/// Iterate heading titles, skipping fenced code blocks
pub fn headings<'a>(text: &'a str, limits: &'a HeadingSettings) -> impl Iterator<Item = &'a str> + 'a {
    classify_lines(text, limits).filter_map(|(_, title)| title)
}

/// Pair every line with its heading title, if any
pub(crate) fn classify_lines<'a>(
    text: &'a str,
    limits: &'a HeadingSettings,
) -> impl Iterator<Item = (&'a str, Option<&'a str>)> + 'a {
    let mut in_fence = false;
    text.lines().map(move |line| {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            return (line, None);
        }
        if in_fence {
            (line, None)
        } else {
            (line, heading_text(line, limits))
        }
    })
}

fn within_limits(candidate: &str, limits: &HeadingSettings) -> bool {
    candidate.chars().count() <= limits.max_chars
        && candidate.split_whitespace().count() <= limits.max_words
}

fn is_title_case(line: &str) -> bool {
    let mut saw_capital = false;
    for word in line.split_whitespace() {
        let letters = word.chars().filter(|c| c.is_alphabetic()).count();
        let first = word.chars().find(|c| c.is_alphabetic());
        match first {
            Some(c) if c.is_uppercase() => saw_capital = true,
            Some(_) if letters > 3 => return false,
            _ => {}
        }
    }
    saw_capital
}

fn clean_title(raw: &str) -> Option<&str> {
    let title = raw.trim().trim_matches('*').trim();
    let title = match LEADING_ORDINAL.find(title) {
        Some(m) => &title[m.end()..],
        None => title,
    };
    let title = title.trim_end_matches(':').trim();
    if title.chars().any(char::is_alphabetic) {
        Some(title)
    } else {
        None
    }
}
