//! Pattern Detectors
//!
//! Per-dimension signal detection. Each detector reads a [`TextAnalysis`]
//! (the text, its body without heading lines, and its section report) and
//! returns plain booleans. Keyword tests run on body text only so that a
//! heading such as "The Challenge" does not double as problem language;
//! quantification and phase markers are checked on the full text.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::config::HeadingSettings;
use crate::scoring::lexicon::Lexicon;
use crate::scoring::sections::{classify_lines, Section, SectionReport};

lazy_static! {
    static ref QUANTITY: Regex = Regex::new(
        r"(?ix)
        [$€£¥]\s?\d[\d,]*(?:\.\d+)?
        | \b\d[\d,]*(?:\.\d+)?\s?
          (?: %
            | (?: percent | percentage | thousand | million | billion | trillion
                | k | m | bn | x
                | hours? | hrs? | days? | weeks? | months? | quarters? | years?
                | users | customers | employees | tickets | requests
              )\b
          )"
    )
    .unwrap();

    static ref CURRENCY: Regex = Regex::new(
        r"(?i)[$€£¥]\s?\d|\b\d[\d,]*(?:\.\d+)?\s?(?:usd|eur|gbp|dollars|euros)\b"
    )
    .unwrap();

    static ref PHASE_MARKER: Regex = Regex::new(
        r"(?i)\b(phase|stage|step|sprint|milestone|wave|week|month)\s+[-#:]?\s*(\d+|one|two|three|four|five|six|seven|eight|nine|ten|(?-i:[IVX]+))\b"
    )
    .unwrap();
}

/// A document prepared once for every detector
#[derive(Debug, Clone)]
pub struct TextAnalysis<'a> {
    pub text: &'a str,
    /// All non-heading lines joined with newlines
    pub body: String,
    pub sections: SectionReport,
}

impl<'a> TextAnalysis<'a> {
    pub fn new(text: &'a str, lexicon: &Lexicon, limits: &HeadingSettings) -> Self {
        let mut body = String::with_capacity(text.len());
        for (line, title) in classify_lines(text, limits) {
            if title.is_none() {
                body.push_str(line);
                body.push('\n');
            }
        }
        Self {
            text,
            body,
            sections: SectionReport::scan(text, lexicon, limits),
        }
    }

    /// Analysis with the built-in lexicon and default heading limits
    pub fn standard(text: &'a str) -> Self {
        Self::new(text, Lexicon::standard(), &HeadingSettings::default())
    }
}

/// Whether the text contains a number tied to a unit (currency, percent,
/// magnitude, time span, multiplier or head count)
pub fn is_quantified(text: &str) -> bool {
    QUANTITY.is_match(text)
}

/// Whether the text mentions a currency amount
pub fn has_currency(text: &str) -> bool {
    CURRENCY.is_match(text)
}

/// Distinct plan markers such as "Phase 1", "Stage two" or "Week 3",
/// normalised to `kind number`. Roman ordinals must be upper case, and a
/// bare `I` only counts after "Phase" or "Stage".
pub fn phase_markers(text: &str) -> BTreeSet<String> {
    PHASE_MARKER
        .captures_iter(text)
        .filter_map(|caps| {
            let kind = caps.get(1)?.as_str().to_lowercase();
            let token = caps.get(2)?.as_str();
            // "week I met", "the step I took"
            if token == "I" && !matches!(kind.as_str(), "phase" | "stage") {
                return None;
            }
            let ordinal = ordinal_value(token)?;
            Some(format!("{} {}", kind, ordinal))
        })
        .collect()
}

/// Two or more distinct plan markers
pub fn has_phase_structure(text: &str) -> bool {
    phase_markers(text).len() >= 2
}

fn ordinal_value(token: &str) -> Option<u32> {
    if let Ok(n) = token.parse::<u32>() {
        return Some(n);
    }
    let value = match token.to_lowercase().as_str() {
        "one" | "i" => 1,
        "two" | "ii" => 2,
        "three" | "iii" => 3,
        "four" | "iv" => 4,
        "five" | "v" => 5,
        "six" | "vi" => 6,
        "seven" | "vii" => 7,
        "eight" | "viii" => 8,
        "nine" | "ix" => 9,
        "ten" | "x" => 10,
        _ => return None,
    };
    Some(value)
}

/// Problem Statement signals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemSignals {
    pub has_problem_section: bool,
    pub has_problem_language: bool,
    pub is_quantified: bool,
    pub has_urgency: bool,
}

impl ProblemSignals {
    pub fn detect(analysis: &TextAnalysis<'_>, lexicon: &Lexicon) -> Self {
        Self {
            has_problem_section: analysis.sections.has(Section::ProblemStatement),
            has_problem_language: lexicon.problem.is_match(&analysis.body),
            is_quantified: is_quantified(analysis.text),
            has_urgency: lexicon.urgency.is_match(&analysis.body),
        }
    }
}

/// Proposed Solution signals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionSignals {
    pub has_solution_section: bool,
    pub has_solution_language: bool,
    pub has_action_verbs: bool,
    pub has_differentiation: bool,
}

impl SolutionSignals {
    pub fn detect(analysis: &TextAnalysis<'_>, lexicon: &Lexicon) -> Self {
        Self {
            has_solution_section: analysis.sections.has(Section::ProposedSolution),
            has_solution_language: lexicon.solution.is_match(&analysis.body),
            has_action_verbs: lexicon.action_verbs.is_match(&analysis.body),
            has_differentiation: lexicon.differentiation.is_match(&analysis.body),
        }
    }
}

/// Business Impact signals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactSignals {
    pub has_impact_section: bool,
    pub has_impact_language: bool,
    pub is_quantified: bool,
    pub has_financial: bool,
    pub has_timeframe: bool,
    pub has_success_metrics: bool,
}

impl ImpactSignals {
    pub fn detect(analysis: &TextAnalysis<'_>, lexicon: &Lexicon) -> Self {
        let metrics = MetricsSignals::detect(analysis, lexicon);
        Self {
            has_impact_section: analysis.sections.has(Section::BusinessImpact),
            has_impact_language: lexicon.impact.is_match(&analysis.body),
            is_quantified: is_quantified(analysis.text),
            has_financial: has_currency(analysis.text),
            has_timeframe: lexicon.timeframe.is_match(&analysis.body),
            has_success_metrics: metrics.is_measurable(),
        }
    }
}

/// Implementation Plan signals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationSignals {
    pub has_implementation_section: bool,
    pub has_phases: bool,
    pub has_timeline: bool,
    pub has_ownership: bool,
}

impl ImplementationSignals {
    pub fn detect(analysis: &TextAnalysis<'_>, lexicon: &Lexicon) -> Self {
        Self {
            has_implementation_section: analysis.sections.has(Section::ImplementationPlan),
            has_phases: has_phase_structure(analysis.text),
            has_timeline: lexicon.timeline.is_match(&analysis.body),
            has_ownership: lexicon.ownership.is_match(&analysis.body),
        }
    }
}

/// Success Metrics signals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSignals {
    pub has_metrics_section: bool,
    pub has_metrics_language: bool,
    pub is_quantified: bool,
}

impl MetricsSignals {
    pub fn detect(analysis: &TextAnalysis<'_>, lexicon: &Lexicon) -> Self {
        Self {
            has_metrics_section: analysis.sections.has(Section::SuccessMetrics),
            has_metrics_language: lexicon.metrics.is_match(&analysis.body),
            is_quantified: is_quantified(analysis.text),
        }
    }

    /// A metrics section, or metric language backed by numbers
    pub fn is_measurable(&self) -> bool {
        self.has_metrics_section || (self.has_metrics_language && self.is_quantified)
    }
}

pub fn detect_problem(text: &str) -> ProblemSignals {
    ProblemSignals::detect(&TextAnalysis::standard(text), Lexicon::standard())
}

pub fn detect_solution(text: &str) -> SolutionSignals {
    SolutionSignals::detect(&TextAnalysis::standard(text), Lexicon::standard())
}

pub fn detect_impact(text: &str) -> ImpactSignals {
    ImpactSignals::detect(&TextAnalysis::standard(text), Lexicon::standard())
}

pub fn detect_implementation(text: &str) -> ImplementationSignals {
    ImplementationSignals::detect(&TextAnalysis::standard(text), Lexicon::standard())
}

pub fn detect_metrics(text: &str) -> MetricsSignals {
    MetricsSignals::detect(&TextAnalysis::standard(text), Lexicon::standard())
}
