//! Slop Detector
//!
//! Scans for generic filler phrases (marketing-speak with no factual content)
//! and turns the number of distinct hits into a score deduction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::Range;

use crate::config::{SlopSettings, MAX_TOTAL_SCORE};
use crate::scoring::lexicon::Lexicon;

/// Outcome of a slop scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlopResult {
    /// Points subtracted from the dimension sum
    pub deduction: u32,
    /// Distinct phrases found, lowercased and sorted
    pub flagged_phrases: BTreeSet<String>,
}

impl SlopResult {
    pub fn is_clean(&self) -> bool {
        self.flagged_phrases.is_empty()
    }
}

#[derive(Debug)]
pub struct SlopScanner;

impl SlopScanner {
    /// Flag every lexicon phrase present in `text` and compute the deduction.
    ///
    /// A phrase whose every occurrence lies inside a longer flagged phrase
    /// ("synergies" within "leverage synergies") is not flagged on its own.
    pub fn scan(text: &str, lexicon: &Lexicon, settings: &SlopSettings) -> SlopResult {
        if text.trim().is_empty() {
            return SlopResult::default();
        }

        let hits: Vec<(&str, Vec<Range<usize>>)> = lexicon
            .slop_phrases()
            .iter()
            .map(|p| (p.phrase.as_str(), p.find_spans(text)))
            .filter(|(_, spans)| !spans.is_empty())
            .collect();

        let flagged_phrases: BTreeSet<String> = hits
            .iter()
            .filter(|(_, spans)| !spans.iter().all(|span| is_nested(span, &hits)))
            .map(|(phrase, _)| phrase.to_string())
            .collect();

        let count = u32::try_from(flagged_phrases.len()).unwrap_or(u32::MAX);
        let cap = settings.max_deduction.min(MAX_TOTAL_SCORE);
        let deduction = count.saturating_mul(settings.points_per_phrase).min(cap);

        SlopResult {
            deduction,
            flagged_phrases,
        }
    }
}

fn is_nested(span: &Range<usize>, hits: &[(&str, Vec<Range<usize>>)]) -> bool {
    hits.iter().flat_map(|(_, spans)| spans).any(|outer| {
        outer.len() > span.len() && outer.start <= span.start && span.end <= outer.end
    })
}

/// Scan with the built-in phrase list and default penalty settings
pub fn detect_slop(text: &str) -> SlopResult {
    SlopScanner::scan(text, Lexicon::standard(), &SlopSettings::default())
}
