//! Scoring Module - Proposal quality rubric
//!
//! Scores a freeform proposal against four weighted dimensions (Problem
//! Statement, Proposed Solution, Business Impact, Implementation Plan) and
//! subtracts a penalty for generic filler language.
//!
//! ```text
//! text ──► TextAnalysis ──┬─► sections ──┐
//!                         ├─► patterns ──┼─► dimensions ──┐
//!                         └─► slop ──────┼────────────────┴─► ValidationReport
//! ```
//!
//! Every function in this module is total: any string (including an empty
//! one) produces a well-formed result.

pub mod dimensions;
pub mod lexicon;
pub mod patterns;
pub mod sections;
pub mod slop;
pub mod validator;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use dimensions::score_dimension;
pub use lexicon::Lexicon;
pub use patterns::TextAnalysis;
pub use sections::{detect_sections, heading_text, Section, SectionReport};
pub use slop::{detect_slop, SlopResult};
pub use validator::{validate_document, validate_optional, Validator};

/// Issue reported by every dimension when there is nothing to score
pub const NO_CONTENT_ISSUE: &str = "No content to validate";

/// The four scored quality axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    ProblemStatement,
    ProposedSolution,
    BusinessImpact,
    ImplementationPlan,
}

impl Dimension {
    /// All dimensions in rubric order
    pub const ALL: [Dimension; 4] = [
        Dimension::ProblemStatement,
        Dimension::ProposedSolution,
        Dimension::BusinessImpact,
        Dimension::ImplementationPlan,
    ];

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Dimension::ProblemStatement => "Problem Statement",
            Dimension::ProposedSolution => "Proposed Solution",
            Dimension::BusinessImpact => "Business Impact",
            Dimension::ImplementationPlan => "Implementation Plan",
        }
    }

    /// Canonical section backing this dimension
    pub fn section(self) -> Section {
        match self {
            Dimension::ProblemStatement => Section::ProblemStatement,
            Dimension::ProposedSolution => Section::ProposedSolution,
            Dimension::BusinessImpact => Section::BusinessImpact,
            Dimension::ImplementationPlan => Section::ImplementationPlan,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Score for a single dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionResult {
    /// Points awarded, always within `0..=max_score`
    pub score: u32,
    pub max_score: u32,
    pub issues: Vec<String>,
    pub strengths: Vec<String>,
}

impl DimensionResult {
    /// Result for empty input: zero points and the no-content issue
    pub fn no_content(max_score: u32) -> Self {
        Self {
            score: 0,
            max_score,
            issues: vec![NO_CONTENT_ISSUE.to_string()],
            strengths: Vec::new(),
        }
    }

    /// Score as a fraction of the maximum
    pub fn ratio(&self) -> f64 {
        if self.max_score == 0 {
            0.0
        } else {
            f64::from(self.score) / f64::from(self.max_score)
        }
    }

    /// Band of this dimension, reading its ratio on the 0-100 scale
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_total((self.ratio() * 100.0).round() as u32)
    }
}

/// Full rubric report for one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// `clamp(sum(dimension scores) - slop deduction, 0, 100)`
    pub total_score: u32,
    pub problem_statement: DimensionResult,
    pub proposed_solution: DimensionResult,
    pub business_impact: DimensionResult,
    pub implementation_plan: DimensionResult,
    pub slop_detection: SlopResult,
}

impl ValidationReport {
    /// Report for null, empty or whitespace-only input
    pub fn empty(max_score_per_dimension: u32) -> Self {
        Self {
            total_score: 0,
            problem_statement: DimensionResult::no_content(max_score_per_dimension),
            proposed_solution: DimensionResult::no_content(max_score_per_dimension),
            business_impact: DimensionResult::no_content(max_score_per_dimension),
            implementation_plan: DimensionResult::no_content(max_score_per_dimension),
            slop_detection: SlopResult::default(),
        }
    }

    /// Result for one dimension
    pub fn dimension(&self, dimension: Dimension) -> &DimensionResult {
        match dimension {
            Dimension::ProblemStatement => &self.problem_statement,
            Dimension::ProposedSolution => &self.proposed_solution,
            Dimension::BusinessImpact => &self.business_impact,
            Dimension::ImplementationPlan => &self.implementation_plan,
        }
    }

    /// Dimension results in rubric order
    pub fn dimensions(&self) -> impl Iterator<Item = (Dimension, &DimensionResult)> + '_ {
        Dimension::ALL.into_iter().map(move |d| (d, self.dimension(d)))
    }

    /// Sum of the four dimension scores before the slop deduction
    pub fn dimension_sum(&self) -> u32 {
        self.dimensions().map(|(_, r)| r.score).sum()
    }

    /// Every issue, prefixed with its dimension label
    pub fn all_issues(&self) -> Vec<String> {
        self.dimensions()
            .flat_map(|(d, r)| r.issues.iter().map(move |i| format!("{}: {}", d.label(), i)))
            .collect()
    }

    /// Qualitative band for the total score
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_total(self.total_score)
    }
}

/// Qualitative reading of a total score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreBand {
    Excellent,
    Good,
    NeedsWork,
    Poor,
}

impl ScoreBand {
    pub fn from_total(total: u32) -> Self {
        if total >= 80 {
            ScoreBand::Excellent
        } else if total >= 60 {
            ScoreBand::Good
        } else if total >= 40 {
            ScoreBand::NeedsWork
        } else {
            ScoreBand::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::Good => "Good",
            ScoreBand::NeedsWork => "Needs work",
            ScoreBand::Poor => "Poor",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_shape() {
        let report = ValidationReport::empty(25);
        assert_eq!(report.total_score, 0);
        for (_, result) in report.dimensions() {
            assert_eq!(result.score, 0);
            assert_eq!(result.max_score, 25);
            assert_eq!(result.issues, vec![NO_CONTENT_ISSUE.to_string()]);
            assert!(result.strengths.is_empty());
        }
        assert_eq!(report.slop_detection.deduction, 0);
        assert_eq!(report.band(), ScoreBand::Poor);
    }

    #[test]
    fn test_score_band_boundaries() {
        assert_eq!(ScoreBand::from_total(100), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_total(80), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_total(79), ScoreBand::Good);
        assert_eq!(ScoreBand::from_total(60), ScoreBand::Good);
        assert_eq!(ScoreBand::from_total(59), ScoreBand::NeedsWork);
        assert_eq!(ScoreBand::from_total(40), ScoreBand::NeedsWork);
        assert_eq!(ScoreBand::from_total(39), ScoreBand::Poor);
        assert_eq!(ScoreBand::from_total(0), ScoreBand::Poor);
    }

    #[test]
    fn test_all_issues_are_prefixed() {
        let report = ValidationReport::empty(25);
        let issues = report.all_issues();
        assert_eq!(issues.len(), 4);
        assert_eq!(issues[0], "Problem Statement: No content to validate");
        assert_eq!(issues[3], "Implementation Plan: No content to validate");
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = ValidationReport::empty(25);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["totalScore"], 0);
        assert_eq!(json["problemStatement"]["maxScore"], 25);
        assert_eq!(json["slopDetection"]["deduction"], 0);
    }

    #[test]
    fn test_dimension_ratio() {
        let result = DimensionResult {
            score: 10,
            max_score: 25,
            issues: Vec::new(),
            strengths: Vec::new(),
        };
        assert!((result.ratio() - 0.4).abs() < f64::EPSILON);
        assert_eq!(result.band(), ScoreBand::NeedsWork);

        let strong = DimensionResult { score: 20, ..result.clone() };
        assert_eq!(strong.band(), ScoreBand::Excellent);
        assert_eq!(DimensionResult::no_content(0).band(), ScoreBand::Poor);
    }
}
