//! End-to-end scoring of realistic proposals

use draftscore_core::scoring::patterns::detect_implementation;
use draftscore_core::{
    detect_sections, validate_document, validate_optional, Dimension, RubricConfig, ScoreBand,
    Section, Validator, NO_CONTENT_ISSUE,
};

const STRONG_PROPOSAL: &str = "\
# Problem Statement
Manual invoice matching is a bottleneck for the finance team. It costs 120 hours per month \
and delays the quarter close, which is increasingly at risk.

# Proposed Solution
We propose to automate invoice matching with a rules engine instead of hiring two more analysts.

# Business Impact
Automation will save $180,000 annually and reduce costs by 35%. Our target KPI is a matching \
error rate below 1%.

# Implementation Plan
Phase 1 (6 weeks): pilot with the accounts payable team.
Phase 2 (8 weeks): roll out to all regions. Owner: Priya Shah, Finance Systems lead.
";

const WEAK_PROPOSAL: &str = "\
We should make things better.
It would be good for everyone.
";

const SLOP_PARAGRAPH: &str = "\
In today's fast-paced world, this best-in-class, cutting-edge, world-class platform is a \
game-changer that will leverage synergies and move the needle.
";

#[test]
fn strong_proposal_scores_full_marks() {
    let report = validate_document(STRONG_PROPOSAL);

    for (dimension, result) in report.dimensions() {
        assert_eq!(result.score, 25, "{} issues: {:?}", dimension, result.issues);
        assert!(result.issues.is_empty());
    }
    assert!(report.slop_detection.is_clean());
    assert_eq!(report.total_score, 100);
    assert_eq!(report.band(), ScoreBand::Excellent);
}

#[test]
fn weak_proposal_reports_every_missing_section() {
    let report = validate_document(WEAK_PROPOSAL);

    assert_eq!(report.total_score, 0);
    assert_eq!(report.band(), ScoreBand::Poor);
    for (_, result) in report.dimensions() {
        assert!(result.issues[0].starts_with("Missing a"));
        assert!(result.strengths.is_empty());
    }
    assert_eq!(detect_sections(WEAK_PROPOSAL).missing.len(), 4);
}

#[test]
fn slop_is_deducted_from_an_otherwise_strong_proposal() {
    let text = format!("{}\n{}", STRONG_PROPOSAL, SLOP_PARAGRAPH);
    let report = validate_document(&text);

    assert_eq!(report.dimension_sum(), 100);
    assert_eq!(report.slop_detection.flagged_phrases.len(), 7);
    assert_eq!(report.slop_detection.deduction, 14);
    assert_eq!(report.total_score, 86);
    assert!(report
        .slop_detection
        .flagged_phrases
        .contains("in today's fast-paced world"));
}

#[test]
fn empty_input_law() {
    for report in [
        validate_document(""),
        validate_optional(None),
        validate_optional(Some("   \n")),
    ] {
        assert_eq!(report.total_score, 0);
        for dimension in Dimension::ALL {
            assert!(report
                .dimension(dimension)
                .issues
                .iter()
                .any(|i| i == NO_CONTENT_ISSUE));
        }
    }
}

#[test]
fn validation_is_deterministic() {
    let text = format!("{}\n{}", STRONG_PROPOSAL, SLOP_PARAGRAPH);
    assert_eq!(validate_document(&text), validate_document(&text));
}

#[test]
fn quantified_impact_never_scores_lower() {
    let vague = validate_document("# Business Impact\nThis will improve things.");
    let quantified = validate_document(
        "# Business Impact\nThis will save $2 million annually and reduce costs by 40%.",
    );
    assert!(vague.business_impact.score <= quantified.business_impact.score);
}

#[test]
fn plain_title_headings_are_detected() {
    let text = "The Challenge\nSupport tickets pile up.\n\n\
                Our Approach:\nIntegrate the help desk with billing.\n";
    let report = detect_sections(text);
    assert!(report.has(Section::ProblemStatement));
    assert!(report.has(Section::ProposedSolution));
}

#[test]
fn phased_plan_is_recognised() {
    let signals = detect_implementation(STRONG_PROPOSAL);
    assert!(signals.has_phases);
    assert!(signals.has_ownership);
}

#[test]
fn custom_rubric_changes_scale() {
    let config = RubricConfig::new().with_max_score_per_dimension(20);
    let validator = Validator::with_config(config).unwrap();
    let report = validator.validate_text(STRONG_PROPOSAL);

    for (_, result) in report.dimensions() {
        assert_eq!(result.max_score, 20);
        assert_eq!(result.score, 20);
    }
    assert_eq!(report.total_score, 80);
}

#[test]
fn pathological_input_degrades_gracefully() {
    let long = "Phase ".repeat(50_000);
    let report = validate_document(&long);
    assert!(report.total_score <= 100);

    let noise: String = (0u32..2_000).filter_map(char::from_u32).collect();
    let report = validate_document(&noise);
    assert!(report.total_score <= 100);
}
