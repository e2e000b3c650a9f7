use draftscore_core::{validate_document, Dimension};
use proptest::prelude::*;

fn proposal_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("# Problem Statement".to_string()),
        Just("## Proposed Solution".to_string()),
        Just("**Business Impact**".to_string()),
        Just("Implementation Plan:".to_string()),
        Just("Phase 1: pilot for 4 weeks.".to_string()),
        Just("Phase 2: roll out. Owner: platform team.".to_string()),
        Just("This bottleneck costs $40,000 per month.".to_string()),
        Just("We propose to automate the workflow.".to_string()),
        Just("A best-in-class, cutting-edge synergy.".to_string()),
        Just("It is urgent.".to_string()),
        "[a-zA-Z0-9 $%.,:#*-]{0,60}",
    ]
}

fn proposal() -> impl Strategy<Value = String> {
    prop::collection::vec(proposal_fragment(), 0..12).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn scores_stay_in_bounds(text in ".{0,400}") {
        let report = validate_document(&text);
        prop_assert!(report.total_score <= 100);
        for (_, result) in report.dimensions() {
            prop_assert!(result.score <= 25);
            prop_assert_eq!(result.max_score, 25);
        }
    }

    #[test]
    fn structured_scores_stay_in_bounds(text in proposal()) {
        let report = validate_document(&text);
        prop_assert!(report.total_score <= 100);
        prop_assert!(report.slop_detection.deduction <= 100);
    }

    #[test]
    fn validation_is_deterministic(text in proposal()) {
        prop_assert_eq!(validate_document(&text), validate_document(&text));
    }

    #[test]
    fn total_is_sum_minus_deduction(text in proposal()) {
        prop_assume!(!text.trim().is_empty());
        let report = validate_document(&text);
        let expected = report
            .dimension_sum()
            .saturating_sub(report.slop_detection.deduction)
            .min(100);
        prop_assert_eq!(report.total_score, expected);
    }

    #[test]
    fn every_criterion_is_explained(text in proposal()) {
        prop_assume!(!text.trim().is_empty());
        let report = validate_document(&text);
        for dimension in Dimension::ALL {
            let result = report.dimension(dimension);
            prop_assert!(!result.issues.is_empty() || !result.strengths.is_empty());
        }
    }

    #[test]
    fn appending_quantities_never_lowers_impact(text in proposal()) {
        let base = validate_document(&format!("# Business Impact\n{}", text));
        let richer = validate_document(&format!(
            "# Business Impact\n{}\nThis saves $2 million annually, a 40% cut.",
            text
        ));
        prop_assert!(base.business_impact.score <= richer.business_impact.score);
    }
}
