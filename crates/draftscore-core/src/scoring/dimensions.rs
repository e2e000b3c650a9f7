//! Dimension Scorers
//!
//! Each dimension turns its detector signals into a list of [`Criterion`]s
//! and tallies them. Points are additive and the total is explicitly capped
//! at the dimension maximum, whatever the configured weights add up to.

use crate::config::RubricConfig;
use crate::scoring::lexicon::Lexicon;
use crate::scoring::patterns::{
    ImpactSignals, ImplementationSignals, ProblemSignals, SolutionSignals, TextAnalysis,
};
use crate::scoring::{Dimension, DimensionResult};

/// One scored signal with its explanation either way
#[derive(Debug, Clone, Copy)]
pub struct Criterion {
    pub met: bool,
    pub points: u32,
    pub strength: &'static str,
    pub issue: &'static str,
}

impl Criterion {
    fn new(met: bool, points: u32, strength: &'static str, issue: &'static str) -> Self {
        Self {
            met,
            points,
            strength,
            issue,
        }
    }
}

/// Sum met criteria, cap at `max_score`, and collect explanations in order
pub fn tally(criteria: &[Criterion], max_score: u32) -> DimensionResult {
    let mut score = 0u32;
    let mut issues = Vec::new();
    let mut strengths = Vec::new();

    for criterion in criteria {
        if criterion.met {
            score = score.saturating_add(criterion.points);
            strengths.push(criterion.strength.to_string());
        } else {
            issues.push(criterion.issue.to_string());
        }
    }

    DimensionResult {
        score: score.min(max_score),
        max_score,
        issues,
        strengths,
    }
}

pub fn problem_criteria(signals: &ProblemSignals, config: &RubricConfig) -> Vec<Criterion> {
    let w = config.problem;
    vec![
        Criterion::new(
            signals.has_problem_section,
            w.section,
            "Has a dedicated problem statement section",
            "Missing a problem statement section (add a heading such as \"Problem\" or \"The Challenge\")",
        ),
        Criterion::new(
            signals.has_problem_language,
            w.problem_language,
            "Describes concrete challenges, risks or pain points",
            "Frame the problem in terms of concrete challenges, risks or pain points",
        ),
        Criterion::new(
            signals.is_quantified,
            w.quantified,
            "Quantifies the problem",
            "Quantify the problem (cost, hours lost, share of customers affected)",
        ),
        Criterion::new(
            signals.has_urgency,
            w.urgency,
            "Explains why the problem is urgent",
            "Explain why this needs to be solved now",
        ),
    ]
}

pub fn solution_criteria(signals: &SolutionSignals, config: &RubricConfig) -> Vec<Criterion> {
    let w = config.solution;
    vec![
        Criterion::new(
            signals.has_solution_section,
            w.section,
            "Has a dedicated proposed solution section",
            "Missing a proposed solution section (add a heading such as \"Proposed Solution\" or \"Our Approach\")",
        ),
        Criterion::new(
            signals.has_solution_language,
            w.solution_language,
            "States a clear proposal or recommendation",
            "State the proposal explicitly (what you recommend and why)",
        ),
        Criterion::new(
            signals.has_action_verbs,
            w.action_verbs,
            "Uses concrete, action-oriented language",
            "Describe what will actually be built, deployed or changed",
        ),
        Criterion::new(
            signals.has_differentiation,
            w.differentiation,
            "Compares against alternatives",
            "Mention the alternatives considered and why this option wins",
        ),
    ]
}

pub fn impact_criteria(signals: &ImpactSignals, config: &RubricConfig) -> Vec<Criterion> {
    let w = config.impact;
    vec![
        Criterion::new(
            signals.has_impact_section,
            w.section,
            "Has a dedicated business impact section",
            "Missing a business impact section (add a heading such as \"Business Impact\" or \"Benefits\")",
        ),
        Criterion::new(
            signals.has_impact_language,
            w.impact_language,
            "Ties the proposal to business outcomes",
            "Connect the proposal to cost, revenue, efficiency or retention outcomes",
        ),
        Criterion::new(
            signals.is_quantified,
            w.quantified,
            "Quantifies the expected impact",
            "Quantify the expected impact (dollars, percentages, time saved)",
        ),
        Criterion::new(
            signals.has_financial || signals.has_timeframe,
            w.financial_or_timeframe,
            "Gives a financial figure or payback timeframe",
            "Add a financial figure or the timeframe over which the impact lands",
        ),
        Criterion::new(
            signals.has_success_metrics,
            w.success_metrics,
            "Defines measurable success metrics",
            "Define measurable success metrics (KPIs with targets)",
        ),
    ]
}

pub fn implementation_criteria(
    signals: &ImplementationSignals,
    config: &RubricConfig,
) -> Vec<Criterion> {
    let w = config.implementation;
    vec![
        Criterion::new(
            signals.has_implementation_section,
            w.section,
            "Has a dedicated implementation plan section",
            "Missing an implementation plan section (add a heading such as \"Implementation Plan\" or \"Roadmap\")",
        ),
        Criterion::new(
            signals.has_phases,
            w.phases,
            "Breaks delivery into distinct phases",
            "Break the plan into at least two phases (e.g. \"Phase 1\", \"Phase 2\")",
        ),
        Criterion::new(
            signals.has_timeline,
            w.timeline,
            "Includes a timeline",
            "Add a timeline (weeks, months, quarters or milestones)",
        ),
        Criterion::new(
            signals.has_ownership,
            w.ownership,
            "Names owners or resourcing",
            "Say who owns delivery and what team or resources it needs",
        ),
    ]
}

/// Score one dimension from a prepared analysis
pub fn score_analysis(
    dimension: Dimension,
    analysis: &TextAnalysis<'_>,
    lexicon: &Lexicon,
    config: &RubricConfig,
) -> DimensionResult {
    let max = config.max_score_per_dimension;
    if analysis.text.trim().is_empty() {
        return DimensionResult::no_content(max);
    }

    let criteria = match dimension {
        Dimension::ProblemStatement => {
            problem_criteria(&ProblemSignals::detect(analysis, lexicon), config)
        }
        Dimension::ProposedSolution => {
            solution_criteria(&SolutionSignals::detect(analysis, lexicon), config)
        }
        Dimension::BusinessImpact => {
            impact_criteria(&ImpactSignals::detect(analysis, lexicon), config)
        }
        Dimension::ImplementationPlan => {
            implementation_criteria(&ImplementationSignals::detect(analysis, lexicon), config)
        }
    };
    tally(&criteria, max)
}

/// Score one dimension of `text` with the default rubric
pub fn score_dimension(dimension: Dimension, text: &str) -> DimensionResult {
    score_analysis(
        dimension,
        &TextAnalysis::standard(text),
        Lexicon::standard(),
        &RubricConfig::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::NO_CONTENT_ISSUE;

    #[test]
    fn test_tally_caps_at_max() {
        let criteria = [
            Criterion::new(true, 20, "a", "x"),
            Criterion::new(true, 20, "b", "y"),
            Criterion::new(false, 5, "c", "z"),
        ];
        let result = tally(&criteria, 25);
        assert_eq!(result.score, 25);
        assert_eq!(result.strengths, vec!["a", "b"]);
        assert_eq!(result.issues, vec!["z"]);
    }

    #[test]
    fn test_oversized_weights_still_capped() {
        let mut config = RubricConfig::default();
        config.problem.section = 40;
        config.problem.urgency = 40;
        let analysis = TextAnalysis::standard("# Problem\nThis is urgent.");
        let result = score_analysis(
            Dimension::ProblemStatement,
            &analysis,
            Lexicon::standard(),
            &config,
        );
        assert_eq!(result.score, 25);
    }

    #[test]
    fn test_empty_text_single_issue() {
        for dimension in Dimension::ALL {
            let result = score_dimension(dimension, "  \n ");
            assert_eq!(result.score, 0);
            assert_eq!(result.issues, vec![NO_CONTENT_ISSUE.to_string()]);
            assert!(result.strengths.is_empty());
        }
    }

    #[test]
    fn test_problem_dimension_full_marks() {
        let result = score_dimension(
            Dimension::ProblemStatement,
            "# Problem Statement\nOnboarding is a bottleneck: 30% of new customers \
             churn in the first 14 days, and the gap is growing increasingly fast.",
        );
        assert_eq!(result.score, 25);
        assert!(result.issues.is_empty());
        assert_eq!(result.strengths.len(), 4);
    }

    #[test]
    fn test_section_only_earns_section_points() {
        let result = score_dimension(Dimension::ImplementationPlan, "# Roadmap\nTo be decided.");
        assert_eq!(result.score, 10);
        assert_eq!(result.strengths, vec!["Has a dedicated implementation plan section"]);
        assert_eq!(result.issues.len(), 3);
    }

    #[test]
    fn test_missing_section_issue_comes_first() {
        let result = score_dimension(Dimension::ProposedSolution, "Nothing here yet.");
        assert_eq!(result.score, 0);
        assert!(result.issues[0].starts_with("Missing a proposed solution section"));
    }

    #[test]
    fn test_quantified_impact_scores_higher() {
        let vague = score_dimension(
            Dimension::BusinessImpact,
            "# Business Impact\nThis will improve things.",
        );
        let quantified = score_dimension(
            Dimension::BusinessImpact,
            "# Business Impact\nThis will save $2 million annually and reduce costs by 40%.",
        );
        assert!(vague.score <= quantified.score);
        assert_eq!(vague.score, 10);
        assert_eq!(quantified.score, 22);
    }

    #[test]
    fn test_label_lines_keep_their_signals() {
        let result = score_dimension(
            Dimension::ImplementationPlan,
            "# Implementation Plan
Phase 1: pilot.
Phase 2: rollout.
             Owner: Priya Shah
Timeline: Q3 2025",
        );
        assert_eq!(result.score, 25);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_narrative_text_earns_no_phase_points() {
        let result = score_dimension(
            Dimension::ImplementationPlan,
            "# Roadmap
Last week I met the vendor. The next step I took was to call finance.",
        );
        assert!(!result
            .strengths
            .contains(&"Breaks delivery into distinct phases".to_string()));
    }
}
