//! Validation Orchestrator
//!
//! Runs the four dimension scorers and the slop detector over one document
//! and assembles the [`ValidationReport`].

use lazy_static::lazy_static;

use crate::config::RubricConfig;
use crate::error::Result;
use crate::scoring::dimensions::score_analysis;
use crate::scoring::lexicon::Lexicon;
use crate::scoring::patterns::TextAnalysis;
use crate::scoring::slop::SlopScanner;
use crate::scoring::{Dimension, ValidationReport};

lazy_static! {
    static ref DEFAULT_VALIDATOR: Validator = Validator::new();
}

/// Document validator holding a rubric configuration and its lexicon
#[derive(Debug, Clone)]
pub struct Validator {
    config: RubricConfig,
    lexicon: Lexicon,
}

impl Validator {
    /// Create a validator with the default rubric
    pub fn new() -> Self {
        Self {
            config: RubricConfig::default(),
            lexicon: Lexicon::standard().clone(),
        }
    }

    /// Create a validator with a custom rubric, validating it first
    pub fn with_config(config: RubricConfig) -> Result<Self> {
        config.validate()?;
        let lexicon = Lexicon::build(&config.slop.extra_phrases)?;
        Ok(Self { config, lexicon })
    }

    pub fn config(&self) -> &RubricConfig {
        &self.config
    }

    /// Score a document. `None` is treated like empty text.
    pub fn validate(&self, text: Option<&str>) -> ValidationReport {
        let text = match text {
            Some(t) if !t.trim().is_empty() => t,
            _ => {
                tracing::debug!("empty document, returning no-content report");
                return ValidationReport::empty(self.config.max_score_per_dimension);
            }
        };

        let analysis = TextAnalysis::new(text, &self.lexicon, &self.config.headings);
        let score = |d: Dimension| score_analysis(d, &analysis, &self.lexicon, &self.config);

        let problem_statement = score(Dimension::ProblemStatement);
        let proposed_solution = score(Dimension::ProposedSolution);
        let business_impact = score(Dimension::BusinessImpact);
        let implementation_plan = score(Dimension::ImplementationPlan);
        let slop_detection = SlopScanner::scan(text, &self.lexicon, &self.config.slop);

        let sum = problem_statement.score
            + proposed_solution.score
            + business_impact.score
            + implementation_plan.score;
        let total_score = sum
            .saturating_sub(slop_detection.deduction)
            .min(self.config.max_total());

        tracing::debug!(
            total_score,
            sum,
            deduction = slop_detection.deduction,
            sections = analysis.sections.found.len(),
            "document scored"
        );

        ValidationReport {
            total_score,
            problem_statement,
            proposed_solution,
            business_impact,
            implementation_plan,
            slop_detection,
        }
    }

    /// Score document text
    pub fn validate_text(&self, text: &str) -> ValidationReport {
        self.validate(Some(text))
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Score a document with the default rubric
pub fn validate_document(text: &str) -> ValidationReport {
    DEFAULT_VALIDATOR.validate_text(text)
}

/// Score a possibly-absent document with the default rubric
pub fn validate_optional(text: Option<&str>) -> ValidationReport {
    DEFAULT_VALIDATOR.validate(text)
}
