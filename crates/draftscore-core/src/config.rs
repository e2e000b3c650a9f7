//! Rubric configuration
//!
//! Every point weight, the slop penalty scale and the heading heuristics are
//! tuning parameters rather than contracts. They live here so a host can
//! adjust them from a TOML or JSON file without touching detector code.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{DraftscoreError, Result, ResultExt};

/// Upper bound on the total rubric and therefore on any slop deduction
pub const MAX_TOTAL_SCORE: u32 = 100;

/// Main rubric configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RubricConfig {
    /// Maximum points per dimension (four dimensions make the full rubric)
    pub max_score_per_dimension: u32,

    /// Problem Statement signal weights
    pub problem: ProblemWeights,

    /// Proposed Solution signal weights
    pub solution: SolutionWeights,

    /// Business Impact signal weights
    pub impact: ImpactWeights,

    /// Implementation Plan signal weights
    pub implementation: ImplementationWeights,

    /// Slop penalty settings
    pub slop: SlopSettings,

    /// Heading predicate limits
    pub headings: HeadingSettings,
}

impl Default for RubricConfig {
    fn default() -> Self {
        Self {
            max_score_per_dimension: 25,
            problem: ProblemWeights::default(),
            solution: SolutionWeights::default(),
            impact: ImpactWeights::default(),
            implementation: ImplementationWeights::default(),
            slop: SlopSettings::default(),
            headings: HeadingSettings::default(),
        }
    }
}

impl RubricConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-dimension maximum
    pub fn with_max_score_per_dimension(mut self, max: u32) -> Self {
        self.max_score_per_dimension = max;
        self
    }

    /// Set the slop settings
    pub fn with_slop(mut self, slop: SlopSettings) -> Self {
        self.slop = slop;
        self
    }

    /// Add a phrase to the slop list on top of the built-in phrases
    pub fn with_extra_slop_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.slop.extra_phrases.push(phrase.into());
        self
    }

    /// Set the heading predicate limits
    pub fn with_headings(mut self, headings: HeadingSettings) -> Self {
        self.headings = headings;
        self
    }

    /// Maximum total score across the four dimensions, never above 100
    pub fn max_total(&self) -> u32 {
        self.max_score_per_dimension.saturating_mul(4).min(MAX_TOTAL_SCORE)
    }

    /// Reject configurations that would break report invariants
    pub fn validate(&self) -> Result<()> {
        if self.max_score_per_dimension == 0 {
            return Err(DraftscoreError::InvalidConfig(
                "max_score_per_dimension must be positive".to_string(),
            ));
        }
        if self.max_score_per_dimension.saturating_mul(4) > MAX_TOTAL_SCORE {
            return Err(DraftscoreError::InvalidConfig(format!(
                "four dimensions of {} points exceed the {}-point rubric",
                self.max_score_per_dimension, MAX_TOTAL_SCORE
            )));
        }
        if self.slop.max_deduction > MAX_TOTAL_SCORE {
            return Err(DraftscoreError::InvalidConfig(format!(
                "slop.max_deduction {} exceeds {}",
                self.slop.max_deduction, MAX_TOTAL_SCORE
            )));
        }
        let section_weights = [
            ("problem", self.problem.section),
            ("solution", self.solution.section),
            ("impact", self.impact.section),
            ("implementation", self.implementation.section),
        ];
        if let Some((name, _)) = section_weights.iter().find(|(_, w)| *w == 0) {
            return Err(DraftscoreError::InvalidConfig(format!(
                "{}.section weight must be positive",
                name
            )));
        }
        if self.headings.max_words == 0 || self.headings.max_chars == 0 {
            return Err(DraftscoreError::InvalidConfig(
                "heading limits must be positive".to_string(),
            ));
        }
        if self.slop.extra_phrases.iter().any(|p| p.trim().is_empty()) {
            return Err(DraftscoreError::InvalidConfig(
                "slop.extra_phrases must not contain blank phrases".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from a `.toml` or `.json` file and validate it
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(DraftscoreError::from)
            .with_context(|| format!("Reading rubric config '{}'", path.display()))?;

        let config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            _ => toml::from_str(&content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Problem Statement weights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemWeights {
    pub section: u32,
    pub problem_language: u32,
    pub quantified: u32,
    pub urgency: u32,
}

impl Default for ProblemWeights {
    fn default() -> Self {
        Self {
            section: 10,
            problem_language: 5,
            quantified: 5,
            urgency: 5,
        }
    }
}

/// Proposed Solution weights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolutionWeights {
    pub section: u32,
    pub solution_language: u32,
    pub action_verbs: u32,
    pub differentiation: u32,
}

impl Default for SolutionWeights {
    fn default() -> Self {
        Self {
            section: 10,
            solution_language: 5,
            action_verbs: 5,
            differentiation: 5,
        }
    }
}

/// Business Impact weights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactWeights {
    pub section: u32,
    pub impact_language: u32,
    pub quantified: u32,
    pub financial_or_timeframe: u32,
    pub success_metrics: u32,
}

impl Default for ImpactWeights {
    fn default() -> Self {
        Self {
            section: 10,
            impact_language: 4,
            quantified: 5,
            financial_or_timeframe: 3,
            success_metrics: 3,
        }
    }
}

/// Implementation Plan weights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImplementationWeights {
    pub section: u32,
    pub phases: u32,
    pub timeline: u32,
    pub ownership: u32,
}

impl Default for ImplementationWeights {
    fn default() -> Self {
        Self {
            section: 10,
            phases: 7,
            timeline: 4,
            ownership: 4,
        }
    }
}

/// Slop penalty settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlopSettings {
    /// Points deducted per distinct flagged phrase
    pub points_per_phrase: u32,

    /// Cap on the total deduction (at most 100)
    pub max_deduction: u32,

    /// Phrases flagged in addition to the built-in list
    pub extra_phrases: Vec<String>,
}

impl Default for SlopSettings {
    fn default() -> Self {
        Self {
            points_per_phrase: 2,
            max_deduction: 20,
            extra_phrases: Vec::new(),
        }
    }
}

/// Limits for recognising a plain (non-markdown) line as a heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingSettings {
    pub max_words: usize,
    pub max_chars: usize,
}

impl Default for HeadingSettings {
    fn default() -> Self {
        Self {
            max_words: 6,
            max_chars: 60,
        }
    }
}
