//! Rubric vocabulary
//!
//! Section synonyms, per-dimension keyword lists and slop phrases, compiled
//! once into case-insensitive whole-word regexes. Detectors receive a
//! `&Lexicon` instead of reading globals, so a test can hand them a custom one.

use lazy_static::lazy_static;
use regex::Regex;
use std::ops::Range;

use crate::error::Result;
use crate::scoring::sections::Section;

const PROBLEM_SYNONYMS: &[&str] = &[
    "problem statement",
    "problem",
    "problems",
    "the challenge",
    "challenge",
    "challenges",
    "pain point",
    "pain points",
    "current state",
    "background",
    "why now",
];

const SOLUTION_SYNONYMS: &[&str] = &[
    "proposed solution",
    "solution",
    "solutions",
    "proposal",
    "our approach",
    "approach",
    "recommendation",
    "recommendations",
    "strategy",
];

const IMPACT_SYNONYMS: &[&str] = &[
    "business impact",
    "impact",
    "business case",
    "benefits",
    "value",
    "roi",
    "return on investment",
    "expected outcomes",
    "outcomes",
];

const IMPLEMENTATION_SYNONYMS: &[&str] = &[
    "implementation plan",
    "implementation",
    "roadmap",
    "timeline",
    "rollout",
    "rollout plan",
    "execution plan",
    "next steps",
    "phases",
];

const METRICS_SYNONYMS: &[&str] = &[
    "success metrics",
    "metrics",
    "kpi",
    "kpis",
    "okrs",
    "success criteria",
    "measuring success",
    "measures of success",
];

const PROBLEM_TERMS: &[&str] = &[
    "challenge",
    "challenges",
    "pain point",
    "pain points",
    "risk",
    "risks",
    "bottleneck",
    "bottlenecks",
    "inefficient",
    "inefficiency",
    "friction",
    "struggle",
    "struggling",
    "broken",
    "failure",
    "failures",
    "failing",
    "manual process",
    "churn",
    "delays",
    "costly",
    "gap",
];

const URGENCY_TERMS: &[&str] = &[
    "urgent",
    "urgency",
    "critical",
    "immediate",
    "immediately",
    "pressing",
    "time-sensitive",
    "deadline",
    "escalating",
    "increasingly",
    "every day",
    "every week",
    "every month",
    "at risk",
    "falling behind",
];

const SOLUTION_TERMS: &[&str] = &[
    "approach",
    "propose",
    "proposed",
    "proposal",
    "solution",
    "recommend",
    "recommendation",
    "strategy",
    "we will",
];

const ACTION_VERBS: &[&str] = &[
    "implement",
    "build",
    "deploy",
    "automate",
    "integrate",
    "migrate",
    "launch",
    "create",
    "develop",
    "introduce",
    "replace",
    "consolidate",
    "streamline",
    "pilot",
];

const DIFFERENTIATION_TERMS: &[&str] = &[
    "instead of",
    "unlike",
    "alternative",
    "alternatives",
    "compared to",
    "compared with",
    "rather than",
    "trade-off",
    "trade-offs",
    "tradeoff",
    "tradeoffs",
    "versus",
    "options considered",
];

const IMPACT_TERMS: &[&str] = &[
    "roi",
    "return on investment",
    "reduce cost",
    "reduce costs",
    "reduces costs",
    "cost savings",
    "save",
    "saves",
    "savings",
    "increase revenue",
    "revenue",
    "efficiency",
    "productivity",
    "profit",
    "margin",
    "retention",
    "conversion",
    "customer satisfaction",
];

const TIMEFRAME_TERMS: &[&str] = &[
    "annually",
    "per year",
    "per month",
    "per quarter",
    "monthly",
    "quarterly",
    "yearly",
    "year over year",
    "payback",
    "break-even",
    "break even",
    "fiscal",
    "budget",
];

const METRICS_TERMS: &[&str] = &[
    "kpi",
    "kpis",
    "metric",
    "metrics",
    "measure",
    "measured",
    "measurable",
    "target",
    "targets",
    "baseline",
    "benchmark",
    "okr",
    "okrs",
    "success criteria",
];

const TIMELINE_TERMS: &[&str] = &[
    "week",
    "weeks",
    "month",
    "months",
    "quarter",
    "q1",
    "q2",
    "q3",
    "q4",
    "timeline",
    "deadline",
    "milestone",
    "milestones",
    "by end of",
    "sprint",
    "sprints",
];

const OWNERSHIP_TERMS: &[&str] = &[
    "owner",
    "owners",
    "owned by",
    "responsible",
    "accountable",
    "lead",
    "leads",
    "team",
    "teams",
    "headcount",
    "engineers",
    "resources",
    "staffing",
    "raci",
    "stakeholder",
    "stakeholders",
];

/// Generic filler phrases penalised by the slop detector
pub const SLOP_PHRASES: &[&str] = &[
    "leverage synergies",
    "synergy",
    "synergies",
    "best-in-class",
    "world-class",
    "cutting-edge",
    "game-changer",
    "game changer",
    "paradigm shift",
    "move the needle",
    "low-hanging fruit",
    "circle back",
    "think outside the box",
    "robust solution",
    "seamless integration",
    "seamlessly",
    "next-generation",
    "holistic approach",
    "value-add",
    "thought leader",
    "at the end of the day",
    "it's important to note",
    "in today's fast-paced world",
    "in today's digital landscape",
    "delve into",
    "unlock the power",
    "unlock the full potential",
    "revolutionize",
    "transformative",
    "empower",
    "state-of-the-art",
    "mission-critical",
    "drive innovation",
];

lazy_static! {
    static ref STANDARD: Lexicon =
        Lexicon::build(&[]).expect("built-in lexicon patterns must compile");
}

/// A compiled list of terms that match case-insensitively on word boundaries
#[derive(Debug, Clone)]
pub struct TermSet {
    regex: Regex,
}

impl TermSet {
    /// Compile a list of terms into a single alternation
    pub fn new(terms: &[&str]) -> Result<Self> {
        let alternation = terms
            .iter()
            .map(|t| phrase_pattern(t))
            .collect::<Vec<_>>()
            .join("|");
        Ok(Self {
            regex: Regex::new(&format!("(?i)(?:{})", alternation))?,
        })
    }

    /// Whether any term occurs in the text
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// One slop phrase with its matcher
#[derive(Debug, Clone)]
pub struct SlopPhrase {
    pub phrase: String,
    regex: Regex,
}

impl SlopPhrase {
    pub fn new(phrase: &str) -> Result<Self> {
        let phrase = phrase.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        let regex = Regex::new(&format!("(?i){}", phrase_pattern(&phrase)))?;
        Ok(Self { phrase, regex })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Byte ranges of every occurrence in `text`
    pub fn find_spans(&self, text: &str) -> Vec<Range<usize>> {
        self.regex.find_iter(text).map(|m| m.range()).collect()
    }
}

/// Compiled rubric vocabulary
#[derive(Debug, Clone)]
pub struct Lexicon {
    sections: Vec<(Section, TermSet)>,
    pub problem: TermSet,
    pub urgency: TermSet,
    pub solution: TermSet,
    pub action_verbs: TermSet,
    pub differentiation: TermSet,
    pub impact: TermSet,
    pub timeframe: TermSet,
    pub metrics: TermSet,
    pub timeline: TermSet,
    pub ownership: TermSet,
    slop: Vec<SlopPhrase>,
}

impl Lexicon {
    /// The built-in lexicon, compiled once
    pub fn standard() -> &'static Lexicon {
        &STANDARD
    }

    /// Compile the built-in vocabulary plus extra slop phrases
    pub fn build(extra_slop: &[String]) -> Result<Self> {
        let sections = vec![
            (Section::ProblemStatement, TermSet::new(PROBLEM_SYNONYMS)?),
            (Section::ProposedSolution, TermSet::new(SOLUTION_SYNONYMS)?),
            (Section::BusinessImpact, TermSet::new(IMPACT_SYNONYMS)?),
            (Section::ImplementationPlan, TermSet::new(IMPLEMENTATION_SYNONYMS)?),
            (Section::SuccessMetrics, TermSet::new(METRICS_SYNONYMS)?),
        ];

        let mut slop = Vec::with_capacity(SLOP_PHRASES.len() + extra_slop.len());
        for phrase in SLOP_PHRASES.iter().copied().chain(extra_slop.iter().map(String::as_str)) {
            let compiled = SlopPhrase::new(phrase)?;
            if !slop.iter().any(|p: &SlopPhrase| p.phrase == compiled.phrase) {
                slop.push(compiled);
            }
        }

        Ok(Self {
            sections,
            problem: TermSet::new(PROBLEM_TERMS)?,
            urgency: TermSet::new(URGENCY_TERMS)?,
            solution: TermSet::new(SOLUTION_TERMS)?,
            action_verbs: TermSet::new(ACTION_VERBS)?,
            differentiation: TermSet::new(DIFFERENTIATION_TERMS)?,
            impact: TermSet::new(IMPACT_TERMS)?,
            timeframe: TermSet::new(TIMEFRAME_TERMS)?,
            metrics: TermSet::new(METRICS_TERMS)?,
            timeline: TermSet::new(TIMELINE_TERMS)?,
            ownership: TermSet::new(OWNERSHIP_TERMS)?,
            slop,
        })
    }

    /// Sections whose synonyms occur in a heading title
    pub fn sections_for_heading<'a>(&'a self, title: &'a str) -> impl Iterator<Item = Section> + 'a {
        self.sections
            .iter()
            .filter(move |(_, synonyms)| synonyms.is_match(title))
            .map(|(section, _)| *section)
    }

    /// Slop phrases, built-ins first
    pub fn slop_phrases(&self) -> &[SlopPhrase] {
        &self.slop
    }
}

/// Regex source for a phrase: words joined by flexible whitespace, word
/// boundaries only where the phrase edge is a word character, and either
/// apostrophe accepted.
fn phrase_pattern(phrase: &str) -> String {
    let body = phrase
        .split_whitespace()
        .map(|w| regex::escape(w).replace('\'', "['’]"))
        .collect::<Vec<_>>()
        .join(r"\s+");

    let is_word = |c: Option<char>| c.map_or(false, |c| c.is_alphanumeric() || c == '_');
    let lead = if is_word(phrase.trim().chars().next()) { r"\b" } else { "" };
    let trail = if is_word(phrase.trim().chars().last()) { r"\b" } else { "" };
    format!("{}{}{}", lead, body, trail)
}
