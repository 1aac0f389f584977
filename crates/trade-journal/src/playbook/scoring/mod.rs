//! Setup scoring: turns a trader's checklist into a normalized score and a letter grade.
//!
//! Scoring is pure. The same call backs the live editor preview and the one-shot
//! computation frozen into a trade at save time.

mod aggregate;
mod grade;

pub use grade::{lowest_grade, map_grade, FALLBACK_GRADE};

use serde::{Deserialize, Serialize};

use super::domain::{non_negative, CheckMap, CheckState, Confluence, Rule};
use super::rubric::Rubric;
use aggregate::{aggregate, Aggregate};

/// Decimal places kept in a final score. Rounding once here absorbs float noise from the
/// weighted sum so cutoffs can be compared exactly.
const SCORE_DECIMALS: i32 = 12;

/// Extra influence of a primary confluence over an ordinary one.
pub const DEFAULT_PRIMARY_CONFLUENCE_MULTIPLIER: f64 = 2.0;

/// Engine-wide knobs that are not part of a playbook's rubric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringOptions {
    pub primary_confluence_multiplier: f64,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self {
            primary_confluence_multiplier: DEFAULT_PRIMARY_CONFLUENCE_MULTIPLIER,
        }
    }
}

/// Everything needed to score one setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreInput {
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub rules_checked: CheckMap,
    #[serde(default)]
    pub confluences: Vec<Confluence>,
    #[serde(default)]
    pub conf_checked: CheckMap,
    #[serde(default = "Rubric::standard")]
    pub rubric: Rubric,
}

impl ScoreInput {
    pub fn new(
        rules: Vec<Rule>,
        confluences: Vec<Confluence>,
        checks: CheckState,
        rubric: Rubric,
    ) -> Self {
        Self {
            rules,
            rules_checked: checks.rules_checked,
            confluences,
            conf_checked: checks.confluences_checked,
            rubric,
        }
    }

    pub fn check_state(&self) -> CheckState {
        CheckState {
            rules_checked: self.rules_checked.clone(),
            confluences_checked: self.conf_checked.clone(),
        }
    }
}

/// Breakdown reported next to the score. Counts are display-only tallies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreParts {
    pub rules_pct: Option<f64>,
    pub conf_pct: Option<f64>,
    pub missed_must: bool,
    pub must_hit: u32,
    pub must_count: u32,
    pub should_hit: u32,
    pub should_count: u32,
    pub optional_hit: u32,
    pub optional_count: u32,
    pub primary_conf_hit: u32,
    pub primary_conf_count: u32,
    pub conf_hit: u32,
    pub conf_count: u32,
    pub total_checked: u32,
    pub below_min_checks: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: f64,
    pub grade: String,
    pub parts: ScoreParts,
}

/// Stateless scorer. Cheap to build and safe to call on every checkbox toggle.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine {
    options: ScoringOptions,
}

impl ScoringEngine {
    pub fn new(options: ScoringOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ScoringOptions {
        self.options
    }

    pub fn score(&self, input: &ScoreInput) -> ScoreResult {
        let multiplier = non_negative(Some(self.options.primary_confluence_multiplier));
        let rubric = &input.rubric;

        let rules = aggregate(&input.rules, &input.rules_checked, multiplier);
        let confluences = aggregate(&input.confluences, &input.conf_checked, multiplier);

        let missed_must = rules.tallies.must.hit < rules.tallies.must.count;

        // Categories without scorable items contribute nothing; their weight is not
        // handed to the other category.
        let composed = contribution(rubric.weight_rules, &rules)
            + contribution(rubric.weight_confluences, &confluences);

        let penalized = if missed_must {
            composed - non_negative(Some(rubric.must_rule_penalty))
        } else {
            composed
        };
        let score = settle_score(penalized);

        let total_checked = rules.tallies.hits() + confluences.tallies.hits();
        let below_min_checks = f64::from(total_checked) < non_negative(Some(rubric.min_checks));

        let grade = if below_min_checks {
            grade::floor_grade(&rubric.grade_cutoffs)
        } else {
            map_grade(score, &rubric.grade_cutoffs)
        };

        let confluence_tally = confluences.tallies;
        ScoreResult {
            score,
            grade,
            parts: ScoreParts {
                rules_pct: rules.sub_score,
                conf_pct: confluences.sub_score,
                missed_must,
                must_hit: rules.tallies.must.hit,
                must_count: rules.tallies.must.count,
                should_hit: rules.tallies.should.hit,
                should_count: rules.tallies.should.count,
                optional_hit: rules.tallies.optional.hit,
                optional_count: rules.tallies.optional.count,
                primary_conf_hit: confluence_tally.primary_confluence.hit,
                primary_conf_count: confluence_tally.primary_confluence.count,
                conf_hit: confluence_tally.primary_confluence.hit + confluence_tally.confluence.hit,
                conf_count: confluence_tally.primary_confluence.count
                    + confluence_tally.confluence.count,
                total_checked,
                below_min_checks,
            },
        }
    }
}

/// Score a setup with the default engine options.
pub fn score_setup(input: &ScoreInput) -> ScoreResult {
    ScoringEngine::default().score(input)
}

fn contribution(weight: f64, category: &Aggregate) -> f64 {
    match category.sub_score {
        Some(sub_score) => non_negative(Some(weight)) * sub_score,
        None => 0.0,
    }
}

fn settle_score(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    let scale = 10f64.powi(SCORE_DECIMALS);
    (value.clamp(0.0, 1.0) * scale).round() / scale
}
