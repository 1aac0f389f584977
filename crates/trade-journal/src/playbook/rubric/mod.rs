mod cutoffs;
mod validation;

pub use cutoffs::{GradeCutoff, GradeCutoffs};
pub use validation::{validate_rubric, RubricError, RubricValidation};

use serde::{Deserialize, Deserializer, Serialize};

use super::domain::PlaybookId;

/// Tolerance used when comparing summed category weights against 1.
const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Per-playbook scoring configuration.
///
/// Rubrics are user-authored data. Every numeric field deserializes leniently: a missing or
/// `null` value becomes `0` and is left for [`Rubric::validate`] to judge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rubric {
    #[serde(default)]
    pub playbook_id: PlaybookId,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub weight_rules: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub weight_confluences: f64,
    /// Reserved. No checklist category is wired into scoring yet.
    #[serde(default, deserialize_with = "zero_if_null")]
    pub weight_checklist: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub must_rule_penalty: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub min_checks: f64,
    #[serde(default)]
    pub grade_cutoffs: GradeCutoffs,
}

impl Rubric {
    /// The rubric a playbook gets before its owner customises anything.
    pub fn standard() -> Self {
        Self {
            playbook_id: PlaybookId::default(),
            weight_rules: 0.7,
            weight_confluences: 0.3,
            weight_checklist: 0.0,
            must_rule_penalty: 0.4,
            min_checks: 0.0,
            grade_cutoffs: GradeCutoffs::from_iter([
                ("A+", 0.95),
                ("A", 0.9),
                ("B", 0.8),
                ("C", 0.7),
                ("D", 0.6),
            ]),
        }
    }

    pub fn for_playbook(mut self, playbook_id: PlaybookId) -> Self {
        self.playbook_id = playbook_id;
        self
    }

    pub fn validate(&self) -> Result<(), RubricError> {
        validation::check(self)
    }

    /// Advisory notes for a rubric editor. These never block saving or scoring.
    pub fn weight_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let sum = finite_or_zero(self.weight_rules) + finite_or_zero(self.weight_confluences);
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            warnings.push(format!(
                "rule and confluence weights sum to {sum:.2} instead of 1.00"
            ));
        }

        if finite_or_zero(self.weight_checklist) != 0.0 {
            warnings.push("weight_checklist is reserved and does not affect the score".to_string());
        }

        warnings
    }
}

pub fn default_rubric() -> Rubric {
    Rubric::standard()
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn zero_if_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}
