use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::Rubric;

/// First inconsistency found in a rubric.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RubricError {
    #[error("{field} must be between 0 and 1 (got {value})")]
    WeightOutOfRange { field: &'static str, value: f64 },
    #[error("min_checks must be a whole number of at least 0 (got {value})")]
    InvalidMinChecks { value: f64 },
    #[error("at least one grade cutoff is required")]
    NoGradeCutoffs,
    #[error("cutoff for grade '{label}' must be between 0 and 1 (got {value})")]
    CutoffOutOfRange { label: String, value: f64 },
    #[error("grade labels must not be blank")]
    BlankGradeLabel,
    #[error("grade label '{label}' is declared more than once")]
    DuplicateGradeLabel { label: String },
}

/// Result shape handed to rubric editors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricValidation {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<(), RubricError>> for RubricValidation {
    fn from(result: Result<(), RubricError>) -> Self {
        match result {
            Ok(()) => RubricValidation {
                valid: true,
                error: None,
            },
            Err(err) => RubricValidation {
                valid: false,
                error: Some(err.to_string()),
            },
        }
    }
}

pub fn validate_rubric(rubric: &Rubric) -> RubricValidation {
    rubric.validate().into()
}

pub(super) fn check(rubric: &Rubric) -> Result<(), RubricError> {
    let weights = [
        ("weight_rules", rubric.weight_rules),
        ("weight_confluences", rubric.weight_confluences),
        ("weight_checklist", rubric.weight_checklist),
        ("must_rule_penalty", rubric.must_rule_penalty),
    ];
    for (field, value) in weights {
        if !within_unit_interval(value) {
            return Err(RubricError::WeightOutOfRange { field, value });
        }
    }

    let min_checks = rubric.min_checks;
    if !min_checks.is_finite() || min_checks < 0.0 || min_checks.fract() != 0.0 {
        return Err(RubricError::InvalidMinChecks { value: min_checks });
    }

    if rubric.grade_cutoffs.is_empty() {
        return Err(RubricError::NoGradeCutoffs);
    }

    for entry in rubric.grade_cutoffs.iter() {
        if !within_unit_interval(entry.cutoff) {
            return Err(RubricError::CutoffOutOfRange {
                label: entry.label.clone(),
                value: entry.cutoff,
            });
        }
    }

    let mut seen = HashSet::new();
    for entry in rubric.grade_cutoffs.iter() {
        let label = entry.label.trim();
        if label.is_empty() {
            return Err(RubricError::BlankGradeLabel);
        }
        if !seen.insert(label.to_lowercase()) {
            return Err(RubricError::DuplicateGradeLabel {
                label: label.to_string(),
            });
        }
    }

    Ok(())
}

// NaN fails both comparisons.
fn within_unit_interval(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}
