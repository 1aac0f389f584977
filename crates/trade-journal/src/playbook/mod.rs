//! Playbook setup scoring: rubric validation, weighted checklist aggregation, must-rule
//! penalties, grading, and the frozen snapshot written onto trades.

pub mod domain;
pub mod presentation;
pub mod router;
pub mod rubric;
pub mod scoring;
pub mod service;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use domain::{
    CheckMap, CheckState, Confluence, PlaybookConfluenceRow, PlaybookId, PlaybookRuleRow, Rule,
    RuleKind, TradeId,
};
pub use presentation::{format_score, grade_color, GradeTier};
pub use router::setup_router;
pub use rubric::{
    default_rubric, validate_rubric, GradeCutoff, GradeCutoffs, Rubric, RubricError,
    RubricValidation,
};
pub use scoring::{
    lowest_grade, map_grade, score_setup, ScoreInput, ScoreParts, ScoreResult, ScoringEngine,
    ScoringOptions, DEFAULT_PRIMARY_CONFLUENCE_MULTIPLIER, FALLBACK_GRADE,
};
pub use service::{SetupScoringService, SetupServiceError};
pub use snapshot::{RepositoryError, SetupSnapshot, SnapshotRepository};
