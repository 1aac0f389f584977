use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::domain::TradeId;
use super::rubric::{Rubric, RubricError, RubricValidation};
use super::scoring::{ScoreInput, ScoreResult, ScoringEngine, ScoringOptions};
use super::snapshot::{RepositoryError, SetupSnapshot, SnapshotRepository};

/// Facade over the two ways a setup gets scored: a reactive preview that runs on every
/// edit, and a one-shot commit that freezes the result into a trade.
pub struct SetupScoringService<R> {
    engine: ScoringEngine,
    repository: Arc<R>,
}

impl<R> SetupScoringService<R>
where
    R: SnapshotRepository + 'static,
{
    pub fn new(repository: Arc<R>, options: ScoringOptions) -> Self {
        Self {
            engine: ScoringEngine::new(options),
            repository,
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Score without side effects. Never fails, whatever the rubric looks like.
    pub fn preview(&self, input: &ScoreInput) -> ScoreResult {
        let result = self.engine.score(input);
        debug!(
            playbook = %input.rubric.playbook_id.0,
            score = result.score,
            grade = %result.grade,
            "setup preview scored"
        );
        result
    }

    pub fn validate(&self, rubric: &Rubric) -> RubricValidation {
        rubric.validate().into()
    }

    /// Score once and freeze the result onto the trade.
    pub fn commit(
        &self,
        trade_id: TradeId,
        input: &ScoreInput,
    ) -> Result<SetupSnapshot, SetupServiceError> {
        input.rubric.validate()?;
        for warning in input.rubric.weight_warnings() {
            warn!(playbook = %input.rubric.playbook_id.0, %warning, "rubric weights look off");
        }

        if self.repository.fetch(&trade_id)?.is_some() {
            return Err(RepositoryError::Conflict.into());
        }

        let result = self.engine.score(input);
        let snapshot = SetupSnapshot::freeze(trade_id, input, &result, Utc::now());
        let stored = self.repository.insert(snapshot)?;

        info!(
            trade = %stored.trade_id.0,
            score = stored.setup_score,
            grade = %stored.setup_grade,
            "setup snapshot frozen"
        );
        Ok(stored)
    }

    pub fn snapshot(&self, trade_id: &TradeId) -> Result<SetupSnapshot, SetupServiceError> {
        let snapshot = self
            .repository
            .fetch(trade_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(snapshot)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SetupServiceError {
    #[error("invalid rubric: {0}")]
    Rubric(#[from] RubricError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
