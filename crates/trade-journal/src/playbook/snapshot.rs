use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{CheckMap, PlaybookId, TradeId};
use super::scoring::{ScoreInput, ScoreResult};

/// Setup fields written onto a trade record once, at save time.
///
/// The snapshot is a historical fact. Later edits to the playbook's rules or rubric never
/// touch it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupSnapshot {
    pub trade_id: TradeId,
    pub playbook_id: PlaybookId,
    pub rules_checked: CheckMap,
    pub confluences_checked: CheckMap,
    pub setup_score: f64,
    pub setup_grade: String,
    pub frozen_at: DateTime<Utc>,
}

impl SetupSnapshot {
    pub fn freeze(
        trade_id: TradeId,
        input: &ScoreInput,
        result: &ScoreResult,
        frozen_at: DateTime<Utc>,
    ) -> Self {
        let checks = input.check_state();
        Self {
            trade_id,
            playbook_id: input.rubric.playbook_id.clone(),
            rules_checked: checks.rules_checked,
            confluences_checked: checks.confluences_checked,
            setup_score: result.score,
            setup_grade: result.grade.clone(),
            frozen_at,
        }
    }
}

/// Storage abstraction for frozen snapshots. Implementations must refuse to overwrite.
pub trait SnapshotRepository: Send + Sync {
    fn insert(&self, snapshot: SetupSnapshot) -> Result<SetupSnapshot, RepositoryError>;
    fn fetch(&self, trade_id: &TradeId) -> Result<Option<SetupSnapshot>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("setup snapshot already frozen for this trade")]
    Conflict,
    #[error("setup snapshot not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
