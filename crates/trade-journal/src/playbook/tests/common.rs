use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::playbook::domain::{CheckMap, Confluence, PlaybookId, Rule, RuleKind, TradeId};
use crate::playbook::rubric::{GradeCutoffs, Rubric};
use crate::playbook::scoring::{ScoreInput, ScoringOptions};
use crate::playbook::service::SetupScoringService;
use crate::playbook::setup_router;
use crate::playbook::snapshot::{RepositoryError, SetupSnapshot, SnapshotRepository};

pub(super) const EPSILON: f64 = 1e-9;

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn reference_rubric() -> Rubric {
    Rubric {
        playbook_id: PlaybookId("london-breakout".to_string()),
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

pub(super) fn reference_rules() -> Vec<Rule> {
    vec![
        Rule::new("r1", RuleKind::Must, 1.0),
        Rule::new("r2", RuleKind::Should, 1.0),
    ]
}

pub(super) fn reference_confluences() -> Vec<Confluence> {
    vec![Confluence::new("c1", 1.0, true)]
}

pub(super) fn checked<'a>(ids: impl IntoIterator<Item = &'a str>) -> CheckMap {
    ids.into_iter().map(|id| (id.to_string(), true)).collect()
}

/// Every rule and confluence ticked.
pub(super) fn full_compliance(
    rules: Vec<Rule>,
    confluences: Vec<Confluence>,
    rubric: Rubric,
) -> ScoreInput {
    let rules_checked = checked(rules.iter().map(|rule| rule.id.as_str()));
    let conf_checked = checked(confluences.iter().map(|confluence| confluence.id.as_str()));
    ScoreInput {
        rules,
        rules_checked,
        confluences,
        conf_checked,
        rubric,
    }
}

pub(super) fn reference_input() -> ScoreInput {
    full_compliance(reference_rules(), reference_confluences(), reference_rubric())
}

pub(super) fn trade(id: &str) -> TradeId {
    TradeId(id.to_string())
}

#[derive(Default, Clone)]
pub(super) struct MemorySnapshots {
    records: Arc<Mutex<HashMap<TradeId, SetupSnapshot>>>,
}

impl SnapshotRepository for MemorySnapshots {
    fn insert(&self, snapshot: SetupSnapshot) -> Result<SetupSnapshot, RepositoryError> {
        let mut guard = self.records.lock().expect("snapshot mutex poisoned");
        if guard.contains_key(&snapshot.trade_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(snapshot.trade_id.clone(), snapshot.clone());
        Ok(snapshot)
    }

    fn fetch(&self, trade_id: &TradeId) -> Result<Option<SetupSnapshot>, RepositoryError> {
        let guard = self.records.lock().expect("snapshot mutex poisoned");
        Ok(guard.get(trade_id).cloned())
    }
}

impl MemorySnapshots {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("snapshot mutex poisoned").len()
    }
}

pub(super) struct UnavailableRepository;

impl SnapshotRepository for UnavailableRepository {
    fn insert(&self, _snapshot: SetupSnapshot) -> Result<SetupSnapshot, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _trade_id: &TradeId) -> Result<Option<SetupSnapshot>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (SetupScoringService<MemorySnapshots>, MemorySnapshots) {
    let repository = MemorySnapshots::default();
    let service = SetupScoringService::new(Arc::new(repository.clone()), ScoringOptions::default());
    (service, repository)
}

pub(super) fn router_with_service(service: SetupScoringService<MemorySnapshots>) -> axum::Router {
    setup_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
