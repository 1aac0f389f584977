use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use trade_journal::playbook::{RepositoryError, SetupSnapshot, SnapshotRepository, TradeId};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local snapshot store used until the journal database adapter is wired in.
#[derive(Default, Clone)]
pub(crate) struct InMemorySnapshotRepository {
    records: Arc<Mutex<HashMap<TradeId, SetupSnapshot>>>,
}

impl SnapshotRepository for InMemorySnapshotRepository {
    fn insert(&self, snapshot: SetupSnapshot) -> Result<SetupSnapshot, RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("snapshot store poisoned".to_string()))?;
        if guard.contains_key(&snapshot.trade_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(snapshot.trade_id.clone(), snapshot.clone());
        Ok(snapshot)
    }

    fn fetch(&self, trade_id: &TradeId) -> Result<Option<SetupSnapshot>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("snapshot store poisoned".to_string()))?;
        Ok(guard.get(trade_id).cloned())
    }
}
