use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use premia_ai::prediction::{PredictionId, PredictionRecord, PredictionStore, StoreError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local store keyed by prediction id. Insert-only, matching
/// the write-once record lifecycle; durable stores sit behind the
/// same trait as external collaborators.
#[derive(Default, Clone)]
pub(crate) struct InMemoryPredictionStore {
    records: Arc<Mutex<HashMap<PredictionId, PredictionRecord>>>,
}

impl InMemoryPredictionStore {
    #[cfg(test)]
    pub(crate) fn records(&self) -> Vec<PredictionRecord> {
        self.records
            .lock()
            .expect("store mutex poisoned")
            .values()
            .cloned()
            .collect()
    }
}

impl PredictionStore for InMemoryPredictionStore {
    fn put(&self, record: PredictionRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.contains_key(&record.prediction_id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.prediction_id.clone(), record);
        Ok(())
    }
}
