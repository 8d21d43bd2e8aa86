use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::model::CostModel;
use super::record::build_record;
use super::repository::{PredictionStore, StoreError};
use super::response::PredictionResponse;
use super::validate::{validate, ValidationError};

/// Service composing the validator, scoring engine, record builder,
/// and storage seam. Holds only immutable shared state, so concurrent
/// requests need no coordination here.
pub struct PredictionService<S> {
    engine: Arc<dyn CostModel>,
    store: Arc<S>,
}

impl<S> PredictionService<S>
where
    S: PredictionStore + 'static,
{
    pub fn new(engine: Arc<dyn CostModel>, store: Arc<S>) -> Self {
        Self { engine, store }
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Run the linear pipeline for one already-parsed payload:
    /// validate, score, build the record, persist it once, format the
    /// response. Validation failures never reach the store.
    pub fn predict(&self, payload: &Value) -> Result<PredictionResponse, PredictionError> {
        let request = validate(payload)?;
        let result = self.engine.score(&request);
        let record = build_record(&request, &result);

        self.store.put(record.clone())?;

        debug!(
            prediction_id = %record.prediction_id,
            engine = self.engine.name(),
            cost = result.predicted_cost,
            "prediction stored"
        );

        Ok(PredictionResponse::from_record(
            &request,
            &record,
            result.predicted_cost,
        ))
    }
}

/// Error raised by the prediction pipeline. `Invalid` is the
/// client-recoverable class and carries a field-level reason safe to
/// surface verbatim; everything else is a fault reported generically.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
