use chrono::Utc;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::domain::{PredictionId, PredictionRecord, PredictionResult, ValidatedRequest};

/// Assemble the write-once record for a scored request: a fresh
/// UUIDv4 identifier and the creation instant in UTC. Currency values
/// cross to `Decimal` here so the persisted amounts are exact.
pub fn build_record(request: &ValidatedRequest, result: &PredictionResult) -> PredictionRecord {
    PredictionRecord {
        prediction_id: PredictionId(Uuid::new_v4().to_string()),
        timestamp: Utc::now(),
        bmi: to_decimal(request.bmi),
        smoker: request.smoker_flag(),
        age: request.age,
        predicted_cost: to_decimal(result.predicted_cost),
    }
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value)
        .unwrap_or_default()
        .round_dp(2)
}
