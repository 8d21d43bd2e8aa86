use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for stored predictions. Holds a UUIDv4 string;
/// generated once per record and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PredictionId(pub String);

impl std::fmt::Display for PredictionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request attributes after domain validation. Only the validator
/// constructs this, so the scoring engines can assume
/// 15 <= bmi <= 60 and 18 <= age <= 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidatedRequest {
    pub bmi: f64,
    pub smoker: bool,
    pub age: u8,
}

impl ValidatedRequest {
    pub const fn smoker_label(&self) -> &'static str {
        if self.smoker {
            "smoker"
        } else {
            "non-smoker"
        }
    }

    /// Smoker flag in its 0/1 wire and storage form.
    pub const fn smoker_flag(&self) -> u8 {
        if self.smoker {
            1
        } else {
            0
        }
    }
}

/// Output of a scoring engine: a non-negative annual cost already
/// rounded to two decimals. A pure function of the request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_cost: f64,
}

/// The durable, write-once artifact capturing one prediction event.
/// Monetary values are carried as `Decimal` so persisted amounts do
/// not pick up binary-float drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub prediction_id: PredictionId,
    pub timestamp: DateTime<Utc>,
    pub bmi: Decimal,
    pub smoker: u8,
    pub age: u8,
    pub predicted_cost: Decimal,
}
