use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{PredictionRecord, ValidatedRequest};

/// Transport-agnostic success payload returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction_id: String,
    pub predicted_cost: f64,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl PredictionResponse {
    pub fn from_record(request: &ValidatedRequest, record: &PredictionRecord, cost: f64) -> Self {
        let message = format!(
            "Model predicts: A policy holder with BMI {}, {} status, and age {} \
             will incur insurance cost of ${} annually",
            request.bmi,
            request.smoker_label(),
            request.age,
            format_currency(cost),
        );

        Self {
            prediction_id: record.prediction_id.0.clone(),
            predicted_cost: cost,
            message,
            timestamp: record.timestamp,
        }
    }
}

/// Two-decimal rendering with thousands separators, e.g. `3,774.67`.
fn format_currency(value: f64) -> String {
    let rendered = format!("{value:.2}");
    let (whole, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (position, digit) in whole.chars().enumerate() {
        if position > 0 && (whole.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{grouped}.{fraction}")
}
