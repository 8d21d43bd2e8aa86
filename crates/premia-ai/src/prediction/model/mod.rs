//! Scoring engines mapping a validated request to a predicted annual
//! cost. Both engines are pure and deterministic; the variant is a
//! build-time choice via the `fitted-model` feature, not a
//! per-request one.

pub mod analytic;
pub mod forest;

use std::sync::Arc;

use super::domain::{PredictionResult, ValidatedRequest};

pub use analytic::AnalyticEnsemble;
pub use forest::FittedForest;

/// A deterministic, side-effect-free cost model. Identical input must
/// yield the identical output across repeated calls and across
/// process restarts.
pub trait CostModel: Send + Sync {
    fn name(&self) -> &'static str;

    /// Predicted annual cost, non-negative and rounded to 2 decimals.
    fn predict(&self, request: &ValidatedRequest) -> f64;

    fn score(&self, request: &ValidatedRequest) -> PredictionResult {
        PredictionResult {
            predicted_cost: self.predict(request),
        }
    }
}

/// Build the engine selected at compile time. Construction is the
/// expensive part for the fitted forest; the composition root calls
/// this once at startup and shares the result read-only.
#[cfg(not(feature = "fitted-model"))]
pub fn default_engine() -> Arc<dyn CostModel> {
    Arc::new(AnalyticEnsemble::new())
}

#[cfg(feature = "fitted-model")]
pub fn default_engine() -> Arc<dyn CostModel> {
    Arc::new(FittedForest::fit())
}

/// Round to 2 decimal places; the explicit, final rounding step for
/// every engine output.
pub(crate) fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_is_two_decimal_places() {
        assert_eq!(round_currency(3774.674), 3774.67);
        assert_eq!(round_currency(3774.675), 3774.68);
        assert_eq!(round_currency(1200.0), 1200.0);
    }

    #[test]
    fn default_engine_is_deterministic() {
        let engine = default_engine();
        let request = ValidatedRequest {
            bmi: 29.0,
            smoker: true,
            age: 52,
        };
        let first = engine.predict(&request);
        let second = engine.predict(&request);
        assert_eq!(first, second);
        assert!(first >= 0.0);
    }
}
