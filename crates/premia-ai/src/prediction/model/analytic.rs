//! Fixed hand-authored rule ensemble: five piecewise-linear "trees"
//! combined by weighted voting. No fitting step; every constant is
//! part of the model definition.

use super::{round_currency, CostModel};
use crate::prediction::domain::ValidatedRequest;

/// Per-tree voting weights: age, bmi, smoking, combined risk,
/// interaction. Smoking carries the highest weight. Must sum to 1.0.
const WEIGHTS: [f64; 5] = [0.20, 0.15, 0.35, 0.20, 0.10];

/// Bounds keeping the weighted vote inside realistic annual costs.
const COST_FLOOR: f64 = 1200.0;
const COST_CEILING: f64 = 45000.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEnsemble;

impl AnalyticEnsemble {
    pub fn new() -> Self {
        Self
    }
}

impl CostModel for AnalyticEnsemble {
    fn name(&self) -> &'static str {
        "analytic-ensemble"
    }

    fn predict(&self, request: &ValidatedRequest) -> f64 {
        let votes = [
            age_tree(request.age),
            bmi_tree(request.bmi),
            smoking_tree(request.smoker),
            combined_risk_tree(request),
            interaction_tree(request),
        ];

        let weighted: f64 = votes
            .iter()
            .zip(WEIGHTS.iter())
            .map(|(vote, weight)| vote * weight)
            .sum();

        round_currency(weighted.clamp(COST_FLOOR, COST_CEILING))
    }
}

/// Four linear segments over age brackets, each anchored at its
/// bracket's lower bound.
fn age_tree(age: u8) -> f64 {
    let age = f64::from(age);
    if age < 25.0 {
        2500.0 + (age - 18.0) * 150.0
    } else if age < 35.0 {
        3500.0 + (age - 25.0) * 200.0
    } else if age < 50.0 {
        5500.0 + (age - 35.0) * 250.0
    } else {
        9250.0 + (age - 50.0) * 300.0
    }
}

/// Four linear segments over bmi brackets. The underweight segment's
/// slope is inverted: cost grows as bmi falls below 18.5.
fn bmi_tree(bmi: f64) -> f64 {
    if bmi < 18.5 {
        3000.0 + (18.5 - bmi) * 100.0
    } else if bmi < 25.0 {
        2800.0 + (bmi - 18.5) * 50.0
    } else if bmi < 30.0 {
        3125.0 + (bmi - 25.0) * 200.0
    } else {
        4125.0 + (bmi - 30.0) * 300.0
    }
}

fn smoking_tree(smoker: bool) -> f64 {
    if smoker {
        15000.0
    } else {
        3000.0
    }
}

/// Conditional cascade over compounding risk factors; conditions are
/// checked in priority order and the first match wins.
fn combined_risk_tree(request: &ValidatedRequest) -> f64 {
    let age = f64::from(request.age);
    let bmi = request.bmi;

    if request.smoker && bmi > 30.0 {
        18000.0 + (bmi - 30.0) * 500.0
    } else if request.smoker && age > 45.0 {
        16000.0 + (age - 45.0) * 400.0
    } else if bmi > 35.0 && age > 50.0 {
        12000.0 + (bmi - 35.0) * 200.0 + (age - 50.0) * 150.0
    } else {
        4000.0
    }
}

fn interaction_tree(request: &ValidatedRequest) -> f64 {
    let interaction = f64::from(request.age) * request.bmi / 100.0;
    if interaction > 1500.0 {
        5000.0 + (interaction - 1500.0) * 2.0
    } else {
        3500.0 + interaction
    }
}
