use std::sync::Arc;

use clap::Args;
use premia_ai::error::AppError;
use premia_ai::prediction::{default_engine, PredictionError, PredictionService};
use serde_json::json;

use crate::infra::InMemoryPredictionStore;

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    /// Body-mass index, between 15 and 60
    #[arg(long)]
    pub(crate) bmi: f64,
    /// Age in years, between 18 and 100
    #[arg(long)]
    pub(crate) age: u32,
    /// Smoker flag, 0 or 1
    #[arg(long)]
    pub(crate) smoker: u32,
}

/// One-shot scoring against an in-process store so the full pipeline
/// can be demonstrated without the HTTP server.
pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let engine = default_engine();
    let store = Arc::new(InMemoryPredictionStore::default());
    let service = PredictionService::new(engine, store);

    let payload = json!({
        "bmi": args.bmi,
        "age": args.age,
        "New_Smoker": args.smoker,
    });

    let rendered = match service.predict(&payload) {
        Ok(response) => serde_json::to_string_pretty(&response),
        Err(PredictionError::Invalid(reason)) => {
            serde_json::to_string_pretty(&json!({ "error": reason.to_string() }))
        }
        Err(_) => serde_json::to_string_pretty(&json!({ "error": "Internal server error" })),
    };

    match rendered {
        Ok(text) => {
            println!("{text}");
            Ok(())
        }
        Err(error) => Err(AppError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            error,
        ))),
    }
}
