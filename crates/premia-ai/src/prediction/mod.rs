//! Insurance cost prediction pipeline: validation, scoring, record
//! assembly, and the orchestrating service. The storage trait keeps
//! durable stores behind a seam so the pipeline can be exercised in
//! isolation.

pub mod domain;
pub mod model;
pub mod record;
pub mod repository;
pub mod response;
pub mod service;
pub mod validate;

pub use domain::{PredictionId, PredictionRecord, PredictionResult, ValidatedRequest};
pub use model::{default_engine, AnalyticEnsemble, CostModel, FittedForest};
pub use record::build_record;
pub use repository::{PredictionStore, StoreError};
pub use response::PredictionResponse;
pub use service::{PredictionError, PredictionService};
pub use validate::{validate, ValidationError};
