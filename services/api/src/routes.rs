use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde_json::{json, Value};
use tracing::error;

use premia_ai::prediction::{PredictionError, PredictionService, PredictionStore};

use crate::infra::AppState;

const GENERIC_FAULT: &str = "Internal server error";

pub(crate) fn prediction_router<S>(service: Arc<PredictionService<S>>) -> Router
where
    S: PredictionStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/predictions",
            post(predict_handler::<S>).options(preflight_handler),
        )
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(service)
}

/// Parse and score one request. The body is taken raw so a malformed
/// payload maps to the generic fault payload instead of extractor
/// rejection text.
pub(crate) async fn predict_handler<S>(
    State(service): State<Arc<PredictionService<S>>>,
    body: Bytes,
) -> Response
where
    S: PredictionStore + 'static,
{
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(parse_error) => {
            error!(%parse_error, "request body is not valid JSON");
            return fault_response();
        }
    };

    match service.predict(&payload) {
        Ok(response) => (
            StatusCode::OK,
            [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
            Json(response),
        )
            .into_response(),
        Err(PredictionError::Invalid(reason)) => (
            StatusCode::BAD_REQUEST,
            [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
            Json(json!({ "error": reason.to_string() })),
        )
            .into_response(),
        Err(fault) => {
            error!(%fault, "prediction pipeline fault");
            fault_response()
        }
    }
}

/// CORS preflight for the prediction route: empty success granting
/// POST/OPTIONS and the content-type header.
pub(crate) async fn preflight_handler() -> Response {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
        ],
    )
        .into_response()
}

fn fault_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(json!({ "error": GENERIC_FAULT })),
    )
        .into_response()
}

pub(crate) async fn healthcheck() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
