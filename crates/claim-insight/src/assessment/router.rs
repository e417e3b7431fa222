use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::history::HistoryStore;
use super::narrative::KnownFields;
use super::service::{AssessmentService, ClaimSubmission};

/// Body of a decode request: the narrative plus whatever fields the caller still has.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DecodeRequest {
    pub description: String,
    #[serde(flatten)]
    pub known: KnownFields,
}

/// Router exposing claim assessment, narrative decoding and history listing.
pub fn assessment_router<H>(service: Arc<AssessmentService<H>>) -> Router
where
    H: HistoryStore + 'static,
{
    Router::new()
        .route("/api/v1/claims/assess", post(assess_handler::<H>))
        .route("/api/v1/claims/decode", post(decode_handler::<H>))
        .route("/api/v1/claims/history", get(history_handler::<H>))
        .with_state(service)
}

pub(crate) async fn assess_handler<H>(
    State(service): State<Arc<AssessmentService<H>>>,
    axum::Json(submission): axum::Json<ClaimSubmission>,
) -> Response
where
    H: HistoryStore + 'static,
{
    match tokio::task::spawn_blocking(move || service.assess(submission)).await {
        Ok(Ok(record)) => (StatusCode::OK, axum::Json(record)).into_response(),
        Ok(Err(error)) => internal_error(error),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn decode_handler<H>(
    State(service): State<Arc<AssessmentService<H>>>,
    axum::Json(request): axum::Json<DecodeRequest>,
) -> Response
where
    H: HistoryStore + 'static,
{
    let report = service.decode(&request.description, &request.known);
    (StatusCode::OK, axum::Json(report)).into_response()
}

pub(crate) async fn history_handler<H>(State(service): State<Arc<AssessmentService<H>>>) -> Response
where
    H: HistoryStore + 'static,
{
    match tokio::task::spawn_blocking(move || service.history()).await {
        Ok(Ok(entries)) => (StatusCode::OK, axum::Json(entries)).into_response(),
        Ok(Err(error)) => internal_error(error),
        Err(error) => internal_error(error),
    }
}

fn internal_error(error: impl std::fmt::Display) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
