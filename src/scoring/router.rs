use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde_json::json;

use super::service::{ScoreSubmission, TabulationError, TabulationService};
use super::store::ScoreStore;

/// Router builder exposing the three tabulation operations.
pub fn scoring_router<S>(service: Arc<TabulationService<S>>) -> Router
where
    S: ScoreStore + 'static,
{
    Router::new()
        .route("/api/v1/scores", post(submit_handler::<S>))
        .route("/api/v1/results/:category", get(results_handler::<S>))
        .route("/api/v1/overall/recompute", post(recompute_handler::<S>))
        .with_state(service)
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<TabulationService<S>>>,
    axum::Json(submission): axum::Json<ScoreSubmission>,
) -> Response
where
    S: ScoreStore + 'static,
{
    match service.submit_score(submission) {
        Ok(()) => (
            StatusCode::OK,
            axum::Json(json!({
                "status": "success",
                "message": "Score submitted successfully",
            })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn results_handler<S>(
    State(service): State<Arc<TabulationService<S>>>,
    Path(category): Path<String>,
) -> Response
where
    S: ScoreStore + 'static,
{
    match service.results(&category) {
        Ok(results) => (
            StatusCode::OK,
            axum::Json(json!({
                "status": "success",
                "results": results,
            })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn recompute_handler<S>(
    State(service): State<Arc<TabulationService<S>>>,
) -> Response
where
    S: ScoreStore + 'static,
{
    match service.recompute_overall() {
        Ok(count) => (
            StatusCode::OK,
            axum::Json(json!({
                "status": "success",
                "message": "Overall scores calculated successfully",
                "candidates": count,
            })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: TabulationError) -> Response {
    let status = match &err {
        TabulationError::InvalidCategory(_) => StatusCode::BAD_REQUEST,
        TabulationError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        TabulationError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        axum::Json(json!({
            "status": "error",
            "message": err.to_string(),
        })),
    )
        .into_response()
}
