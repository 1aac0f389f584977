use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

use super::domain::TradeId;
use super::presentation::{format_score, grade_color, GradeTier};
use super::rubric::Rubric;
use super::scoring::{ScoreInput, ScoreResult};
use super::service::{SetupScoringService, SetupServiceError};
use super::snapshot::{RepositoryError, SnapshotRepository};

/// Scored preview plus the strings a badge needs.
#[derive(Debug, Clone, Serialize)]
pub struct SetupPreviewView {
    #[serde(flatten)]
    pub result: ScoreResult,
    pub display: ScoreDisplay,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreDisplay {
    pub percent: String,
    pub tier: GradeTier,
}

impl From<ScoreResult> for SetupPreviewView {
    fn from(result: ScoreResult) -> Self {
        let display = ScoreDisplay {
            percent: format_score(result.score),
            tier: grade_color(&result.grade),
        };
        Self { result, display }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RubricReviewView {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub warnings: Vec<String>,
}

/// Router builder exposing preview, rubric validation, and snapshot endpoints.
pub fn setup_router<R>(service: Arc<SetupScoringService<R>>) -> Router
where
    R: SnapshotRepository + 'static,
{
    Router::new()
        .route("/api/v1/setups/preview", post(preview_handler::<R>))
        .route("/api/v1/rubrics/validate", post(validate_handler::<R>))
        .route(
            "/api/v1/trades/:trade_id/setup",
            post(commit_handler::<R>).get(snapshot_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn preview_handler<R>(
    State(service): State<Arc<SetupScoringService<R>>>,
    Json(input): Json<ScoreInput>,
) -> Json<SetupPreviewView>
where
    R: SnapshotRepository + 'static,
{
    Json(service.preview(&input).into())
}

pub(crate) async fn validate_handler<R>(
    State(service): State<Arc<SetupScoringService<R>>>,
    Json(rubric): Json<Rubric>,
) -> Json<RubricReviewView>
where
    R: SnapshotRepository + 'static,
{
    let validation = service.validate(&rubric);
    Json(RubricReviewView {
        valid: validation.valid,
        error: validation.error,
        warnings: rubric.weight_warnings(),
    })
}

pub(crate) async fn commit_handler<R>(
    State(service): State<Arc<SetupScoringService<R>>>,
    Path(trade_id): Path<String>,
    Json(input): Json<ScoreInput>,
) -> Response
where
    R: SnapshotRepository + 'static,
{
    match service.commit(TradeId(trade_id), &input) {
        Ok(snapshot) => (StatusCode::CREATED, Json(snapshot)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn snapshot_handler<R>(
    State(service): State<Arc<SetupScoringService<R>>>,
    Path(trade_id): Path<String>,
) -> Response
where
    R: SnapshotRepository + 'static,
{
    match service.snapshot(&TradeId(trade_id)) {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: SetupServiceError) -> Response {
    let status = match &error {
        SetupServiceError::Rubric(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SetupServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        SetupServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        SetupServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}
