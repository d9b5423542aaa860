//! Json api over the extractors
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{
    error::ExtractError,
    extract::{LineCatalogExtractor, ScheduleExtractor},
    model::{LineDescriptor, LineSchedule},
};

#[derive(Clone)]
pub struct AppState {
    pub catalog: LineCatalogExtractor,
    pub schedules: ScheduleExtractor,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/lines", get(get_lines))
        .route("/lines/{line}/schedule", get(get_schedule))
        .with_state(state)
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LinesResponse {
    pub lines: Vec<LineDescriptor>,
}

pub async fn get_lines(State(state): State<AppState>) -> Result<Response, ApiError> {
    let lines = state.catalog.all_lines().await?;

    Ok(allow_any_origin(Json(LinesResponse { lines })))
}

pub async fn get_schedule(
    State(state): State<AppState>,
    Path(line): Path<String>,
) -> Result<Response, ApiError> {
    let schedule: LineSchedule = state.schedules.schedule(&line).await?;

    Ok(allow_any_origin(Json(schedule)))
}

fn allow_any_origin(response: impl IntoResponse) -> Response {
    ([(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")], response).into_response()
}

#[derive(Debug)]
pub struct ApiError(ExtractError);

impl From<ExtractError> for ApiError {
    fn from(value: ExtractError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            ExtractError::Fetch(_) | ExtractError::MalformedHeader { .. } => {
                StatusCode::BAD_GATEWAY
            }
            ExtractError::Selector { .. } | ExtractError::InvalidUrl { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        error!("{:?}", self.0);

        allow_any_origin((
            status,
            Json(serde_json::json!({ "error": self.0.to_string() })),
        ))
    }
}
