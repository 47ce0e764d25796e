use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use validator::Validate;

use crate::domain::report::{
    action::{ActionOutcome, ModerationAction},
    category::{CategoryPage, ReportCategory},
};
use crate::domain::shared::pagination::PaginationRequest;
use crate::presentation::http::{errors::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ReportsQuery {
    #[serde(default)]
    pub category: ReportCategory,
    #[serde(default = "default_page")]
    pub page: u32,
    pub limit: Option<u32>,
}

fn default_page() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct ReportActionRequest {
    pub action: ModerationAction,
    pub category: Option<ReportCategory>,
}

pub async fn list_reports(
    State(state): State<AppState>,
    Query(params): Query<ReportsQuery>,
) -> Result<Json<CategoryPage>, AppError> {
    let paging = PaginationRequest {
        page: params.page,
        limit: params.limit.unwrap_or(state.console.page_size()),
    };
    paging.validate()?;

    let page = state
        .console
        .list_reports(params.category, paging.page, Some(paging.limit))
        .await?;
    Ok(Json(page))
}

pub async fn perform_action(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ReportActionRequest>,
) -> Result<Json<ActionOutcome>, AppError> {
    let outcome = state
        .console
        .perform_action(body.action, &id, body.category)
        .await?;
    Ok(Json(outcome))
}

pub async fn reset_cache(State(state): State<AppState>) -> StatusCode {
    state.console.leave().await;
    StatusCode::NO_CONTENT
}
