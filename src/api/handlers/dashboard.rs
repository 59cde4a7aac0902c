use axum::{
    extract::State,
    response::IntoResponse,
    Json,
};
use chrono::Datelike;
use std::sync::Arc;
use crate::api::dtos::requests::CalendarQuery;
use crate::api::extractors::payload::{AppJson, AppQuery};
use crate::domain::services::dashboard::ViewAction;
use crate::error::AppError;
use crate::state::AppState;

pub async fn get_summary(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let summary = state.dashboard.summary(state.config.local_now()).await?;
    Ok(Json(summary))
}

/// Month grid; defaults to the current month in the event timezone.
pub async fn get_calendar(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<CalendarQuery>,
) -> Result<impl IntoResponse, AppError> {
    let today = state.config.local_now().date();
    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(today.month());

    let calendar = state.dashboard.calendar(year, month).await?;
    Ok(Json(calendar))
}

pub async fn get_view(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.dashboard.view().await))
}

pub async fn apply_view_action(
    State(state): State<Arc<AppState>>,
    AppJson(action): AppJson<ViewAction>,
) -> Result<impl IntoResponse, AppError> {
    let view = state.dashboard.apply_view_action(action).await?;
    Ok(Json(view))
}
