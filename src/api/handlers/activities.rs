use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use crate::api::dtos::responses::ActivityListResponse;
use crate::api::extractors::payload::{AppJson, AppQuery};
use crate::domain::models::activity::ActivityFormInput;
use crate::domain::services::activities::{group_by_event, ActivityFilter};
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_activities(
    State(state): State<Arc<AppState>>,
    AppQuery(filter): AppQuery<ActivityFilter>,
) -> Result<impl IntoResponse, AppError> {
    let activities = state.dashboard.list_activities(&filter).await?;
    let groups = group_by_event(activities.clone());
    Ok(Json(ActivityListResponse { activities, groups }))
}

pub async fn create_activity(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<ActivityFormInput>,
) -> Result<impl IntoResponse, AppError> {
    let created = state.dashboard.create_activity(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_activity(
    State(state): State<Arc<AppState>>,
    Path(activity_id): Path<String>,
    AppJson(payload): AppJson<ActivityFormInput>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state.dashboard.update_activity(&activity_id, payload).await?;
    Ok(Json(updated))
}

pub async fn delete_activity(
    State(state): State<Arc<AppState>>,
    Path(activity_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state.dashboard.delete_activity(&activity_id).await?;
    Ok(Json(deleted))
}
