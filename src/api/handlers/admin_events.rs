use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use crate::api::dtos::{requests::AdminEventQuery, responses::EventView};
use crate::api::extractors::payload::{AppJson, AppQuery};
use crate::domain::models::event::EventFormInput;
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<AdminEventQuery>,
) -> Result<impl IntoResponse, AppError> {
    let now = state.config.local_now();
    let events = state.dashboard.list_events(query.filters(), query.sort_by, now).await?;
    let views: Vec<EventView> = events.into_iter().map(|e| EventView::new(e, now)).collect();
    Ok(Json(views))
}

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<EventFormInput>,
) -> Result<impl IntoResponse, AppError> {
    let created = state.dashboard.create_event(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.dashboard.get_event(&event_id).await?;
    Ok(Json(EventView::new(event, state.config.local_now())))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
    AppJson(payload): AppJson<EventFormInput>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state.dashboard.update_event(&event_id, payload).await?;
    Ok(Json(updated))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state.dashboard.delete_event(&event_id).await?;
    Ok(Json(deleted))
}
