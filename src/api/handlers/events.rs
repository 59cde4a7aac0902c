use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use crate::api::dtos::{
    requests::PublicEventQuery,
    responses::{EventDetailResponse, EventView},
};
use crate::api::extractors::payload::AppQuery;
use crate::domain::models::event::{Event, EventStatus};
use crate::domain::services::{
    calendar::generate_ics,
    events::update_event_statuses,
    listing::{filter_events, sort_events},
};
use crate::error::AppError;
use crate::state::AppState;

/// Drafts and inactive events are invisible to the public.
pub(crate) async fn find_published(state: &AppState, event_id: &str) -> Result<Event, AppError> {
    match state.event_repo.find_by_id(event_id).await? {
        Some(event) if event.status == EventStatus::Active => Ok(event),
        _ => Err(AppError::NotFound("Event not found".into())),
    }
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<PublicEventQuery>,
) -> Result<impl IntoResponse, AppError> {
    let now = state.config.local_now();
    let events = update_event_statuses(state.event_repo.list().await?);
    let events = sort_events(filter_events(events, &query.filters(), now), query.sort_by, now);

    let views: Vec<EventView> = events.into_iter().map(|e| EventView::new(e, now)).collect();
    Ok(Json(views))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = find_published(&state, &event_id).await?;
    let activities = state.activity_repo.list_by_event(&event.id).await?;

    Ok(Json(EventDetailResponse {
        view: EventView::new(event, state.config.local_now()),
        activities,
    }))
}

pub async fn list_event_activities(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = find_published(&state, &event_id).await?;
    let activities = state.activity_repo.list_by_event(&event.id).await?;
    Ok(Json(activities))
}

pub async fn download_calendar(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = find_published(&state, &event_id).await?;
    if event.dates.is_empty() {
        return Err(AppError::NotFound("Event has no scheduled dates".into()));
    }

    let ics = generate_ics(&event, state.config.event_timezone);
    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"event-{}.ics\"", event.id)),
        ],
        ics,
    ))
}
