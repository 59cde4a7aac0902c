use axum::{
    extract::{Path, State},
    http::{header, HeaderName, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;
use crate::api::dtos::responses::AttendeeListResponse;
use crate::api::extractors::payload::{AppJson, AppQuery};
use crate::domain::models::attendee::AttendeeFormInput;
use crate::domain::services::attendees::AttendeeFilter;
use crate::error::AppError;
use crate::state::AppState;

pub const NOTICE_HEADER: &str = "x-notice";
const EXPORT_NOTICE: &str = "Export started! The CSV file will download shortly.";

pub async fn list_attendees(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
    AppQuery(filter): AppQuery<AttendeeFilter>,
) -> Result<impl IntoResponse, AppError> {
    let (attendees, stats) = state.dashboard.list_attendees(&event_id, &filter).await?;
    Ok(Json(AttendeeListResponse { attendees, stats }))
}

pub async fn create_attendee(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
    AppJson(payload): AppJson<AttendeeFormInput>,
) -> Result<impl IntoResponse, AppError> {
    let created = state.dashboard.create_attendee(&event_id, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_attendee(
    State(state): State<Arc<AppState>>,
    Path(attendee_id): Path<String>,
    AppJson(payload): AppJson<AttendeeFormInput>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state.dashboard.update_attendee(&attendee_id, payload).await?;
    Ok(Json(updated))
}

pub async fn delete_attendee(
    State(state): State<Arc<AppState>>,
    Path(attendee_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state.dashboard.delete_attendee(&attendee_id).await?;
    Ok(Json(deleted))
}

/// CSV download of the (optionally filtered) attendee list.
pub async fn export_attendees(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
    AppQuery(filter): AppQuery<AttendeeFilter>,
) -> Result<impl IntoResponse, AppError> {
    let export = state.dashboard.export_attendees(&event_id, &filter, state.config.event_timezone).await?;
    info!(event_id = %event_id, rows = export.rows, file = %export.file_name, "attendee csv served");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", export.file_name)),
            (HeaderName::from_static(NOTICE_HEADER), EXPORT_NOTICE.to_string()),
        ],
        export.csv,
    ))
}
