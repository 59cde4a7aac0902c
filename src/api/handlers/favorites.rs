use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;
use crate::api::dtos::responses::{EventView, FavoriteEntry, FavoriteToggled};
use crate::api::extractors::visitor::VisitorId;
use crate::api::handlers::events::find_published;
use crate::domain::models::{event::EventStatus, favorite::Favorite};
use crate::domain::services::dashboard::Mutation;
use crate::error::AppError;
use crate::state::AppState;

/// Favorites whose event has since been deleted or unpublished are skipped.
pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
    VisitorId(visitor_id): VisitorId,
) -> Result<impl IntoResponse, AppError> {
    let now = state.config.local_now();
    let mut entries = Vec::new();
    for favorite in state.favorite_repo.list_by_visitor(&visitor_id).await? {
        if let Some(event) = state.event_repo.find_by_id(&favorite.event_id).await?
            && event.status == EventStatus::Active
        {
            entries.push(FavoriteEntry { favorited_at: favorite.created_at, event: EventView::new(event, now) });
        }
    }
    Ok(Json(entries))
}

/// Adds the event to the visitor's favorites, or removes it if already there.
pub async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    VisitorId(visitor_id): VisitorId,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    find_published(&state, &event_id).await?;

    let added = state.favorite_repo.add(&Favorite::new(visitor_id.clone(), event_id.clone())).await?;
    if !added {
        state.favorite_repo.remove(&visitor_id, &event_id).await?;
    }

    info!(visitor_id = %visitor_id, event_id = %event_id, favorited = added, "favorite toggled");
    let notice = if added { "Added to favorites" } else { "Removed from favorites" };
    Ok(Json(Mutation { notice: notice.to_string(), data: FavoriteToggled { event_id, favorited: added } }))
}

pub async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    VisitorId(visitor_id): VisitorId,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !state.favorite_repo.remove(&visitor_id, &event_id).await? {
        return Err(AppError::NotFound("Event is not in favorites".into()));
    }

    info!(visitor_id = %visitor_id, event_id = %event_id, "favorite removed");
    Ok(Json(Mutation { notice: "Removed from favorites".to_string(), data: FavoriteToggled { event_id, favorited: false } }))
}
