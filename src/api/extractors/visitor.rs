use axum::{extract::FromRequestParts, http::request::Parts};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;

pub const VISITOR_HEADER: &str = "x-visitor-id";
const MAX_VISITOR_ID_LEN: usize = 128;

/// Opaque client-chosen id that scopes favorites.
pub struct VisitorId(pub String);

impl FromRequestParts<Arc<AppState>> for VisitorId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(VISITOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .unwrap_or_default();

        if raw.is_empty() {
            return Err(AppError::Validation("Missing X-Visitor-Id header".into()));
        }
        if raw.len() > MAX_VISITOR_ID_LEN {
            return Err(AppError::Validation("X-Visitor-Id is too long".into()));
        }
        Ok(VisitorId(raw.to_string()))
    }
}
