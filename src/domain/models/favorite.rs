use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Favorite {
    pub visitor_id: String,
    pub event_id: String,
    pub created_at: DateTime<Utc>,
}

impl Favorite {
    pub fn new(visitor_id: String, event_id: String) -> Self {
        Self {
            visitor_id,
            event_id,
            created_at: Utc::now(),
        }
    }
}
