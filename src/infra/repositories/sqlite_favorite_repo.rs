use crate::domain::{models::favorite::Favorite, ports::FavoriteRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteFavoriteRepo {
    pool: SqlitePool,
}

impl SqliteFavoriteRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteRepository for SqliteFavoriteRepo {
    async fn add(&self, favorite: &Favorite) -> Result<bool, AppError> {
        let result = sqlx::query("INSERT INTO favorites (visitor_id, event_id, created_at) VALUES (?, ?, ?) ON CONFLICT (visitor_id, event_id) DO NOTHING")
            .bind(&favorite.visitor_id).bind(&favorite.event_id).bind(favorite.created_at)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, visitor_id: &str, event_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM favorites WHERE visitor_id = ? AND event_id = ?").bind(visitor_id).bind(event_id).execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_by_visitor(&self, visitor_id: &str) -> Result<Vec<Favorite>, AppError> {
        sqlx::query_as::<_, Favorite>("SELECT * FROM favorites WHERE visitor_id = ? ORDER BY created_at ASC, rowid ASC").bind(visitor_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
