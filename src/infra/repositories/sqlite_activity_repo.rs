use crate::domain::{models::activity::Activity, ports::ActivityRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteActivityRepo {
    pool: SqlitePool,
}

impl SqliteActivityRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityRepository for SqliteActivityRepo {
    async fn create(&self, activity: &Activity) -> Result<Activity, AppError> {
        sqlx::query_as::<_, Activity>(
            r#"INSERT INTO activities (
                id, event_id, title, description, start_date, start_time, end_date, end_time,
                max_attendees, registered_attendees, location, speaker, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *"#
        )
            .bind(&activity.id).bind(&activity.event_id).bind(&activity.title).bind(&activity.description)
            .bind(activity.start_date).bind(activity.start_time).bind(activity.end_date).bind(activity.end_time)
            .bind(activity.max_attendees).bind(activity.registered_attendees).bind(&activity.location)
            .bind(&activity.speaker).bind(activity.created_at).bind(activity.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Activity>, AppError> {
        sqlx::query_as::<_, Activity>("SELECT * FROM activities WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Activity>, AppError> {
        sqlx::query_as::<_, Activity>("SELECT * FROM activities ORDER BY start_date ASC, start_time ASC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Activity>, AppError> {
        sqlx::query_as::<_, Activity>("SELECT * FROM activities WHERE event_id = ? ORDER BY start_date ASC, start_time ASC").bind(event_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, activity: &Activity) -> Result<Activity, AppError> {
        sqlx::query_as::<_, Activity>(
            "UPDATE activities SET title=?, description=?, start_date=?, start_time=?, end_date=?, end_time=?,
                max_attendees=?, location=?, speaker=?, updated_at=?
             WHERE id=?
             RETURNING *"
        )
            .bind(&activity.title).bind(&activity.description)
            .bind(activity.start_date).bind(activity.start_time).bind(activity.end_date).bind(activity.end_time)
            .bind(activity.max_attendees).bind(&activity.location).bind(&activity.speaker).bind(activity.updated_at)
            .bind(&activity.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Activity not found".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM activities WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Activity not found".into())); }
        Ok(())
    }
}
