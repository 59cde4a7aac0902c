use crate::domain::{models::attendee::Attendee, ports::AttendeeRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteAttendeeRepo {
    pool: SqlitePool,
}

impl SqliteAttendeeRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendeeRepository for SqliteAttendeeRepo {
    async fn create(&self, attendee: &Attendee) -> Result<Attendee, AppError> {
        sqlx::query_as::<_, Attendee>(
            "INSERT INTO attendees (id, event_id, full_name, email, ticket_type, ticket_price, payment_status, purchase_date)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&attendee.id).bind(&attendee.event_id).bind(&attendee.full_name).bind(&attendee.email)
            .bind(&attendee.ticket_type).bind(attendee.ticket_price).bind(attendee.payment_status).bind(attendee.purchase_date)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Attendee>, AppError> {
        sqlx::query_as::<_, Attendee>("SELECT * FROM attendees WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Attendee>, AppError> {
        sqlx::query_as::<_, Attendee>("SELECT * FROM attendees WHERE event_id = ? ORDER BY purchase_date ASC, rowid ASC").bind(event_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, attendee: &Attendee) -> Result<Attendee, AppError> {
        sqlx::query_as::<_, Attendee>(
            "UPDATE attendees SET full_name=?, email=?, ticket_type=?, ticket_price=?, payment_status=?, purchase_date=?
             WHERE id=?
             RETURNING *"
        )
            .bind(&attendee.full_name).bind(&attendee.email).bind(&attendee.ticket_type).bind(attendee.ticket_price)
            .bind(attendee.payment_status).bind(attendee.purchase_date).bind(&attendee.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Attendee not found".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM attendees WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Attendee not found".into())); }
        Ok(())
    }
}
