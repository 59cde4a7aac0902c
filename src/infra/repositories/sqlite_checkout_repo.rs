use crate::domain::{
    models::{attendee::Attendee, checkout::CheckoutSession},
    ports::CheckoutRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};

pub struct SqliteCheckoutRepo {
    pool: SqlitePool,
}

impl SqliteCheckoutRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const UPDATE_CHECKOUT: &str = "UPDATE checkouts SET full_name=?, email=?, confirm_email=?, method=?, pix_qr_code_url=?, pix_code=?, pix_expires_at=?,
        qr_generated=?, step=?, status=?, attendee_id=?, updated_at=?, version = version + 1
     WHERE id=? AND version=?
     RETURNING *";

/// Saves the session only if the stored row is still at the version it was read at.
async fn save_in_tx(tx: &mut Transaction<'_, Sqlite>, session: &CheckoutSession) -> Result<CheckoutSession, AppError> {
    sqlx::query_as::<_, CheckoutSession>(UPDATE_CHECKOUT)
        .bind(&session.receiver.full_name).bind(&session.receiver.email).bind(&session.receiver.confirm_email)
        .bind(session.payment.method).bind(&session.payment.pix_qr_code_url).bind(&session.payment.pix_code).bind(session.payment.pix_expires_at)
        .bind(session.qr_generated).bind(session.step).bind(session.status).bind(&session.attendee_id).bind(session.updated_at)
        .bind(&session.id).bind(session.version)
        .fetch_optional(&mut **tx).await.map_err(AppError::Database)?
        .ok_or_else(|| AppError::Conflict("Checkout was changed by another request, reload it and try again".into()))
}

#[async_trait]
impl CheckoutRepository for SqliteCheckoutRepo {
    async fn create(&self, session: &CheckoutSession) -> Result<CheckoutSession, AppError> {
        sqlx::query_as::<_, CheckoutSession>(
            "INSERT INTO checkouts (id, event_id, ticket_type, quantity, unit_price, full_name, email, confirm_email, method,
                pix_qr_code_url, pix_code, pix_expires_at, qr_generated, step, status, attendee_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&session.id).bind(&session.event_id).bind(&session.ticket_type).bind(session.quantity).bind(session.unit_price)
            .bind(&session.receiver.full_name).bind(&session.receiver.email).bind(&session.receiver.confirm_email)
            .bind(session.payment.method).bind(&session.payment.pix_qr_code_url).bind(&session.payment.pix_code).bind(session.payment.pix_expires_at)
            .bind(session.qr_generated).bind(session.step).bind(session.status).bind(&session.attendee_id)
            .bind(session.created_at).bind(session.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<CheckoutSession>, AppError> {
        sqlx::query_as::<_, CheckoutSession>("SELECT * FROM checkouts WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, session: &CheckoutSession) -> Result<CheckoutSession, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let saved = save_in_tx(&mut tx, session).await?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(saved)
    }

    async fn register_attendee(&self, session: &CheckoutSession, attendee: &Attendee) -> Result<CheckoutSession, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // claim the session first so a concurrent submission of the same checkout rolls back here
        let saved = save_in_tx(&mut tx, session).await?;

        let bumped = sqlx::query(
            "UPDATE events SET registered_attendees = registered_attendees + ?, tickets_sold = COALESCE(tickets_sold, 0) + ?, updated_at = ?
             WHERE id = ? AND (attendee_limit IS NULL OR registered_attendees + ? <= attendee_limit)"
        )
            .bind(session.quantity).bind(session.quantity).bind(session.updated_at).bind(&session.event_id).bind(session.quantity)
            .execute(&mut *tx).await.map_err(AppError::Database)?;
        if bumped.rows_affected() == 0 {
            return Err(AppError::Conflict("Event sold out before the checkout completed".into()));
        }

        sqlx::query(
            "INSERT INTO attendees (id, event_id, full_name, email, ticket_type, ticket_price, payment_status, purchase_date)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        )
            .bind(&attendee.id).bind(&attendee.event_id).bind(&attendee.full_name).bind(&attendee.email)
            .bind(&attendee.ticket_type).bind(attendee.ticket_price).bind(attendee.payment_status).bind(attendee.purchase_date)
            .execute(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(saved)
    }

    async fn settle_attendee(&self, session: &CheckoutSession, attendee_id: &str) -> Result<CheckoutSession, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let saved = save_in_tx(&mut tx, session).await?;
        // the attendee may have been removed by an admin since; the session still settles
        sqlx::query("UPDATE attendees SET payment_status = 'paid' WHERE id = ?").bind(attendee_id).execute(&mut *tx).await.map_err(AppError::Database)?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(saved)
    }
}
