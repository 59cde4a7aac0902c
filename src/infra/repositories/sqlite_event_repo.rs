use crate::domain::{
    models::event::{CascadeReport, Event, EventCategory, EventDate, EventStatus, Location},
    ports::EventRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

/// Flat row shape; dates live in a JSON column, the location in prefixed columns.
#[derive(FromRow)]
struct EventRow {
    id: String,
    title: String,
    description: String,
    dates_json: String,
    location_name: String,
    location_street: String,
    location_neighborhood: String,
    location_city: String,
    location_state: String,
    location_zip_code: String,
    category: EventCategory,
    attendee_limit: Option<i32>,
    registered_attendees: i32,
    status: EventStatus,
    accepting_registrations: bool,
    ticket_price: Option<f64>,
    tickets_sold: Option<i32>,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = AppError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let dates: Vec<EventDate> = serde_json::from_str(&row.dates_json)
            .map_err(|e| AppError::InternalWithMsg(format!("Corrupt dates for event {}: {}", row.id, e)))?;
        Ok(Event {
            id: row.id,
            title: row.title,
            description: row.description,
            dates,
            location: Location {
                name: row.location_name,
                street: row.location_street,
                neighborhood: row.location_neighborhood,
                city: row.location_city,
                state: row.location_state,
                zip_code: row.location_zip_code,
            },
            category: row.category,
            attendee_limit: row.attendee_limit,
            registered_attendees: row.registered_attendees,
            status: row.status,
            accepting_registrations: row.accepting_registrations,
            created_at: row.created_at,
            updated_at: row.updated_at,
            ticket_price: row.ticket_price,
            tickets_sold: row.tickets_sold,
            image_url: row.image_url,
        })
    }
}

fn dates_json(event: &Event) -> Result<String, AppError> {
    serde_json::to_string(&event.dates)
        .map_err(|e| AppError::InternalWithMsg(format!("Could not encode event dates: {}", e)))
}

pub struct SqliteEventRepo {
    pool: SqlitePool,
}

impl SqliteEventRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"INSERT INTO events (
                id, title, description, dates_json,
                location_name, location_street, location_neighborhood, location_city, location_state, location_zip_code,
                category, attendee_limit, registered_attendees, status, accepting_registrations,
                ticket_price, tickets_sold, image_url, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *"#
        )
            .bind(&event.id)
            .bind(&event.title)
            .bind(&event.description)
            .bind(dates_json(event)?)
            .bind(&event.location.name)
            .bind(&event.location.street)
            .bind(&event.location.neighborhood)
            .bind(&event.location.city)
            .bind(&event.location.state)
            .bind(&event.location.zip_code)
            .bind(event.category)
            .bind(event.attendee_limit)
            .bind(event.registered_attendees)
            .bind(event.status)
            .bind(event.accepting_registrations)
            .bind(event.ticket_price)
            .bind(event.tickets_sold)
            .bind(&event.image_url)
            .bind(event.created_at)
            .bind(event.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        row.try_into()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError> {
        let row = sqlx::query_as::<_, EventRow>("SELECT * FROM events WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;
        row.map(Event::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, EventRow>("SELECT * FROM events ORDER BY created_at ASC, rowid ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?
            .into_iter()
            .map(Event::try_from)
            .collect()
    }

    async fn update(&self, event: &Event) -> Result<Event, AppError> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"UPDATE events SET
                title=?, description=?, dates_json=?,
                location_name=?, location_street=?, location_neighborhood=?, location_city=?, location_state=?, location_zip_code=?,
                category=?, attendee_limit=?, registered_attendees=?, status=?, accepting_registrations=?,
                ticket_price=?, tickets_sold=?, image_url=?, updated_at=?
               WHERE id=? RETURNING *"#
        )
            .bind(&event.title)
            .bind(&event.description)
            .bind(dates_json(event)?)
            .bind(&event.location.name)
            .bind(&event.location.street)
            .bind(&event.location.neighborhood)
            .bind(&event.location.city)
            .bind(&event.location.state)
            .bind(&event.location.zip_code)
            .bind(event.category)
            .bind(event.attendee_limit)
            .bind(event.registered_attendees)
            .bind(event.status)
            .bind(event.accepting_registrations)
            .bind(event.ticket_price)
            .bind(event.tickets_sold)
            .bind(&event.image_url)
            .bind(event.updated_at)
            .bind(&event.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;
        row.ok_or_else(|| AppError::NotFound("Event not found".into()))?.try_into()
    }

    async fn delete_cascade(&self, id: &str) -> Result<CascadeReport, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let attendees = sqlx::query("DELETE FROM attendees WHERE event_id = ?").bind(id).execute(&mut *tx).await.map_err(AppError::Database)?;
        let activities = sqlx::query("DELETE FROM activities WHERE event_id = ?").bind(id).execute(&mut *tx).await.map_err(AppError::Database)?;
        let result = sqlx::query("DELETE FROM events WHERE id = ?").bind(id).execute(&mut *tx).await.map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Event not found".into()));
        }
        tx.commit().await.map_err(AppError::Database)?;

        Ok(CascadeReport {
            attendees_removed: attendees.rows_affected(),
            activities_removed: activities.rows_affected(),
        })
    }
}
