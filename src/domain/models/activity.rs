use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::FromRow;
use crate::domain::models::event::clock_time;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Activity {
    pub id: String,
    pub event_id: String,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    #[serde(with = "clock_time")]
    pub start_time: NaiveTime,
    pub end_date: NaiveDate,
    #[serde(with = "clock_time")]
    pub end_time: NaiveTime,
    pub max_attendees: Option<i32>,
    pub registered_attendees: i32,
    pub location: String,
    pub speaker: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Activity {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.start_date.and_time(self.start_time)
    }
}

#[derive(Debug, Clone)]
pub struct ActivityForm {
    pub event_id: String,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_date: NaiveDate,
    pub end_time: NaiveTime,
    pub max_attendees: Option<i32>,
    pub location: String,
    pub speaker: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ActivityFormInput {
    pub event_id: String,
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    pub max_attendees: Option<i32>,
    pub location: String,
    pub speaker: Option<String>,
}
