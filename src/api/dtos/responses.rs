use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use crate::domain::models::{
    activity::Activity,
    attendee::Attendee,
    checkout::{CheckoutSession, PaymentOutcome},
    event::{Event, EventDate},
};
use crate::domain::services::{
    activities::ActivityGroup,
    attendees::AttendeeStats,
    checkout::remaining_capacity,
    listing::next_event_date,
};

/// An event as shown in listings: the record plus derived fields.
#[derive(Serialize)]
pub struct EventView {
    #[serde(flatten)]
    pub event: Event,
    pub next_date: Option<EventDate>,
    pub remaining_capacity: Option<i32>,
    pub sold_out: bool,
}

impl EventView {
    pub fn new(event: Event, now: NaiveDateTime) -> Self {
        let next_date = next_event_date(&event.dates, now).cloned();
        Self {
            next_date,
            remaining_capacity: remaining_capacity(&event),
            sold_out: !event.has_capacity(),
            event,
        }
    }
}

#[derive(Serialize)]
pub struct EventDetailResponse {
    #[serde(flatten)]
    pub view: EventView,
    pub activities: Vec<Activity>,
}

#[derive(Serialize)]
pub struct AttendeeListResponse {
    pub attendees: Vec<Attendee>,
    pub stats: AttendeeStats,
}

#[derive(Serialize)]
pub struct ActivityListResponse {
    pub activities: Vec<Activity>,
    pub groups: Vec<ActivityGroup>,
}

#[derive(Serialize)]
pub struct FavoriteEntry {
    pub favorited_at: DateTime<Utc>,
    pub event: EventView,
}

#[derive(Serialize)]
pub struct FavoriteToggled {
    pub event_id: String,
    pub favorited: bool,
}

#[derive(Serialize)]
pub struct CheckoutResponse {
    #[serde(flatten)]
    pub checkout: CheckoutSession,
    pub step_number: u8,
    pub total: f64,
}

impl From<CheckoutSession> for CheckoutResponse {
    fn from(checkout: CheckoutSession) -> Self {
        Self {
            step_number: checkout.step.number(),
            total: checkout.total(),
            checkout,
        }
    }
}

#[derive(Serialize)]
pub struct PaymentResponse {
    pub outcome: PaymentOutcome,
    pub checkout: CheckoutResponse,
}
