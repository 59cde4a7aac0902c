use crate::domain::models::{
    activity::Activity, attendee::Attendee, checkout::CheckoutSession,
    event::{CascadeReport, Event}, favorite::Favorite,
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn list(&self) -> Result<Vec<Event>, AppError>;
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
    /// Removes the event together with its attendees and activities.
    async fn delete_cascade(&self, id: &str) -> Result<CascadeReport, AppError>;
}

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn create(&self, activity: &Activity) -> Result<Activity, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Activity>, AppError>;
    async fn list(&self) -> Result<Vec<Activity>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Activity>, AppError>;
    async fn update(&self, activity: &Activity) -> Result<Activity, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait AttendeeRepository: Send + Sync {
    async fn create(&self, attendee: &Attendee) -> Result<Attendee, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Attendee>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Attendee>, AppError>;
    async fn update(&self, attendee: &Attendee) -> Result<Attendee, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait CheckoutRepository: Send + Sync {
    async fn create(&self, session: &CheckoutSession) -> Result<CheckoutSession, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<CheckoutSession>, AppError>;
    /// Every save is conditional on `session.version`; a stale session is a conflict.
    async fn update(&self, session: &CheckoutSession) -> Result<CheckoutSession, AppError>;
    /// Inserts the attendee, bumps the event's sold/registered counters and
    /// saves the session in one transaction. Fails with a conflict when the
    /// event filled up in the meantime.
    async fn register_attendee(&self, session: &CheckoutSession, attendee: &Attendee) -> Result<CheckoutSession, AppError>;
    /// Marks the attendee paid and saves the session.
    async fn settle_attendee(&self, session: &CheckoutSession, attendee_id: &str) -> Result<CheckoutSession, AppError>;
}

#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Returns false when the favorite already existed.
    async fn add(&self, favorite: &Favorite) -> Result<bool, AppError>;
    async fn remove(&self, visitor_id: &str, event_id: &str) -> Result<bool, AppError>;
    async fn list_by_visitor(&self, visitor_id: &str) -> Result<Vec<Favorite>, AppError>;
}
