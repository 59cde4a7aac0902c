pub mod sqlite_event_repo;
pub mod sqlite_activity_repo;
pub mod sqlite_attendee_repo;
pub mod sqlite_checkout_repo;
pub mod sqlite_favorite_repo;
