pub mod activities;
pub mod admin_events;
pub mod attendees;
pub mod checkout;
pub mod dashboard;
pub mod events;
pub mod favorites;
pub mod health;
