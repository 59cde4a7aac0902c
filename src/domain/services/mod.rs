pub mod activities;
pub mod analytics;
pub mod attendees;
pub mod calendar;
pub mod checkout;
pub mod dashboard;
pub mod events;
pub mod forms;
pub mod listing;
