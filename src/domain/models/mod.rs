pub mod activity;
pub mod attendee;
pub mod checkout;
pub mod event;
pub mod favorite;
pub mod selection;
