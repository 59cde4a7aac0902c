use std::sync::Arc;
use crate::domain::ports::{
    ActivityRepository, AttendeeRepository, CheckoutRepository, EventRepository, FavoriteRepository,
};
use crate::domain::services::{checkout::CheckoutService, dashboard::AdminDashboard};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub event_repo: Arc<dyn EventRepository>,
    pub activity_repo: Arc<dyn ActivityRepository>,
    pub attendee_repo: Arc<dyn AttendeeRepository>,
    pub checkout_repo: Arc<dyn CheckoutRepository>,
    pub favorite_repo: Arc<dyn FavoriteRepository>,
    pub dashboard: Arc<AdminDashboard>,
    pub checkout_service: Arc<CheckoutService>,
}
