use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, info_span, Instrument};
use crate::state::AppState;

/// Re-runs the event status pass on a fixed interval for the process lifetime.
pub async fn start_status_refresher(state: Arc<AppState>) {
    let period = Duration::from_secs(state.config.status_refresh_secs.max(1));
    info!(period_secs = period.as_secs(), "Starting event status refresher...");

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        // first tick fires immediately, matching a refresh on startup
        ticker.tick().await;
        refresh_once(&state)
            .instrument(info_span!("status_refresh"))
            .await;
    }
}

pub async fn refresh_once(state: &AppState) {
    match state.dashboard.refresh_statuses().await {
        Ok(checked) => info!(checked, "Event statuses refreshed"),
        Err(e) => error!("Failed to refresh event statuses: {:?}", e),
    }
}
