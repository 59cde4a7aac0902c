use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::error::AppError;
use crate::state::AppState;
use crate::domain::services::{checkout::CheckoutService, dashboard::AdminDashboard};
use crate::infra::repositories::{
    sqlite_activity_repo::SqliteActivityRepo, sqlite_attendee_repo::SqliteAttendeeRepo,
    sqlite_checkout_repo::SqliteCheckoutRepo, sqlite_event_repo::SqliteEventRepo,
    sqlite_favorite_repo::SqliteFavoriteRepo,
};

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

pub async fn connect(database_url: &str) -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = if is_in_memory(database_url) {
        info!("Initializing in-memory SQLite database (data lives until shutdown)...");
        // every connection to :memory: is its own database, so keep exactly one alive
        SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opts)
            .await?
    } else {
        info!("Initializing SQLite connection with WAL Mode...");
        SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts.journal_mode(SqliteJournalMode::Wal))
            .await?
    };

    run_migrations(&pool).await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/sqlite").run(pool).await?;
    Ok(())
}

pub fn build_state(config: &Config, pool: SqlitePool) -> AppState {
    let event_repo = Arc::new(SqliteEventRepo::new(pool.clone()));
    let activity_repo = Arc::new(SqliteActivityRepo::new(pool.clone()));
    let attendee_repo = Arc::new(SqliteAttendeeRepo::new(pool.clone()));
    let checkout_repo = Arc::new(SqliteCheckoutRepo::new(pool.clone()));

    let dashboard = Arc::new(AdminDashboard::new(
        event_repo.clone(),
        activity_repo.clone(),
        attendee_repo.clone(),
    ));
    let checkout_service = Arc::new(CheckoutService::new(
        event_repo.clone(),
        checkout_repo.clone(),
        config.pix_expiry_minutes,
    ));

    AppState {
        config: config.clone(),
        event_repo,
        activity_repo,
        attendee_repo,
        checkout_repo,
        favorite_repo: Arc::new(SqliteFavoriteRepo::new(pool)),
        dashboard,
        checkout_service,
    }
}

pub async fn bootstrap_state(config: &Config) -> Result<AppState, AppError> {
    let pool = connect(&config.database_url).await?;
    Ok(build_state(config, pool))
}
