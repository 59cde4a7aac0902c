use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;
use std::env;
use tracing::warn;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub event_timezone: Tz, // Wall-clock zone for event dates
    pub status_refresh_secs: u64,
    pub pix_expiry_minutes: i64,
}

impl Config {
    pub fn from_env() -> Self {
        let event_timezone = env::var("EVENT_TIMEZONE").unwrap_or_else(|_| "America/Sao_Paulo".to_string());
        let event_timezone = event_timezone.parse::<Tz>().unwrap_or_else(|_| {
            warn!("EVENT_TIMEZONE '{}' is not a valid IANA zone, falling back to UTC", event_timezone);
            chrono_tz::UTC
        });

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string()),
            port: parse_or("PORT", 3000),
            event_timezone,
            status_refresh_secs: parse_or("STATUS_REFRESH_SECS", 60),
            pix_expiry_minutes: parse_or("PIX_EXPIRY_MINUTES", 30),
        }
    }

    /// Current wall-clock time in the event timezone.
    pub fn local_now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.event_timezone).naive_local()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            port: 3000,
            event_timezone: chrono_tz::America::Sao_Paulo,
            status_refresh_secs: 60,
            pix_expiry_minutes: 30,
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} has an unparseable value '{}', using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}
