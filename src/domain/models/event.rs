use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::fmt;
use std::str::FromStr;

/// `HH:MM` serde format for wall-clock times. Seconds are accepted on input.
pub mod clock_time {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_clock_time(&raw).ok_or_else(|| de::Error::custom(format!("invalid time '{}'", raw)))
    }
}

pub fn parse_clock_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum EventCategory {
    Business,
    Social,
    Sports,
    Education,
    Entertainment,
    MusicalShows,
    Courses,
    #[serde(alias = "teather")]
    Theater,
    Technology,
    Gastronomy,
    Religious,
    KidsAndFamily,
    Other,
}

impl EventCategory {
    pub const ALL: [EventCategory; 13] = [
        EventCategory::Business,
        EventCategory::Social,
        EventCategory::Sports,
        EventCategory::Education,
        EventCategory::Entertainment,
        EventCategory::MusicalShows,
        EventCategory::Courses,
        EventCategory::Theater,
        EventCategory::Technology,
        EventCategory::Gastronomy,
        EventCategory::Religious,
        EventCategory::KidsAndFamily,
        EventCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Business => "business",
            EventCategory::Social => "social",
            EventCategory::Sports => "sports",
            EventCategory::Education => "education",
            EventCategory::Entertainment => "entertainment",
            EventCategory::MusicalShows => "musical_shows",
            EventCategory::Courses => "courses",
            EventCategory::Theater => "theater",
            EventCategory::Technology => "technology",
            EventCategory::Gastronomy => "gastronomy",
            EventCategory::Religious => "religious",
            EventCategory::KidsAndFamily => "kids_and_family",
            EventCategory::Other => "other",
        }
    }

    /// Human readable name, used in exports.
    pub fn label(&self) -> &'static str {
        match self {
            EventCategory::Business => "Business",
            EventCategory::Social => "Social",
            EventCategory::Sports => "Sports & Wellness",
            EventCategory::Education => "Education",
            EventCategory::Entertainment => "Entertainment",
            EventCategory::MusicalShows => "Shows & Parties",
            EventCategory::Courses => "Courses & Workshops",
            EventCategory::Theater => "Theater & Culture",
            EventCategory::Technology => "Technology & Innovation",
            EventCategory::Gastronomy => "Food & Drinks",
            EventCategory::Religious => "Religion & Spirituality",
            EventCategory::KidsAndFamily => "Kids & Family",
            EventCategory::Other => "Other",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw == "teather" {
            return Ok(EventCategory::Theater);
        }
        Self::ALL
            .iter()
            .find(|c| c.as_str() == raw)
            .copied()
            .ok_or_else(|| format!("unknown category '{}'", raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum EventStatus {
    Active,
    Inactive,
    Draft,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Active => "active",
            EventStatus::Inactive => "inactive",
            EventStatus::Draft => "draft",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "active" => Ok(EventStatus::Active),
            "inactive" => Ok(EventStatus::Inactive),
            "draft" => Ok(EventStatus::Draft),
            other => Err(format!("unknown status '{}'", other)),
        }
    }
}

/// One scheduled occurrence of an event, in the event timezone's wall clock.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct EventDate {
    pub id: String,
    pub date: NaiveDate,
    #[serde(with = "clock_time")]
    pub start_time: NaiveTime,
    #[serde(with = "clock_time")]
    pub end_time: NaiveTime,
}

impl EventDate {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    pub fn ends_at(&self) -> NaiveDateTime {
        self.date.and_time(self.end_time)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Location {
    pub name: String,
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl Location {
    /// Case-insensitive substring match over the address parts. `term` must already be lowercase.
    pub fn contains(&self, term: &str) -> bool {
        [&self.name, &self.street, &self.neighborhood, &self.city, &self.state]
            .iter()
            .any(|part| part.to_lowercase().contains(term))
    }

    pub fn one_line(&self) -> String {
        [&self.name, &self.street, &self.neighborhood, &self.city, &self.state, &self.zip_code]
            .iter()
            .filter(|part| !part.trim().is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub dates: Vec<EventDate>,
    pub location: Location,
    pub category: EventCategory,
    pub attendee_limit: Option<i32>,
    pub registered_attendees: i32,
    pub status: EventStatus,
    pub accepting_registrations: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub ticket_price: Option<f64>,
    pub tickets_sold: Option<i32>,
    pub image_url: Option<String>,
}

impl Event {
    /// Tickets sold, falling back to the registration count when no sales were recorded.
    pub fn sales(&self) -> i32 {
        match self.tickets_sold {
            Some(sold) if sold > 0 => sold,
            _ => self.registered_attendees.max(0),
        }
    }

    pub fn has_capacity(&self) -> bool {
        match self.attendee_limit {
            Some(limit) => self.registered_attendees < limit,
            None => true,
        }
    }
}

/// Validated event form, ready to be turned into (or merged into) an [`Event`].
#[derive(Debug, Clone)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    pub dates: Vec<EventDate>,
    pub location: Location,
    pub category: EventCategory,
    pub attendee_limit: Option<i32>,
    pub ticket_price: Option<f64>,
    pub accepting_registrations: Option<bool>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct EventDateInput {
    pub id: Option<String>,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

/// Raw event form as submitted; see `domain::services::forms::validate_event_form`.
#[derive(Debug, Deserialize, Clone)]
pub struct EventFormInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub dates: Vec<EventDateInput>,
    #[serde(default)]
    pub location: Location,
    pub category: EventCategory,
    pub attendee_limit: Option<i32>,
    pub ticket_price: Option<f64>,
    pub accepting_registrations: Option<bool>,
    pub image_url: Option<String>,
}

/// Rows removed by a cascading event delete.
#[derive(Debug, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeReport {
    pub attendees_removed: u64,
    pub activities_removed: u64,
}
