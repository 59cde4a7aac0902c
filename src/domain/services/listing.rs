use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use crate::domain::models::event::{Event, EventCategory, EventDate, EventStatus};
use crate::domain::models::selection::Selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    #[default]
    All,
    Today,
    #[serde(alias = "this-week")]
    ThisWeek,
    #[serde(alias = "this-month")]
    ThisMonth,
    #[serde(alias = "next-month")]
    NextMonth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Date,
    Title,
    Created,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventFilters {
    pub search: String,
    pub category: Selection<EventCategory>,
    pub status: Selection<EventStatus>,
    pub date_range: DateRange,
}

impl EventFilters {
    pub fn is_default(&self) -> bool {
        self.search.trim().is_empty()
            && self.category.is_all()
            && self.status.is_all()
            && self.date_range == DateRange::All
    }
}

/// Earliest occurrence starting at or after `now`; when every occurrence is
/// in the past, the chronologically last one. `None` only for an empty list.
pub fn next_event_date(dates: &[EventDate], now: NaiveDateTime) -> Option<&EventDate> {
    let mut sorted: Vec<&EventDate> = dates.iter().collect();
    sorted.sort_by_key(|d| (d.date, d.start_time));

    sorted
        .iter()
        .find(|d| d.starts_at() >= now)
        .or_else(|| sorted.last())
        .copied()
}

pub fn filter_events(events: Vec<Event>, filters: &EventFilters, now: NaiveDateTime) -> Vec<Event> {
    let term = filters.search.trim().to_lowercase();
    let today = now.date();

    events
        .into_iter()
        .filter(|event| {
            if !term.is_empty() {
                let hit = event.title.to_lowercase().contains(&term)
                    || event.description.to_lowercase().contains(&term)
                    || event.location.contains(&term);
                if !hit {
                    return false;
                }
            }

            if !filters.category.matches(&event.category) || !filters.status.matches(&event.status) {
                return false;
            }

            if filters.date_range == DateRange::All {
                return true;
            }

            match next_event_date(&event.dates, now) {
                Some(next) => in_range(filters.date_range, next.date, today),
                None => false,
            }
        })
        .collect()
}

fn in_range(range: DateRange, date: NaiveDate, today: NaiveDate) -> bool {
    let (start, end) = match range {
        DateRange::All => return true,
        DateRange::Today => (today, today + Duration::days(1)),
        DateRange::ThisWeek => {
            let week_start = today - Duration::days(today.weekday().num_days_from_sunday() as i64);
            (week_start, week_start + Duration::days(7))
        }
        DateRange::ThisMonth => {
            let month_start = first_of_month(today);
            (month_start, month_start + Months::new(1))
        }
        DateRange::NextMonth => {
            let month_start = first_of_month(today) + Months::new(1);
            (month_start, month_start + Months::new(1))
        }
    };
    date >= start && date < end
}

fn first_of_month(day: NaiveDate) -> NaiveDate {
    day - Duration::days(day.day0() as i64)
}

pub fn sort_events(mut events: Vec<Event>, sort_by: SortBy, now: NaiveDateTime) -> Vec<Event> {
    match sort_by {
        SortBy::Title => events.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        SortBy::Created => events.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortBy::Date => events.sort_by_cached_key(|event| {
            // (false, start) sorts before (true, _): events with no dates go last
            match next_event_date(&event.dates, now) {
                Some(next) => (false, Some(next.starts_at())),
                None => (true, None),
            }
        }),
    }
    events
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}
