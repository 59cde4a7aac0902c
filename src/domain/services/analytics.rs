use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use crate::domain::models::event::{Event, EventDate, EventStatus};
use crate::domain::services::listing::next_event_date;
use crate::error::AppError;

/// Price assumed for revenue estimates when an event has no ticket price.
pub const DEFAULT_TICKET_PRICE: f64 = 50.0;
const MAX_ALERTS: usize = 3;
const TOP_EVENTS: usize = 3;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventCounts {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub draft: usize,
}

#[derive(Debug, Serialize, Clone)]
pub struct RankedEvent {
    pub event_id: String,
    pub title: String,
    pub sales: i32,
    pub capacity: i32,
    pub fill_percentage: f64,
}

#[derive(Debug, Serialize, Clone)]
pub struct UpcomingEvent {
    pub event_id: String,
    pub title: String,
    pub next_date: EventDate,
    pub registered_attendees: i32,
    pub attendee_limit: Option<i32>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Warning,
    Info,
    Error,
}

#[derive(Debug, Serialize, Clone)]
pub struct Alert {
    pub id: String,
    pub kind: AlertKind,
    pub message: String,
    pub event_id: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct DashboardSummary {
    pub counts: EventCounts,
    pub revenue: f64,
    pub tickets_sold: i64,
    pub top_events: Vec<RankedEvent>,
    pub upcoming_events: Vec<UpcomingEvent>,
    pub next_event: Option<UpcomingEvent>,
    pub alerts: Vec<Alert>,
}

pub fn summarize(events: &[Event], now: NaiveDateTime) -> DashboardSummary {
    let upcoming = upcoming_events(events, now);
    DashboardSummary {
        counts: event_counts(events),
        revenue: total_revenue(events),
        tickets_sold: total_tickets_sold(events),
        top_events: top_events(events),
        next_event: upcoming.first().cloned(),
        upcoming_events: upcoming.into_iter().take(3).collect(),
        alerts: alerts(events, now),
    }
}

pub fn event_counts(events: &[Event]) -> EventCounts {
    events.iter().fold(EventCounts { total: events.len(), ..Default::default() }, |mut acc, e| {
        match e.status {
            EventStatus::Active => acc.active += 1,
            EventStatus::Inactive => acc.inactive += 1,
            EventStatus::Draft => acc.draft += 1,
        }
        acc
    })
}

pub fn total_revenue(events: &[Event]) -> f64 {
    events
        .iter()
        .map(|e| e.sales() as f64 * e.ticket_price.unwrap_or(DEFAULT_TICKET_PRICE))
        .sum()
}

pub fn total_tickets_sold(events: &[Event]) -> i64 {
    events.iter().map(|e| e.sales() as i64).sum()
}

/// Active events with at least one sale, best sellers first.
pub fn top_events(events: &[Event]) -> Vec<RankedEvent> {
    let mut ranked: Vec<&Event> = events
        .iter()
        .filter(|e| e.status == EventStatus::Active && e.sales() > 0)
        .collect();
    ranked.sort_by(|a, b| b.sales().cmp(&a.sales()));

    ranked
        .into_iter()
        .take(TOP_EVENTS)
        .map(|e| {
            let sales = e.sales();
            let capacity = e.attendee_limit.filter(|l| *l > 0).unwrap_or(sales);
            let fill_percentage = if capacity > 0 { sales as f64 * 100.0 / capacity as f64 } else { 0.0 };
            RankedEvent {
                event_id: e.id.clone(),
                title: e.title.clone(),
                sales,
                capacity,
                fill_percentage,
            }
        })
        .collect()
}

/// Active events whose next occurrence falls today or later, soonest first.
pub fn upcoming_events(events: &[Event], now: NaiveDateTime) -> Vec<UpcomingEvent> {
    let today = now.date();
    let mut upcoming: Vec<UpcomingEvent> = events
        .iter()
        .filter(|e| e.status == EventStatus::Active)
        .filter_map(|e| {
            let next = next_event_date(&e.dates, now)?;
            (next.date >= today).then(|| UpcomingEvent {
                event_id: e.id.clone(),
                title: e.title.clone(),
                next_date: next.clone(),
                registered_attendees: e.registered_attendees,
                attendee_limit: e.attendee_limit,
            })
        })
        .collect();
    upcoming.sort_by_key(|u| u.next_date.starts_at());
    upcoming
}

pub fn alerts(events: &[Event], now: NaiveDateTime) -> Vec<Alert> {
    let mut alerts = Vec::new();

    for event in events {
        let Some(limit) = event.attendee_limit.filter(|l| *l > 0) else { continue };
        if event.registered_attendees <= 0 {
            continue;
        }
        let remaining = limit - event.registered_attendees;
        let remaining_pct = remaining as f64 / limit as f64 * 100.0;
        if remaining_pct > 0.0 && remaining_pct <= 20.0 {
            alerts.push(Alert {
                id: format!("soldout-{}", event.id),
                kind: AlertKind::Warning,
                message: format!("Tickets almost sold out: {} ({} left)", event.title, remaining),
                event_id: Some(event.id.clone()),
            });
        }
    }

    let today = now.date();
    let horizon = now + Duration::days(3);
    for event in events.iter().filter(|e| e.status == EventStatus::Active) {
        let Some(limit) = event.attendee_limit.filter(|l| *l > 0) else { continue };
        let Some(next) = next_event_date(&event.dates, now) else { continue };
        let day = next.date.and_time(NaiveTime::MIN);

        if next.date >= today && day <= horizon && (event.registered_attendees as f64) < limit as f64 * 0.3 {
            alerts.push(Alert {
                id: format!("lowattendance-{}", event.id),
                kind: AlertKind::Info,
                message: format!("Upcoming event with few registrations: {}", event.title),
                event_id: Some(event.id.clone()),
            });
        }
    }

    let drafts = events.iter().filter(|e| e.status == EventStatus::Draft).count();
    if drafts > 0 {
        alerts.push(Alert {
            id: "drafts".into(),
            kind: AlertKind::Info,
            message: format!("You have {} draft event(s) waiting to be published", drafts),
            event_id: None,
        });
    }

    alerts.truncate(MAX_ALERTS);
    alerts
}

#[derive(Debug, Serialize, Clone)]
pub struct CalendarEntry {
    pub event_id: String,
    pub title: String,
    pub date_id: String,
    pub start_time: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct CalendarDay {
    pub day: u32,
    pub entries: Vec<CalendarEntry>,
}

#[derive(Debug, Serialize, Clone)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    /// 0 = Sunday, matching a Sunday-first month grid.
    pub starting_weekday: u32,
    pub days: Vec<CalendarDay>,
}

pub fn calendar_month(events: &[Event], year: i32, month: u32) -> Result<CalendarMonth, AppError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::Validation(format!("Invalid month {}-{}", year, month)))?;
    let next_first = first
        .checked_add_months(chrono::Months::new(1))
        .ok_or_else(|| AppError::Validation("Month out of range".into()))?;
    let days_in_month = (next_first - first).num_days() as u32;

    let mut days: Vec<CalendarDay> = (1..=days_in_month)
        .map(|day| CalendarDay { day, entries: Vec::new() })
        .collect();

    for event in events {
        for date in &event.dates {
            if date.date.year() == year && date.date.month() == month {
                days[date.date.day0() as usize].entries.push(CalendarEntry {
                    event_id: event.id.clone(),
                    title: event.title.clone(),
                    date_id: date.id.clone(),
                    start_time: date.start_time.format("%H:%M").to_string(),
                });
            }
        }
    }

    for day in &mut days {
        day.entries.sort_by(|a, b| a.start_time.cmp(&b.start_time));
    }

    Ok(CalendarMonth {
        year,
        month,
        starting_weekday: first.weekday().num_days_from_sunday(),
        days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use crate::domain::models::event::{EventCategory, Location};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap().and_hms_opt(10, 0, 0).unwrap()
    }

    fn date_on(day: u32, month: u32) -> EventDate {
        EventDate {
            id: format!("d-{}-{}", month, day),
            date: NaiveDate::from_ymd_opt(2026, month, day).unwrap(),
            start_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
        }
    }

    fn event(id: &str, status: EventStatus, registered: i32, limit: Option<i32>, dates: Vec<EventDate>) -> Event {
        let created = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        Event {
            id: id.into(),
            title: format!("Event {}", id),
            description: String::new(),
            dates,
            location: Location::default(),
            category: EventCategory::Other,
            attendee_limit: limit,
            registered_attendees: registered,
            status,
            accepting_registrations: true,
            created_at: created,
            updated_at: created,
            ticket_price: None,
            tickets_sold: None,
            image_url: None,
        }
    }

    #[test]
    fn test_counts_by_status() {
        let events = vec![
            event("a", EventStatus::Active, 0, None, vec![]),
            event("b", EventStatus::Active, 0, None, vec![]),
            event("c", EventStatus::Inactive, 0, None, vec![]),
            event("d", EventStatus::Draft, 0, None, vec![]),
        ];
        assert_eq!(event_counts(&events), EventCounts { total: 4, active: 2, inactive: 1, draft: 1 });
    }

    #[test]
    fn test_revenue_uses_sales_fallback_and_default_price() {
        let mut priced = event("a", EventStatus::Active, 3, None, vec![]);
        priced.ticket_price = Some(10.0);
        priced.tickets_sold = Some(4);
        let unpriced = event("b", EventStatus::Active, 2, None, vec![]);

        assert_eq!(total_revenue(&[priced.clone(), unpriced.clone()]), 4.0 * 10.0 + 2.0 * DEFAULT_TICKET_PRICE);
        assert_eq!(total_tickets_sold(&[priced, unpriced]), 6);
    }

    #[test]
    fn test_top_events_only_active_with_sales() {
        let events = vec![
            event("low", EventStatus::Active, 2, Some(10), vec![]),
            event("high", EventStatus::Active, 8, Some(10), vec![]),
            event("zero", EventStatus::Active, 0, Some(10), vec![]),
            event("draft", EventStatus::Draft, 9, Some(10), vec![]),
        ];
        let top = top_events(&events);
        assert_eq!(top.iter().map(|t| t.event_id.as_str()).collect::<Vec<_>>(), vec!["high", "low"]);
        assert_eq!(top[0].fill_percentage, 80.0);
    }

    #[test]
    fn test_upcoming_excludes_past_and_inactive() {
        let events = vec![
            event("later", EventStatus::Active, 0, None, vec![date_on(30, 10)]),
            event("past", EventStatus::Active, 0, None, vec![date_on(1, 10)]),
            event("soon", EventStatus::Active, 0, None, vec![date_on(18, 10)]),
            event("off", EventStatus::Inactive, 0, None, vec![date_on(19, 10)]),
        ];
        let summary = summarize(&events, now());
        let ids: Vec<_> = summary.upcoming_events.iter().map(|u| u.event_id.as_str()).collect();
        assert_eq!(ids, vec!["soon", "later"]);
        assert_eq!(summary.next_event.unwrap().event_id, "soon");
    }

    #[test]
    fn test_alerts_sold_out_low_attendance_and_drafts() {
        let events = vec![
            event("full", EventStatus::Active, 9, Some(10), vec![date_on(30, 11)]),
            event("quiet", EventStatus::Active, 1, Some(10), vec![date_on(19, 10)]),
            event("draft", EventStatus::Draft, 0, None, vec![]),
        ];
        let alerts = alerts(&events, now());
        let ids: Vec<_> = alerts.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["soldout-full", "lowattendance-quiet", "drafts"]);
    }

    #[test]
    fn test_alerts_are_capped() {
        let events: Vec<Event> = (0..5)
            .map(|i| event(&i.to_string(), EventStatus::Active, 9, Some(10), vec![]))
            .collect();
        assert_eq!(alerts(&events, now()).len(), 3);
    }

    #[test]
    fn test_calendar_month_places_entries() {
        let events = vec![
            event("a", EventStatus::Active, 0, None, vec![date_on(17, 10), date_on(2, 11)]),
            event("b", EventStatus::Active, 0, None, vec![date_on(17, 10)]),
        ];
        let cal = calendar_month(&events, 2026, 10).unwrap();
        assert_eq!(cal.days.len(), 31);
        assert_eq!(cal.starting_weekday, 4); // 2026-10-01 is a Thursday
        assert_eq!(cal.days[16].entries.len(), 2);
        assert!(cal.days.iter().filter(|d| d.day != 17).all(|d| d.entries.is_empty()));
        assert!(calendar_month(&events, 2026, 13).is_err());
    }
}
