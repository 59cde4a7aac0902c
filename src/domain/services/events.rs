use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::domain::models::event::{Event, EventForm, EventStatus};

/// Builds a brand new event: fresh id, zeroed counters, `active` status.
pub fn create_event_from_form(form: EventForm, now: DateTime<Utc>) -> Event {
    Event {
        id: Uuid::new_v4().to_string(),
        title: form.title,
        description: form.description,
        dates: form.dates,
        location: form.location,
        category: form.category,
        attendee_limit: form.attendee_limit,
        registered_attendees: 0,
        status: EventStatus::Active,
        accepting_registrations: form.accepting_registrations.unwrap_or(true),
        created_at: now,
        updated_at: now,
        ticket_price: form.ticket_price,
        tickets_sold: Some(0),
        image_url: form.image_url,
    }
}

/// Merges form fields into `event`. Identity, status, counters and
/// `created_at` are kept; an omitted image or registration flag keeps its value.
pub fn update_event_with_form(event: Event, form: EventForm, now: DateTime<Utc>) -> Event {
    Event {
        title: form.title,
        description: form.description,
        dates: form.dates,
        location: form.location,
        category: form.category,
        attendee_limit: form.attendee_limit,
        ticket_price: form.ticket_price,
        accepting_registrations: form.accepting_registrations.unwrap_or(event.accepting_registrations),
        image_url: form.image_url.or(event.image_url.clone()),
        updated_at: now,
        ..event
    }
}

/// Status is managed by hand (active/inactive/draft); nothing transitions automatically.
pub fn update_event_statuses(events: Vec<Event>) -> Vec<Event> {
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveTime};
    use crate::domain::models::event::{EventCategory, EventDate, Location};

    fn form(title: &str) -> EventForm {
        EventForm {
            title: title.into(),
            description: "desc".into(),
            dates: vec![EventDate {
                id: "d1".into(),
                date: NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
                start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            }],
            location: Location { name: "Hall".into(), ..Location::default() },
            category: EventCategory::Business,
            attendee_limit: Some(10),
            ticket_price: None,
            accepting_registrations: None,
            image_url: None,
        }
    }

    #[test]
    fn test_created_event_starts_active_with_zero_registrations() {
        let now = Utc::now();
        let event = create_event_from_form(form("Launch"), now);

        assert_eq!(event.registered_attendees, 0);
        assert_eq!(event.status, EventStatus::Active);
        assert_eq!(event.tickets_sold, Some(0));
        assert!(event.accepting_registrations);
        assert_eq!(event.created_at, event.updated_at);
    }

    #[test]
    fn test_update_preserves_identity_status_and_counters() {
        let created = Utc::now() - Duration::days(2);
        let mut event = create_event_from_form(form("Launch"), created);
        event.status = EventStatus::Draft;
        event.registered_attendees = 7;
        event.tickets_sold = Some(5);
        event.accepting_registrations = false;
        event.image_url = Some("http://img/1.png".into());

        let now = Utc::now();
        let updated = update_event_with_form(event.clone(), form("Launch v2"), now);

        assert_eq!(updated.id, event.id);
        assert_eq!(updated.title, "Launch v2");
        assert_eq!(updated.status, EventStatus::Draft);
        assert_eq!(updated.registered_attendees, 7);
        assert_eq!(updated.tickets_sold, Some(5));
        assert!(!updated.accepting_registrations);
        assert_eq!(updated.image_url.as_deref(), Some("http://img/1.png"));
        assert_eq!(updated.created_at, created);
        assert_eq!(updated.updated_at, now);
    }

    #[test]
    fn test_update_event_statuses_is_passthrough() {
        let now = Utc::now();
        let events = vec![create_event_from_form(form("A"), now), create_event_from_form(form("B"), now)];
        let ids: Vec<_> = events.iter().map(|e| e.id.clone()).collect();
        let after = update_event_statuses(events);
        assert_eq!(after.iter().map(|e| e.id.clone()).collect::<Vec<_>>(), ids);
        assert!(after.iter().all(|e| e.status == EventStatus::Active));
    }
}
