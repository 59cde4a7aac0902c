use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use crate::domain::models::event::Event;
use icalendar::{Calendar, Component, Event as IcalEvent, EventLike};

fn to_utc(local: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        // wall-clock time skipped by a DST jump
        .unwrap_or_else(|| local.and_utc())
}

/// Generates an iCalendar (.ics) string with one VEVENT per scheduled date
pub fn generate_ics(event: &Event, tz: Tz) -> String {
    let mut calendar = Calendar::new();
    calendar.name(&event.title);

    for date in &event.dates {
        let ical_event = IcalEvent::new()
            .summary(&event.title)
            .description(&event.description)
            .location(&event.location.one_line())
            .add_property("CATEGORIES", event.category.label())
            .starts(to_utc(date.starts_at(), tz))
            .ends(to_utc(date.ends_at(), tz))
            .uid(&format!("{}-{}", event.id, date.id))
            .done();
        calendar.push(ical_event);
    }

    calendar.to_string()
}
