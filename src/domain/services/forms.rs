use crate::domain::models::activity::{ActivityForm, ActivityFormInput};
use crate::domain::models::attendee::AttendeeFormInput;
use crate::domain::models::checkout::ReceiverData;
use crate::domain::models::event::{
    parse_calendar_date, parse_clock_time, EventDate, EventForm, EventFormInput,
};
use crate::error::{AppError, FieldErrors};
use uuid::Uuid;

const REQUIRED: &str = "is required";

fn require(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), REQUIRED.to_string());
    }
}

fn finish<T>(errors: FieldErrors, value: impl FnOnce() -> T) -> Result<T, AppError> {
    if errors.is_empty() {
        Ok(value())
    } else {
        Err(AppError::InvalidForm(errors))
    }
}

pub fn validate_event_form(input: EventFormInput) -> Result<EventForm, AppError> {
    let mut errors = FieldErrors::new();

    require(&mut errors, "title", &input.title);
    require(&mut errors, "description", &input.description);
    require(&mut errors, "location.name", &input.location.name);
    require(&mut errors, "location.city", &input.location.city);
    require(&mut errors, "location.state", &input.location.state);

    if let Some(limit) = input.attendee_limit
        && limit < 0 {
        errors.insert("attendee_limit".into(), "must not be negative".into());
    }
    if let Some(price) = input.ticket_price
        && (price < 0.0 || !price.is_finite()) {
        errors.insert("ticket_price".into(), "must be a non-negative amount".into());
    }

    let mut dates = Vec::with_capacity(input.dates.len());
    if input.dates.is_empty() {
        errors.insert("dates".into(), "add at least one date".into());
    }

    for (index, item) in input.dates.iter().enumerate() {
        let date = parse_date_field(&mut errors, &format!("dates[{}].date", index), &item.date);
        let start = parse_time_field(&mut errors, &format!("dates[{}].start_time", index), &item.start_time);
        let end = parse_time_field(&mut errors, &format!("dates[{}].end_time", index), &item.end_time);

        if let (Some(start), Some(end)) = (start, end)
            && start >= end {
            errors.insert(format!("dates[{}].end_time", index), "must be after the start time".into());
        }

        if let (Some(date), Some(start_time), Some(end_time)) = (date, start, end) {
            let id = item.id.clone()
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string());
            dates.push(EventDate { id, date, start_time, end_time });
        }
    }

    finish(errors, || EventForm {
        title: input.title.trim().to_string(),
        description: input.description.trim().to_string(),
        dates,
        location: input.location,
        category: input.category,
        attendee_limit: input.attendee_limit,
        ticket_price: input.ticket_price,
        accepting_registrations: input.accepting_registrations,
        image_url: input.image_url.filter(|url| !url.trim().is_empty()),
    })
}

pub fn validate_activity_form(input: ActivityFormInput) -> Result<ActivityForm, AppError> {
    let mut errors = FieldErrors::new();

    require(&mut errors, "event_id", &input.event_id);
    require(&mut errors, "title", &input.title);
    require(&mut errors, "description", &input.description);
    require(&mut errors, "location", &input.location);

    let start_date = parse_date_field(&mut errors, "start_date", &input.start_date);
    let start_time = parse_time_field(&mut errors, "start_time", &input.start_time);
    let end_date = parse_date_field(&mut errors, "end_date", &input.end_date);
    let end_time = parse_time_field(&mut errors, "end_time", &input.end_time);

    if let Some(max) = input.max_attendees
        && max < 0 {
        errors.insert("max_attendees".into(), "must not be negative".into());
    }

    match (start_date, start_time, end_date, end_time) {
        (Some(sd), Some(st), Some(ed), Some(et)) => {
            if sd.and_time(st) >= ed.and_time(et) {
                errors.insert("end_time".into(), "must be after the start".into());
            }
            finish(errors, || ActivityForm {
                event_id: input.event_id.trim().to_string(),
                title: input.title.trim().to_string(),
                description: input.description.trim().to_string(),
                start_date: sd,
                start_time: st,
                end_date: ed,
                end_time: et,
                max_attendees: input.max_attendees,
                location: input.location.trim().to_string(),
                speaker: input.speaker.filter(|s| !s.trim().is_empty()),
            })
        }
        _ => Err(AppError::InvalidForm(errors)),
    }
}

pub fn validate_attendee_form(input: &AttendeeFormInput) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();

    require(&mut errors, "full_name", &input.full_name);
    require(&mut errors, "email", &input.email);
    require(&mut errors, "ticket_type", &input.ticket_type);

    if !input.email.trim().is_empty() && !looks_like_email(&input.email) {
        errors.insert("email".into(), "is not a valid e-mail address".into());
    }
    if input.ticket_price < 0.0 || !input.ticket_price.is_finite() {
        errors.insert("ticket_price".into(), "must be a non-negative amount".into());
    }

    finish(errors, || ())
}

/// Checkout step one: full name, e-mail and a matching confirmation e-mail.
pub fn validate_receiver(receiver: &ReceiverData) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();

    require(&mut errors, "full_name", &receiver.full_name);
    require(&mut errors, "email", &receiver.email);

    if receiver.email.trim() != receiver.confirm_email.trim() {
        errors.insert("confirm_email".into(), "e-mail addresses do not match".into());
    }

    finish(errors, || ())
}

fn looks_like_email(raw: &str) -> bool {
    let raw = raw.trim();
    match raw.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    }
}

fn parse_date_field(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<chrono::NaiveDate> {
    if raw.trim().is_empty() {
        errors.insert(field.to_string(), REQUIRED.to_string());
        return None;
    }
    let parsed = parse_calendar_date(raw);
    if parsed.is_none() {
        errors.insert(field.to_string(), "must be a date (YYYY-MM-DD)".to_string());
    }
    parsed
}

fn parse_time_field(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<chrono::NaiveTime> {
    if raw.trim().is_empty() {
        errors.insert(field.to_string(), REQUIRED.to_string());
        return None;
    }
    let parsed = parse_clock_time(raw);
    if parsed.is_none() {
        errors.insert(field.to_string(), "must be a time (HH:MM)".to_string());
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::event::{EventCategory, EventDateInput, Location};

    fn input() -> EventFormInput {
        EventFormInput {
            title: "Rust Meetup".into(),
            description: "Talks and pizza".into(),
            dates: vec![EventDateInput {
                id: None,
                date: "2026-11-03".into(),
                start_time: "19:00".into(),
                end_time: "22:00".into(),
            }],
            location: Location {
                name: "Minascentro".into(),
                city: "Belo Horizonte".into(),
                state: "MG".into(),
                ..Location::default()
            },
            category: EventCategory::Technology,
            attendee_limit: Some(80),
            ticket_price: Some(25.0),
            accepting_registrations: None,
            image_url: Some("  ".into()),
        }
    }

    fn field_errors(result: Result<impl std::fmt::Debug, AppError>) -> FieldErrors {
        match result {
            Err(AppError::InvalidForm(fields)) => fields,
            other => panic!("expected InvalidForm, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_event_form_assigns_date_ids() {
        let form = validate_event_form(input()).unwrap();
        assert_eq!(form.dates.len(), 1);
        assert!(!form.dates[0].id.is_empty());
        assert!(form.image_url.is_none());
    }

    #[test]
    fn test_event_form_reports_missing_fields() {
        let mut raw = input();
        raw.title = "   ".into();
        raw.location.city.clear();
        raw.dates.clear();

        let errors = field_errors(validate_event_form(raw));
        assert!(errors.contains_key("title"));
        assert!(errors.contains_key("location.city"));
        assert_eq!(errors.get("dates").map(String::as_str), Some("add at least one date"));
    }

    #[test]
    fn test_event_form_rejects_end_before_start() {
        let mut raw = input();
        raw.dates[0].end_time = "18:00".into();

        let errors = field_errors(validate_event_form(raw));
        assert_eq!(errors.get("dates[0].end_time").map(String::as_str), Some("must be after the start time"));
    }

    #[test]
    fn test_activity_form_requires_end_after_start() {
        let raw = ActivityFormInput {
            event_id: "evt".into(),
            title: "Keynote".into(),
            description: "Opening".into(),
            start_date: "2026-11-03".into(),
            start_time: "10:00".into(),
            end_date: "2026-11-03".into(),
            end_time: "09:30".into(),
            location: "Main hall".into(),
            ..ActivityFormInput::default()
        };
        let errors = field_errors(validate_activity_form(raw));
        assert!(errors.contains_key("end_time"));
    }

    #[test]
    fn test_receiver_emails_must_match() {
        let receiver = ReceiverData {
            full_name: "Ana Souza".into(),
            email: "ana@example.com".into(),
            confirm_email: "ana@example.org".into(),
        };
        let errors = field_errors(validate_receiver(&receiver));
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("confirm_email"));
    }

    #[test]
    fn test_receiver_emails_match_ignoring_surrounding_spaces() {
        let receiver = ReceiverData {
            full_name: "Ana Souza".into(),
            email: "ana@example.com ".into(),
            confirm_email: " ana@example.com".into(),
        };
        assert!(validate_receiver(&receiver).is_ok());
    }

    #[test]
    fn test_attendee_email_format() {
        let raw = AttendeeFormInput {
            full_name: "Bruno".into(),
            email: "bruno-at-example".into(),
            ticket_type: "VIP".into(),
            ticket_price: 10.0,
            payment_status: None,
            purchase_date: None,
        };
        let errors = field_errors(validate_attendee_form(&raw));
        assert!(errors.contains_key("email"));
    }
}
