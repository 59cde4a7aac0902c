use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use crate::domain::models::attendee::{Attendee, PaymentStatus};
use crate::domain::models::selection::Selection;

const CSV_HEADERS: [&str; 6] = [
    "Full Name",
    "Email",
    "Ticket Type",
    "Price",
    "Payment Status",
    "Purchase Date",
];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AttendeeFilter {
    pub search: String,
    pub payment_status: Selection<PaymentStatus>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Default)]
pub struct AttendeeStats {
    pub total: usize,
    pub paid: usize,
    pub pending: usize,
    pub revenue: f64,
}

pub fn filter_attendees(attendees: Vec<Attendee>, filter: &AttendeeFilter) -> Vec<Attendee> {
    let term = filter.search.trim().to_lowercase();
    attendees
        .into_iter()
        .filter(|a| {
            let matches_search = term.is_empty()
                || a.full_name.to_lowercase().contains(&term)
                || a.email.to_lowercase().contains(&term);
            matches_search && filter.payment_status.matches(&a.payment_status)
        })
        .collect()
}

/// Stats over an event's attendees; revenue counts paid tickets only.
pub fn attendee_stats(attendees: &[Attendee]) -> AttendeeStats {
    attendees.iter().fold(AttendeeStats { total: attendees.len(), ..Default::default() }, |mut acc, a| {
        match a.payment_status {
            PaymentStatus::Paid => {
                acc.paid += 1;
                acc.revenue += a.ticket_price;
            }
            PaymentStatus::Pending => acc.pending += 1,
            PaymentStatus::Cancelled => {}
        }
        acc
    })
}

/// Header row plus one quoted, comma-joined row per attendee.
pub fn export_csv(attendees: &[Attendee], tz: Tz) -> String {
    let mut lines = Vec::with_capacity(attendees.len() + 1);
    lines.push(CSV_HEADERS.join(","));

    for a in attendees {
        let purchase_date = a.purchase_date.with_timezone(&tz).format("%d/%m/%Y").to_string();
        let price = format!("R$ {:.2}", a.ticket_price);
        let row = [
            a.full_name.as_str(),
            a.email.as_str(),
            a.ticket_type.as_str(),
            price.as_str(),
            a.payment_status.label(),
            purchase_date.as_str(),
        ];
        lines.push(row.iter().map(|cell| quote(cell)).collect::<Vec<_>>().join(","));
    }

    lines.join("\n")
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

/// `attendees-<title with whitespace runs as dashes, lowercased>.csv`
pub fn export_file_name(event_title: &str) -> String {
    let slug = event_title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .collect::<String>();
    if slug.is_empty() {
        "attendees.csv".to_string()
    } else {
        format!("attendees-{}.csv", slug)
    }
}
