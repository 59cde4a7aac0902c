use crate::domain::models::{
    checkout::PaymentMethod,
    event::{EventCategory, EventStatus},
    selection::Selection,
};
use crate::domain::services::listing::{DateRange, EventFilters, SortBy};
use serde::Deserialize;

/// Public catalogue query; status is fixed to `active`.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct PublicEventQuery {
    pub search: String,
    pub category: Selection<EventCategory>,
    pub date_range: DateRange,
    pub sort_by: SortBy,
}

impl PublicEventQuery {
    pub fn filters(&self) -> EventFilters {
        EventFilters {
            search: self.search.clone(),
            category: self.category.clone(),
            status: Selection::Only(EventStatus::Active),
            date_range: self.date_range,
        }
    }
}

/// Admin listing query. When no filter parameter is given the dashboard's
/// stored filters apply, and likewise for `sort_by`.
#[derive(Deserialize, Default)]
pub struct AdminEventQuery {
    pub search: Option<String>,
    pub category: Option<Selection<EventCategory>>,
    pub status: Option<Selection<EventStatus>>,
    pub date_range: Option<DateRange>,
    pub sort_by: Option<SortBy>,
}

impl AdminEventQuery {
    pub fn filters(&self) -> Option<EventFilters> {
        if self.search.is_none() && self.category.is_none() && self.status.is_none() && self.date_range.is_none() {
            return None;
        }
        Some(EventFilters {
            search: self.search.clone().unwrap_or_default(),
            category: self.category.clone().unwrap_or_default(),
            status: self.status.clone().unwrap_or_default(),
            date_range: self.date_range.unwrap_or_default(),
        })
    }
}

#[derive(Deserialize)]
pub struct OpenCheckoutRequest {
    pub event_id: String,
    pub ticket_type: Option<String>,
    pub quantity: Option<i32>,
}

#[derive(Deserialize)]
pub struct SelectPaymentMethodRequest {
    pub method: PaymentMethod,
}

#[derive(Deserialize)]
pub struct GoToStepRequest {
    pub step: u8,
}

#[derive(Deserialize, Default)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}
