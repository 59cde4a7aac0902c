use std::sync::Arc;
use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};
use crate::domain::{
    models::{
        activity::{Activity, ActivityFormInput},
        attendee::{Attendee, AttendeeFormInput, NewAttendeeParams, PaymentStatus},
        event::{CascadeReport, Event, EventFormInput},
    },
    ports::{ActivityRepository, AttendeeRepository, EventRepository},
    services::{
        activities::{self, ActivityFilter},
        analytics::{self, CalendarMonth, DashboardSummary},
        attendees::{self, AttendeeFilter, AttendeeStats},
        events::{create_event_from_form, update_event_statuses, update_event_with_form},
        forms::{validate_activity_form, validate_attendee_form, validate_event_form},
        listing::{filter_events, sort_events, EventFilters, SortBy},
    },
};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardTab {
    #[default]
    Dashboard,
    Events,
    Activities,
    Attendees,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    #[default]
    Grid,
    List,
}

/// What the organizer currently has open on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardView {
    pub active_tab: DashboardTab,
    pub show_event_form: bool,
    pub editing_event_id: Option<String>,
    pub selected_event_id: Option<String>,
    pub attendees_view_event_id: Option<String>,
    pub filters: EventFilters,
    pub sort_by: SortBy,
    pub layout_mode: LayoutMode,
}

impl DashboardView {
    /// Drops every open form or panel pointing at `event_id`.
    pub fn forget_event(&mut self, event_id: &str) {
        if self.selected_event_id.as_deref() == Some(event_id) {
            self.selected_event_id = None;
        }
        if self.editing_event_id.as_deref() == Some(event_id) {
            self.editing_event_id = None;
            self.show_event_form = false;
        }
        if self.attendees_view_event_id.as_deref() == Some(event_id) {
            self.attendees_view_event_id = None;
        }
    }

    pub fn apply(&mut self, action: ViewAction) {
        match action {
            ViewAction::OpenCreateForm => {
                self.editing_event_id = None;
                self.show_event_form = true;
            }
            ViewAction::EditEvent { event_id } => {
                self.editing_event_id = Some(event_id);
                self.show_event_form = true;
                self.selected_event_id = None;
                self.attendees_view_event_id = None;
            }
            ViewAction::ViewEvent { event_id } => self.selected_event_id = Some(event_id),
            ViewAction::ViewAttendees { event_id } => {
                self.attendees_view_event_id = Some(event_id);
                self.active_tab = DashboardTab::Attendees;
            }
            ViewAction::CloseForm => {
                self.editing_event_id = None;
                self.show_event_form = false;
            }
            ViewAction::CloseDetail => self.selected_event_id = None,
            ViewAction::CloseAttendees => self.attendees_view_event_id = None,
            ViewAction::SetTab { tab } => self.active_tab = tab,
            ViewAction::SetFilters { filters } => self.filters = filters,
            ViewAction::ClearFilters => self.filters = EventFilters::default(),
            ViewAction::SetSort { sort_by } => self.sort_by = sort_by,
            ViewAction::SetLayout { layout_mode } => self.layout_mode = layout_mode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ViewAction {
    OpenCreateForm,
    EditEvent { event_id: String },
    ViewEvent { event_id: String },
    ViewAttendees { event_id: String },
    CloseForm,
    CloseDetail,
    CloseAttendees,
    SetTab { tab: DashboardTab },
    SetFilters { filters: EventFilters },
    ClearFilters,
    SetSort { sort_by: SortBy },
    SetLayout { layout_mode: LayoutMode },
}

impl ViewAction {
    fn event_id(&self) -> Option<&str> {
        match self {
            ViewAction::EditEvent { event_id }
            | ViewAction::ViewEvent { event_id }
            | ViewAction::ViewAttendees { event_id } => Some(event_id),
            _ => None,
        }
    }
}

/// A completed mutation plus the success notice shown to the organizer.
#[derive(Debug, Serialize, Clone)]
pub struct Mutation<T> {
    pub notice: String,
    pub data: T,
}

impl<T> Mutation<T> {
    fn new(notice: &str, data: T) -> Self {
        Self { notice: notice.to_string(), data }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct Deleted {
    pub id: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct EventDeleted {
    pub id: String,
    #[serde(flatten)]
    pub cascade: CascadeReport,
}

pub struct AttendeeExport {
    pub file_name: String,
    pub csv: String,
    pub rows: usize,
}

pub struct AdminDashboard {
    events: Arc<dyn EventRepository>,
    activities: Arc<dyn ActivityRepository>,
    attendees: Arc<dyn AttendeeRepository>,
    view: RwLock<DashboardView>,
}

impl AdminDashboard {
    pub fn new(
        events: Arc<dyn EventRepository>,
        activities: Arc<dyn ActivityRepository>,
        attendees: Arc<dyn AttendeeRepository>,
    ) -> Self {
        Self { events, activities, attendees, view: RwLock::new(DashboardView::default()) }
    }

    async fn require_event(&self, id: &str) -> Result<Event, AppError> {
        self.events.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Event not found".into()))
    }

    pub async fn view(&self) -> DashboardView {
        self.view.read().await.clone()
    }

    pub async fn apply_view_action(&self, action: ViewAction) -> Result<DashboardView, AppError> {
        if let Some(event_id) = action.event_id() {
            self.require_event(event_id).await?;
        }
        let mut view = self.view.write().await;
        view.apply(action);
        Ok(view.clone())
    }

    // --- Events ---

    /// Explicit filters/sort win; otherwise the ones stored in the view.
    pub async fn list_events(&self, filters: Option<EventFilters>, sort_by: Option<SortBy>, now: NaiveDateTime) -> Result<Vec<Event>, AppError> {
        let (filters, sort_by) = {
            let view = self.view.read().await;
            (filters.unwrap_or_else(|| view.filters.clone()), sort_by.unwrap_or(view.sort_by))
        };
        let events = update_event_statuses(self.events.list().await?);
        Ok(sort_events(filter_events(events, &filters, now), sort_by, now))
    }

    pub async fn get_event(&self, id: &str) -> Result<Event, AppError> {
        self.require_event(id).await
    }

    pub async fn create_event(&self, input: EventFormInput) -> Result<Mutation<Event>, AppError> {
        let form = validate_event_form(input)?;
        let created = self.events.create(&create_event_from_form(form, Utc::now())).await?;

        let mut view = self.view.write().await;
        view.show_event_form = false;
        view.editing_event_id = None;

        info!(event_id = %created.id, title = %created.title, "event created");
        Ok(Mutation::new("Event created successfully!", created))
    }

    pub async fn update_event(&self, id: &str, input: EventFormInput) -> Result<Mutation<Event>, AppError> {
        let existing = self.require_event(id).await?;
        let form = validate_event_form(input)?;
        let updated = self.events.update(&update_event_with_form(existing, form, Utc::now())).await?;

        let mut view = self.view.write().await;
        if view.editing_event_id.as_deref() == Some(id) {
            view.editing_event_id = None;
            view.show_event_form = false;
        }

        info!(event_id = %updated.id, "event updated");
        Ok(Mutation::new("Event updated successfully!", updated))
    }

    pub async fn delete_event(&self, id: &str) -> Result<Mutation<EventDeleted>, AppError> {
        let cascade = self.events.delete_cascade(id).await?;
        self.view.write().await.forget_event(id);

        info!(
            event_id = %id,
            attendees_removed = cascade.attendees_removed,
            activities_removed = cascade.activities_removed,
            "event deleted"
        );
        Ok(Mutation::new("Event deleted successfully!", EventDeleted { id: id.to_string(), cascade }))
    }

    /// Runs the status pass over every event; returns how many were checked.
    pub async fn refresh_statuses(&self) -> Result<usize, AppError> {
        let events = self.events.list().await?;
        let checked = events.len();
        let refreshed = update_event_statuses(events);
        debug!(checked, unchanged = refreshed.len(), "event statuses refreshed");
        Ok(checked)
    }

    // --- Attendees ---

    pub async fn list_attendees(&self, event_id: &str, filter: &AttendeeFilter) -> Result<(Vec<Attendee>, AttendeeStats), AppError> {
        self.require_event(event_id).await?;
        let all = self.attendees.list_by_event(event_id).await?;
        let stats = attendees::attendee_stats(&all);
        Ok((attendees::filter_attendees(all, filter), stats))
    }

    pub async fn create_attendee(&self, event_id: &str, input: AttendeeFormInput) -> Result<Mutation<Attendee>, AppError> {
        self.require_event(event_id).await?;
        validate_attendee_form(&input)?;

        let mut attendee = Attendee::new(NewAttendeeParams {
            event_id: event_id.to_string(),
            full_name: input.full_name.trim().to_string(),
            email: input.email.trim().to_string(),
            ticket_type: input.ticket_type.trim().to_string(),
            ticket_price: input.ticket_price,
            payment_status: input.payment_status.unwrap_or(PaymentStatus::Pending),
        });
        if let Some(purchase_date) = input.purchase_date {
            attendee.purchase_date = purchase_date;
        }
        let created = self.attendees.create(&attendee).await?;

        info!(attendee_id = %created.id, event_id = %event_id, "attendee added");
        Ok(Mutation::new("Attendee added successfully!", created))
    }

    pub async fn update_attendee(&self, id: &str, input: AttendeeFormInput) -> Result<Mutation<Attendee>, AppError> {
        let existing = self.attendees.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Attendee not found".into()))?;
        validate_attendee_form(&input)?;

        let attendee = Attendee {
            full_name: input.full_name.trim().to_string(),
            email: input.email.trim().to_string(),
            ticket_type: input.ticket_type.trim().to_string(),
            ticket_price: input.ticket_price,
            payment_status: input.payment_status.unwrap_or(existing.payment_status),
            purchase_date: input.purchase_date.unwrap_or(existing.purchase_date),
            ..existing
        };
        let updated = self.attendees.update(&attendee).await?;

        info!(attendee_id = %updated.id, "attendee updated");
        Ok(Mutation::new("Attendee updated successfully!", updated))
    }

    pub async fn delete_attendee(&self, id: &str) -> Result<Mutation<Deleted>, AppError> {
        self.attendees.delete(id).await?;
        info!(attendee_id = %id, "attendee removed");
        Ok(Mutation::new("Attendee removed successfully!", Deleted { id: id.to_string() }))
    }

    pub async fn export_attendees(&self, event_id: &str, filter: &AttendeeFilter, tz: Tz) -> Result<AttendeeExport, AppError> {
        let event = self.require_event(event_id).await?;
        let rows = attendees::filter_attendees(self.attendees.list_by_event(event_id).await?, filter);

        info!(event_id = %event_id, rows = rows.len(), "attendee export started");
        Ok(AttendeeExport {
            file_name: attendees::export_file_name(&event.title),
            csv: attendees::export_csv(&rows, tz),
            rows: rows.len(),
        })
    }

    // --- Activities ---

    pub async fn list_activities(&self, filter: &ActivityFilter) -> Result<Vec<Activity>, AppError> {
        Ok(activities::filter_activities(self.activities.list().await?, filter))
    }

    pub async fn list_event_activities(&self, event_id: &str) -> Result<Vec<Activity>, AppError> {
        self.require_event(event_id).await?;
        self.activities.list_by_event(event_id).await
    }

    pub async fn create_activity(&self, input: ActivityFormInput) -> Result<Mutation<Activity>, AppError> {
        let form = validate_activity_form(input)?;
        self.require_event(&form.event_id).await?;
        let created = self.activities.create(&activities::create_activity_from_form(form, Utc::now())).await?;

        info!(activity_id = %created.id, event_id = %created.event_id, "activity created");
        Ok(Mutation::new("Activity created successfully!", created))
    }

    pub async fn update_activity(&self, id: &str, input: ActivityFormInput) -> Result<Mutation<Activity>, AppError> {
        let existing = self.activities.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Activity not found".into()))?;
        let form = validate_activity_form(input)?;
        if form.event_id != existing.event_id {
            self.require_event(&form.event_id).await?;
        }
        let updated = self.activities.update(&activities::update_activity_with_form(existing, form, Utc::now())).await?;

        info!(activity_id = %updated.id, "activity updated");
        Ok(Mutation::new("Activity updated successfully!", updated))
    }

    pub async fn delete_activity(&self, id: &str) -> Result<Mutation<Deleted>, AppError> {
        self.activities.delete(id).await?;
        info!(activity_id = %id, "activity deleted");
        Ok(Mutation::new("Activity deleted successfully!", Deleted { id: id.to_string() }))
    }

    // --- Analytics ---

    pub async fn summary(&self, now: NaiveDateTime) -> Result<DashboardSummary, AppError> {
        let events = self.events.list().await?;
        Ok(analytics::summarize(&events, now))
    }

    pub async fn calendar(&self, year: i32, month: u32) -> Result<CalendarMonth, AppError> {
        let events = self.events.list().await?;
        analytics::calendar_month(&events, year, month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::listing::DateRange;

    fn busy_view() -> DashboardView {
        DashboardView {
            show_event_form: true,
            editing_event_id: Some("a".into()),
            selected_event_id: Some("a".into()),
            attendees_view_event_id: Some("a".into()),
            ..DashboardView::default()
        }
    }

    #[test]
    fn test_forget_event_clears_only_matching_refs() {
        let mut view = busy_view();
        view.forget_event("b");
        assert_eq!(view, busy_view());

        view.forget_event("a");
        assert!(!view.show_event_form);
        assert!(view.editing_event_id.is_none());
        assert!(view.selected_event_id.is_none());
        assert!(view.attendees_view_event_id.is_none());
    }

    #[test]
    fn test_edit_closes_detail_and_attendee_panels() {
        let mut view = busy_view();
        view.apply(ViewAction::EditEvent { event_id: "b".into() });
        assert_eq!(view.editing_event_id.as_deref(), Some("b"));
        assert!(view.show_event_form);
        assert!(view.selected_event_id.is_none());
        assert!(view.attendees_view_event_id.is_none());
    }

    #[test]
    fn test_view_attendees_switches_tab() {
        let mut view = DashboardView::default();
        view.apply(ViewAction::ViewAttendees { event_id: "a".into() });
        assert_eq!(view.active_tab, DashboardTab::Attendees);
        assert_eq!(view.attendees_view_event_id.as_deref(), Some("a"));
    }

    #[test]
    fn test_view_action_json_shape() {
        let action: ViewAction = serde_json::from_str(r#"{"action":"set_filters","filters":{"search":"rock","category":"musical_shows","date_range":"this_week"}}"#).unwrap();
        let mut view = DashboardView::default();
        view.apply(action);
        assert_eq!(view.filters.search, "rock");
        assert_eq!(view.filters.date_range, DateRange::ThisWeek);
        assert!(view.filters.status.is_all());

        view.apply(serde_json::from_str(r#"{"action":"clear_filters"}"#).unwrap());
        assert!(view.filters.is_default());

        view.apply(serde_json::from_str(r#"{"action":"set_layout","layout_mode":"list"}"#).unwrap());
        assert_eq!(view.layout_mode, LayoutMode::List);
    }
}
