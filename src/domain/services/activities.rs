use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::domain::models::activity::{Activity, ActivityForm};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ActivityFilter {
    pub search: String,
    pub event_id: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct ActivityGroup {
    pub event_id: String,
    pub activities: Vec<Activity>,
}

pub fn create_activity_from_form(form: ActivityForm, now: DateTime<Utc>) -> Activity {
    Activity {
        id: Uuid::new_v4().to_string(),
        event_id: form.event_id,
        title: form.title,
        description: form.description,
        start_date: form.start_date,
        start_time: form.start_time,
        end_date: form.end_date,
        end_time: form.end_time,
        max_attendees: form.max_attendees,
        registered_attendees: 0,
        location: form.location,
        speaker: form.speaker,
        created_at: now,
        updated_at: now,
    }
}

/// Merges the form over `activity`; id, registrations and `created_at` are kept.
pub fn update_activity_with_form(activity: Activity, form: ActivityForm, now: DateTime<Utc>) -> Activity {
    Activity {
        event_id: form.event_id,
        title: form.title,
        description: form.description,
        start_date: form.start_date,
        start_time: form.start_time,
        end_date: form.end_date,
        end_time: form.end_time,
        max_attendees: form.max_attendees,
        location: form.location,
        speaker: form.speaker,
        updated_at: now,
        ..activity
    }
}

pub fn filter_activities(activities: Vec<Activity>, filter: &ActivityFilter) -> Vec<Activity> {
    let term = filter.search.trim().to_lowercase();
    let event_id = filter.event_id.as_deref().filter(|id| !id.is_empty() && *id != "all");

    activities
        .into_iter()
        .filter(|a| {
            let matches_search = term.is_empty()
                || a.title.to_lowercase().contains(&term)
                || a.description.to_lowercase().contains(&term)
                || a.speaker.as_ref().is_some_and(|s| s.to_lowercase().contains(&term));
            matches_search && event_id.is_none_or(|id| a.event_id == id)
        })
        .collect()
}

/// Groups by parent event, keeping first-seen event order; each group is chronological.
pub fn group_by_event(activities: Vec<Activity>) -> Vec<ActivityGroup> {
    let mut groups: Vec<ActivityGroup> = Vec::new();
    for activity in activities {
        match groups.iter_mut().find(|g| g.event_id == activity.event_id) {
            Some(group) => group.activities.push(activity),
            None => groups.push(ActivityGroup {
                event_id: activity.event_id.clone(),
                activities: vec![activity],
            }),
        }
    }
    for group in &mut groups {
        group.activities.sort_by_key(|a| a.starts_at());
    }
    groups
}
