use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{activities, admin_events, attendees, checkout, dashboard, events, favorites, health};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Public Catalogue
        .route("/api/v1/events", get(events::list_events))
        .route("/api/v1/events/{event_id}", get(events::get_event))
        .route("/api/v1/events/{event_id}/activities", get(events::list_event_activities))
        .route("/api/v1/events/{event_id}/calendar.ics", get(events::download_calendar))

        // Favorites
        .route("/api/v1/favorites", get(favorites::list_favorites))
        .route("/api/v1/favorites/{event_id}", post(favorites::toggle_favorite).delete(favorites::remove_favorite))

        // Checkout Flow
        .route("/api/v1/checkouts", post(checkout::open_checkout))
        .route("/api/v1/checkouts/{checkout_id}", get(checkout::get_checkout))
        .route("/api/v1/checkouts/{checkout_id}/receiver", post(checkout::submit_receiver))
        .route("/api/v1/checkouts/{checkout_id}/payment-method", put(checkout::select_payment_method))
        .route("/api/v1/checkouts/{checkout_id}/payment", post(checkout::submit_payment))
        .route("/api/v1/checkouts/{checkout_id}/pix/confirm", post(checkout::confirm_pix))
        .route("/api/v1/checkouts/{checkout_id}/step", post(checkout::go_to_step))

        // Admin Events
        .route("/api/v1/admin/events", get(admin_events::list_events).post(admin_events::create_event))
        .route("/api/v1/admin/events/{event_id}", get(admin_events::get_event).put(admin_events::update_event).delete(admin_events::delete_event))

        // Admin Attendees
        .route("/api/v1/admin/events/{event_id}/attendees", get(attendees::list_attendees).post(attendees::create_attendee))
        .route("/api/v1/admin/events/{event_id}/attendees/export", get(attendees::export_attendees))
        .route("/api/v1/admin/attendees/{attendee_id}", put(attendees::update_attendee).delete(attendees::delete_attendee))

        // Admin Activities
        .route("/api/v1/admin/activities", get(activities::list_activities).post(activities::create_activity))
        .route("/api/v1/admin/activities/{activity_id}", put(activities::update_activity).delete(activities::delete_activity))

        // Admin Dashboard
        .route("/api/v1/admin/dashboard", get(dashboard::get_summary))
        .route("/api/v1/admin/dashboard/calendar", get(dashboard::get_calendar))
        .route("/api/v1/admin/view", get(dashboard::get_view).post(dashboard::apply_view_action))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
