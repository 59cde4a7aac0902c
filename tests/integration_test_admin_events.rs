mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_create_event_starts_active_with_zero_registrations() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call("POST", "/api/v1/admin/events", Some(app.event_payload("Tech Summit", "technology", &[3, 4])))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["notice"], "Event created successfully!");
    let event = &body["data"];
    assert_eq!(event["status"], "active");
    assert_eq!(event["registered_attendees"], 0);
    assert_eq!(event["tickets_sold"], 0);
    assert_eq!(event["accepting_registrations"], true);
    assert_eq!(event["dates"].as_array().unwrap().len(), 2);
    assert_eq!(event["dates"][0]["start_time"], "19:00");
    assert!(event["dates"][0]["id"].as_str().is_some_and(|id| !id.is_empty()));
}

#[tokio::test]
async fn test_invalid_form_reports_fields() {
    let app = TestApp::new().await;

    let mut payload = app.event_payload("", "business", &[]);
    payload["location"]["city"] = json!("");
    let (status, body) = app.call("POST", "/api/v1/admin/events", Some(payload)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Form validation failed");
    assert!(body["fields"]["title"].is_string());
    assert!(body["fields"]["dates"].is_string());
    assert!(body["fields"]["location.city"].is_string());

    let mut reversed = app.event_payload("Backwards", "business", &[2]);
    reversed["dates"][0]["start_time"] = json!("22:00");
    reversed["dates"][0]["end_time"] = json!("20:00");
    let (status, body) = app.call("POST", "/api/v1/admin/events", Some(reversed)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["fields"]["dates[0].end_time"].is_string());
}

#[tokio::test]
async fn test_update_preserves_status_counters_and_image() {
    let app = TestApp::new().await;
    let mut payload = app.event_payload("Jazz Night", "musical_shows", &[6]);
    payload["image_url"] = json!("https://img.example.com/jazz.png");
    let event = app.create_event(payload).await;
    let id = event["id"].as_str().unwrap();

    app.set_event_status(id, "draft").await;
    sqlx::query("UPDATE events SET registered_attendees = 12, tickets_sold = 10 WHERE id = ?")
        .bind(id)
        .execute(&app.pool)
        .await
        .unwrap();

    let mut update = app.event_payload("Jazz Night II", "musical_shows", &[7]);
    update["accepting_registrations"] = json!(false);
    let (status, body) = app.call("PUT", &format!("/api/v1/admin/events/{}", id), Some(update)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notice"], "Event updated successfully!");
    let updated = &body["data"];
    assert_eq!(updated["id"], id);
    assert_eq!(updated["title"], "Jazz Night II");
    assert_eq!(updated["status"], "draft");
    assert_eq!(updated["registered_attendees"], 12);
    assert_eq!(updated["tickets_sold"], 10);
    assert_eq!(updated["accepting_registrations"], false);
    assert_eq!(updated["image_url"], "https://img.example.com/jazz.png");
    assert_eq!(updated["created_at"], event["created_at"]);
}

#[tokio::test]
async fn test_delete_cascades_only_to_the_deleted_event() {
    let app = TestApp::new().await;
    let doomed = app.create_simple_event("Doomed").await;
    let kept = app.create_simple_event("Kept").await;

    app.add_attendee(&doomed, "Ana", "ana@example.com", "paid").await;
    app.add_attendee(&doomed, "Bruno", "bruno@example.com", "pending").await;
    app.add_attendee(&kept, "Carla", "carla@example.com", "paid").await;
    app.add_activity(&doomed, "Opening", None).await;
    app.add_activity(&kept, "Keynote", Some("Grace")).await;

    let (status, body) = app.call("DELETE", &format!("/api/v1/admin/events/{}", doomed), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notice"], "Event deleted successfully!");
    assert_eq!(body["data"]["attendees_removed"], 2);
    assert_eq!(body["data"]["activities_removed"], 1);

    let (status, _) = app.call("GET", &format!("/api/v1/admin/events/{}", doomed), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, kept_attendees) = app.call("GET", &format!("/api/v1/admin/events/{}/attendees", kept), None).await;
    assert_eq!(kept_attendees["attendees"].as_array().unwrap().len(), 1);

    let (_, activities) = app.call("GET", "/api/v1/admin/activities", None).await;
    let remaining = activities["activities"].as_array().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["event_id"], kept.as_str());

    let (status, _) = app.call("DELETE", &format!("/api/v1/admin/events/{}", doomed), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_clears_views_pointing_at_the_event() {
    let app = TestApp::new().await;
    let a = app.create_simple_event("A").await;
    let b = app.create_simple_event("B").await;

    app.call("POST", "/api/v1/admin/view", Some(json!({ "action": "view_attendees", "event_id": a }))).await;
    app.call("POST", "/api/v1/admin/view", Some(json!({ "action": "view_event", "event_id": b }))).await;
    let (_, view) = app.call("POST", "/api/v1/admin/view", Some(json!({ "action": "edit_event", "event_id": a }))).await;
    assert_eq!(view["editing_event_id"], a.as_str());
    assert_eq!(view["show_event_form"], true);
    // editing closes the other panels
    assert!(view["selected_event_id"].is_null());
    assert!(view["attendees_view_event_id"].is_null());

    app.call("POST", "/api/v1/admin/view", Some(json!({ "action": "view_event", "event_id": a }))).await;
    app.call("DELETE", &format!("/api/v1/admin/events/{}", a), None).await;

    let (_, view) = app.call("GET", "/api/v1/admin/view", None).await;
    assert!(view["editing_event_id"].is_null());
    assert!(view["selected_event_id"].is_null());
    assert_eq!(view["show_event_form"], false);
    assert_eq!(view["active_tab"], "attendees");
}

#[tokio::test]
async fn test_update_and_get_unknown_event_is_not_found() {
    let app = TestApp::new().await;

    let (status, body) = app.call("GET", "/api/v1/admin/events/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Event not found");

    let (status, _) = app
        .call("PUT", "/api/v1/admin/events/missing", Some(app.event_payload("X", "other", &[1])))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
