mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::{json, Value};

fn activity_payload(app: &TestApp, event_id: &str, title: &str, day: i64, start: &str) -> Value {
    json!({
        "event_id": event_id,
        "title": title,
        "description": format!("{} session", title),
        "start_date": app.day(day),
        "start_time": start,
        "end_date": app.day(day),
        "end_time": "23:00",
        "max_attendees": 40,
        "location": "Room B",
        "speaker": "Grace Hopper"
    })
}

#[tokio::test]
async fn test_create_requires_valid_form_and_known_event() {
    let app = TestApp::new().await;
    let id = app.create_simple_event("Conf").await;

    let (status, body) = app
        .call("POST", "/api/v1/admin/activities", Some(activity_payload(&app, "missing", "Talk", 5, "10:00")))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Event not found");

    let mut invalid = activity_payload(&app, &id, "", 5, "10:00");
    invalid["start_time"] = json!("25:99");
    invalid["max_attendees"] = json!(-1);
    let (status, body) = app.call("POST", "/api/v1/admin/activities", Some(invalid)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["fields"]["title"].is_string());
    assert!(body["fields"]["start_time"].is_string());
    assert!(body["fields"]["max_attendees"].is_string());

    let mut backwards = activity_payload(&app, &id, "Talk", 5, "10:00");
    backwards["end_time"] = json!("09:00");
    let (status, body) = app.call("POST", "/api/v1/admin/activities", Some(backwards)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["fields"]["end_time"].is_string());

    let (status, body) = app
        .call("POST", "/api/v1/admin/activities", Some(activity_payload(&app, &id, "Talk", 5, "10:00")))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["notice"], "Activity created successfully!");
    assert_eq!(body["data"]["registered_attendees"], 0);
    assert_eq!(body["data"]["start_time"], "10:00");
}

#[tokio::test]
async fn test_list_filters_and_groups_by_event() {
    let app = TestApp::new().await;
    let conf = app.create_simple_event("Conf").await;
    let fair = app.create_simple_event("Fair").await;

    let talks = [
        (&conf, "Closing", 6, "18:00"),
        (&fair, "Tasting", 5, "12:00"),
        (&conf, "Opening", 5, "09:00"),
    ];
    for (event_id, title, day, start) in talks {
        app.call("POST", "/api/v1/admin/activities", Some(activity_payload(&app, event_id, title, day, start))).await;
    }

    let (status, body) = app.call("GET", "/api/v1/admin/activities", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["activities"].as_array().unwrap().len(), 3);

    let groups = body["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
    let conf_group = groups.iter().find(|g| g["event_id"] == conf.as_str()).unwrap();
    let titles: Vec<&str> = conf_group["activities"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Opening", "Closing"]);

    let (_, body) = app.call("GET", &format!("/api/v1/admin/activities?event_id={}", fair), None).await;
    assert_eq!(body["activities"].as_array().unwrap().len(), 1);
    assert_eq!(body["activities"][0]["title"], "Tasting");

    let (_, body) = app.call("GET", "/api/v1/admin/activities?search=grace&event_id=all", None).await;
    assert_eq!(body["activities"].as_array().unwrap().len(), 3);

    let (_, body) = app.call("GET", "/api/v1/admin/activities?search=opening%20session", None).await;
    assert_eq!(body["activities"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_can_move_activity_and_keeps_identity() {
    let app = TestApp::new().await;
    let conf = app.create_simple_event("Conf").await;
    let fair = app.create_simple_event("Fair").await;
    let created = app.add_activity(&conf, "Workshop", None).await;
    let uri = format!("/api/v1/admin/activities/{}", created["id"].as_str().unwrap());

    let (status, body) = app.call("PUT", &uri, Some(activity_payload(&app, &fair, "Workshop II", 7, "14:00"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notice"], "Activity updated successfully!");
    assert_eq!(body["data"]["id"], created["id"]);
    assert_eq!(body["data"]["event_id"], fair.as_str());
    assert_eq!(body["data"]["speaker"], "Grace Hopper");
    assert_eq!(body["data"]["created_at"], created["created_at"]);

    let (status, _) = app.call("PUT", &uri, Some(activity_payload(&app, "missing", "Workshop", 7, "14:00"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .call("PUT", "/api/v1/admin/activities/missing", Some(activity_payload(&app, &fair, "X", 7, "14:00")))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.call("DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notice"], "Activity deleted successfully!");

    let (status, _) = app.call("DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
