use evem_backend::{
    api::router::create_router,
    config::Config,
    infra::factory::{build_state, connect},
    state::AppState,
};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::{Duration, NaiveDate};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower::ServiceExt;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let config = Config::default();
        let pool = connect(&config.database_url)
            .await
            .expect("Failed to open in-memory test db");

        let state = Arc::new(build_state(&config, pool.clone()));
        let router = create_router(state.clone());

        Self { router, pool, state }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// JSON request; returns the status and the parsed body (`Null` when empty).
    pub async fn call(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.call_as(method, uri, body, None).await
    }

    pub async fn call_as(&self, method: &str, uri: &str, body: Option<Value>, visitor: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(visitor) = visitor {
            builder = builder.header("X-Visitor-Id", visitor);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.send(request).await;
        let status = response.status();
        (status, parse_body(response).await)
    }

    pub fn today(&self) -> NaiveDate {
        self.state.config.local_now().date()
    }

    /// `YYYY-MM-DD` for today plus `days` in the event timezone.
    pub fn day(&self, days: i64) -> String {
        (self.today() + Duration::days(days)).format("%Y-%m-%d").to_string()
    }

    pub fn event_payload(&self, title: &str, category: &str, day_offsets: &[i64]) -> Value {
        let dates: Vec<Value> = day_offsets
            .iter()
            .map(|d| json!({ "date": self.day(*d), "start_time": "19:00", "end_time": "22:00" }))
            .collect();
        json!({
            "title": title,
            "description": format!("{} description", title),
            "dates": dates,
            "location": {
                "name": "Arena Hall",
                "street": "Av. Paulista, 1000",
                "neighborhood": "Bela Vista",
                "city": "São Paulo",
                "state": "SP",
                "zip_code": "01310-100"
            },
            "category": category,
            "attendee_limit": 100,
            "ticket_price": 80.0
        })
    }

    /// Creates an event through the admin API and returns its JSON.
    pub async fn create_event(&self, payload: Value) -> Value {
        let (status, body) = self.call("POST", "/api/v1/admin/events", Some(payload)).await;
        assert_eq!(status, StatusCode::CREATED, "create event failed: {}", body);
        body["data"].clone()
    }

    pub async fn create_simple_event(&self, title: &str) -> String {
        let event = self.create_event(self.event_payload(title, "business", &[5])).await;
        event["id"].as_str().unwrap().to_string()
    }

    pub async fn set_event_status(&self, event_id: &str, status: &str) {
        sqlx::query("UPDATE events SET status = ? WHERE id = ?")
            .bind(status)
            .bind(event_id)
            .execute(&self.pool)
            .await
            .unwrap();
    }

    pub async fn add_attendee(&self, event_id: &str, name: &str, email: &str, status: &str) -> Value {
        let (code, body) = self
            .call(
                "POST",
                &format!("/api/v1/admin/events/{}/attendees", event_id),
                Some(json!({
                    "full_name": name,
                    "email": email,
                    "ticket_type": "General",
                    "ticket_price": 80.0,
                    "payment_status": status
                })),
            )
            .await;
        assert_eq!(code, StatusCode::CREATED, "add attendee failed: {}", body);
        body["data"].clone()
    }

    pub async fn add_activity(&self, event_id: &str, title: &str, speaker: Option<&str>) -> Value {
        let (code, body) = self
            .call(
                "POST",
                "/api/v1/admin/activities",
                Some(json!({
                    "event_id": event_id,
                    "title": title,
                    "description": format!("{} session", title),
                    "start_date": self.day(5),
                    "start_time": "10:00",
                    "end_date": self.day(5),
                    "end_time": "11:30",
                    "location": "Room A",
                    "speaker": speaker
                })),
            )
            .await;
        assert_eq!(code, StatusCode::CREATED, "add activity failed: {}", body);
        body["data"].clone()
    }
}

pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
}
