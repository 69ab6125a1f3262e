use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::questionnaire::router::checkin_router;

fn router() -> Router {
    let (service, _, _) = build_service();
    checkin_router(service)
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json body")
}

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn session_creation_returns_landing_state() {
    let response = router()
        .oneshot(post_json("/api/v1/checkin/sessions", json!({})))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["state"], "landing");
    assert!(body["session_id"].as_str().is_some());
    assert_eq!(body["mood_options"][0]["id"], "great");
}

#[tokio::test]
async fn events_drive_the_flow_forward() {
    let app = router();

    let created = app
        .clone()
        .oneshot(post_json("/api/v1/checkin/sessions", json!({})))
        .await
        .expect("create session");
    let created = read_json(created).await;
    let session_id = created["session_id"].as_str().expect("id").to_string();

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/checkin/sessions/{session_id}/events"),
            json!({ "intent": "select_mood", "mood": "low" }),
        ))
        .await
        .expect("apply event");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["state"], "welcome");
    assert!(body["quote"].as_str().is_some());

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/checkin/sessions/{session_id}/events"),
            json!({ "intent": "begin" }),
        ))
        .await
        .expect("apply event");
    let body = read_json(response).await;
    assert_eq!(body["state"], "questionnaire");
    assert_eq!(body["question"]["id"], "emotional-1");
    assert_eq!(body["question"]["index"], 1);
    assert_eq!(body["question"]["total"], 11);

    let response = app
        .oneshot(post_json(
            &format!("/api/v1/checkin/sessions/{session_id}/events"),
            json!({ "intent": "answer", "answer": "not_really" }),
        ))
        .await
        .expect("apply event");
    let body = read_json(response).await;
    assert_eq!(body["question"]["id"], "emotional-2");
}

#[tokio::test]
async fn out_of_order_events_conflict() {
    let app = router();
    let created = app
        .clone()
        .oneshot(post_json("/api/v1/checkin/sessions", json!({})))
        .await
        .expect("create session");
    let created = read_json(created).await;
    let session_id = created["session_id"].as_str().expect("id");

    let response = app
        .oneshot(post_json(
            &format!("/api/v1/checkin/sessions/{session_id}/events"),
            json!({ "intent": "answer", "answer": "yes" }),
        ))
        .await
        .expect("apply event");
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let response = router()
        .oneshot(
            Request::get("/api/v1/checkin/sessions/checkin-424242")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn recommendations_lookup_by_mood_band() {
    let response = router()
        .oneshot(
            Request::get("/api/v1/checkin/recommendations/needs_support")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["free"][0]["id"], "breathing-1");
    assert!(body["premium"].as_array().is_some());

    let response = router()
        .oneshot(
            Request::get("/api/v1/checkin/recommendations/ecstatic")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn last_checkin_for_unknown_user_is_not_found() {
    let response = router()
        .oneshot(
            Request::get("/api/v1/checkin/users/nobody/last-checkin")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
