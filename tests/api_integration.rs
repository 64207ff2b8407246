//! Integration tests for the REST API surface (feature `api`).
#![cfg(feature = "api")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use solar_sizer::api::{AppState, router};
use solar_sizer::catalog::Catalog;
use solar_sizer::config::{FinanceConfig, SizingConfig};

fn make_state() -> Arc<AppState> {
    Arc::new(AppState::new(
        Catalog::builtin(),
        SizingConfig::default(),
        FinanceConfig::default(),
    ))
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("body is JSON")
}

async fn create_session(state: &Arc<AppState>) -> u64 {
    let req = Request::builder()
        .method("POST")
        .uri("/sessions")
        .body(Body::empty())
        .expect("request builds");
    let resp = router(state.clone()).oneshot(req).await.expect("routed");
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await["session_id"]
        .as_u64()
        .expect("session_id is u64")
}

async fn add_fridge(state: &Arc<AppState>, session: u64) -> StatusCode {
    let req = Request::builder()
        .method("POST")
        .uri(format!("/sessions/{session}/loads"))
        .header("content-type", "application/json")
        .body(Body::from(
            r#"{"name":"Fridge","unit_watts":150.0,"quantity":1,"hours_per_day":10.0}"#,
        ))
        .expect("request builds");
    let resp = router(state.clone()).oneshot(req).await.expect("routed");
    resp.status()
}

#[tokio::test]
async fn full_session_lifecycle() {
    let state = make_state();
    let session = create_session(&state).await;

    assert_eq!(add_fridge(&state, session).await, StatusCode::CREATED);

    let req = Request::builder()
        .uri(format!("/sessions/{session}/quote"))
        .body(Body::empty())
        .expect("request builds");
    let resp = router(state.clone()).oneshot(req).await.expect("routed");
    assert_eq!(resp.status(), StatusCode::OK);

    let quote = body_json(resp).await;
    assert_eq!(quote["summary"]["total_watts"], 150.0);
    assert_eq!(quote["summary"]["total_energy_wh"], 1500.0);
    assert_eq!(quote["sizing"]["inverter_watts"], 195.0);
    assert!(quote["finance"]["payback_years"].as_f64().is_some());

    // close and verify the session is gone
    let req = Request::builder()
        .method("DELETE")
        .uri(format!("/sessions/{session}"))
        .body(Body::empty())
        .expect("request builds");
    let resp = router(state.clone()).oneshot(req).await.expect("routed");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = Request::builder()
        .uri(format!("/sessions/{session}/summary"))
        .body(Body::empty())
        .expect("request builds");
    let resp = router(state).oneshot(req).await.expect("routed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn concurrent_sessions_are_isolated() {
    let state = make_state();
    let a = create_session(&state).await;
    let b = create_session(&state).await;
    assert_ne!(a, b);

    assert_eq!(add_fridge(&state, a).await, StatusCode::CREATED);

    let req = Request::builder()
        .uri(format!("/sessions/{b}/loads"))
        .body(Body::empty())
        .expect("request builds");
    let resp = router(state.clone()).oneshot(req).await.expect("routed");
    let loads = body_json(resp).await;
    assert_eq!(
        loads.as_array().map(Vec::len),
        Some(0),
        "session b must not see session a's entries"
    );
}

#[tokio::test]
async fn quote_of_two_sessions_matches_independent_pipelines() {
    let state = make_state();
    let a = create_session(&state).await;
    let b = create_session(&state).await;
    assert_eq!(add_fridge(&state, a).await, StatusCode::CREATED);
    assert_eq!(add_fridge(&state, b).await, StatusCode::CREATED);

    let mut quotes = Vec::new();
    for id in [a, b] {
        let req = Request::builder()
            .uri(format!("/sessions/{id}/quote"))
            .body(Body::empty())
            .expect("request builds");
        let resp = router(state.clone()).oneshot(req).await.expect("routed");
        quotes.push(body_json(resp).await);
    }
    assert_eq!(quotes[0], quotes[1], "same inputs, same quote");
}

#[tokio::test]
async fn malformed_entry_is_rejected_with_400() {
    let state = make_state();
    let session = create_session(&state).await;

    let req = Request::builder()
        .method("POST")
        .uri(format!("/sessions/{session}/loads"))
        .header("content-type", "application/json")
        .body(Body::from(
            r#"{"name":"Fridge","unit_watts":150.0,"quantity":0,"hours_per_day":10.0}"#,
        ))
        .expect("request builds");
    let resp = router(state.clone()).oneshot(req).await.expect("routed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err = body_json(resp).await;
    assert!(
        err["error"].as_str().is_some_and(|m| m.contains("quantity")),
        "error should name the bad field: {err}"
    );

    // the rejected entry must not have been appended
    let req = Request::builder()
        .uri(format!("/sessions/{session}/summary"))
        .body(Body::empty())
        .expect("request builds");
    let resp = router(state).oneshot(req).await.expect("routed");
    let summary = body_json(resp).await;
    assert_eq!(summary["total_watts"], 0.0);
}
