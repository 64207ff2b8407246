//! Request handlers for the session and quote endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use super::AppState;
use super::types::{ErrorResponse, NewSessionResponse};
use crate::ledger::{LoadEntry, LoadLedger, LoadSummary};
use crate::pipeline::{SystemQuote, run_pipeline};

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Opens a new session with an empty ledger.
///
/// `POST /sessions` → 201 + `NewSessionResponse`
pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<NewSessionResponse>) {
    let session_id = state.open_session();
    (StatusCode::CREATED, Json(NewSessionResponse { session_id }))
}

/// Closes a session.
///
/// `DELETE /sessions/{id}` → 204, or 404 for an unknown session
pub async fn close_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    if state.close_session(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(unknown_session(id))
    }
}

/// Lists the session's load entries in insertion order.
///
/// `GET /sessions/{id}/loads` → 200 + `Vec<LoadEntry>`
pub async fn list_loads(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<LoadEntry>>, ApiError> {
    with_ledger(&state, id, |ledger| ledger.entries().to_vec()).map(Json)
}

/// Validates and appends one entry, returning the updated totals.
///
/// `POST /sessions/{id}/loads` → 201 + `LoadSummary`, or 400 on a
/// validation error
pub async fn add_load(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(entry): Json<LoadEntry>,
) -> Result<(StatusCode, Json<LoadSummary>), ApiError> {
    let result = with_ledger(&state, id, |ledger| {
        ledger.add(entry).map(|()| ledger.summarize())
    })?;
    match result {
        Ok(summary) => Ok((StatusCode::CREATED, Json(summary))),
        Err(e) => Err((StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e.to_string())))),
    }
}

/// Clears the session's ledger.
///
/// `DELETE /sessions/{id}/loads` → 204
pub async fn clear_loads(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    with_ledger(&state, id, LoadLedger::clear)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Returns the session's aggregate demand totals.
///
/// `GET /sessions/{id}/summary` → 200 + `LoadSummary`
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<LoadSummary>, ApiError> {
    with_ledger(&state, id, |ledger| ledger.summarize()).map(Json)
}

/// Runs the full pipeline over the session's ledger.
///
/// `GET /sessions/{id}/quote` → 200 + `SystemQuote`, or 400 if the
/// configuration rejects the computation
pub async fn get_quote(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<SystemQuote>, ApiError> {
    let ledger = with_ledger(&state, id, |ledger| ledger.clone())?;
    run_pipeline(&ledger, &state.sizing, &state.finance, &state.catalog)
        .map(Json)
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e.to_string()))))
}

/// Runs `f` against the session's ledger, or reports 404.
fn with_ledger<T>(
    state: &AppState,
    id: u64,
    f: impl FnOnce(&mut LoadLedger) -> T,
) -> Result<T, ApiError> {
    let mut sessions = state.sessions();
    match sessions.get_mut(&id) {
        Some(ledger) => Ok(f(ledger)),
        None => Err(unknown_session(id)),
    }
}

fn unknown_session(id: u64) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(format!("unknown session {id}"))),
    )
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::catalog::Catalog;
    use crate::config::{FinanceConfig, SizingConfig};

    fn make_state() -> Arc<AppState> {
        Arc::new(AppState::new(
            Catalog::builtin(),
            SizingConfig::default(),
            FinanceConfig::default(),
        ))
    }

    fn fridge_json() -> String {
        r#"{"name":"Fridge","unit_watts":150.0,"quantity":1,"hours_per_day":10.0}"#.to_string()
    }

    async fn post_json(
        app: axum::Router,
        uri: &str,
        body: String,
    ) -> axum::response::Response {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        app.oneshot(req).await.unwrap()
    }

    #[tokio::test]
    async fn create_session_returns_201_with_id() {
        let app = router(make_state());
        let resp = post_json(app, "/sessions", String::new()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json.get("session_id").is_some());
    }

    #[tokio::test]
    async fn add_load_updates_summary() {
        let state = make_state();
        let id = state.open_session();
        let app = router(state);

        let resp = post_json(app, &format!("/sessions/{id}/loads"), fridge_json()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["total_watts"], 150.0);
        assert_eq!(json["total_energy_wh"], 1500.0);
    }

    #[tokio::test]
    async fn invalid_load_returns_400() {
        let state = make_state();
        let id = state.open_session();
        let app = router(state);

        let bad = r#"{"name":"","unit_watts":150.0,"quantity":1,"hours_per_day":10.0}"#;
        let resp = post_json(app, &format!("/sessions/{id}/loads"), bad.to_string()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn unknown_session_returns_404() {
        let app = router(make_state());
        let req = Request::builder()
            .uri("/sessions/999/summary")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn quote_for_empty_session_has_no_finance() {
        let state = make_state();
        let id = state.open_session();
        let app = router(state);

        let req = Request::builder()
            .uri(format!("/sessions/{id}/quote"))
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["summary"]["total_watts"], 0.0);
        assert!(json["finance"].is_null());
    }

    #[tokio::test]
    async fn sessions_do_not_observe_each_other() {
        let state = make_state();
        let a = state.open_session();
        let b = state.open_session();

        let resp = post_json(
            router(state.clone()),
            &format!("/sessions/{a}/loads"),
            fridge_json(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = Request::builder()
            .uri(format!("/sessions/{b}/summary"))
            .body(Body::empty())
            .unwrap();
        let resp = router(state).oneshot(req).await.unwrap();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["total_energy_wh"], 0.0, "session b must stay empty");
    }

    #[tokio::test]
    async fn clear_loads_resets_summary() {
        let state = make_state();
        let id = state.open_session();

        let resp = post_json(
            router(state.clone()),
            &format!("/sessions/{id}/loads"),
            fridge_json(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = Request::builder()
            .method("DELETE")
            .uri(format!("/sessions/{id}/loads"))
            .body(Body::empty())
            .unwrap();
        let resp = router(state.clone()).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = Request::builder()
            .uri(format!("/sessions/{id}/summary"))
            .body(Body::empty())
            .unwrap();
        let resp = router(state).oneshot(req).await.unwrap();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["total_watts"], 0.0);
    }
}
