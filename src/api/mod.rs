//! REST API exposing the sizing pipeline with per-session load ledgers.
//!
//! Endpoints:
//! - `POST /sessions` — open a new session with an empty ledger
//! - `DELETE /sessions/{id}` — close a session
//! - `GET /sessions/{id}/loads` — list the session's entries
//! - `POST /sessions/{id}/loads` — validate and append an entry
//! - `DELETE /sessions/{id}/loads` — clear the session's ledger
//! - `GET /sessions/{id}/summary` — aggregate demand totals
//! - `GET /sessions/{id}/quote` — run the full pipeline
//!
//! Every session owns an independent ledger; concurrent sessions never
//! observe each other's entries.

mod handlers;
mod types;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::Router;
use axum::routing::{delete, get, post};

use crate::catalog::Catalog;
use crate::config::{FinanceConfig, SizingConfig};
use crate::ledger::LoadLedger;

/// Shared application state: immutable catalog and configuration, plus
/// the mutable per-session ledger store.
pub struct AppState {
    /// Component catalog, loaded once at startup.
    pub catalog: Catalog,
    /// Sizing parameters applied to every session's quote.
    pub sizing: SizingConfig,
    /// Finance parameters applied to every session's quote.
    pub finance: FinanceConfig,
    sessions: Mutex<HashMap<u64, LoadLedger>>,
    next_session_id: AtomicU64,
}

impl AppState {
    /// Creates a state with no open sessions.
    pub fn new(catalog: Catalog, sizing: SizingConfig, finance: FinanceConfig) -> Self {
        Self {
            catalog,
            sizing,
            finance,
            sessions: Mutex::new(HashMap::new()),
            next_session_id: AtomicU64::new(1),
        }
    }

    /// Opens a new session and returns its id.
    pub fn open_session(&self) -> u64 {
        let id = self.next_session_id.fetch_add(1, Ordering::Relaxed);
        self.sessions().insert(id, LoadLedger::new());
        id
    }

    /// Closes a session, dropping its ledger. Returns false if unknown.
    pub fn close_session(&self, id: u64) -> bool {
        self.sessions().remove(&id).is_some()
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<u64, LoadLedger>> {
        // Ledger operations cannot panic mid-update, so a poisoned store
        // is still consistent.
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/sessions", post(handlers::create_session))
        .route("/sessions/{id}", delete(handlers::close_session))
        .route(
            "/sessions/{id}/loads",
            get(handlers::list_loads)
                .post(handlers::add_load)
                .delete(handlers::clear_loads),
        )
        .route("/sessions/{id}/summary", get(handlers::get_summary))
        .route("/sessions/{id}/quote", get(handlers::get_quote))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
