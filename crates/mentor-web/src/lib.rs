//! Axum service around the mentor gateway: `POST /ask`, `GET /history`, and
//! a static landing page, with optional host-auth identity resolution.

pub mod identity;
pub mod routes;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use mentor_gateway::ModelGateway;
use mentor_history::HistoryStore;

use crate::identity::IdentityProvider;

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Shared application state accessible from Axum routes.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<ModelGateway>,
    pub history: Arc<HistoryStore>,
    /// Host-auth capability; `None` runs every request as the anonymous
    /// identity.
    pub identity: Option<Arc<dyn IdentityProvider>>,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/ask", post(routes::ask))
        .route("/history", get(routes::history))
        .with_state(state)
}
