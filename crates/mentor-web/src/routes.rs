use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Html;
use axum::Json;
use serde::{Deserialize, Serialize};

use mentor_history::HistoryEntry;
use mentor_types::ChatRequest;

use crate::identity::resolve_username;
use crate::AppState;

// ---------------------------------------------------------------------------
// POST /ask
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    "zephyr".to_string()
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

/// Forwards the question to the gateway and persists the exchange. Gateway
/// failures come back as error-text answers, so this handler always answers
/// 200; only a malformed request body is rejected (by the Json extractor).
pub async fn ask(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<AskRequest>,
) -> Json<AskResponse> {
    let request_id = uuid::Uuid::new_v4();
    let user = resolve_username(state.identity.as_deref(), &headers).await;
    tracing::info!(%request_id, user = %user, model = %request.model, "ask");

    let answer = state
        .gateway
        .query(&ChatRequest::new(&request.question, &request.model))
        .await;

    let entry = HistoryEntry::now(request.question, answer.text.clone());
    if let Err(err) = state.history.append(&user, entry).await {
        // The user already has their answer; losing one history row is
        // logged, not surfaced.
        tracing::error!(%request_id, user = %user, error = %err, "history append failed");
    }

    Json(AskResponse {
        answer: answer.text,
    })
}

// ---------------------------------------------------------------------------
// GET /history
// ---------------------------------------------------------------------------

pub async fn history(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<HistoryEntry>>, StatusCode> {
    let user = resolve_username(state.identity.as_deref(), &headers).await;
    match state.history.load(&user).await {
        Ok(entries) => Ok(Json(entries)),
        Err(err) => {
            tracing::error!(user = %user, error = %err, "history load failed");
            Err(StatusCode::from_u16(err.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR))
        }
    }
}

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

pub async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}
