//! Shared types and errors for the Mentor chat backend.
//!
//! This crate provides the foundational types used across the other Mentor
//! crates:
//! - `MentorError` — unified error taxonomy
//! - `ChatRequest` — a `(prompt, model)` pair handed to the gateway
//! - `ChatAnswer` — the normalized gateway result, error-flagged but never
//!   an exception

use serde::{Deserialize, Serialize};

/// Marker prefixed to every user-visible error answer.
pub const ERROR_MARKER: &str = "❌";

// ---------------------------------------------------------------------------
// MentorError
// ---------------------------------------------------------------------------

/// Unified error type for all Mentor subsystems.
///
/// The spec-level `BackendDecodeError` has no variant here: response
/// reduction always falls back to the raw body text, so the only decode
/// failure left is a body that is not JSON at all, which maps to `Json`.
#[derive(Debug, thiserror::Error)]
pub enum MentorError {
    #[error("Unknown model '{model}' and literal-model fallback is disabled")]
    UnknownModel { model: String },

    #[error("Backend returned HTTP {status}: {body}")]
    BackendHttp { status: u16, body: String },

    #[error("Transport failure: {message}")]
    Transport { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl MentorError {
    /// Maps the error to an HTTP status code for server mode.
    pub fn http_status(&self) -> u16 {
        match self {
            MentorError::UnknownModel { .. } => 400,
            MentorError::BackendHttp { .. } | MentorError::Transport { .. } => 502,
            MentorError::Io(_) | MentorError::Json(_) | MentorError::Other(_) => 500,
        }
    }
}

// ---------------------------------------------------------------------------
// ChatRequest
// ---------------------------------------------------------------------------

/// A single question bound for a model backend. Transient, one per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
    pub model: String,
}

impl ChatRequest {
    pub fn new(prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: model.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// ChatAnswer
// ---------------------------------------------------------------------------

/// The normalized result of one gateway call.
///
/// Errors are carried as data: the text starts with [`ERROR_MARKER`] and
/// `is_error` is set, but no error type crosses the gateway boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatAnswer {
    pub text: String,
    pub is_error: bool,
}

impl ChatAnswer {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(err: &MentorError) -> Self {
        Self {
            text: format!("{ERROR_MARKER} {err}"),
            is_error: true,
        }
    }
}

impl From<Result<String, MentorError>> for ChatAnswer {
    fn from(result: Result<String, MentorError>) -> Self {
        match result {
            Ok(text) => ChatAnswer::ok(text),
            Err(err) => ChatAnswer::error(&err),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_answer_is_not_flagged() {
        let answer = ChatAnswer::ok("fn main() {}");
        assert_eq!(answer.text, "fn main() {}");
        assert!(!answer.is_error);
    }

    #[test]
    fn error_answer_carries_marker_and_message() {
        let err = MentorError::BackendHttp {
            status: 503,
            body: "loading".into(),
        };
        let answer = ChatAnswer::error(&err);
        assert!(answer.is_error);
        assert!(answer.text.starts_with(ERROR_MARKER));
        assert!(answer.text.contains("503"));
        assert!(answer.text.contains("loading"));
    }

    #[test]
    fn result_flattens_at_boundary() {
        let ok: ChatAnswer = Ok::<_, MentorError>("hello".to_string()).into();
        assert_eq!(ok, ChatAnswer::ok("hello"));

        let err: ChatAnswer = Err::<String, _>(MentorError::Transport {
            message: "connection refused".into(),
        })
        .into();
        assert!(err.is_error);
        assert!(err.text.contains("connection refused"));
    }

    #[test]
    fn unknown_model_display_names_the_model() {
        let err = MentorError::UnknownModel {
            model: "starcoder".into(),
        };
        assert!(err.to_string().contains("starcoder"));
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn http_status_mapping() {
        assert_eq!(
            MentorError::BackendHttp {
                status: 503,
                body: String::new()
            }
            .http_status(),
            502
        );
        assert_eq!(
            MentorError::Transport {
                message: String::new()
            }
            .http_status(),
            502
        );
        assert_eq!(MentorError::Other("boom".into()).http_status(), 500);
    }

    #[test]
    fn chat_answer_serializes_round_trip() {
        let answer = ChatAnswer::ok("use Result<T, E>");
        let json = serde_json::to_string(&answer).unwrap();
        let back: ChatAnswer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, answer);
    }
}
