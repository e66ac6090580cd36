use serde_json::json;

use crate::PayloadShape;

/// System persona sent with every chat-shaped request.
pub const MENTOR_PERSONA: &str = "You are a patient senior software engineer mentoring a \
junior developer. Answer coding questions clearly, explain the reasoning, and include a \
short code example when it helps.";

const USER_TURN: &str = "<|user|>";
const ASSISTANT_TURN: &str = "<|assistant|>";

// ---------------------------------------------------------------------------
// Payload construction (prompt → backend JSON)
// ---------------------------------------------------------------------------

/// Shapes the outbound request body for one backend family.
///
/// Both shapes carry `options.wait_for_model` so a cold-starting backend
/// holds the request instead of failing. That is a hint to the backend, not
/// something enforced here.
pub fn build_payload(shape: PayloadShape, prompt: &str) -> serde_json::Value {
    match shape {
        PayloadShape::ChatMessages => json!({
            "messages": [
                { "role": "system", "content": MENTOR_PERSONA },
                { "role": "user", "content": prompt },
            ],
            "options": { "wait_for_model": true },
        }),
        PayloadShape::PlainInstructText => json!({
            "inputs": format!("{USER_TURN}\n{prompt}\n{ASSISTANT_TURN}\n"),
            "options": { "wait_for_model": true },
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
