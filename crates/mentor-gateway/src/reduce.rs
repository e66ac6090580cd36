use serde_json::Value;

// ---------------------------------------------------------------------------
// Response reduction (backend JSON → answer text)
// ---------------------------------------------------------------------------

/// One shape matcher: returns the answer text if the body fits this shape.
type Matcher = fn(&Value) -> Option<String>;

/// `[{"generated_text": "..."} , ...]` — take the first element's field.
fn first_generated_text(body: &Value) -> Option<String> {
    body.as_array()?
        .first()?
        .get("generated_text")?
        .as_str()
        .map(String::from)
}

/// `[{"role": ..., "content": ...}, ...]` — take the last message's content.
fn last_message_content(body: &Value) -> Option<String> {
    body.as_array()?
        .last()?
        .get("content")?
        .as_str()
        .map(String::from)
}

/// `{"generated_text": "..."}` — take the field directly.
fn dict_generated_text(body: &Value) -> Option<String> {
    body.as_object()?
        .get("generated_text")?
        .as_str()
        .map(String::from)
}

/// Priority order is fixed: the declared `ResponseShape` on an adapter is a
/// hint only, because backends drift between these shapes.
const MATCHERS: &[Matcher] = &[first_generated_text, last_message_content, dict_generated_text];

/// Reduces a decoded backend reply to a single answer string.
///
/// Runs the shape matchers in priority order; if none fits, the raw body
/// text is returned unchanged. There is deliberately no decode-error path
/// out of this function — data is never discarded.
pub fn reduce(body: &Value, raw: &str) -> String {
    for matcher in MATCHERS {
        if let Some(text) = matcher(body) {
            return text;
        }
    }
    raw.to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reduce_value(body: Value) -> String {
        let raw = body.to_string();
        reduce(&body, &raw)
    }

    #[test]
    fn list_with_generated_text_takes_first_element() {
        let body = json!([
            { "generated_text": "X" },
            { "generated_text": "ignored" }
        ]);
        assert_eq!(reduce_value(body), "X");
    }

    #[test]
    fn list_of_messages_takes_last_content() {
        let body = json!([
            { "role": "user", "content": "question" },
            { "role": "assistant", "content": "Y" }
        ]);
        assert_eq!(reduce_value(body), "Y");
    }

    #[test]
    fn generated_text_outranks_content() {
        // First element carries generated_text, so the content matcher never
        // runs even though it would also fit.
        let body = json!([
            { "generated_text": "X", "content": "shadowed" }
        ]);
        assert_eq!(reduce_value(body), "X");
    }

    #[test]
    fn dict_with_generated_text() {
        let body = json!({ "generated_text": "Z" });
        assert_eq!(reduce_value(body), "Z");
    }

    #[test]
    fn unmatched_shape_returns_raw_body() {
        let body = json!({ "choices": [{ "text": "not reachable" }] });
        let raw = body.to_string();
        assert_eq!(reduce(&body, &raw), raw);
    }

    #[test]
    fn empty_list_returns_raw_body() {
        let body = json!([]);
        assert_eq!(reduce(&body, "[]"), "[]");
    }

    #[test]
    fn non_string_generated_text_falls_through() {
        // generated_text present but not a string: no match, next shapes
        // tried, then the raw fallback.
        let body = json!([{ "generated_text": 42 }]);
        let raw = body.to_string();
        assert_eq!(reduce(&body, &raw), raw);
    }

    #[test]
    fn scalar_body_returns_raw_body() {
        let body = json!("bare string reply");
        assert_eq!(reduce(&body, "\"bare string reply\""), "\"bare string reply\"");
    }
}
