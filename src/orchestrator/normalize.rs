//! Result normalization
//!
//! Remote tools answer in heterogeneous shapes: MCP-style content-chunk
//! envelopes, bare strings, or arbitrary JSON. `normalize_result` flattens
//! any of them into one value through a narrow contract: treat the payload as
//! a collection-or-singleton of chunks, take the best-effort textual value of
//! each chunk, concatenate, and re-parse as JSON when possible. Decode
//! failures are not errors; the concatenated text is kept as-is.

use serde_json::Value;

/// Flatten a raw tool result into a single structured-or-textual value.
pub fn normalize_result(raw: &Value) -> Value {
    // Content-chunk envelopes carry the payload under "content"
    let content = match raw {
        Value::Object(map) => map.get("content").unwrap_or(raw),
        _ => raw,
    };

    // Collection of chunks, or a singleton treated as a one-element collection
    let chunks: Vec<&Value> = match content {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };

    let mut text = String::new();
    for chunk in chunks {
        text.push_str(&chunk_text(chunk));
    }

    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

/// Best-effort textual value of one chunk: a string `text` field, then a
/// string `content` field, then the chunk itself if it is a string, then
/// JSON coercion.
fn chunk_text(chunk: &Value) -> String {
    if let Value::Object(map) = chunk {
        if let Some(Value::String(s)) = map.get("text") {
            return s.clone();
        }
        if let Some(Value::String(s)) = map.get("content") {
            return s.clone();
        }
    }

    match chunk {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_text_chunk_round_trips() {
        let raw = json!({"content": [{"type": "text", "text": r#"{"result":[{"id":1,"rent":1200}]}"#}]});
        assert_eq!(
            normalize_result(&raw),
            json!({"result": [{"id": 1, "rent": 1200}]})
        );
    }

    #[test]
    fn test_plain_text_kept_as_string() {
        let raw = json!({"content": [{"type": "text", "text": "Card created: https://trello.com/c/abc"}]});
        assert_eq!(
            normalize_result(&raw),
            Value::String("Card created: https://trello.com/c/abc".to_string())
        );
    }

    #[test]
    fn test_multiple_chunks_concatenated() {
        let raw = json!({"content": [
            {"text": "{\"a\":"},
            {"text": "1}"}
        ]});
        assert_eq!(normalize_result(&raw), json!({"a": 1}));
    }

    #[test]
    fn test_content_field_fallback() {
        let raw = json!({"content": [{"content": "fallback text"}]});
        assert_eq!(
            normalize_result(&raw),
            Value::String("fallback text".to_string())
        );
    }

    #[test]
    fn test_string_coercion_fallback() {
        // Chunk with neither text nor content is JSON-coerced, and the
        // coerced text parses straight back into the same object
        let raw = json!({"content": [{"answer": 42}]});
        assert_eq!(normalize_result(&raw), json!({"answer": 42}));
    }

    #[test]
    fn test_bare_string_singleton() {
        let raw = Value::String("not json at all".to_string());
        assert_eq!(
            normalize_result(&raw),
            Value::String("not json at all".to_string())
        );
    }

    #[test]
    fn test_object_without_content_key() {
        // No envelope: the object itself is the singleton chunk
        let raw = json!({"result": [1, 2, 3]});
        assert_eq!(normalize_result(&raw), json!({"result": [1, 2, 3]}));
    }

    #[test]
    fn test_numeric_string_parses_as_json() {
        let raw = json!({"content": [{"text": "1200"}]});
        assert_eq!(normalize_result(&raw), json!(1200));
    }
}
