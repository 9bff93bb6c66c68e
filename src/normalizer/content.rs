use serde_json::Value;

use crate::parsers::deserializers::{epoch_seconds_from_value, string_from_value};
use crate::utils::epoch_to_iso;

/// Concatenate a message's content parts, in order, with no separator.
///
/// A string part is taken verbatim. An object part contributes its `text`
/// field if present, otherwise its `content` field stringified. Anything else
/// contributes nothing.
pub fn extract_content_text(message: &Value) -> String {
    let Some(parts) = message.pointer("/content/parts").and_then(Value::as_array) else {
        return String::new();
    };

    let mut text = String::new();
    for part in parts {
        match part {
            Value::String(s) => text.push_str(s),
            Value::Object(fields) => {
                if let Some(value) = fields.get("text").or_else(|| fields.get("content")) {
                    text.push_str(&stringify(value));
                }
            }
            _ => {}
        }
    }
    text
}

/// Strings verbatim, null as empty, everything else as compact JSON
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Author role and name; absent or non-string fields are `None`
pub fn extract_author(message: &Value) -> (Option<String>, Option<String>) {
    let author = message.get("author");
    let field = |name: &str| author.and_then(|a| a.get(name)).and_then(string_from_value);
    (field("role"), field("name"))
}

/// Raw `create_time` of a message, if it is numeric
pub fn extract_create_time(message: &Value) -> Option<f64> {
    message.get("create_time").and_then(epoch_seconds_from_value)
}

/// ISO-8601 timestamp for a strictly positive, representable epoch value
pub fn resolve_timestamp(create_time: Option<f64>) -> Option<String> {
    create_time.filter(|secs| *secs > 0.0).and_then(epoch_to_iso)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_string_parts_concatenate_without_separator() {
        let message = json!({ "content": { "parts": ["Hello", " ", "World"] } });
        assert_eq!(extract_content_text(&message), "Hello World");
    }

    #[test]
    fn test_object_parts_prefer_text_then_content() {
        let message = json!({
            "content": {
                "parts": [
                    { "text": "from text", "content": "ignored" },
                    { "content": "from content" },
                    { "content": { "lang": "rust" } },
                    { "asset_pointer": "file-service://abc" }
                ]
            }
        });
        assert_eq!(
            extract_content_text(&message),
            r#"from textfrom content{"lang":"rust"}"#
        );
    }

    #[test]
    fn test_missing_or_malformed_parts_yield_empty() {
        assert_eq!(extract_content_text(&json!({})), "");
        assert_eq!(extract_content_text(&json!({ "content": {} })), "");
        assert_eq!(extract_content_text(&json!({ "content": { "parts": "nope" } })), "");
        assert_eq!(extract_content_text(&json!({ "content": { "parts": [1, null, true] } })), "");
        assert_eq!(extract_content_text(&json!("just a string")), "");
    }

    #[test]
    fn test_extract_author() {
        let message = json!({ "author": { "role": "tool", "name": "browser" } });
        assert_eq!(
            extract_author(&message),
            (Some("tool".to_string()), Some("browser".to_string()))
        );

        let message = json!({ "author": { "role": "user", "name": null } });
        assert_eq!(extract_author(&message), (Some("user".to_string()), None));

        assert_eq!(extract_author(&json!({})), (None, None));
    }

    #[test]
    fn test_resolve_timestamp() {
        assert_eq!(
            resolve_timestamp(Some(1700000001.0)).as_deref(),
            Some("2023-11-14T22:13:21+00:00")
        );
        assert_eq!(resolve_timestamp(None), None);
        assert_eq!(resolve_timestamp(Some(0.0)), None);
        assert_eq!(resolve_timestamp(Some(-5.0)), None);
        assert_eq!(resolve_timestamp(Some(1e300)), None);
    }
}
