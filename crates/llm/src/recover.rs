//! Recovering JSON from free-text model replies.
//!
//! Models wrap their answer in prose, code fences or labels. Each strategy is
//! a pure `text -> Option<Value>` function; [`recover_json`] tries them in
//! order and the first one that yields valid JSON wins.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::types::{StructuredLineItem, StructuredReceipt};

pub type RecoveryStrategy = fn(&str) -> Option<Value>;

/// Markers after which a JSON object commonly follows.
pub const MARKERS: &[&str] = &["```json", "```", "JSON:", "Response:", "Result:"];

/// Strategies in the order they are tried.
pub const STRATEGIES: &[(&str, RecoveryStrategy)] = &[
    ("object_span", object_span),
    ("array_span", array_span),
    ("after_marker", after_marker),
    ("whole_text", whole_text),
];

fn re_object() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("invalid regex"))
}

fn re_array() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| Regex::new(r"(?s)\[.*\]").expect("invalid regex"))
}

/// Run the strategy chain over `text`.
pub fn recover_json(text: &str) -> Option<Value> {
    STRATEGIES.iter().find_map(|(name, strategy)| {
        let found = strategy(text);
        if found.is_some() {
            tracing::debug!(strategy = name, "recovered JSON from reply");
        }
        found
    })
}

/// From the first `{` to the last `}`.
pub fn object_span(text: &str) -> Option<Value> {
    let m = re_object().find(text)?;
    serde_json::from_str(m.as_str()).ok()
}

/// From the first `[` to the last `]`.
pub fn array_span(text: &str) -> Option<Value> {
    let m = re_array().find(text)?;
    serde_json::from_str(m.as_str()).ok()
}

/// Object span of whatever follows the first occurrence of a marker.
pub fn after_marker(text: &str) -> Option<Value> {
    MARKERS.iter().find_map(|marker| {
        let idx = text.find(marker)?;
        object_span(text[idx + marker.len()..].trim())
    })
}

pub fn whole_text(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}

/// Fit recovered JSON into the receipt schema.
///
/// An object is read as a receipt; a bare array is read as its item list.
pub fn coerce_receipt(value: Value) -> Result<StructuredReceipt, String> {
    match value {
        Value::Object(_) => serde_json::from_value(value).map_err(|e| e.to_string()),
        Value::Array(_) => {
            let items: Vec<StructuredLineItem> =
                serde_json::from_value(value).map_err(|e| e.to_string())?;
            Ok(StructuredReceipt { items, ..Default::default() })
        }
        other => Err(format!("expected a JSON object or array, got {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_behind_prose() {
        let reply = "Sure! Here is the receipt:\n{\"store\": \"Watsons\", \"total\": 12.5}\nLet me know.";
        assert_eq!(object_span(reply), Some(json!({"store": "Watsons", "total": 12.5})));
        assert_eq!(recover_json(reply), Some(json!({"store": "Watsons", "total": 12.5})));
    }

    #[test]
    fn object_inside_code_fence() {
        let reply = "```json\n{\"items\": [{\"name\": \"Milo\", \"quantity\": 1, \"price\": 18.9}]}\n```";
        let v = recover_json(reply).unwrap();
        assert_eq!(v["items"][0]["name"], "Milo");
    }

    #[test]
    fn span_is_greedy_across_objects() {
        // First `{` to last `}` covers both objects, which is not valid JSON.
        assert_eq!(object_span("{\"a\": 1} and {\"b\": 2}"), None);
    }

    #[test]
    fn array_when_no_object() {
        let reply = "Items: [\"teh\", \"kopi\"] done";
        assert_eq!(object_span(reply), None);
        assert_eq!(recover_json(reply), Some(json!(["teh", "kopi"])));
    }

    #[test]
    fn marker_rescues_object_after_noise() {
        let reply = "Note {draft} ignored.\nJSON: {\"store\": \"AEON\"}";
        assert_eq!(object_span(reply), None);
        assert_eq!(array_span(reply), None);
        assert_eq!(after_marker(reply), Some(json!({"store": "AEON"})));
        assert_eq!(recover_json(reply), Some(json!({"store": "AEON"})));
    }

    #[test]
    fn marker_search_moves_on_after_a_bad_candidate() {
        let reply = "``` {oops} Result: {\"total\": 3}";
        // The fence's span runs to the last brace and fails; `Result:` works.
        assert_eq!(after_marker(reply), Some(json!({"total": 3})));
    }

    #[test]
    fn whole_text_scalar() {
        assert_eq!(recover_json("42"), Some(json!(42)));
        assert_eq!(recover_json("\"just text\""), Some(json!("just text")));
    }

    #[test]
    fn nothing_recoverable() {
        assert_eq!(recover_json("I could not read this receipt, sorry."), None);
        assert_eq!(recover_json(""), None);
        assert_eq!(recover_json("{ not json }"), None);
    }

    #[test]
    fn coerce_object() {
        let r = coerce_receipt(json!({"store": "99 Speedmart", "currency": "MYR"})).unwrap();
        assert_eq!(r.store.as_deref(), Some("99 Speedmart"));
        assert_eq!(r.currency.as_deref(), Some("MYR"));
        assert!(r.items.is_empty());
    }

    #[test]
    fn coerce_array_as_items() {
        let r = coerce_receipt(json!([{"name": "Roti", "quantity": 2, "price": 1.2}])).unwrap();
        assert_eq!(r.items.len(), 1);
        assert_eq!(r.items[0].name, "Roti");
        assert_eq!(r.store, None);
    }

    #[test]
    fn coerce_rejects_scalars_and_bad_shapes() {
        assert!(coerce_receipt(json!(42)).is_err());
        assert!(coerce_receipt(json!({"items": "none"})).is_err());
        assert!(coerce_receipt(json!(["teh", "kopi"])).is_err());
    }
}
