//! Allow-list projection over loosely-typed request input.
//!
//! Request bodies and query strings arrive as untyped JSON maps; only the
//! recognized field names below ever reach a filter or an update.

use serde_json::{Map, Value};

/// Fields a client may change through the update operation.
pub const UPDATE_FIELDS: [&str; 6] = [
    "issue_title",
    "issue_text",
    "created_by",
    "assigned_to",
    "status_text",
    "open",
];

/// Fields recognized as query filters: every update field plus the
/// timestamps and the identifier.
pub const QUERY_FIELDS: [&str; 9] = [
    "issue_title",
    "issue_text",
    "created_by",
    "assigned_to",
    "status_text",
    "open",
    "created_on",
    "updated_on",
    "_id",
];

/// Copies the recognized, present fields out of `source`, in `fields`
/// order. A key counts as present when it exists with a non-null,
/// non-empty-string value; anything else (including unrecognized keys) is
/// dropped silently.
pub fn pick_present(source: &Map<String, Value>, fields: &[&str]) -> Map<String, Value> {
    let mut picked = Map::new();
    for &field in fields {
        match source.get(field) {
            None | Some(Value::Null) => {}
            Some(Value::String(text)) if text.is_empty() => {}
            Some(value) => {
                picked.insert(field.to_string(), value.clone());
            }
        }
    }
    picked
}

/// Rewrites the literal strings `"true"`/`"false"` under `open` to
/// booleans. Any other value is left untouched.
pub fn coerce_open(map: &mut Map<String, Value>) {
    if let Some(value) = map.get_mut("open") {
        match value.as_str() {
            Some("true") => *value = Value::Bool(true),
            Some("false") => *value = Value::Bool(false),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn pick_present_drops_unrecognized_and_absent_keys() {
        let source = object(json!({
            "issue_title": "t",
            "bogus": "ignored",
            "open": "false",
            "assigned_to": "",
            "status_text": null,
        }));
        let picked = pick_present(&source, &UPDATE_FIELDS);

        assert_eq!(picked.len(), 2);
        assert_eq!(picked["issue_title"], "t");
        assert_eq!(picked["open"], "false");
    }

    #[test]
    fn pick_present_keeps_typed_booleans() {
        let source = object(json!({ "open": false }));
        let picked = pick_present(&source, &UPDATE_FIELDS);
        assert_eq!(picked["open"], Value::Bool(false));
    }

    #[test]
    fn coerce_open_rewrites_only_the_two_literals() {
        let mut map = object(json!({ "open": "false" }));
        coerce_open(&mut map);
        assert_eq!(map["open"], Value::Bool(false));

        let mut map = object(json!({ "open": "true" }));
        coerce_open(&mut map);
        assert_eq!(map["open"], Value::Bool(true));

        let mut map = object(json!({ "open": "banana" }));
        coerce_open(&mut map);
        assert_eq!(map["open"], "banana");

        let mut map = object(json!({ "open": true }));
        coerce_open(&mut map);
        assert_eq!(map["open"], Value::Bool(true));
    }
}
