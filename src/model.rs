use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SharedConfigError;

/// Collection holding configuration records in the store.
pub const CONFIG_COLLECTION: &str = "ELYSIA_CONFIG__";

/// The shared default config as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedConfigResponse {
    pub name: String,
    pub config_id: Option<String>,
    pub user_id: String,
    pub default: bool,
    pub settings: Option<Map<String, Value>>,
    pub frontend_config: Option<Map<String, Value>>,
    pub weaviate_id: String,
}

impl SharedConfigResponse {
    /// Maps one store record, falling back to defaults for absent or
    /// mistyped fields.
    pub fn from_record(record: &Value) -> Self {
        let empty = Map::new();
        let fields = record.as_object().unwrap_or(&empty);

        Self {
            name: string_field(fields, "name").unwrap_or_default(),
            config_id: string_field(fields, "config_id"),
            user_id: string_field(fields, "user_id").unwrap_or_default(),
            default: fields.get("default").is_some_and(coerce_bool),
            settings: fields.get("settings").and_then(normalize_object),
            frontend_config: fields.get("frontend_config").and_then(normalize_object),
            weaviate_id: fields
                .get("_additional")
                .and_then(|additional| additional.get("id"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Parses the raw GraphQL response body and returns the matching records.
///
/// Errors reported by the store win over any `data` present in the same
/// payload. A missing or mistyped result path yields an empty list.
pub fn extract_records(body: &[u8]) -> Result<Vec<Value>, SharedConfigError> {
    let payload: Value =
        serde_json::from_slice(body).map_err(|_| SharedConfigError::UpstreamInvalidResponse)?;
    let Value::Object(payload) = payload else {
        return Err(SharedConfigError::UpstreamInvalidResponse);
    };

    if payload.get("errors").is_some_and(is_truthy) {
        return Err(SharedConfigError::UpstreamQueryError);
    }

    let records = payload
        .get("data")
        .and_then(|data| data.get("Get"))
        .and_then(|get| get.get(CONFIG_COLLECTION))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    Ok(records)
}

/// Returns the value as an object, decoding it first when it arrives as
/// JSON text. Anything else is dropped.
pub fn normalize_object(value: &Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map.clone()),
        Value::String(text) if !text.is_empty() => match serde_json::from_str(text) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        },
        _ => None,
    }
}

/// Only explicit encodings count as true: a non-empty list, object or
/// arbitrary string is false here, unlike plain truthiness.
pub fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => text.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_string)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_complete_record() {
        let record = json!({
            "name": "Default",
            "config_id": "cfg-1",
            "user_id": "shared",
            "default": true,
            "settings": "{\"theme\":\"dark\"}",
            "frontend_config": null,
            "_additional": {"id": "w-1"}
        });

        let response = SharedConfigResponse::from_record(&record);

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "name": "Default",
                "config_id": "cfg-1",
                "user_id": "shared",
                "default": true,
                "settings": {"theme": "dark"},
                "frontend_config": null,
                "weaviate_id": "w-1"
            })
        );
    }

    #[test]
    fn absent_fields_fall_back_to_defaults() {
        let response = SharedConfigResponse::from_record(&json!({}));

        assert_eq!(response.name, "");
        assert_eq!(response.config_id, None);
        assert_eq!(response.user_id, "");
        assert!(!response.default);
        assert_eq!(response.settings, None);
        assert_eq!(response.frontend_config, None);
        assert_eq!(response.weaviate_id, "");
    }

    #[test]
    fn non_object_record_maps_like_empty_record() {
        let response = SharedConfigResponse::from_record(&json!("not a record"));
        assert_eq!(response, SharedConfigResponse::from_record(&json!({})));
    }

    #[test]
    fn normalize_object_keeps_objects_and_decodes_text() {
        assert_eq!(
            normalize_object(&json!({"a": 1})),
            json!({"a": 1}).as_object().cloned()
        );
        assert_eq!(
            normalize_object(&json!("{\"layout\":{\"cols\":2}}")),
            json!({"layout": {"cols": 2}}).as_object().cloned()
        );
    }

    #[test]
    fn normalize_object_drops_everything_else() {
        for value in [
            json!(null),
            json!(""),
            json!("not json"),
            json!("[1,2,3]"),
            json!("42"),
            json!(["a"]),
            json!(7),
            json!(true),
        ] {
            assert_eq!(normalize_object(&value), None, "{value}");
        }
    }

    #[test]
    fn coerce_bool_accepts_common_encodings() {
        assert!(coerce_bool(&json!(true)));
        assert!(coerce_bool(&json!(1)));
        assert!(coerce_bool(&json!(" TRUE ")));
        assert!(!coerce_bool(&json!(false)));
        assert!(!coerce_bool(&json!(0)));
        assert!(!coerce_bool(&json!("false")));
        assert!(!coerce_bool(&json!("yes please")));
        assert!(!coerce_bool(&json!(null)));
        assert!(!coerce_bool(&json!({"x": true})));
        assert!(!coerce_bool(&json!([1])));
        assert!(!coerce_bool(&json!("yes")));
    }

    #[test]
    fn extract_records_reads_result_path() {
        let body = br#"{"data":{"Get":{"ELYSIA_CONFIG__":[{"name":"a"},{"name":"b"}]}}}"#;
        let records = extract_records(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["name"], "a");
    }

    #[test]
    fn extract_records_treats_missing_path_as_empty() {
        for body in [
            r#"{}"#,
            r#"{"data":null}"#,
            r#"{"data":{"Get":{}}}"#,
            r#"{"data":{"Get":{"ELYSIA_CONFIG__":null}}}"#,
            r#"{"data":{"Get":{"ELYSIA_CONFIG__":{"name":"x"}}}}"#,
            r#"{"errors":[],"data":{"Get":{"ELYSIA_CONFIG__":[]}}}"#,
        ] {
            assert!(extract_records(body.as_bytes()).unwrap().is_empty(), "{body}");
        }
    }

    #[test]
    fn extract_records_rejects_non_json_and_non_object_bodies() {
        for body in ["<html>oops</html>", "", "[1,2]", "\"text\""] {
            let err = extract_records(body.as_bytes()).unwrap_err();
            assert!(matches!(err, SharedConfigError::UpstreamInvalidResponse), "{body}");
        }
    }

    #[test]
    fn extract_records_reports_query_errors_even_with_data() {
        let body = br#"{"errors":[{"message":"bad where"}],"data":{"Get":{"ELYSIA_CONFIG__":[{"name":"a"}]}}}"#;
        let err = extract_records(body).unwrap_err();
        assert!(matches!(err, SharedConfigError::UpstreamQueryError));
    }
}
