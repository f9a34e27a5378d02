use serde_json::{Map, Value};
use validator::ValidationErrors;

/// Flattens validator output into a single human-readable message,
/// `"first error; second error"`.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Field-level detail for 400 responses: `{"field": ["message", ...]}`.
pub fn validation_error_fields(errors: &ValidationErrors) -> Value {
    let mut map = Map::new();
    for (field, errs) in errors.field_errors() {
        let messages: Vec<Value> = errs
            .iter()
            .filter_map(|e| e.message.as_ref().map(|m| Value::String(m.to_string())))
            .collect();
        map.insert(field.to_string(), Value::Array(messages));
    }
    Value::Object(map)
}
