use serde_json::Value;

use crate::error::Error;

/// Checks that the API body is an object carrying a `homeworks` array and
/// returns the records unchanged (the array may be empty). Per-record
/// fields are not inspected here; the formatter validates those.
pub fn check_response(body: &Value) -> Result<&[Value], Error> {
    let map = body.as_object().ok_or_else(|| {
        Error::Shape(format!("тело ответа не объект, а {}", json_type(body)))
    })?;

    let homeworks = map
        .get("homeworks")
        .ok_or_else(|| Error::Shape("в ответе нет объекта homeworks".to_string()))?;

    homeworks
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| Error::Shape("объект homeworks не является списком".to_string()))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
