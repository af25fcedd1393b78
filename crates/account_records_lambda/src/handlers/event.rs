//! Accessors over raw API Gateway proxy events (REST and HTTP API shapes).

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::{json, Value};

use crate::runtime::contract::{ValidationError, VALIDATION_MESSAGE_PREFIX};

/// Decodes the request body into a provisional JSON value.
///
/// Events without a `body` key and without a `requestContext` are treated as
/// direct invocations whose payload is the event itself.
pub fn request_body(event: &Value) -> Result<Value, ValidationError> {
    let Some(object) = event.as_object() else {
        return Err(validation_error("request payload must be a JSON object"));
    };

    let Some(body) = object.get("body") else {
        if object.contains_key("requestContext") {
            return Ok(json!({}));
        }
        return Ok(event.clone());
    };

    match body {
        Value::Null => Ok(json!({})),
        Value::Object(_) => Ok(body.clone()),
        Value::String(text) => {
            let is_base64 = object
                .get("isBase64Encoded")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            let decoded = if is_base64 {
                let bytes = BASE64
                    .decode(text.trim())
                    .map_err(|error| validation_error(&format!("malformed base64 body: {error}")))?;
                String::from_utf8(bytes)
                    .map_err(|error| validation_error(&format!("body is not UTF-8: {error}")))?
            } else {
                text.clone()
            };
            if decoded.trim().is_empty() {
                return Ok(json!({}));
            }
            serde_json::from_str(&decoded)
                .map_err(|error| validation_error(&format!("malformed JSON body: {error}")))
        }
        _ => Err(validation_error("request body must be a JSON object")),
    }
}

pub fn path_parameter<'a>(event: &'a Value, name: &str) -> Option<&'a str> {
    event
        .get("pathParameters")
        .and_then(|parameters| parameters.get(name))
        .and_then(Value::as_str)
}

pub fn http_method(event: &Value) -> Option<String> {
    event
        .get("httpMethod")
        .and_then(Value::as_str)
        .or_else(|| {
            event
                .pointer("/requestContext/http/method")
                .and_then(Value::as_str)
        })
        .map(str::to_ascii_uppercase)
}

pub fn request_path(event: &Value) -> Option<&str> {
    event
        .get("path")
        .and_then(Value::as_str)
        .or_else(|| event.get("rawPath").and_then(Value::as_str))
}

fn validation_error(detail: &str) -> ValidationError {
    ValidationError::new(format!("{VALIDATION_MESSAGE_PREFIX}: {detail}"))
}
