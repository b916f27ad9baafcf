//! Schema validation helpers for JSON5 client configuration.

use crate::ConfigError;
use serde_json::{Map, Value};

/// Validate a single config layer against the schema.
pub(super) fn validate_layer_schema(value: &Value, layer: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, "")?;
    ensure_allowed_keys(map, &["$schema", "api", "notes"], layer, "")?;

    if let Some(value) = map.get("$schema") {
        expect_string(value, layer, "$schema")?;
    }
    if let Some(value) = map.get("api") {
        validate_api(value, layer, "api")?;
    }
    if let Some(value) = map.get("notes") {
        validate_notes(value, layer, "notes")?;
    }
    Ok(())
}

/// Validate the "api" block.
fn validate_api(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(
        map,
        &["base_url", "user_agent", "access_token", "timeout_ms"],
        layer,
        path,
    )?;
    if let Some(value) = map.get("base_url") {
        expect_string(value, layer, &join_path(path, "base_url"))?;
    }
    if let Some(value) = map.get("user_agent") {
        expect_string(value, layer, &join_path(path, "user_agent"))?;
    }
    if let Some(value) = map.get("access_token") {
        expect_optional(value, layer, &join_path(path, "access_token"), expect_string)?;
    }
    if let Some(value) = map.get("timeout_ms") {
        expect_u64(value, layer, &join_path(path, "timeout_ms"))?;
    }
    Ok(())
}

/// Validate the "notes" block.
fn validate_notes(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(
        map,
        &["subreddit", "listing_limit", "page_size"],
        layer,
        path,
    )?;
    if let Some(value) = map.get("subreddit") {
        expect_optional(value, layer, &join_path(path, "subreddit"), expect_string)?;
    }
    if let Some(value) = map.get("listing_limit") {
        expect_optional(value, layer, &join_path(path, "listing_limit"), expect_u64)?;
    }
    if let Some(value) = map.get("page_size") {
        expect_u64(value, layer, &join_path(path, "page_size"))?;
    }
    Ok(())
}

/// Expect a JSON object or return a typed error.
fn expect_object<'a>(
    value: &'a Value,
    layer: &str,
    path: &str,
) -> Result<&'a Map<String, Value>, ConfigError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(invalid_field(layer, path, "expected object")),
    }
}

/// Expect a JSON string or return a typed error.
fn expect_string(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    if value.as_str().is_some() {
        Ok(())
    } else {
        Err(invalid_field(layer, path, "expected string"))
    }
}

/// Expect a non-negative JSON integer or return a typed error.
fn expect_u64(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    if value.is_u64() {
        Ok(())
    } else {
        Err(invalid_field(layer, path, "expected non-negative integer"))
    }
}

/// Accept `null`, otherwise defer to the given check.
fn expect_optional(
    value: &Value,
    layer: &str,
    path: &str,
    check: fn(&Value, &str, &str) -> Result<(), ConfigError>,
) -> Result<(), ConfigError> {
    if value.is_null() {
        Ok(())
    } else {
        check(value, layer, path)
    }
}

/// Ensure an object contains only allowed keys.
fn ensure_allowed_keys(
    map: &Map<String, Value>,
    allowed: &[&str],
    layer: &str,
    path: &str,
) -> Result<(), ConfigError> {
    for key in map.keys() {
        if !allowed.contains(&key.as_str()) {
            return Err(invalid_field(layer, &join_path(path, key), "unknown key"));
        }
    }
    Ok(())
}

/// Join nested paths for better error messages.
fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Build a structured invalid-field error.
fn invalid_field(layer: &str, path: &str, message: &str) -> ConfigError {
    let normalized_path = if path.is_empty() { "root" } else { path };
    ConfigError::InvalidField {
        path: format!("{layer}:{normalized_path}"),
        message: message.to_string(),
    }
}
