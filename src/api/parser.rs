// src/api/parser.rs
//! Decoding of PDF Otter responses into validated domain values.
//!
//! The listing is the only payload whose shape is enforced: every element must
//! carry non-empty string `id` and `name` values or the whole listing is
//! rejected. Detail payloads are only inspected for `fields`.

use super::responses::{ApiResponse, TemplateDetails};
use crate::constants::preview_body;
use crate::error::{AppError, ShapeError};
use crate::model::{TemplateField, TemplateRef};
use serde_json::Value;

/// Parses the template listing into ordered references.
pub fn parse_template_list(result: ApiResponse<String>) -> Result<Vec<TemplateRef>, AppError> {
    let body = parse_json_body(result)?;

    decode_template_refs(&body).map_err(|e| {
        log::error!("bad data: {}", preview_body(&body.to_string()));
        e.into()
    })
}

/// Parses a template detail response.
///
/// Only the presence of `fields` is checked. A non-success status is logged
/// and the body is still read. `fields` that are absent, null, or not a list
/// (including when the body is not an object) yield `fields: None`; list
/// entries are kept verbatim.
pub fn parse_template_details(result: ApiResponse<String>) -> Result<TemplateDetails, AppError> {
    if !result.status.is_success() {
        log::warn!(
            "Template details from {} returned HTTP {}",
            result.url,
            result.status
        );
    }

    let url = result.url.clone();
    let body = decode_json(result)?;

    Ok(TemplateDetails {
        fields: decode_fields(&body, &url),
    })
}

fn decode_fields(body: &Value, url: &str) -> Option<Vec<TemplateField>> {
    match body.get("fields") {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => {
            Some(items.iter().cloned().map(TemplateField::from).collect())
        }
        Some(other) => {
            log::warn!(
                "Ignoring fields from {}: expected a list, found {}",
                url,
                json_kind(other)
            );
            None
        }
    }
}

/// Validates a listing value into references, failing on the first bad element.
pub fn decode_template_refs(body: &Value) -> Result<Vec<TemplateRef>, ShapeError> {
    let items = body.as_array().ok_or(ShapeError::NotAnArray {
        found: json_kind(body),
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| decode_template_ref(index, item))
        .collect()
}

fn decode_template_ref(index: usize, item: &Value) -> Result<TemplateRef, ShapeError> {
    let object = item.as_object().ok_or(ShapeError::NotAnObject { index })?;

    let string_at = |key: &'static str| -> Result<String, ShapeError> {
        let value = object
            .get(key)
            .and_then(Value::as_str)
            .ok_or(ShapeError::MissingString { index, key })?;
        if value.is_empty() {
            return Err(ShapeError::EmptyString { index, key });
        }
        Ok(value.to_string())
    };

    Ok(TemplateRef {
        id: string_at("id")?,
        name: string_at("name")?,
    })
}

/// Checks the status and decodes the body as JSON.
fn parse_json_body(result: ApiResponse<String>) -> Result<Value, AppError> {
    if !result.status.is_success() {
        return Err(AppError::ApiStatus {
            status: result.status,
            url: result.url,
            body: preview_body(&result.data),
        });
    }

    decode_json(result)
}

fn decode_json(result: ApiResponse<String>) -> Result<Value, AppError> {
    serde_json::from_str(&result.data).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", result.url, e);
        AppError::MalformedResponse {
            url: result.url,
            message: format!("{} (body: {})", e, preview_body(&result.data)),
        }
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
