// src/api/responses.rs
//! Response payloads of the PDF Otter template endpoints.

use crate::model::TemplateField;
use serde::Deserialize;

/// Body of `GET /pdf_templates/{id}`.
///
/// Only `fields` is read; everything else the API returns is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TemplateDetails {
    #[serde(default)]
    pub fields: Option<Vec<TemplateField>>,
}

/// Raw HTTP result with the metadata needed for error reporting.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}
