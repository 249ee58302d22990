// src/constants.rs
//! Domain constants that define the operational boundaries of the sync.
//!
//! Reading these should tell you how a run behaves: which variables it needs,
//! where it reads templates from, how wide each detail batch is and where the
//! results end up.

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// API key for PDF Otter, sent as the Basic auth username.
pub const ENV_API_KEY: &str = "PDF_OTTER_API_KEY";

/// Base URL of the PDF Otter API.
pub const ENV_ENDPOINT: &str = "PDF_OTTER_ENDPOINT";

/// MongoDB connection string.
pub const ENV_MONGO_CONN_STR: &str = "MONGO_CONN_STR";

/// Name of the database holding the template collection.
pub const ENV_MONGO_DATABASE: &str = "MONGO_DATABASE";

// ---------------------------------------------------------------------------
// PDF Otter API
// ---------------------------------------------------------------------------

/// Path of the template listing, relative to the configured endpoint.
pub const TEMPLATES_PATH: &str = "pdf_templates";

/// How many template details are requested concurrently.
///
/// Each batch completes before the next one starts, so this is also the
/// upper bound on in-flight detail requests.
pub const DEFAULT_DETAIL_BATCH_SIZE: usize = 3;

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Collection that receives one document per template.
pub const TEMPLATE_COLLECTION: &str = "pdfOtter";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing response bodies in errors and logs.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;

/// Truncates a response body for display, respecting char boundaries.
pub fn preview_body(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_are_kept_whole() {
        assert_eq!(preview_body("[]"), "[]");
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "é".repeat(ERROR_BODY_PREVIEW_LENGTH + 10);
        let preview = preview_body(&body);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), ERROR_BODY_PREVIEW_LENGTH + 3);
    }
}
