// src/api/mod.rs
//! PDF Otter API interaction — listing templates and retrieving their fields.
//!
//! Business logic depends on the `TemplateRepository` trait, never on HTTP
//! details, so stages can be exercised against in-process fakes.

mod batch_fetcher;
pub mod client;
pub mod parser;
mod responses;

use crate::error::AppError;
use crate::model::TemplateRef;

/// The ability to read templates from PDF Otter.
#[async_trait::async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Lists every template as validated references, in API order.
    async fn list_templates(&self) -> Result<Vec<TemplateRef>, AppError>;

    /// Retrieves the detail payload for one template.
    async fn retrieve_details(&self, template: &TemplateRef) -> Result<TemplateDetails, AppError>;
}

pub use batch_fetcher::{DetailFetcher, FetchOutcome};
pub use client::PdfOtterHttpClient;
pub use responses::{ApiResponse, TemplateDetails};
