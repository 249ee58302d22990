// src/lib.rs
//! pdf-template-sync library — copies PDF Otter template metadata into MongoDB.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`, `ShapeError`, `ValidationError`
//! - **Configuration** — `SyncConfig`, `CommandLineInput`
//! - **Domain model** — `TemplateRef`, `TemplateField`, `DetailedTemplate`
//! - **API client** — `TemplateRepository`, `PdfOtterHttpClient`, `DetailFetcher`
//! - **Storage** — `TemplateStore`, `StoreSession`, `MongoSession`, `InMemoryTemplateStore`
//! - **Pipeline** — `TemplateSync`, `run_sync`, `SyncReport`

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod store;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, ShapeError, UpsertFailure};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, MongoSettings, SyncConfig};

// --- Domain Model ---
pub use crate::model::{DetailedTemplate, TemplateField, TemplateRef};

// --- Domain Types ---
pub use crate::types::{ApiEndpoint, ApiKey, BatchSize};

// --- API Client ---
pub use crate::api::{
    DetailFetcher, FetchOutcome, PdfOtterHttpClient, TemplateDetails, TemplateRepository,
};

// --- Storage ---
pub use crate::store::{
    write_templates, InMemoryTemplateStore, MongoSession, MongoTemplateStore, StoreSession,
    TemplateStore, UpsertReport,
};

// --- Pipeline ---
pub use crate::pipeline::{run_sync, SyncReport, TemplateSync};
