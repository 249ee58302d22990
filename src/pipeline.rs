// src/pipeline.rs
//! The three sync stages, composed: list → fetch details → store.
//!
//! No stage catches errors from the one before it; the first failure ends the
//! run and is returned to the caller unchanged.

use crate::api::{DetailFetcher, FetchOutcome, TemplateRepository};
use crate::error::AppError;
use crate::model::TemplateRef;
use crate::store::{write_templates, StoreSession, TemplateStore, UpsertReport};
use crate::types::BatchSize;
use std::future::Future;

/// Summary of a completed sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub listed: usize,
    pub batches: usize,
    pub missing_fields: Vec<String>,
    pub stored: Vec<String>,
}

/// Moves templates from a repository into a store.
pub struct TemplateSync<'a, R: ?Sized, S: ?Sized> {
    repository: &'a R,
    store: &'a S,
    batch_size: BatchSize,
}

impl<'a, R, S> TemplateSync<'a, R, S>
where
    R: TemplateRepository + ?Sized,
    S: TemplateStore + ?Sized,
{
    pub fn new(repository: &'a R, store: &'a S, batch_size: BatchSize) -> Self {
        Self {
            repository,
            store,
            batch_size,
        }
    }

    /// Runs every stage once.
    pub async fn run(&self) -> Result<SyncReport, AppError> {
        let refs = self.list().await?;
        let listed = refs.len();

        let fetched = self.fetch_details(refs).await?;
        let written = self.store(&fetched).await?;

        let report = SyncReport {
            listed,
            batches: fetched.batches,
            missing_fields: fetched.missing_fields,
            stored: written.stored,
        };
        log::info!(
            "Synced {} templates in {} batches ({} without fields)",
            report.stored.len(),
            report.batches,
            report.missing_fields.len()
        );
        Ok(report)
    }

    /// Stage 1: list and validate template references.
    async fn list(&self) -> Result<Vec<TemplateRef>, AppError> {
        let refs = self.repository.list_templates().await?;
        log::info!("Listed {} templates", refs.len());
        Ok(refs)
    }

    /// Stage 2: fetch details in sequential batches.
    async fn fetch_details(&self, refs: Vec<TemplateRef>) -> Result<FetchOutcome, AppError> {
        DetailFetcher::new(self.repository, self.batch_size)
            .fetch_all(refs)
            .await
    }

    /// Stage 3: upsert every detailed template.
    async fn store(&self, fetched: &FetchOutcome) -> Result<UpsertReport, AppError> {
        write_templates(self.store, &fetched.templates).await
    }
}

/// Runs one sync inside a store session: connect, sync, report, close.
///
/// Every outcome is logged here. The session is closed whenever `connect`
/// produced one, and the closing line is logged even when it did not.
pub async fn run_sync<C, S, R>(
    connect: C,
    repository: &R,
    batch_size: BatchSize,
) -> Result<SyncReport, AppError>
where
    C: Future<Output = Result<S, AppError>>,
    S: StoreSession,
    R: TemplateRepository + ?Sized,
{
    let session = match connect.await {
        Ok(session) => session,
        Err(e) => {
            log::error!("An error occurred: {}", e);
            log::info!("MongoDB connection closed");
            return Err(e);
        }
    };
    log::info!("Connected successfully to MongoDB server");

    let outcome = TemplateSync::new(repository, session.store(), batch_size)
        .run()
        .await;
    match &outcome {
        Ok(_) => log::info!("Templates have been fetched and stored successfully"),
        Err(e) => log::error!("An error occurred: {}", e),
    }

    session.close().await;
    log::info!("MongoDB connection closed");
    outcome
}
