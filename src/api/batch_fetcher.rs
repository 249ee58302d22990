// src/api/batch_fetcher.rs
//! Batched retrieval of template details.
//!
//! References are split into consecutive batches. Requests inside a batch run
//! concurrently; a batch must finish before the next begins, which caps the
//! number of in-flight detail requests at the batch size.

use super::TemplateRepository;
use crate::error::AppError;
use crate::model::{DetailedTemplate, TemplateRef};
use crate::types::BatchSize;
use futures::future::join_all;

/// Result of fetching details for a whole listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOutcome {
    /// Detailed templates in listing order.
    pub templates: Vec<DetailedTemplate>,
    /// Number of batches issued.
    pub batches: usize,
    /// Ids of templates whose detail response had no `fields`.
    pub missing_fields: Vec<String>,
}

/// Fetches template details in fixed-size sequential batches.
pub struct DetailFetcher<'a, R: TemplateRepository + ?Sized> {
    repository: &'a R,
    batch_size: BatchSize,
}

impl<'a, R: TemplateRepository + ?Sized> DetailFetcher<'a, R> {
    pub fn new(repository: &'a R, batch_size: BatchSize) -> Self {
        Self {
            repository,
            batch_size,
        }
    }

    /// Fetches and merges details for every reference, preserving order.
    ///
    /// Every request in a batch runs to completion; if any of them failed,
    /// the first failure in listing order is returned and no later batch
    /// is started.
    pub async fn fetch_all(&self, refs: Vec<TemplateRef>) -> Result<FetchOutcome, AppError> {
        let mut outcome = FetchOutcome {
            templates: Vec::with_capacity(refs.len()),
            ..FetchOutcome::default()
        };
        let total_batches = self.batch_size.batch_count(refs.len());

        for (index, batch) in refs.chunks(self.batch_size.get()).enumerate() {
            log::debug!(
                "Fetching details batch {}/{} ({} templates)",
                index + 1,
                total_batches,
                batch.len()
            );

            let results = join_all(batch.iter().map(|template| self.fetch_one(template))).await;
            outcome.batches += 1;

            for result in results {
                let template = result?;
                if !template.has_fields() {
                    outcome.missing_fields.push(template.id.clone());
                }
                outcome.templates.push(template);
            }
        }

        Ok(outcome)
    }

    async fn fetch_one(&self, template: &TemplateRef) -> Result<DetailedTemplate, AppError> {
        let details = self.repository.retrieve_details(template).await?;

        match &details.fields {
            Some(fields) => log::debug!("Template {} fields: {:?}", template.id, fields),
            None => log::warn!("Template has no fields {}", template.id),
        }

        Ok(template.clone().with_fields(details.fields))
    }
}
