// src/store/mod.rs
//! Persistence of detailed templates, keyed by template id.

mod memory;
mod mongo;

pub use memory::InMemoryTemplateStore;
pub use mongo::{to_set_document, MongoSession, MongoTemplateStore};

use crate::error::{AppError, UpsertFailure};
use crate::model::DetailedTemplate;
use futures::future::join_all;

/// The ability to upsert a template: match by id, set every provided field,
/// insert when no document matches.
#[async_trait::async_trait]
pub trait TemplateStore: Send + Sync {
    async fn upsert(&self, template: &DetailedTemplate) -> Result<(), AppError>;
}

/// A run-scoped connection to a store. Closing consumes the session, so it
/// happens at most once.
#[async_trait::async_trait]
pub trait StoreSession: Send + Sync + Sized {
    type Store: TemplateStore;

    fn store(&self) -> &Self::Store;

    async fn close(self);
}

/// Outcome of a fully successful write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpsertReport {
    /// Ids written, in input order.
    pub stored: Vec<String>,
}

/// Upserts every template concurrently, without a concurrency cap.
///
/// All upserts run to completion. If any failed the result is
/// `AppError::PartialStore` naming each failed id; the successful writes are
/// not rolled back.
pub async fn write_templates<S>(
    store: &S,
    templates: &[DetailedTemplate],
) -> Result<UpsertReport, AppError>
where
    S: TemplateStore + ?Sized,
{
    let outcomes = join_all(templates.iter().map(|template| async move {
        (template.id.as_str(), store.upsert(template).await)
    }))
    .await;

    let mut report = UpsertReport::default();
    let mut failures = Vec::new();

    for (template_id, outcome) in outcomes {
        match outcome {
            Ok(()) => report.stored.push(template_id.to_string()),
            Err(e) => {
                log::warn!("Failed to store template {}: {}", template_id, e);
                failures.push(UpsertFailure {
                    template_id: template_id.to_string(),
                    cause: e.to_string(),
                });
            }
        }
    }

    if failures.is_empty() {
        Ok(report)
    } else {
        Err(AppError::PartialStore {
            failures,
            stored: report.stored.len(),
            attempted: templates.len(),
        })
    }
}
