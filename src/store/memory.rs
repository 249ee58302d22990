//! Process-local template store with the same `$set`/upsert semantics as MongoDB.

use super::TemplateStore;
use crate::error::AppError;
use crate::model::DetailedTemplate;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Keeps documents in memory, keyed by template id.
///
/// Upserts merge the provided keys into any existing document and leave
/// other keys untouched. Ids registered with [`failing_for`] reject their
/// upserts without touching the stored documents.
///
/// [`failing_for`]: InMemoryTemplateStore::failing_for
#[derive(Debug, Default)]
pub struct InMemoryTemplateStore {
    documents: Mutex<BTreeMap<String, Map<String, Value>>>,
    upserts: AtomicUsize,
    failing: HashSet<String>,
}

impl InMemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every upsert of `template_id` fail.
    pub fn failing_for(mut self, template_id: impl Into<String>) -> Self {
        self.failing.insert(template_id.into());
        self
    }

    /// Seeds a raw document, e.g. one carrying keys the API never sends.
    pub fn insert_raw(&self, template_id: impl Into<String>, document: Map<String, Value>) {
        self.documents.lock().insert(template_id.into(), document);
    }

    /// Returns the stored document for `template_id` decoded as a template.
    pub fn get(&self, template_id: &str) -> Option<DetailedTemplate> {
        let document = self.documents.lock().get(template_id).cloned()?;
        serde_json::from_value(Value::Object(document)).ok()
    }

    /// Returns the raw stored document, including keys outside the template shape.
    pub fn get_raw(&self, template_id: &str) -> Option<Map<String, Value>> {
        self.documents.lock().get(template_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.documents.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.lock().is_empty()
    }

    /// Number of upsert attempts, including failed ones.
    pub fn upsert_count(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl TemplateStore for InMemoryTemplateStore {
    async fn upsert(&self, template: &DetailedTemplate) -> Result<(), AppError> {
        self.upserts.fetch_add(1, Ordering::SeqCst);

        if self.failing.contains(&template.id) {
            return Err(AppError::UpsertRejected {
                template_id: template.id.clone(),
                reason: "rejected by store".to_string(),
            });
        }

        let fields = match serde_json::to_value(template) {
            Ok(Value::Object(fields)) => fields,
            Ok(other) => {
                return Err(AppError::UpsertRejected {
                    template_id: template.id.clone(),
                    reason: format!("expected an object, got {}", other),
                })
            }
            Err(e) => {
                return Err(AppError::UpsertRejected {
                    template_id: template.id.clone(),
                    reason: e.to_string(),
                })
            }
        };

        self.documents
            .lock()
            .entry(template.id.clone())
            .or_default()
            .extend(fields);
        Ok(())
    }
}
