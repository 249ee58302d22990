//! MongoDB-backed template store and the run-scoped database session.

use super::{StoreSession, TemplateStore};
use crate::config::MongoSettings;
use crate::constants::TEMPLATE_COLLECTION;
use crate::error::AppError;
use crate::model::DetailedTemplate;
use mongodb::bson::{doc, to_bson, Bson, Document};
use mongodb::{Client, Collection};

/// A connected database session, owned by a single run.
///
/// Acquired once with [`MongoSession::connect`] and released with
/// [`StoreSession::close`], which consumes the session.
pub struct MongoSession {
    client: Client,
    store: MongoTemplateStore,
}

impl MongoSession {
    /// Connects and pings the server so an unreachable database fails here.
    ///
    /// On a failed ping the client is shut down before the error is returned.
    pub async fn connect(settings: &MongoSettings) -> Result<Self, AppError> {
        let client = Client::with_uri_str(&settings.connection_string).await?;
        let database = client.database(&settings.database);

        if let Err(e) = database.run_command(doc! { "ping": 1 }).await {
            client.shutdown().await;
            return Err(e.into());
        }

        let store = MongoTemplateStore::new(database.collection(TEMPLATE_COLLECTION));
        Ok(Self { client, store })
    }
}

#[async_trait::async_trait]
impl StoreSession for MongoSession {
    type Store = MongoTemplateStore;

    fn store(&self) -> &MongoTemplateStore {
        &self.store
    }

    /// Closes the connection pool, waiting for in-use connections to return.
    async fn close(self) {
        self.client.shutdown().await;
    }
}

/// Upserts templates into a MongoDB collection keyed by `id`.
#[derive(Clone)]
pub struct MongoTemplateStore {
    collection: Collection<Document>,
}

impl MongoTemplateStore {
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }
}

#[async_trait::async_trait]
impl TemplateStore for MongoTemplateStore {
    async fn upsert(&self, template: &DetailedTemplate) -> Result<(), AppError> {
        let update = to_set_document(template)?;
        let result = self
            .collection
            .update_one(doc! { "id": template.id.as_str() }, doc! { "$set": update })
            .upsert(true)
            .await?;

        log::debug!(
            "Upserted template {} (matched: {}, upserted: {})",
            template.id,
            result.matched_count,
            result.upserted_id.is_some()
        );
        Ok(())
    }
}

/// Builds the `$set` payload for a template.
///
/// Field entries are converted as-is, so every key the API returned is
/// written. Absent fields are written as null.
pub fn to_set_document(template: &DetailedTemplate) -> Result<Document, AppError> {
    let fields = match &template.fields {
        Some(fields) => to_bson(fields).map_err(|e| AppError::UpsertRejected {
            template_id: template.id.clone(),
            reason: e.to_string(),
        })?,
        None => Bson::Null,
    };

    Ok(doc! {
        "id": template.id.as_str(),
        "name": template.name.as_str(),
        "fields": fields,
    })
}
