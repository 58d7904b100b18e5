//! In-memory document store for development and testing.
//!
//! Stores created documents in a `Vec` behind a `RwLock`. Nothing persists —
//! all data is lost when the process exits. Because this backend plays the
//! store, its clock is the "server-assigned" creation timestamp.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{CreatedDocument, DocumentStore, StoreError};

/// A document held by [`MemoryStore`], in creation order.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    /// Collection the document was created in.
    pub collection: String,
    /// Assigned document id.
    pub id: String,
    /// The field map exactly as the caller submitted it.
    pub fields: serde_json::Value,
    /// Assigned creation timestamp.
    pub create_time: chrono::DateTime<Utc>,
}

/// An in-memory document store.
///
/// Thread-safe and async-compatible. Clones share the same underlying
/// document list, so a test can keep a handle while the server owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: Arc<RwLock<Vec<StoredDocument>>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every document created so far, oldest first.
    pub async fn documents(&self) -> Vec<StoredDocument> {
        self.documents.read().await.clone()
    }

    /// Number of documents in `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        self.documents
            .read()
            .await
            .iter()
            .filter(|d| d.collection == collection)
            .count()
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn create(
        &self,
        collection: &str,
        fields: serde_json::Value,
    ) -> Result<CreatedDocument, StoreError> {
        if !fields.is_object() {
            return Err(StoreError::InvalidFields(
                "document fields must be a JSON object".to_owned(),
            ));
        }

        let created = CreatedDocument {
            id: uuid::Uuid::new_v4().to_string(),
            create_time: Utc::now(),
        };

        let mut documents = self.documents.write().await;
        documents.push(StoredDocument {
            collection: collection.to_owned(),
            id: created.id.clone(),
            fields,
            create_time: created.create_time,
        });

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn create_assigns_id_and_timestamp() {
        let store = MemoryStore::new();
        let created = store
            .create("waitlist_early", json!({ "firstName": "Jane" }))
            .await
            .unwrap();

        assert!(!created.id.is_empty());

        let docs = store.documents().await;
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].collection, "waitlist_early");
        assert_eq!(docs[0].id, created.id);
        assert_eq!(docs[0].fields["firstName"], "Jane");
    }

    #[tokio::test]
    async fn count_filters_by_collection() {
        let store = MemoryStore::new();
        store.create("a", json!({})).await.unwrap();
        store.create("a", json!({})).await.unwrap();
        store.create("b", json!({})).await.unwrap();

        assert_eq!(store.count("a").await, 2);
        assert_eq!(store.count("b").await, 1);
        assert_eq!(store.count("c").await, 0);
    }

    #[tokio::test]
    async fn duplicate_creates_are_not_deduplicated() {
        let store = MemoryStore::new();
        let fields = json!({ "email": "jane@example.com" });
        store.create("waitlist_early", fields.clone()).await.unwrap();
        store.create("waitlist_early", fields).await.unwrap();

        assert_eq!(store.count("waitlist_early").await, 2);
    }

    #[tokio::test]
    async fn rejects_non_object_fields() {
        let store = MemoryStore::new();
        let err = store.create("a", json!([1, 2])).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidFields(_)));
    }
}
