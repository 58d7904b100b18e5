//! Document-store abstraction for Mealistik.
//!
//! This crate defines the [`DocumentStore`] trait — the single "create a
//! document in collection C" operation the rest of the system depends on.
//! It knows nothing about forms, views, or campaign attribution; callers
//! hand it a collection name and a JSON field map and get back the id and
//! creation timestamp the store assigned.
//!
//! Two implementations are provided:
//!
//! - [`FirestoreStore`] — production default, speaks the Firestore REST v1
//!   `createDocument` protocol
//! - [`MemoryStore`] — in-memory, for development and testing

mod error;
mod firestore;
mod memory;

pub use error::StoreError;
pub use firestore::{FirestoreConfig, FirestoreStore};
pub use memory::{MemoryStore, StoredDocument};

use chrono::{DateTime, Utc};

/// A document created by the store.
///
/// Both fields are assigned by the store, never by the client — the
/// creation timestamp in particular is the store's clock, not ours.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CreatedDocument {
    /// Store-assigned document id.
    pub id: String,
    /// Store-assigned creation timestamp.
    pub create_time: DateTime<Utc>,
}

/// A document-oriented store reachable via a single create operation.
///
/// Implementations must be safe to share across async tasks (`Send + Sync`);
/// the server holds one instance behind an `Arc` for its whole lifetime.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Create a new document in `collection` with the given field map.
    ///
    /// `fields` is a plain JSON object; backends are responsible for any
    /// wire encoding their protocol requires. Exactly one remote write is
    /// issued per call — no retry, no idempotency key. A caller that
    /// resubmits after a failure may create a duplicate document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails. The error's message is
    /// the store's own message where the protocol provides one.
    async fn create(
        &self,
        collection: &str,
        fields: serde_json::Value,
    ) -> Result<CreatedDocument, StoreError>;
}
