//! Record submission to the external store.
//!
//! The submitter owns the process-lifetime store handle, constructed once
//! at startup and injected here — no hidden global state. Each submission
//! issues exactly one create-record call: no retry, no idempotency key. A
//! user who resubmits after a failure may create a duplicate record; that
//! is accepted behavior.

use std::sync::Arc;

use serde_json::Value;

use mealistik_store::{CreatedDocument, DocumentStore};

use crate::attribution::AttributionRecord;
use crate::entry::{InvestorEntry, WaitlistEntry};
use crate::error::SubmitError;

/// Collection receiving waitlist entries.
pub const WAITLIST_COLLECTION: &str = "waitlist_early";
/// Collection receiving investor/partner entries.
pub const INVESTOR_COLLECTION: &str = "investor_partners";

/// Serializes validated entries and writes them to the document store.
#[derive(Clone)]
pub struct RecordSubmitter {
    store: Arc<dyn DocumentStore>,
}

impl std::fmt::Debug for RecordSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordSubmitter").finish_non_exhaustive()
    }
}

impl RecordSubmitter {
    /// Wrap a store handle. The same submitter serves every request.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Persist a validated waitlist entry.
    ///
    /// The stored document carries the entry fields, the attribution record
    /// nested as a sub-object, and the client's user-agent string; the
    /// creation timestamp is assigned by the store.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError`] if the store write fails; use
    /// [`SubmitError::user_message`] for the inline message.
    pub async fn submit_waitlist(
        &self,
        entry: &WaitlistEntry,
        attribution: &AttributionRecord,
        user_agent: &str,
    ) -> Result<CreatedDocument, SubmitError> {
        let fields = serde_json::to_value(entry)?;
        self.create(WAITLIST_COLLECTION, fields, attribution, user_agent)
            .await
    }

    /// Persist a validated investor/partner entry.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError`] if the store write fails.
    pub async fn submit_investor(
        &self,
        entry: &InvestorEntry,
        attribution: &AttributionRecord,
        user_agent: &str,
    ) -> Result<CreatedDocument, SubmitError> {
        let fields = serde_json::to_value(entry)?;
        self.create(INVESTOR_COLLECTION, fields, attribution, user_agent)
            .await
    }

    async fn create(
        &self,
        collection: &str,
        mut fields: Value,
        attribution: &AttributionRecord,
        user_agent: &str,
    ) -> Result<CreatedDocument, SubmitError> {
        if let Value::Object(map) = &mut fields {
            map.insert("attribution".to_owned(), serde_json::to_value(attribution)?);
            map.insert("userAgent".to_owned(), Value::String(user_agent.to_owned()));
        }

        let created = self.store.create(collection, fields).await?;
        tracing::info!(collection, id = %created.id, "record created");
        Ok(created)
    }
}
