//! Firestore REST backend.
//!
//! Speaks the Firestore REST v1 `createDocument` protocol: one POST per
//! create, fields encoded as Firestore typed values, the response's
//! `name`/`createTime` mapped back to a [`CreatedDocument`]. Error bodies
//! carry a message authored by the store; it is preserved verbatim in
//! [`StoreError::Api`].
//!
//! The store is constructed even when required configuration is missing —
//! an unusable project id or API key surfaces later as an ordinary API
//! error on the first write, not as a boot failure.

use std::time::Duration;

use chrono::Utc;
use serde_json::{Map, Value, json};

use crate::{CreatedDocument, DocumentStore, StoreError};

const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection parameters for the Firestore backend.
///
/// Mirrors the web-app config the project was provisioned with. Only
/// `project_id` and `api_key` participate in REST calls; the rest identify
/// the app registration and are carried for completeness.
#[derive(Debug, Clone, Default)]
pub struct FirestoreConfig {
    /// API key authorizing requests.
    pub api_key: String,
    /// Auth domain of the project (unused by REST writes).
    pub auth_domain: String,
    /// Project the documents live under.
    pub project_id: String,
    /// App registration id (unused by REST writes).
    pub app_id: String,
    /// Optional analytics id.
    pub measurement_id: Option<String>,
}

impl FirestoreConfig {
    /// Names of required parameters that are missing or empty.
    ///
    /// The caller logs one diagnostic per entry and continues — a missing
    /// parameter degrades submissions, it does not halt startup.
    #[must_use]
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_key.is_empty() {
            missing.push("FIREBASE_API_KEY");
        }
        if self.auth_domain.is_empty() {
            missing.push("FIREBASE_AUTH_DOMAIN");
        }
        if self.project_id.is_empty() {
            missing.push("FIREBASE_PROJECT_ID");
        }
        if self.app_id.is_empty() {
            missing.push("FIREBASE_APP_ID");
        }
        missing
    }
}

/// Document store backed by the Firestore REST API.
pub struct FirestoreStore {
    config: FirestoreConfig,
    client: reqwest::Client,
}

impl FirestoreStore {
    /// Create a new Firestore store from connection parameters.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Network`] if the HTTP client cannot be built.
    /// Missing configuration values are NOT an error here — they surface on
    /// first use.
    pub fn new(config: FirestoreConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("mealistik-store/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(StoreError::Network)?;

        Ok(Self { config, client })
    }
}

#[async_trait::async_trait]
impl DocumentStore for FirestoreStore {
    async fn create(
        &self,
        collection: &str,
        fields: Value,
    ) -> Result<CreatedDocument, StoreError> {
        let url = format!(
            "{FIRESTORE_BASE_URL}/projects/{}/databases/(default)/documents/{collection}",
            self.config.project_id
        );

        let body = json!({ "fields": encode_fields(&fields)? });

        tracing::debug!(collection, "creating document");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status_code: status.as_u16(),
                message: extract_error_message(&text),
            });
        }

        let body: Value = response.json().await?;
        parse_created(&body)
    }
}

/// Encode a plain JSON object into Firestore's `fields` map.
fn encode_fields(fields: &Value) -> Result<Value, StoreError> {
    let map = fields.as_object().ok_or_else(|| {
        StoreError::InvalidFields("document fields must be a JSON object".to_owned())
    })?;

    let encoded: Map<String, Value> = map
        .iter()
        .map(|(k, v)| (k.clone(), encode_value(v)))
        .collect();

    Ok(Value::Object(encoded))
}

/// Encode a single JSON value as a Firestore typed value.
///
/// Integers are transported as strings per the REST protocol; numbers that
/// do not fit `i64` fall back to `doubleValue`.
fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => {
            let fields: Map<String, Value> = map
                .iter()
                .map(|(k, v)| (k.clone(), encode_value(v)))
                .collect();
            json!({ "mapValue": { "fields": fields } })
        }
    }
}

/// Pull the store-authored message out of a Firestore error body.
///
/// Returns an empty string when the body is not the documented
/// `{"error": {"message": ...}}` shape; callers treat that as "no message".
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
                .map(ToOwned::to_owned)
        })
        .unwrap_or_default()
}

/// Map a successful `createDocument` response to a [`CreatedDocument`].
fn parse_created(body: &Value) -> Result<CreatedDocument, StoreError> {
    let name = body
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::InvalidResponse("missing document name".to_owned()))?;

    // Document names look like projects/p/databases/(default)/documents/c/<id>.
    let id = name.rsplit('/').next().unwrap_or(name).to_owned();

    let create_time = body
        .get("createTime")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::InvalidResponse("missing createTime".to_owned()))?;

    let create_time = chrono::DateTime::parse_from_rfc3339(create_time)
        .map_err(|e| StoreError::InvalidResponse(format!("bad createTime: {e}")))?
        .with_timezone(&Utc);

    Ok(CreatedDocument { id, create_time })
}
