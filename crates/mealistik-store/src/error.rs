//! Store error types.
//!
//! Every variant carries enough context to diagnose the failure without a
//! debugger. [`StoreError::Api`] preserves the store's own human-readable
//! message so callers can surface it to the user verbatim.

/// Errors that can occur when talking to the document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Missing or unusable store configuration.
    #[error("store config error: {0}")]
    Config(String),

    /// The store rejected the request with an HTTP error.
    #[error("store API error {status_code}: {message}")]
    Api {
        /// HTTP status code.
        status_code: u16,
        /// Error message reported by the store.
        message: String,
    },

    /// Network or HTTP client error before a response was received.
    #[error("store network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("store json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The caller handed the store a field map it cannot encode.
    #[error("invalid document fields: {0}")]
    InvalidFields(String),

    /// The store answered 2xx but the body was not the expected shape.
    #[error("unexpected store response: {0}")]
    InvalidResponse(String),
}

impl StoreError {
    /// The store's own message, if the failure produced one.
    ///
    /// Network and decoding failures have no store-authored message and
    /// return `None`; callers fall back to their own generic wording.
    #[must_use]
    pub fn store_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}
