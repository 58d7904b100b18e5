//! Shared application state for the Mealistik server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`. The record submitter inside it owns the
//! process-lifetime store handle — single construction, no global state.

use mealistik_core::submit::RecordSubmitter;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// Serializes and persists validated form entries.
    pub submitter: RecordSubmitter,
    /// Which store backend was selected at startup (for health reporting).
    pub store_backend: &'static str,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
