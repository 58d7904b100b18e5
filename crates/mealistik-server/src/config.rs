//! Server configuration for Mealistik.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Store parameters follow the web-app provisioning the project started
//! with; a missing required parameter is reported by
//! [`ServerConfig::missing_store_vars`] and logged as a diagnostic — it
//! never halts startup. The store client is still constructed and the
//! failure surfaces later as a submission error.

use std::net::SocketAddr;

use mealistik_store::FirestoreConfig;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Store backend type.
    pub store_backend: StoreBackendType,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
}

/// Supported store backend types.
#[derive(Debug, Clone)]
pub enum StoreBackendType {
    /// In-memory (development only, data lost on restart).
    Memory,
    /// Firestore over its REST API.
    Firestore(FirestoreConfig),
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT` — port to bind on (Railway convention, binds to `0.0.0.0`)
    /// - `MEALISTIK_BIND_ADDR` — full bind address (overrides `PORT`, default: `127.0.0.1:8080`)
    /// - `MEALISTIK_STORE` — `firestore` or `memory` (default: `firestore`)
    /// - `MEALISTIK_LOG_LEVEL` — log filter (default: `info`)
    /// - `FIREBASE_API_KEY`, `FIREBASE_AUTH_DOMAIN`, `FIREBASE_PROJECT_ID`,
    ///   `FIREBASE_APP_ID` — required store parameters
    /// - `FIREBASE_MEASUREMENT_ID` — optional analytics id
    #[must_use]
    pub fn from_env() -> Self {
        // Priority: MEALISTIK_BIND_ADDR > PORT (Railway) > default 127.0.0.1:8080
        let bind_addr = if let Ok(addr) = std::env::var("MEALISTIK_BIND_ADDR") {
            addr.parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8080)))
        } else if let Ok(port_str) = std::env::var("PORT") {
            let port: u16 = port_str.parse().unwrap_or(8080);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            SocketAddr::from(([127, 0, 0, 1], 8080))
        };

        let store_backend = match std::env::var("MEALISTIK_STORE")
            .unwrap_or_else(|_| "firestore".to_owned())
            .to_lowercase()
            .as_str()
        {
            "memory" => StoreBackendType::Memory,
            _ => StoreBackendType::Firestore(FirestoreConfig {
                api_key: std::env::var("FIREBASE_API_KEY").unwrap_or_default(),
                auth_domain: std::env::var("FIREBASE_AUTH_DOMAIN").unwrap_or_default(),
                project_id: std::env::var("FIREBASE_PROJECT_ID").unwrap_or_default(),
                app_id: std::env::var("FIREBASE_APP_ID").unwrap_or_default(),
                measurement_id: std::env::var("FIREBASE_MEASUREMENT_ID")
                    .ok()
                    .filter(|v| !v.is_empty()),
            }),
        };

        let log_level = std::env::var("MEALISTIK_LOG_LEVEL").unwrap_or_else(|_| "info".to_owned());

        Self {
            bind_addr,
            store_backend,
            log_level,
        }
    }

    /// Required store variables that are missing or empty.
    ///
    /// Empty for the memory backend, which needs none.
    #[must_use]
    pub fn missing_store_vars(&self) -> Vec<&'static str> {
        match &self.store_backend {
            StoreBackendType::Memory => Vec::new(),
            StoreBackendType::Firestore(cfg) => cfg.missing_required(),
        }
    }
}
