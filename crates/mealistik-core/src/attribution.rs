//! Campaign attribution captured from the page's query string.
//!
//! The record is built once per page request from whatever query parameters
//! arrived and is treated as immutable afterwards. It feeds exactly two
//! consumers: outbound-link decoration ([`crate::links`]) and the metadata
//! attached to submitted records ([`crate::submit`]). It is never validated
//! and never required — an empty record is a perfectly normal session.

use serde::{Deserialize, Serialize};

/// The query-string keys the extractor recognizes. Everything else is
/// ignored.
pub const RECOGNIZED_KEYS: [&str; 3] = ["utm_source", "utm_medium", "utm_campaign"];

/// Campaign-tracking key/value pairs for one page session.
///
/// Absent keys are omitted, not stored as empty strings — serialization
/// skips `None` fields so a submitted record only carries the keys that
/// were actually present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionRecord {
    /// Traffic source (e.g. `newsletter`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_source: Option<String>,
    /// Marketing medium (e.g. `email`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_medium: Option<String>,
    /// Campaign name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_campaign: Option<String>,
}

impl AttributionRecord {
    /// Build a record from raw query-string pairs.
    ///
    /// Recognized keys with non-empty values are kept; the first occurrence
    /// wins if a key repeats. Malformed or absent query strings simply
    /// yield an empty or partial record — there are no error conditions.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut record = Self::default();
        for (key, value) in pairs {
            if value.is_empty() {
                continue;
            }
            let slot = match key.as_str() {
                "utm_source" => &mut record.utm_source,
                "utm_medium" => &mut record.utm_medium,
                "utm_campaign" => &mut record.utm_campaign,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        record
    }

    /// Whether no recognized key was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.utm_source.is_none() && self.utm_medium.is_none() && self.utm_campaign.is_none()
    }

    /// Present key/value pairs in declaration order.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(v) = &self.utm_source {
            pairs.push(("utm_source", v.as_str()));
        }
        if let Some(v) = &self.utm_medium {
            pairs.push(("utm_medium", v.as_str()));
        }
        if let Some(v) = &self.utm_campaign {
            pairs.push(("utm_campaign", v.as_str()));
        }
        pairs
    }
}
