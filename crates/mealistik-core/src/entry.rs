//! Form entry drafts.
//!
//! A draft is the in-memory, user-editable state of a form before
//! submission. Field names serialize in the camelCase shape the stored
//! documents use.

use serde::{Deserialize, Serialize};

/// Health condition choices offered on the waitlist form.
///
/// A closed set — the form renders exactly these options and anything else
/// parses to "unset", which validation rejects at submission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "PCOS")]
    Pcos,
    #[serde(rename = "thyroid")]
    Thyroid,
    #[serde(rename = "diabetes")]
    Diabetes,
    #[serde(rename = "other")]
    Other,
}

impl Condition {
    /// All choices, in the order the form lists them.
    pub const ALL: [Self; 4] = [Self::Pcos, Self::Thyroid, Self::Diabetes, Self::Other];

    /// The stable form/document value for this choice.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pcos => "PCOS",
            Self::Thyroid => "thyroid",
            Self::Diabetes => "diabetes",
            Self::Other => "other",
        }
    }

    /// Human-readable label for the form's select control.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pcos => "PCOS",
            Self::Thyroid => "Thyroid condition",
            Self::Diabetes => "Diabetes",
            Self::Other => "Other",
        }
    }

    /// Parse a form value. Empty or unknown values yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

/// Draft of the early-waitlist form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WaitlistEntry {
    /// Required, must be non-empty after trimming.
    #[serde(rename = "firstName")]
    pub first_name: String,
    /// Required, must look like `local@domain.tld`.
    pub email: String,
    /// Required at submission; `None` while the user has not picked one.
    pub condition: Option<Condition>,
    /// Must be true to submit.
    pub consent: bool,
}

/// Draft of the investor/partner form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InvestorEntry {
    /// Required, must be non-empty after trimming.
    #[serde(rename = "fullName")]
    pub full_name: String,
    /// Required, must look like `local@domain.tld`.
    pub email: String,
    /// Free-form, never required.
    pub phone: String,
    /// Free-form, never required.
    pub notes: String,
    /// Must be true to submit.
    pub consent: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_parses_its_own_values() {
        for condition in Condition::ALL {
            assert_eq!(Condition::parse(condition.as_str()), Some(condition));
        }
    }

    #[test]
    fn unknown_or_empty_condition_is_unset() {
        assert_eq!(Condition::parse(""), None);
        assert_eq!(Condition::parse("pcos"), None);
        assert_eq!(Condition::parse("arthritis"), None);
    }

    #[test]
    fn entries_serialize_with_document_field_names() {
        let entry = WaitlistEntry {
            first_name: "Jane".to_owned(),
            email: "jane@example.com".to_owned(),
            condition: Some(Condition::Pcos),
            consent: true,
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "firstName": "Jane",
                "email": "jane@example.com",
                "condition": "PCOS",
                "consent": true,
            })
        );
    }
}
