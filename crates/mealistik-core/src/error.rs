//! Domain error types.
//!
//! [`ValidationError`] doubles as the user-facing message: its `Display`
//! strings are rendered verbatim in the form's inline error slot.
//! [`SubmitError`] wraps store failures and exposes the message the user
//! should see via [`SubmitError::user_message`].

use mealistik_store::StoreError;

/// A submission-time validation failure.
///
/// Exactly one rule fails per attempt — validators short-circuit on the
/// first broken rule, so a caller never has to pick between messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Waitlist first name empty or whitespace.
    #[error("First name is required.")]
    FirstNameRequired,

    /// Investor full name empty or whitespace.
    #[error("Full name is required.")]
    FullNameRequired,

    /// Email missing or not shaped like `local@domain.tld`.
    #[error("Please enter a valid email.")]
    InvalidEmail,

    /// No condition selected.
    #[error("Please select a condition.")]
    ConditionRequired,

    /// Waitlist consent checkbox unticked.
    #[error("Please consent to receive updates.")]
    UpdatesConsentRequired,

    /// Investor consent checkbox unticked.
    #[error("Please consent to be contacted.")]
    ContactConsentRequired,
}

/// A failed attempt to persist a validated entry.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The store write failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The entry could not be encoded as a JSON document.
    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

impl SubmitError {
    /// Shown when the store did not author a message of its own.
    pub const FALLBACK_MESSAGE: &'static str = "Something went wrong. Please try again.";

    /// The message to render in the form's inline error slot.
    ///
    /// Uses the store's own message when the failure carried one, otherwise
    /// the generic fallback.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Store(err) => err
                .store_message()
                .map_or_else(|| Self::FALLBACK_MESSAGE.to_owned(), ToOwned::to_owned),
            Self::Encode(_) => Self::FALLBACK_MESSAGE.to_owned(),
        }
    }
}
