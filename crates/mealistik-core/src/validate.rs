//! Submission-time validators.
//!
//! Both validators are pure, synchronous, and short-circuit on the first
//! broken rule, so exactly one error ever surfaces per attempt. They run
//! only when the user submits — never on keystrokes.

use std::sync::LazyLock;

use regex::Regex;

use crate::entry::{InvestorEntry, WaitlistEntry};
use crate::error::ValidationError;

/// `local@domain.tld` with a 2+ character TLD, case-insensitive, no
/// whitespace or second `@` anywhere.
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // fixed pattern, cannot fail at runtime
    let re = Regex::new(r"(?i)^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").unwrap();
    re
});

/// Validate a waitlist draft.
///
/// Rule order: first name, email shape, condition selected, consent.
///
/// # Errors
///
/// Returns the [`ValidationError`] of the first failed rule.
pub fn waitlist(entry: &WaitlistEntry) -> Result<(), ValidationError> {
    if entry.first_name.trim().is_empty() {
        return Err(ValidationError::FirstNameRequired);
    }
    if entry.email.is_empty() || !EMAIL_SHAPE.is_match(&entry.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if entry.condition.is_none() {
        return Err(ValidationError::ConditionRequired);
    }
    if !entry.consent {
        return Err(ValidationError::UpdatesConsentRequired);
    }
    Ok(())
}

/// Validate an investor/partner draft. `phone` and `notes` are never
/// required.
///
/// Rule order: full name, email shape, consent.
///
/// # Errors
///
/// Returns the [`ValidationError`] of the first failed rule.
pub fn investor(entry: &InvestorEntry) -> Result<(), ValidationError> {
    if entry.full_name.trim().is_empty() {
        return Err(ValidationError::FullNameRequired);
    }
    if entry.email.is_empty() || !EMAIL_SHAPE.is_match(&entry.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if !entry.consent {
        return Err(ValidationError::ContactConsentRequired);
    }
    Ok(())
}
