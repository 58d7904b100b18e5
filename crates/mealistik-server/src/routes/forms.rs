//! Form submission routes.
//!
//! Each POST handler clears the error slot, validates the draft, and only
//! then issues the single store write. Success answers 303 See Other to
//! the matching success view; a failed validation or store write re-renders
//! the same form view with the inline message and the retained draft.
//! Every failure is converted to a user-visible message here — nothing
//! propagates past the handler that triggered it.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::USER_AGENT;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::post;
use axum::{Form, Router};
use serde::Deserialize;
use tracing::warn;

use mealistik_core::attribution::AttributionRecord;
use mealistik_core::entry::{Condition, InvestorEntry, WaitlistEntry};
use mealistik_core::links;
use mealistik_core::validate;
use mealistik_core::view::{NavAction, ViewState};

use super::pages;
use crate::state::AppState;

/// Build the form-submission router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(ViewState::Waitlist.path(), post(submit_waitlist))
        .route(ViewState::Investor.path(), post(submit_investor))
}

// ── Payloads ─────────────────────────────────────────────────────────

/// Waitlist form fields, exactly as the browser posts them.
#[derive(Debug, Deserialize)]
pub struct WaitlistForm {
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    condition: String,
    /// Present (any value) when the checkbox is ticked.
    #[serde(default)]
    consent: Option<String>,
    #[serde(default)]
    utm_source: Option<String>,
    #[serde(default)]
    utm_medium: Option<String>,
    #[serde(default)]
    utm_campaign: Option<String>,
}

impl WaitlistForm {
    fn draft(&self) -> WaitlistEntry {
        WaitlistEntry {
            first_name: self.first_name.clone(),
            email: self.email.clone(),
            condition: Condition::parse(&self.condition),
            consent: self.consent.is_some(),
        }
    }

    fn attribution(&self) -> AttributionRecord {
        utm_record(&self.utm_source, &self.utm_medium, &self.utm_campaign)
    }
}

/// Investor form fields, exactly as the browser posts them.
#[derive(Debug, Deserialize)]
pub struct InvestorForm {
    #[serde(default)]
    full_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    notes: String,
    /// Present (any value) when the checkbox is ticked.
    #[serde(default)]
    consent: Option<String>,
    #[serde(default)]
    utm_source: Option<String>,
    #[serde(default)]
    utm_medium: Option<String>,
    #[serde(default)]
    utm_campaign: Option<String>,
}

impl InvestorForm {
    fn draft(&self) -> InvestorEntry {
        InvestorEntry {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            notes: self.notes.clone(),
            consent: self.consent.is_some(),
        }
    }

    fn attribution(&self) -> AttributionRecord {
        utm_record(&self.utm_source, &self.utm_medium, &self.utm_campaign)
    }
}

/// Rebuild the attribution record from the form's hidden fields.
fn utm_record(
    source: &Option<String>,
    medium: &Option<String>,
    campaign: &Option<String>,
) -> AttributionRecord {
    let pairs = [
        ("utm_source", source),
        ("utm_medium", medium),
        ("utm_campaign", campaign),
    ];
    AttributionRecord::from_pairs(
        pairs
            .into_iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.to_owned(), v.clone()))),
    )
}

// ── Handlers ─────────────────────────────────────────────────────────

/// Handle a waitlist submission.
async fn submit_waitlist(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<WaitlistForm>,
) -> Response {
    let attribution = form.attribution();
    let entry = form.draft();

    // First failed rule wins; no store call is attempted.
    if let Err(err) = validate::waitlist(&entry) {
        return Html(pages::render_waitlist(
            &attribution,
            &entry,
            Some(&err.to_string()),
        ))
        .into_response();
    }

    match state
        .submitter
        .submit_waitlist(&entry, &attribution, user_agent(&headers))
        .await
    {
        Ok(_) => {
            let next = ViewState::Waitlist.apply(NavAction::SubmitSucceeded);
            Redirect::to(&links::decorate(next.path(), &attribution)).into_response()
        }
        Err(err) => {
            warn!(error = %err, "waitlist submission failed");
            Html(pages::render_waitlist(
                &attribution,
                &entry,
                Some(&err.user_message()),
            ))
            .into_response()
        }
    }
}

/// Handle an investor/partner submission.
async fn submit_investor(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<InvestorForm>,
) -> Response {
    let attribution = form.attribution();
    let entry = form.draft();

    if let Err(err) = validate::investor(&entry) {
        return Html(pages::render_investor(
            &attribution,
            &entry,
            Some(&err.to_string()),
        ))
        .into_response();
    }

    match state
        .submitter
        .submit_investor(&entry, &attribution, user_agent(&headers))
        .await
    {
        Ok(_) => {
            let next = ViewState::Investor.apply(NavAction::SubmitSucceeded);
            Redirect::to(&links::decorate(next.path(), &attribution)).into_response()
        }
        Err(err) => {
            warn!(error = %err, "investor submission failed");
            Html(pages::render_investor(
                &attribution,
                &entry,
                Some(&err.user_message()),
            ))
            .into_response()
        }
    }
}

fn user_agent(headers: &HeaderMap) -> &str {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
