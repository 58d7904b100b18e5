//! Core library for Mealistik.
//!
//! Contains the campaign-attribution record, the outbound-link decorator,
//! the form entry drafts and their submission-time validators, the view
//! state machine, and the record submitter. This crate depends on
//! `mealistik-store` for the document-store trait and knows nothing about
//! HTTP or HTML rendering.

pub mod attribution;
pub mod entry;
pub mod error;
pub mod links;
pub mod submit;
pub mod validate;
pub mod view;
