//! Extraction service client library.
//!
//! Provides the typed REST client for the document-extraction service, the
//! gateway trait seam, env-based configuration, and the async review
//! session that drives a [`taxdesk_core::review::ReviewState`] against the
//! remote backend.

pub mod api;
pub mod config;
pub mod gateway;
pub mod session;
