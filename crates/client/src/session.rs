//! Async review session: core review state plus the persistence gateway.
//!
//! One [`ReviewSession`] owns the review of one document. Edits go through
//! the embedded [`ReviewState`]; load, save, and submit go through the
//! [`DocumentGateway`]. The document is never considered durably modified
//! until the gateway acknowledges a save or submit.

use std::collections::BTreeMap;

use taxdesk_core::document::{validate_status_transition, DocumentStatus, ExtractedDocument};
use taxdesk_core::error::CoreError;
use taxdesk_core::review::{FieldChange, ReviewState};
use taxdesk_core::types::{DocumentId, FieldId};

use crate::api::ExtractionApiError;
use crate::gateway::DocumentGateway;

/// Errors surfaced by a review session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A domain-level error from `taxdesk-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A gateway error talking to the extraction service.
    #[error(transparent)]
    Gateway(#[from] ExtractionApiError),

    /// An operation needed a loaded document and none is present.
    #[error("No document loaded; call load() first")]
    NotLoaded,
}

impl SessionError {
    /// Whether the caller may usefully retry the failed operation.
    ///
    /// Only gateway failures are retryable; validation and state errors
    /// need a different input, not another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Gateway(err) => err.is_retryable(),
            Self::Core(_) | Self::NotLoaded => false,
        }
    }
}

/// Drives the review of one extracted document against the backend.
///
/// Each opened document gets its own session; edits are serialized through
/// `&mut self`, matching the one-state-owner model of the review UI.
pub struct ReviewSession<G: DocumentGateway> {
    gateway: G,
    document_id: DocumentId,
    state: Option<ReviewState>,
}

impl<G: DocumentGateway> ReviewSession<G> {
    /// Create a session for a document. Nothing is fetched until
    /// [`load`](Self::load).
    pub fn new(gateway: G, document_id: impl Into<DocumentId>) -> Self {
        Self {
            gateway,
            document_id: document_id.into(),
            state: None,
        }
    }

    /// The document this session reviews.
    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    /// The current review state, if a document is loaded.
    pub fn state(&self) -> Option<&ReviewState> {
        self.state.as_ref()
    }

    /// Whether [`load`](Self::load) has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.state.is_some()
    }

    /// Fetch the document from the gateway and take ownership of it.
    ///
    /// On failure no partial state is kept: an existing loaded document is
    /// left untouched and the error is reported to the caller, who decides
    /// whether to retry.
    pub async fn load(&mut self) -> Result<(), SessionError> {
        let document = self.gateway.fetch(&self.document_id).await?;

        tracing::info!(
            document_id = %self.document_id,
            document_type = %document.document_type,
            field_count = document.fields.len(),
            status = document.status.as_str(),
            "Extracted document loaded"
        );

        self.state = Some(ReviewState::new(document));
        Ok(())
    }

    /// Set a field's value; see [`ReviewState::set_field_value`].
    pub fn set_field_value(
        &mut self,
        field_id: &str,
        value: impl Into<String>,
    ) -> Result<FieldChange, SessionError> {
        let state = self.state.as_mut().ok_or(SessionError::NotLoaded)?;
        Ok(state.set_field_value(field_id, value)?)
    }

    /// Restore a field to its extracted original; see
    /// [`ReviewState::reset_field`].
    pub fn reset_field(&mut self, field_id: &str) -> Result<FieldChange, SessionError> {
        let state = self.state.as_mut().ok_or(SessionError::NotLoaded)?;
        Ok(state.reset_field(field_id)?)
    }

    /// Run the validator over every field; the save/submit gate.
    pub fn validate_all(&mut self) -> Result<BTreeMap<FieldId, String>, SessionError> {
        let state = self.state.as_mut().ok_or(SessionError::NotLoaded)?;
        Ok(state.validate_all())
    }

    /// Persist the current field map.
    ///
    /// Blocked while any field fails validation. On gateway failure the
    /// local state is left unchanged; on success the session adopts the
    /// record the backend persisted.
    pub async fn save(&mut self) -> Result<(), SessionError> {
        let state = self.state.as_mut().ok_or(SessionError::NotLoaded)?;

        let errors = state.validate_all();
        if !errors.is_empty() {
            return Err(CoreError::Validation(format!(
                "Cannot save: {} field(s) failing validation",
                errors.len()
            ))
            .into());
        }

        let saved = self.gateway.save(state.document()).await?;

        tracing::info!(
            document_id = %self.document_id,
            "Extracted document saved"
        );

        state.adopt(saved);
        Ok(())
    }

    /// Submit the document for review sign-off.
    ///
    /// Gated exactly like [`save`](Self::save), plus the forward-only
    /// status rule: a document that already left `pending_review` is
    /// rejected before any network call. The status changes only after the
    /// backend acknowledges.
    pub async fn submit(&mut self) -> Result<DocumentStatus, SessionError> {
        let state = self.state.as_mut().ok_or(SessionError::NotLoaded)?;

        let errors = state.validate_all();
        if !errors.is_empty() {
            return Err(CoreError::Validation(format!(
                "Cannot submit: {} field(s) failing validation",
                errors.len()
            ))
            .into());
        }
        validate_status_transition(state.status(), DocumentStatus::Reviewed)
            .map_err(SessionError::Core)?;

        let receipt = self.gateway.submit(&self.document_id).await?;
        state.mark_reviewed()?;

        tracing::info!(
            document_id = %self.document_id,
            status = receipt.status.as_str(),
            "Extracted document submitted"
        );

        Ok(state.status())
    }

    /// The document in its current edit state.
    pub fn document(&self) -> Result<&ExtractedDocument, SessionError> {
        self.state
            .as_ref()
            .map(ReviewState::document)
            .ok_or(SessionError::NotLoaded)
    }
}
