//! Review state controller for extracted documents.
//!
//! [`ReviewState`] owns one [`ExtractedDocument`] loaded from the extraction
//! service and tracks per-field modification and validation state as the
//! reviewer edits. The state is an explicit object owned by the caller;
//! every mutation returns a [`FieldChange`] event so the caller can update
//! its view without watching hidden state.

use std::collections::BTreeMap;

use crate::document::{validate_status_transition, DocumentStatus, ExtractedDocument};
use crate::error::CoreError;
use crate::field::ExtractedField;
use crate::types::FieldId;
use crate::validate::{validate_document, validate_field};

/// Change event emitted by a field mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field_id: FieldId,
    /// Value after the mutation.
    pub value: String,
    /// Whether the field now differs from its extracted original.
    pub is_modified: bool,
    /// Validation verdict for the new value, if it failed.
    pub validation_error: Option<String>,
}

/// Mutable review state for one extracted document.
///
/// Each opened document owns an independent instance; edits are serialized
/// through `&mut self`, so no two mutations of the same document overlap.
#[derive(Debug, Clone)]
pub struct ReviewState {
    document: ExtractedDocument,
    errors: BTreeMap<FieldId, String>,
}

impl ReviewState {
    /// Take ownership of a freshly loaded document.
    ///
    /// The local error map starts empty; validation runs on edit and via
    /// [`validate_all`](Self::validate_all).
    pub fn new(document: ExtractedDocument) -> Self {
        Self {
            document,
            errors: BTreeMap::new(),
        }
    }

    /// The document in its current edit state.
    pub fn document(&self) -> &ExtractedDocument {
        &self.document
    }

    /// Consume the state, yielding the document.
    pub fn into_document(self) -> ExtractedDocument {
        self.document
    }

    /// Current review status.
    pub fn status(&self) -> DocumentStatus {
        self.document.status
    }

    /// The current field-level error map.
    pub fn errors(&self) -> &BTreeMap<FieldId, String> {
        &self.errors
    }

    /// Whether any field currently differs from its extracted original.
    pub fn is_dirty(&self) -> bool {
        self.document.fields.values().any(|f| f.is_modified)
    }

    /// Fields the reviewer has changed from their extracted originals.
    pub fn modified_fields(&self) -> Vec<&ExtractedField> {
        self.document
            .fields
            .values()
            .filter(|f| f.is_modified)
            .collect()
    }

    /// Set a field's value.
    ///
    /// Recomputes the modification flag, re-validates only this field, and
    /// merges the verdict into the error map. Fails with a conflict once
    /// the document has left `pending_review`.
    pub fn set_field_value(
        &mut self,
        field_id: &str,
        value: impl Into<String>,
    ) -> Result<FieldChange, CoreError> {
        self.ensure_editable()?;
        let field = self
            .document
            .field_mut(field_id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "ExtractedField",
                id: field_id.to_string(),
            })?;

        field.value = value.into();
        field.sync_modified();
        field.validation_error = validate_field(field);

        match &field.validation_error {
            Some(msg) => {
                self.errors.insert(field.id.clone(), msg.clone());
            }
            None => {
                self.errors.remove(field_id);
            }
        }

        Ok(FieldChange {
            field_id: field.id.clone(),
            value: field.value.clone(),
            is_modified: field.is_modified,
            validation_error: field.validation_error.clone(),
        })
    }

    /// Restore a field to its extracted original and clear its error.
    pub fn reset_field(&mut self, field_id: &str) -> Result<FieldChange, CoreError> {
        self.ensure_editable()?;
        let field = self
            .document
            .field_mut(field_id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "ExtractedField",
                id: field_id.to_string(),
            })?;

        field.value = field.original_value.clone();
        field.is_modified = false;
        field.validation_error = None;
        self.errors.remove(field_id);

        Ok(FieldChange {
            field_id: field.id.clone(),
            value: field.value.clone(),
            is_modified: false,
            validation_error: None,
        })
    }

    /// Run the validator over every field.
    ///
    /// Replaces the error map with the full sweep result and syncs each
    /// field's inline error. This is the save/submit gate.
    pub fn validate_all(&mut self) -> BTreeMap<FieldId, String> {
        let errors = validate_document(&self.document);
        for (id, field) in self.document.fields.iter_mut() {
            field.validation_error = errors.get(id).cloned();
        }
        self.errors = errors.clone();
        errors
    }

    /// Transition the document to `reviewed`.
    ///
    /// Gated on a clean [`validate_all`](Self::validate_all) sweep and on
    /// the forward-only status rule; on failure the status is unchanged.
    pub fn mark_reviewed(&mut self) -> Result<(), CoreError> {
        let errors = self.validate_all();
        if !errors.is_empty() {
            return Err(CoreError::Validation(format!(
                "Document has {} field(s) failing validation",
                errors.len()
            )));
        }

        validate_status_transition(self.document.status, DocumentStatus::Reviewed)?;
        self.document.status = DocumentStatus::Reviewed;
        Ok(())
    }

    /// Adopt the record echoed by the backend after a successful save.
    ///
    /// Local errors are cleared; the save gate guarantees they were empty.
    pub fn adopt(&mut self, document: ExtractedDocument) {
        self.document = document;
        self.errors.clear();
    }

    fn ensure_editable(&self) -> Result<(), CoreError> {
        if self.document.status.is_editable() {
            Ok(())
        } else {
            Err(CoreError::Conflict(format!(
                "Document '{}' is {} and no longer accepts edits",
                self.document.document_id,
                self.document.status.as_str()
            )))
        }
    }
}
