//! Extracted document model and review status transitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::field::ExtractedField;
use crate::types::{DocumentId, FieldId, Timestamp};

/// Review lifecycle status of an extracted document.
///
/// Transitions only move forward: `pending_review → reviewed`, then
/// `reviewed → approved` or `reviewed → rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    PendingReview,
    Reviewed,
    Approved,
    Rejected,
}

impl DocumentStatus {
    /// Parse a status string from a payload.
    pub fn from_str_tag(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending_review" => Ok(Self::PendingReview),
            "reviewed" => Ok(Self::Reviewed),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(CoreError::Validation(format!(
                "Invalid document status '{s}'. Must be one of: pending_review, reviewed, approved, rejected"
            ))),
        }
    }

    /// Convert to the payload tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingReview => "pending_review",
            Self::Reviewed => "reviewed",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Whether the document still accepts field edits.
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::PendingReview)
    }
}

/// Validate a status transition.
///
/// Only forward moves are allowed; approved and rejected are terminal.
pub fn validate_status_transition(
    from: DocumentStatus,
    to: DocumentStatus,
) -> Result<(), CoreError> {
    use DocumentStatus::*;

    let allowed = matches!(
        (from, to),
        (PendingReview, Reviewed) | (Reviewed, Approved) | (Reviewed, Rejected)
    );

    if allowed {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Cannot transition document status from '{}' to '{}'",
            from.as_str(),
            to.as_str()
        )))
    }
}

/// One extracted document as served by the extraction service.
///
/// The field map is a `BTreeMap` so serialization order is deterministic
/// and a load-then-save round trip reproduces the payload byte-for-byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDocument {
    pub document_id: DocumentId,
    /// Source document kind, e.g. `"W-2"` or `"1099-MISC"`.
    pub document_type: String,
    pub fields: BTreeMap<FieldId, ExtractedField>,
    /// Document-level errors reported by the extraction service.
    #[serde(default)]
    pub validation_errors: Vec<String>,
    pub status: DocumentStatus,
    /// Last server-side modification time, when the backend reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl ExtractedDocument {
    /// Look up a field by ID.
    pub fn field(&self, field_id: &str) -> Option<&ExtractedField> {
        self.fields.get(field_id)
    }

    /// Look up a field mutably by ID.
    pub fn field_mut(&mut self, field_id: &str) -> Option<&mut ExtractedField> {
        self.fields.get_mut(field_id)
    }
}
