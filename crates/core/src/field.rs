//! Extracted field model and per-field validation rule set.
//!
//! Mirrors the JSON shape produced by the extraction service: struct keys
//! are camelCase, field type tags are lowercase, rule keys are snake_case.

use serde::{Deserialize, Serialize};

use crate::confidence::ConfidenceBand;
use crate::error::CoreError;
use crate::types::FieldId;

/// The typed kinds of extracted fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Ssn,
    Ein,
    Currency,
    Percentage,
    Date,
    Text,
    Number,
}

impl FieldType {
    /// Parse a field type tag from a payload string.
    pub fn from_str_tag(s: &str) -> Result<Self, CoreError> {
        match s {
            "ssn" => Ok(Self::Ssn),
            "ein" => Ok(Self::Ein),
            "currency" => Ok(Self::Currency),
            "percentage" => Ok(Self::Percentage),
            "date" => Ok(Self::Date),
            "text" => Ok(Self::Text),
            "number" => Ok(Self::Number),
            _ => Err(CoreError::Validation(format!(
                "Invalid field type '{s}'. Must be one of: ssn, ein, currency, percentage, date, text, number"
            ))),
        }
    }

    /// Convert to the payload tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ssn => "ssn",
            Self::Ein => "ein",
            Self::Currency => "currency",
            Self::Percentage => "percentage",
            Self::Date => "date",
            Self::Text => "text",
            Self::Number => "number",
        }
    }
}

/// Optional validation rules riding on a field.
///
/// Rule keys are snake_case on the wire. Absent rules mean the field only
/// gets its type-level checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationRules {
    /// An empty value is a validation error when set.
    #[serde(default)]
    pub required: bool,
    /// Lower bound for currency/number values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    /// Upper bound for currency/number values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    /// Minimum length for text values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Maximum length for text values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Regex a text value must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Custom message reported when `pattern` fails.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One field of an extracted document.
///
/// Invariant: `is_modified == (value != original_value)`. The review
/// controller maintains it on every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedField {
    pub id: FieldId,
    /// Human-readable label shown next to the input.
    pub label: String,
    /// Current (possibly edited) raw value.
    pub value: String,
    /// Value as originally read by the extraction pipeline.
    pub original_value: String,
    /// Extraction confidence in `[0, 1]`.
    pub confidence: f64,
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_rules: Option<ValidationRules>,
    #[serde(default)]
    pub is_modified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_error: Option<String>,
}

impl ExtractedField {
    /// Whether an empty value is a validation error for this field.
    pub fn required(&self) -> bool {
        self.validation_rules
            .as_ref()
            .map(|r| r.required)
            .unwrap_or(false)
    }

    /// Styling band for this field's extraction confidence.
    pub fn confidence_band(&self) -> ConfidenceBand {
        ConfidenceBand::from_score(self.confidence)
    }

    /// Recompute `is_modified` from the current and original values.
    pub fn sync_modified(&mut self) {
        self.is_modified = self.value != self.original_value;
    }
}
