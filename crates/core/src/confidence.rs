//! Well-known extraction-confidence bands.
//!
//! The extraction service reports a confidence score in `[0, 1]` for every
//! field it reads. The review UI styles fields by band, so the thresholds
//! live here as named constants rather than in the presentation layer.

use serde::{Deserialize, Serialize};

/// Scores at or above this are considered reliable reads.
pub const CONFIDENCE_HIGH_THRESHOLD: f64 = 0.9;

/// Scores at or above this (but below high) warrant a closer look.
pub const CONFIDENCE_MEDIUM_THRESHOLD: f64 = 0.7;

/// Styling band for an extraction confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    /// Band a raw confidence score.
    ///
    /// Scores are clamped conceptually: anything at or above the high
    /// threshold is [`High`](Self::High), anything at or above the medium
    /// threshold is [`Medium`](Self::Medium), the rest is
    /// [`Low`](Self::Low).
    pub fn from_score(score: f64) -> Self {
        if score >= CONFIDENCE_HIGH_THRESHOLD {
            Self::High
        } else if score >= CONFIDENCE_MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// String tag consumed by the UI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}
