//! Domain error type shared across the workspace.

/// Domain-level error for the taxdesk core.
///
/// Gateway and session layers wrap this type rather than redefining the
/// domain failure cases.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    #[error("{entity} '{id}' not found")]
    NotFound {
        /// Entity kind, e.g. `"ExtractedField"`.
        entity: &'static str,
        /// Identifier that failed to resolve.
        id: String,
    },

    /// Input failed a validation rule.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The requested change conflicts with current state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// An unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}
