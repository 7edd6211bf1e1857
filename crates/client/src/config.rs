//! Client configuration loaded from environment variables.

/// Connection settings for the document-extraction service.
///
/// All fields have defaults suitable for local development against the
/// practice-management backend. Override via environment variables in
/// production.
#[derive(Debug, Clone)]
pub struct ExtractionServiceConfig {
    /// Base URL of the extraction service (default: `http://localhost:8000`).
    pub base_url: String,
    /// Bearer token attached to every request, when set.
    pub api_token: Option<String>,
    /// Per-request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ExtractionServiceConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `EXTRACTION_API_URL`   | `http://localhost:8000` |
    /// | `EXTRACTION_API_TOKEN` | unset                   |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    pub fn from_env() -> Self {
        let base_url = std::env::var("EXTRACTION_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000".into());

        let api_token = std::env::var("EXTRACTION_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            api_token,
            request_timeout_secs,
        }
    }
}

impl Default for ExtractionServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_token: None,
            request_timeout_secs: 30,
        }
    }
}
