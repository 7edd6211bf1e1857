//! REST client for the document-extraction service.
//!
//! Wraps the extracted-data endpoints (fetch, save, submit) using
//! [`reqwest`]. Request and response bodies are the
//! [`ExtractedDocument`] JSON shape owned by `taxdesk-core`.

use serde::Deserialize;

use taxdesk_core::document::{DocumentStatus, ExtractedDocument};

use crate::config::ExtractionServiceConfig;

/// HTTP client for the extraction service.
pub struct ExtractionApi {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

/// Receipt returned by the submit endpoint after the backend accepts a
/// reviewed document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReceipt {
    /// Identifier of the submitted document.
    pub document_id: String,
    /// Status the backend assigned, normally `reviewed`.
    pub status: DocumentStatus,
}

/// Errors from the extraction REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service has no extracted data for this document.
    #[error("No extracted data found for document '{document_id}'")]
    NotFound {
        /// Identifier that failed to resolve.
        document_id: String,
    },

    /// The service returned a non-2xx status code.
    #[error("Extraction service error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl ExtractionApiError {
    /// Whether retrying the same request may succeed.
    ///
    /// Transport failures and server-side errors are retryable; client
    /// errors and missing records are not. The caller decides when to
    /// retry; this layer never retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(_) => true,
            Self::NotFound { .. } => false,
            Self::Api { status, .. } => *status >= 500,
        }
    }
}

impl ExtractionApi {
    /// Build an API client from configuration.
    pub fn new(config: &ExtractionServiceConfig) -> Result<Self, ExtractionApiError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    /// Build an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across services).
    pub fn with_client(client: reqwest::Client, base_url: String, api_token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
        }
    }

    /// Fetch the extracted data record for a document.
    ///
    /// Sends `GET /documents/{id}/extracted-data/`. A 404 maps to
    /// [`ExtractionApiError::NotFound`] so callers can render the empty
    /// state instead of a generic failure.
    pub async fn fetch_extracted_data(
        &self,
        document_id: &str,
    ) -> Result<ExtractedDocument, ExtractionApiError> {
        let url = format!("{}/documents/{}/extracted-data/", self.base_url, document_id);
        let response = self.request(self.client.get(&url)).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ExtractionApiError::NotFound {
                document_id: document_id.to_string(),
            });
        }

        Self::parse_response(response).await
    }

    /// Persist the current state of an extracted document.
    ///
    /// Sends `PUT /documents/{id}/extracted-data/` with the full record and
    /// returns the record the backend persisted.
    pub async fn save_extracted_data(
        &self,
        document: &ExtractedDocument,
    ) -> Result<ExtractedDocument, ExtractionApiError> {
        let url = format!(
            "{}/documents/{}/extracted-data/",
            self.base_url, document.document_id
        );
        let response = self.request(self.client.put(&url)).json(document).send().await?;

        Self::parse_response(response).await
    }

    /// Submit a reviewed document.
    ///
    /// Sends `POST /documents/{id}/extracted-data/submit/`; the backend
    /// transitions the record to `reviewed` and returns a receipt.
    pub async fn submit_extracted_data(
        &self,
        document_id: &str,
    ) -> Result<SubmitReceipt, ExtractionApiError> {
        let url = format!(
            "{}/documents/{}/extracted-data/submit/",
            self.base_url, document_id
        );
        let response = self.request(self.client.post(&url)).send().await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Attach the per-request correlation ID and bearer token.
    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = builder.header("X-Request-Id", uuid::Uuid::new_v4().to_string());
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or an [`ExtractionApiError::Api`] containing
    /// the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ExtractionApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), "Extraction service returned an error");
            return Err(ExtractionApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Check the status, then deserialize the JSON body.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ExtractionApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json().await?)
    }
}
