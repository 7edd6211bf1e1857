//! Gateway trait seam over the extraction service.
//!
//! [`ReviewSession`](crate::session::ReviewSession) talks to the backend
//! through this trait so tests can swap the HTTP client for an in-memory
//! fake.

use async_trait::async_trait;

use taxdesk_core::document::ExtractedDocument;

use crate::api::{ExtractionApi, ExtractionApiError, SubmitReceipt};

/// Persistence operations on one document's extracted data.
#[async_trait]
pub trait DocumentGateway: Send + Sync {
    /// Fetch the extracted-data record.
    async fn fetch(&self, document_id: &str) -> Result<ExtractedDocument, ExtractionApiError>;

    /// Persist the record; returns what the backend stored.
    async fn save(
        &self,
        document: &ExtractedDocument,
    ) -> Result<ExtractedDocument, ExtractionApiError>;

    /// Submit the record for review sign-off.
    async fn submit(&self, document_id: &str) -> Result<SubmitReceipt, ExtractionApiError>;
}

#[async_trait]
impl DocumentGateway for ExtractionApi {
    async fn fetch(&self, document_id: &str) -> Result<ExtractedDocument, ExtractionApiError> {
        self.fetch_extracted_data(document_id).await
    }

    async fn save(
        &self,
        document: &ExtractedDocument,
    ) -> Result<ExtractedDocument, ExtractionApiError> {
        self.save_extracted_data(document).await
    }

    async fn submit(&self, document_id: &str) -> Result<SubmitReceipt, ExtractionApiError> {
        self.submit_extracted_data(document_id).await
    }
}
