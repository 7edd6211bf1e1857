/// Document identifiers are opaque strings assigned by the extraction service.
pub type DocumentId = String;

/// Field identifiers are opaque strings, unique within one document.
pub type FieldId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
