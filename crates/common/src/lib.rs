pub mod utils;

use serde::{Deserialize, Serialize};

/// One file submitted in an upload batch.
///
/// The original file name and declared content type come straight from the
/// multipart part and are untrusted: the name may carry path separators or
/// traversal segments, and the type is never checked against the bytes.
#[derive(Debug, Clone)]
pub struct UploadCandidate {
    /// Original file name as supplied by the uploader, if any
    pub file_name: Option<String>,
    /// Declared content type
    pub content_type: String,
    /// Payload size in bytes
    pub size: u64,
    /// Decoded file bytes
    pub content: Vec<u8>,
}

impl UploadCandidate {
    pub fn new(
        file_name: Option<String>,
        content_type: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        Self {
            file_name,
            content_type: content_type.into(),
            size: content.len() as u64,
            content,
        }
    }
}

/// Response body for a successful upload
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UploadResponse {
    pub message: String,
    pub files: Vec<StoredFileInfo>,
}

/// Wire representation of one stored file
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StoredFileInfo {
    /// Generated name the file is stored under
    pub filename: String,
    /// Sanitized original name
    #[serde(rename = "originalName")]
    pub original_name: String,
    pub size: u64,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

/// Response from health check endpoint
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String, // "ok" when healthy
}
