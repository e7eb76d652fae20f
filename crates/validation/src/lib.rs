//! Batch admission policy for uploads.
//!
//! Pure decision logic: no I/O, deterministic, safe to call repeatedly.
//! Storage only ever sees batches this module has accepted.

use common::UploadCandidate;
use thiserror::Error;

/// Content types accepted for upload. Matched exactly against the declared
/// type; the payload bytes are never sniffed.
pub const ALLOWED_CONTENT_TYPES: [&str; 7] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
];

/// Configured upload limits, read once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    /// Maximum number of files per batch
    pub max_files: usize,
    /// Maximum size of a single file in bytes
    pub max_file_size_bytes: u64,
}

/// Rejection reasons for an upload batch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No files uploaded")]
    EmptyBatch,

    #[error("Too many files. Maximum is {max} files")]
    TooManyFiles { max: usize },

    #[error("File {name} is too large. Maximum size is {max_bytes} bytes")]
    FileTooLarge { name: String, max_bytes: u64 },

    #[error("Invalid file type '{content_type}' for file {name}. Only images, PDFs, and documents are allowed")]
    UnsupportedType { name: String, content_type: String },
}

/// Decide whether a batch of candidates may be stored.
///
/// Acceptance is all-or-nothing: the first offending candidate, in input
/// order, rejects the whole batch. For a single candidate the size check
/// runs before the type check.
pub fn validate_batch(
    candidates: &[UploadCandidate],
    policy: &UploadPolicy,
) -> Result<(), ValidationError> {
    if candidates.is_empty() {
        return Err(ValidationError::EmptyBatch);
    }

    if candidates.len() > policy.max_files {
        return Err(ValidationError::TooManyFiles {
            max: policy.max_files,
        });
    }

    for candidate in candidates {
        if candidate.size > policy.max_file_size_bytes {
            return Err(ValidationError::FileTooLarge {
                name: display_name(candidate),
                max_bytes: policy.max_file_size_bytes,
            });
        }

        if !ALLOWED_CONTENT_TYPES.contains(&candidate.content_type.as_str()) {
            return Err(ValidationError::UnsupportedType {
                name: display_name(candidate),
                content_type: candidate.content_type.clone(),
            });
        }
    }

    Ok(())
}

fn display_name(candidate: &UploadCandidate) -> String {
    candidate
        .file_name
        .clone()
        .unwrap_or_else(|| "<unnamed>".to_string())
}
