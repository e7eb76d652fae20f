//! Filesystem-based storage engine

use crate::paths;
use crate::StorageError;
use common::utils::current_timestamp_ms;
use common::UploadCandidate;
use std::io;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Storage engine rooted at a single local directory.
///
/// Holds no mutable state: every operation resolves against the fixed root
/// and durability is delegated to the filesystem, so concurrent calls need
/// no coordination. A writer racing a reader may expose a partially written
/// file; callers that care must coordinate above this layer.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

/// The persisted result of one accepted upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    /// Generated name the file lives under on disk
    pub storage_name: String,
    /// Sanitized original name
    pub original_name: String,
    pub size: u64,
    pub content_type: String,
}

/// Read handle for one stored file
#[derive(Debug, Clone)]
pub struct StoredFile {
    name: String,
    size: u64,
    path: PathBuf,
}

impl StoredFile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Read the full file contents
    pub async fn read(&self) -> Result<Vec<u8>, StorageError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|source| StorageError::Io {
                name: self.name.clone(),
                source,
            })
    }
}

impl FileStore {
    /// Open the storage root, creating it (and missing parents) if needed.
    ///
    /// The only operation allowed to fail fatally at startup; everything
    /// else fails per call.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = root.as_ref();

        std::fs::create_dir_all(root).map_err(|source| StorageError::Unavailable {
            path: root.to_path_buf(),
            source,
        })?;

        let root = root
            .canonicalize()
            .map_err(|source| StorageError::Unavailable {
                path: root.to_path_buf(),
                source,
            })?;

        let permissions = std::fs::metadata(&root)
            .map_err(|source| StorageError::Unavailable {
                path: root.clone(),
                source,
            })?
            .permissions();
        if permissions.readonly() {
            return Err(StorageError::Unavailable {
                path: root,
                source: io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "storage directory is not writable",
                ),
            });
        }

        Ok(Self { root })
    }

    /// Absolute, normalized directory every stored file lives under
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store every candidate in input order.
    ///
    /// The first failure aborts the rest of the batch; files already written
    /// for earlier candidates stay on disk.
    pub async fn store(
        &self,
        candidates: &[UploadCandidate],
    ) -> Result<Vec<StoredRecord>, StorageError> {
        let mut records = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            records.push(self.store_one(candidate).await?);
        }
        Ok(records)
    }

    async fn store_one(&self, candidate: &UploadCandidate) -> Result<StoredRecord, StorageError> {
        let raw_name = candidate
            .file_name
            .as_deref()
            .ok_or(StorageError::MissingName)?;
        let original_name = paths::sanitize_file_name(raw_name)?;

        if candidate.size == 0 {
            return Err(StorageError::EmptyFile {
                name: original_name,
            });
        }

        let storage_name = format!("{}-{}", current_timestamp_ms(), original_name);

        // Containment is re-verified on the generated name even though the
        // sanitizer already ran on the original one.
        let target = paths::resolve_under(&self.root, &storage_name)?;

        // create_new turns a same-millisecond name collision into an error
        // instead of a silent overwrite.
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await
            .map_err(|source| StorageError::Io {
                name: original_name.clone(),
                source,
            })?;
        file.write_all(&candidate.content)
            .await
            .map_err(|source| StorageError::Io {
                name: original_name.clone(),
                source,
            })?;

        Ok(StoredRecord {
            storage_name,
            original_name,
            size: candidate.size,
            content_type: candidate.content_type.clone(),
        })
    }

    /// Names of the immediate entries under the storage root, in filesystem
    /// enumeration order
    pub async fn list(&self) -> Result<Vec<String>, StorageError> {
        let io_error = |source| StorageError::Io {
            name: self.root.display().to_string(),
            source,
        };

        let mut entries = tokio::fs::read_dir(&self.root).await.map_err(io_error)?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    /// Look up a stored file by storage name.
    ///
    /// The name goes through the same containment check as store before the
    /// filesystem is touched.
    pub async fn load(&self, storage_name: &str) -> Result<StoredFile, StorageError> {
        let path = paths::resolve_under(&self.root, storage_name)?;

        let metadata = match tokio::fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound {
                    name: storage_name.to_string(),
                });
            }
            Err(source) => {
                return Err(StorageError::Io {
                    name: storage_name.to_string(),
                    source,
                });
            }
        };

        if !metadata.is_file() {
            return Err(StorageError::NotFound {
                name: storage_name.to_string(),
            });
        }

        Ok(StoredFile {
            name: storage_name.to_string(),
            size: metadata.len(),
            path,
        })
    }
}
