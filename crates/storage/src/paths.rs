//! Handling of untrusted file names: sanitization and containment.

use crate::StorageError;
use std::path::{Component, Path, PathBuf};

/// Reduce an uploader-supplied file name to its canonical relative form.
///
/// Backslashes are treated as separators, `.` and empty segments are
/// dropped, and `..` collapses against the preceding segment. A `..` with
/// nothing left to collapse, a null byte, or a name that reduces to nothing
/// is rejected.
pub fn sanitize_file_name(raw: &str) -> Result<String, StorageError> {
    let invalid = || StorageError::InvalidPath {
        name: raw.to_string(),
    };

    if raw.contains('\0') {
        return Err(invalid());
    }

    let normalized = raw.replace('\\', "/");
    let mut segments: Vec<&str> = Vec::new();
    for segment in normalized.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(invalid());
                }
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        return Err(invalid());
    }

    Ok(segments.join("/"))
}

/// Resolve `name` against `root` and verify the result stays inside `root`.
///
/// Purely lexical: the target may not exist yet, so `..` components are
/// collapsed without touching the filesystem. `root` must already be
/// absolute and normalized.
pub fn resolve_under(root: &Path, name: &str) -> Result<PathBuf, StorageError> {
    let escape = || StorageError::PathEscape {
        name: name.to_string(),
    };

    let joined = root.join(name);
    let mut resolved = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !resolved.pop() {
                    return Err(escape());
                }
            }
            other => resolved.push(other),
        }
    }

    if resolved != root && resolved.starts_with(root) {
        Ok(resolved)
    } else {
        Err(escape())
    }
}
