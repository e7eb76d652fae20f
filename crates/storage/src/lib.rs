//! Filesystem-backed upload storage.
//!
//! A [`FileStore`] owns a single root directory and exposes store, list and
//! load operations. Every path it resolves is checked to remain inside the
//! root; that containment is the invariant the whole crate exists to hold.

pub mod error;
pub mod filesystem;
pub mod paths;

pub use error::StorageError;
pub use filesystem::{FileStore, StoredFile, StoredRecord};
