/// Default directory uploaded files are stored under (relative paths are
/// resolved against the working directory)
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Default maximum size of a single uploaded file in bytes (5 MiB)
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Default maximum number of files per upload batch
pub const DEFAULT_MAX_FILES: usize = 5;

/// Default server host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_PORT: &str = "8080";
