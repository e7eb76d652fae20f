use storage::StorageError;
use tracing::error;
use validation::ValidationError;

/// Helper function for server errors
pub fn handle_server_error<E: std::fmt::Display>(msg: &str, e: E) -> actix_web::Error {
    error!("{}: {}", msg, e);
    actix_web::error::ErrorInternalServerError(format!("{}: {}", msg, e))
}

/// A rejected batch is a client error; the validator's message is the body
pub fn handle_validation_error(e: ValidationError) -> actix_web::Error {
    error!("Upload rejected: {}", e);
    actix_web::error::ErrorBadRequest(e.to_string())
}

/// Map a storage failure onto the right HTTP status
pub fn handle_storage_error(msg: &str, e: StorageError) -> actix_web::Error {
    error!("{}: {}", msg, e);
    match &e {
        StorageError::NotFound { .. } => actix_web::error::ErrorNotFound(e.to_string()),
        _ if e.is_client_error() => actix_web::error::ErrorBadRequest(e.to_string()),
        _ => actix_web::error::ErrorInternalServerError(format!("{}: {}", msg, e)),
    }
}
