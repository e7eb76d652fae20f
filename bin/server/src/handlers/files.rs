use crate::handlers::error::handle_storage_error;
use crate::state::AppState;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{get, web, HttpResponse, Result as ActixResult};
use tracing::info;

/// List the storage names of every stored file
#[get("/files")]
pub async fn list_files(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let names = state
        .store
        .list()
        .await
        .map_err(|e| handle_storage_error("Failed to list files", e))?;

    info!(count = names.len(), "GET /api/files - Listed stored files");

    Ok(HttpResponse::Ok().json(names))
}

/// Download a stored file by its storage name
#[get("/files/{filename}")]
pub async fn download(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let filename = path.into_inner();

    info!(filename = ?filename, "GET /api/files - Download requested");

    let file = state
        .store
        .load(&filename)
        .await
        .map_err(|e| handle_storage_error("Failed to load file", e))?;
    let content = file
        .read()
        .await
        .map_err(|e| handle_storage_error("Failed to read file", e))?;

    Ok(HttpResponse::Ok()
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file.name().to_string())],
        })
        .body(content))
}
