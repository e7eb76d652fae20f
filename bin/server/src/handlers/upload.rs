use crate::handlers::error::{handle_server_error, handle_storage_error, handle_validation_error};
use crate::state::AppState;
use actix_multipart::form::{tempfile::TempFile, MultipartForm};
use actix_web::{post, web, HttpResponse, Result as ActixResult};
use common::{StoredFileInfo, UploadCandidate, UploadResponse};
use tracing::info;
use validation::validate_batch;

/// Multipart form for file upload: one or more parts under the `files` field
#[derive(MultipartForm)]
pub struct UploadForm {
    #[multipart(rename = "files")]
    pub files: Vec<TempFile>,
}

/// Handle file upload (multipart/form-data)
#[post("/upload")]
pub async fn upload(
    form: MultipartForm<UploadForm>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let form = form.into_inner();

    info!(parts = form.files.len(), "POST /api/upload - Request received");

    let mut candidates = Vec::with_capacity(form.files.len());
    for part in &form.files {
        // The multipart layer spooled the part to a temp file; materialize
        // it here, since the transport already capped the request body.
        let content = std::fs::read(part.file.path())
            .map_err(|e| handle_server_error("Failed to read uploaded file", e))?;
        let content_type = part
            .content_type
            .as_ref()
            .map(|mime| mime.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        candidates.push(UploadCandidate {
            file_name: part.file_name.clone(),
            content_type,
            size: part.size as u64,
            content,
        });
    }

    validate_batch(&candidates, &state.policy).map_err(handle_validation_error)?;

    let records = state
        .store
        .store(&candidates)
        .await
        .map_err(|e| handle_storage_error("Failed to store files", e))?;

    let files: Vec<StoredFileInfo> = records
        .into_iter()
        .map(|record| StoredFileInfo {
            filename: record.storage_name,
            original_name: record.original_name,
            size: record.size,
            mime_type: record.content_type,
        })
        .collect();

    info!(count = files.len(), "POST /api/upload - Files uploaded");

    Ok(HttpResponse::Ok().json(UploadResponse {
        message: "Files uploaded successfully".to_string(),
        files,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use storage::FileStore;
    use tempfile::tempdir;
    use validation::UploadPolicy;

    const BOUNDARY: &str = "----upload-test-boundary";

    fn default_policy() -> UploadPolicy {
        UploadPolicy {
            max_files: 5,
            max_file_size_bytes: 5 * 1024 * 1024,
        }
    }

    fn multipart_body(parts: &[(&str, &str, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (filename, content_type, content) in parts {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                    BOUNDARY, filename, content_type
                )
                .as_bytes(),
            );
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    async fn send_upload(
        state: web::Data<AppState>,
        parts: &[(&str, &str, &[u8])],
    ) -> actix_web::dev::ServiceResponse {
        let app = test::init_service(
            App::new()
                .app_data(state)
                .service(web::scope("/api").service(upload)),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/upload")
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(multipart_body(parts))
            .to_request();
        test::call_service(&app, req).await
    }

    async fn body_text(resp: actix_web::dev::ServiceResponse) -> String {
        let body = test::read_body(resp).await;
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[actix_web::test]
    async fn uploads_valid_batch() {
        let dir = tempdir().unwrap();
        let state = web::Data::new(AppState::new(
            FileStore::open(dir.path()).unwrap(),
            default_policy(),
        ));

        let resp = send_upload(
            state,
            &[
                ("test1.jpg", "image/jpeg", b"test image content!"),
                ("test2.pdf", "application/pdf", b"test pdf content!"),
            ],
        )
        .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: UploadResponse = test::read_body_json(resp).await;
        assert_eq!(body.message, "Files uploaded successfully");
        assert_eq!(body.files.len(), 2);
        assert!(body.files[0].filename.ends_with("-test1.jpg"));
        assert!(body.files[1].filename.ends_with("-test2.pdf"));
        assert_eq!(body.files[0].original_name, "test1.jpg");
        assert_eq!(body.files[0].mime_type, "image/jpeg");
        assert_eq!(body.files[0].size, 19);

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[actix_web::test]
    async fn rejects_disallowed_content_type() {
        let dir = tempdir().unwrap();
        let state = web::Data::new(AppState::new(
            FileStore::open(dir.path()).unwrap(),
            default_policy(),
        ));

        let resp = send_upload(
            state,
            &[("script.js", "application/javascript", b"alert(1)")],
        )
        .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(resp).await.contains("Invalid file type"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[actix_web::test]
    async fn rejects_batch_over_file_count_limit() {
        let dir = tempdir().unwrap();
        let state = web::Data::new(AppState::new(
            FileStore::open(dir.path()).unwrap(),
            default_policy(),
        ));

        let names: Vec<String> = (0..6).map(|i| format!("f{}.txt", i)).collect();
        let parts: Vec<(&str, &str, &[u8])> = names
            .iter()
            .map(|name| (name.as_str(), "text/plain", b"hello".as_slice()))
            .collect();

        let resp = send_upload(state, &parts).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(resp).await.contains("Maximum is 5"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[actix_web::test]
    async fn rejects_oversized_file() {
        let dir = tempdir().unwrap();
        let state = web::Data::new(AppState::new(
            FileStore::open(dir.path()).unwrap(),
            UploadPolicy {
                max_files: 5,
                max_file_size_bytes: 8,
            },
        ));

        let resp = send_upload(state, &[("big.txt", "text/plain", b"123456789")]).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(resp).await.contains("too large"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[actix_web::test]
    async fn rejects_empty_batch() {
        let dir = tempdir().unwrap();
        let state = web::Data::new(AppState::new(
            FileStore::open(dir.path()).unwrap(),
            default_policy(),
        ));

        let resp = send_upload(state, &[]).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[actix_web::test]
    async fn rejects_traversal_file_name() {
        let dir = tempdir().unwrap();
        let state = web::Data::new(AppState::new(
            FileStore::open(dir.path()).unwrap(),
            default_policy(),
        ));

        let resp = send_upload(state, &[("../evil.txt", "text/plain", b"x")]).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
