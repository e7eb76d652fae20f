mod config;
mod constants;
mod handlers;
mod state;

use actix_multipart::form::MultipartFormConfig;
use actix_web::{web, App, HttpServer};
use config::ServerConfig;
use state::AppState;
use storage::FileStore;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing with env filter
    // Filter out actix-server worker shutdown messages
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info")
                    .add_directive("actix_server::worker=warn".parse().unwrap())
                    .add_directive("actix_server::accept=warn".parse().unwrap())
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting upload server (PID: {})", std::process::id());

    let config = ServerConfig::load()?;

    let store = FileStore::open(&config.upload_dir).map_err(|e| {
        error!("Failed to open storage directory: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;
    info!("Storing uploads under {:?}", store.root());
    info!(
        "Upload limits: max {} files, {} bytes each",
        config.policy.max_files, config.policy.max_file_size_bytes
    );

    let policy = config.policy;
    let state = web::Data::new(AppState::new(store, policy));

    // The multipart layer bounds the whole request body before the handler
    // runs; the per-file decision stays with the validator.
    let total_limit = policy.max_file_size_bytes as usize * policy.max_files + 1024 * 1024;

    let bind_address = config.bind_address();
    info!("Starting server on http://{}", bind_address);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(MultipartFormConfig::default().total_limit(total_limit))
            .service(
                web::scope("/api")
                    .service(handlers::upload::upload)
                    .service(handlers::files::list_files)
                    .service(handlers::files::download)
                    .service(handlers::health::health),
            )
    })
    .bind(&bind_address)
    .map_err(|e| {
        error!("Failed to bind to {}: {}", bind_address, e);
        e
    })?;

    server.run().await
}
