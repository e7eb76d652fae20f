use crate::constants::{
    DEFAULT_HOST, DEFAULT_MAX_FILES, DEFAULT_MAX_FILE_SIZE_BYTES, DEFAULT_PORT, DEFAULT_UPLOAD_DIR,
};
use clap::{Arg, Command};
use std::path::PathBuf;
use validation::UploadPolicy;

/// Server configuration, read once at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Directory uploaded files are stored under
    pub upload_dir: PathBuf,
    /// Upload admission limits
    pub policy: UploadPolicy,
}

impl ServerConfig {
    pub fn load() -> Result<Self, std::io::Error> {
        let matches = Command::new("server")
            .arg(
                Arg::new("upload-dir")
                    .long("upload-dir")
                    .value_name("DIR")
                    .help("Directory to store uploaded files (default: uploads, or UPLOAD_DIR env var)"),
            )
            .arg(
                Arg::new("max-file-size")
                    .long("max-file-size")
                    .value_name("BYTES")
                    .help("Maximum size of a single file in bytes (default: 5242880, or MAX_FILE_SIZE env var)"),
            )
            .arg(
                Arg::new("max-files")
                    .long("max-files")
                    .value_name("COUNT")
                    .help("Maximum number of files per upload (default: 5, or MAX_FILES env var)"),
            )
            .arg(
                Arg::new("port")
                    .long("port")
                    .value_name("PORT")
                    .help("Server port (default: 8080, or SERVER_PORT env var)"),
            )
            .arg(
                Arg::new("host")
                    .long("host")
                    .value_name("HOST")
                    .help("Server host (default: 0.0.0.0, or SERVER_HOST env var)"),
            )
            .get_matches();

        // Priority: command-line args > environment variables > defaults
        let env_host = std::env::var("SERVER_HOST").ok();
        let env_port = std::env::var("SERVER_PORT").ok();
        let env_upload_dir = std::env::var("UPLOAD_DIR").ok();
        let env_max_file_size = std::env::var("MAX_FILE_SIZE").ok();
        let env_max_files = std::env::var("MAX_FILES").ok();

        let host = matches
            .get_one::<String>("host")
            .map(|s| s.as_str())
            .or(env_host.as_deref())
            .unwrap_or(DEFAULT_HOST)
            .to_string();

        let port_str = matches
            .get_one::<String>("port")
            .map(|s| s.as_str())
            .or(env_port.as_deref())
            .unwrap_or(DEFAULT_PORT);
        let port = port_str
            .parse()
            .map_err(|_| invalid_input(format!("Invalid port number: {}", port_str)))?;

        let upload_dir = PathBuf::from(
            matches
                .get_one::<String>("upload-dir")
                .map(|s| s.as_str())
                .or(env_upload_dir.as_deref())
                .unwrap_or(DEFAULT_UPLOAD_DIR),
        );

        let max_file_size_bytes = match matches
            .get_one::<String>("max-file-size")
            .map(|s| s.as_str())
            .or(env_max_file_size.as_deref())
        {
            Some(value) => value
                .parse()
                .map_err(|_| invalid_input(format!("Invalid maximum file size: {}", value)))?,
            None => DEFAULT_MAX_FILE_SIZE_BYTES,
        };

        let max_files = match matches
            .get_one::<String>("max-files")
            .map(|s| s.as_str())
            .or(env_max_files.as_deref())
        {
            Some(value) => value
                .parse()
                .map_err(|_| invalid_input(format!("Invalid maximum file count: {}", value)))?,
            None => DEFAULT_MAX_FILES,
        };

        Ok(ServerConfig {
            host,
            port,
            upload_dir,
            policy: UploadPolicy {
                max_files,
                max_file_size_bytes,
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn invalid_input(message: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, message)
}
