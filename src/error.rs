use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImportError>;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Missing required setting: {0} is not set")]
    MissingCredential(&'static str),

    #[error("GeoNames account error (status {value}): {message}")]
    AccountStatus { value: i64, message: String },

    #[error("Missing required data: {0}")]
    MissingData(String),

    #[error("Unsupported option: {0}")]
    Unsupported(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Failed to persist output file: {0}")]
    Persist(#[from] tempfile::PersistError),
}
