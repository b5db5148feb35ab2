use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("Invalid repository name: {0}")]
    InvalidRepository(String),
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        ReportError::Api {
            status,
            message: message.into(),
        }
    }
}
