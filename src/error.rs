use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },
}

pub type Result<T> = std::result::Result<T, FeedError>;
