use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Response parsing error: {0}")]
    Parse(String),

    #[error("Response contained no content items")]
    EmptyContent,

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Email error: {0}")]
    Email(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl WatchError {
    /// Errors the poll loop treats as a failed fetch and retries.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            WatchError::Http(_) | WatchError::Parse(_) | WatchError::EmptyContent
        )
    }
}

pub type Result<T> = std::result::Result<T, WatchError>;
