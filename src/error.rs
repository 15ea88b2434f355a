use thiserror::Error;
use tokio::sync::AcquireError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("invalid value of -n. Must be a positive integer")]
    InvalidRequests,
    #[error("invalid value of -c. Must be a positive integer")]
    InvalidConcurrency,
}

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to build HTTP client: {source}")]
    BuildClient {
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Argument(#[from] ArgumentError),
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("admission semaphore closed: {source}")]
    Admission {
        #[from]
        source: AcquireError,
    },
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Process exit status: argument errors exit 255 (`-1`), everything else exits 1.
    pub fn exit_status(&self) -> u8 {
        match self {
            AppError::Argument(_) => 255,
            AppError::Http(_) | AppError::Admission { .. } => 1,
        }
    }
}
