use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status; `message` is its `error` field when present.
    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Could not detect recipient")]
    MissingRecipient,

    #[error("Could not find email body")]
    MissingBody,
}

impl ClientError {
    /// True for a 404 from the backend.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status { status: 404, .. })
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
