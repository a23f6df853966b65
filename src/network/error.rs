//! Error handling for the snapshot endpoint

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The response body was not a snapshot envelope.
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The server answered with a failure status and no envelope.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },
}

impl FetchError {
    pub fn from_status(status: u16, body: &[u8]) -> FetchError {
        let message = String::from_utf8_lossy(body).trim().to_string();
        let message = if message.is_empty() {
            "Empty response body".to_string()
        } else {
            message
        };
        FetchError::Http { status, message }
    }
}
