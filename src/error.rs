use thiserror::Error;

/// Failure taxonomy shared by the search pipeline and the image cache.
///
/// The type is `Clone` so a single fetch outcome can be fanned out to every
/// waiter that piled onto the same in-flight request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Invalid request URL: {0}")]
    InvalidRequest(String),

    #[error("Network error: {0}")]
    TransportError(String),

    #[error("Server error: status {0}")]
    ServerError(u16),

    #[error("Decode error: {0}")]
    DecodeError(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::DecodeError(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::ServerError(status.as_u16())
        } else {
            FetchError::TransportError(err.to_string())
        }
    }
}

impl From<url::ParseError> for FetchError {
    fn from(err: url::ParseError) -> Self {
        FetchError::InvalidRequest(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
