//! Backend error types.

use thiserror::Error;

/// Errors returned by a [`StoreApi`](super::StoreApi) implementation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Connection or transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// Response body could not be parsed
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Backend answered 401
    #[error("Unauthorized")]
    Unauthorized,

    /// Any other non-2xx answer, with the body text the server sent
    #[error("HTTP {status}: {message}")]
    Rejected { status: u16, message: String },
}

impl ApiError {
    /// Build an error from a non-2xx status and its body text
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == 401 {
            Self::Unauthorized
        } else {
            Self::Rejected {
                status,
                message: body.trim().to_string(),
            }
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// HTTP status, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Rejected { status, .. } => Some(*status),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    /// Text the server sent with a rejection, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Result type for backend calls
pub type ApiResult<T> = Result<T, ApiError>;
