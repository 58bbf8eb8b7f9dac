//! Controller error types.

use crate::api::ApiError;
use crate::catalog::CarId;
use crate::forms::FormError;
use crate::storage::StorageError;
use thiserror::Error;

/// Errors returned by [`Storefront`](super::Storefront) operations
///
/// By the time an error is returned the user has already been told about it
/// through an alert, unless the operation is a background refresh or the
/// error is `Cancelled`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Action needs a session and there is none
    #[error("You must be logged in to perform this action")]
    NotLoggedIn,

    /// Form input did not validate
    #[error(transparent)]
    Form(#[from] FormError),

    /// Local storage failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The client holds no car with this id
    #[error("Unknown car: {0}")]
    UnknownCar(CarId),

    /// A destructive action was not confirmed
    #[error("Cancelled")]
    Cancelled,

    /// The review is missing or not authored by the viewer
    #[error("Review cannot be edited")]
    ReviewNotEditable,

    /// No reviews panel is open
    #[error("No reviews panel is open")]
    ReviewsClosed,
}

impl StoreError {
    /// Whether this error ended the session
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_unauthorized())
    }
}

/// Result type for controller operations
pub type StoreResult<T> = Result<T, StoreError>;
