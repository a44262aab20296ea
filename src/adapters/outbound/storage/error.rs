use crate::domain::{errors::StorageError, value_objects::Prefix};
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum StoreError {
    #[error("Object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// The backend's own wording of the failure, without our wrapping
    pub fn reason(&self) -> String {
        match self {
            StoreError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Attribute this failure to a listing request for `prefix`
    pub fn into_listing_error(self, prefix: &Prefix) -> StorageError {
        StorageError::listing_failed(prefix.as_str(), self.reason())
    }
}

/// Convert object_store errors to domain storage errors
impl From<object_store::Error> for StorageError {
    fn from(err: object_store::Error) -> Self {
        match err {
            object_store::Error::NotSupported { .. } | object_store::Error::NotImplemented => {
                StorageError::UnsupportedOperation {
                    operation: "unknown".to_string(),
                    reason: err.to_string(),
                }
            }
            object_store::Error::InvalidPath { .. } => StorageError::ValidationError {
                message: err.to_string(),
            },
            _ => StorageError::InfrastructureError {
                message: format!("Object store operation failed: {}", err),
                source: Some(err.to_string()),
            },
        }
    }
}

/// Convert infrastructure StoreError to domain StorageError
impl From<StoreError> for StorageError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ObjectStore(object_err) => object_err.into(),
            StoreError::Serialization(serde_err) => StorageError::InvalidResponse {
                message: format!("Could not decode storage response: {}", serde_err),
            },
            other => StorageError::InfrastructureError {
                message: other.reason(),
                source: Some(other.to_string()),
            },
        }
    }
}

/// Convert domain StorageError to HTTP status codes for API responses
impl From<StorageError> for http::StatusCode {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ListingFailed { .. }
            | StorageError::SigningFailed { .. }
            | StorageError::InvalidResponse { .. } => http::StatusCode::BAD_GATEWAY,
            StorageError::ValidationError { .. } => http::StatusCode::BAD_REQUEST,
            StorageError::UnsupportedOperation { .. } => http::StatusCode::NOT_IMPLEMENTED,
            StorageError::InfrastructureError { .. } => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
