/// Errors that can occur while talking to the media bucket
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// The storage API rejected or could not serve a listing request
    ListingFailed { prefix: String, message: String },

    /// Batch signing failed as a whole
    SigningFailed { message: String },

    /// The storage API answered with a body we could not understand
    InvalidResponse { message: String },

    /// Operation not supported by the configured backend
    UnsupportedOperation { operation: String, reason: String },

    /// Validation error
    ValidationError { message: String },

    /// Infrastructure error with external source
    InfrastructureError {
        message: String,
        source: Option<String>, // Store error as string to allow Clone
    },
}

impl StorageError {
    /// The reason shown to visitors of a feed.
    ///
    /// Listing failures surface the storage API's own message verbatim, so a
    /// rejected request reads "access denied" rather than a wrapped variant name.
    pub fn user_message(&self) -> String {
        match self {
            StorageError::ListingFailed { message, .. } => message.clone(),
            StorageError::SigningFailed { message } => message.clone(),
            StorageError::InvalidResponse { message } => message.clone(),
            StorageError::InfrastructureError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn listing_failed(prefix: impl Into<String>, message: impl Into<String>) -> Self {
        StorageError::ListingFailed {
            prefix: prefix.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::ListingFailed { prefix, message } => {
                write!(f, "Listing failed for prefix '{}': {}", prefix, message)
            }
            StorageError::SigningFailed { message } => {
                write!(f, "Signed URL issuance failed: {}", message)
            }
            StorageError::InvalidResponse { message } => {
                write!(f, "Invalid storage response: {}", message)
            }
            StorageError::UnsupportedOperation { operation, reason } => {
                write!(f, "Unsupported operation '{}': {}", operation, reason)
            }
            StorageError::ValidationError { message } => {
                write!(f, "Validation error: {}", message)
            }
            StorageError::InfrastructureError { message, .. } => {
                write!(f, "Infrastructure error: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<crate::domain::errors::ValidationError> for StorageError {
    fn from(err: crate::domain::errors::ValidationError) -> Self {
        StorageError::ValidationError {
            message: err.to_string(),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_failure_keeps_message_verbatim() {
        let err = StorageError::listing_failed("images", "access denied");
        assert_eq!(err.user_message(), "access denied");
        assert_eq!(
            err.to_string(),
            "Listing failed for prefix 'images': access denied"
        );
    }

    #[test]
    fn test_unsupported_operation_message() {
        let err = StorageError::UnsupportedOperation {
            operation: "sign_urls".to_string(),
            reason: "no signer configured".to_string(),
        };
        assert_eq!(
            err.user_message(),
            "Unsupported operation 'sign_urls': no signer configured"
        );
    }
}
