/// Validation errors for domain value objects
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    // Prefix validation errors
    EmptyPrefix,
    PrefixStartsWithSlash,
    PrefixEndsWithSlash,
    PrefixContainsDoubleSlash,
    InvalidPrefixCharacter(char),

    // ObjectPath validation errors
    EmptyObjectName,
    InvalidObjectNameCharacter(char),

    // BucketName validation errors
    EmptyBucketName,
    BucketNameTooLong {
        actual: usize,
        max: usize,
    },
    BucketNameInvalidStart,
    BucketNameInvalidCharacter(char),

    // Feed validation errors
    UnknownFeed(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // Prefix errors
            ValidationError::EmptyPrefix => write!(f, "Prefix cannot be empty"),
            ValidationError::PrefixStartsWithSlash => {
                write!(f, "Prefix cannot start with '/'")
            }
            ValidationError::PrefixEndsWithSlash => write!(f, "Prefix cannot end with '/'"),
            ValidationError::PrefixContainsDoubleSlash => {
                write!(f, "Prefix cannot contain '//'")
            }
            ValidationError::InvalidPrefixCharacter(c) => {
                write!(f, "Invalid character in prefix: {:?}", c)
            }

            // ObjectPath errors
            ValidationError::EmptyObjectName => write!(f, "Object name cannot be empty"),
            ValidationError::InvalidObjectNameCharacter(c) => {
                write!(f, "Invalid character in object name: {:?}", c)
            }

            // BucketName errors
            ValidationError::EmptyBucketName => write!(f, "Bucket name cannot be empty"),
            ValidationError::BucketNameTooLong { actual, max } => {
                write!(
                    f,
                    "Bucket name too long: {} characters (max: {})",
                    actual, max
                )
            }
            ValidationError::BucketNameInvalidStart => {
                write!(f, "Bucket name must start with a letter or number")
            }
            ValidationError::BucketNameInvalidCharacter(c) => {
                write!(
                    f,
                    "Invalid character in bucket name: '{}'. Only letters, numbers, '.', '_' and '-' allowed",
                    c
                )
            }

            // Feed errors
            ValidationError::UnknownFeed(name) => {
                write!(f, "Unknown feed '{}' (expected 'images' or 'videos')", name)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
