use crate::domain::errors::ValidationError;

const MAX_BUCKET_NAME_LEN: usize = 63;

/// A validated bucket name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketName(String);

impl BucketName {
    /// Create a new BucketName.
    ///
    /// Rules are the intersection of what Supabase Storage and S3 accept for
    /// the buckets this service reads from.
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyBucketName);
        }

        if value.len() > MAX_BUCKET_NAME_LEN {
            return Err(ValidationError::BucketNameTooLong {
                actual: value.len(),
                max: MAX_BUCKET_NAME_LEN,
            });
        }

        if !value
            .chars()
            .next()
            .map_or(false, |c| c.is_ascii_alphanumeric())
        {
            return Err(ValidationError::BucketNameInvalidStart);
        }

        for c in value.chars() {
            if !c.is_ascii_alphanumeric() && !matches!(c, '-' | '_' | '.') {
                return Err(ValidationError::BucketNameInvalidCharacter(c));
            }
        }

        Ok(Self(value))
    }

    /// Get the bucket name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BucketName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_bucket_names() {
        assert!(BucketName::new("media".to_string()).is_ok());
        assert!(BucketName::new("church-media".to_string()).is_ok());
        assert!(BucketName::new("Gallery_2024.v1".to_string()).is_ok());
    }

    #[test]
    fn test_invalid_bucket_names() {
        assert_eq!(
            BucketName::new(String::new()),
            Err(ValidationError::EmptyBucketName)
        );
        assert_eq!(
            BucketName::new("-media".to_string()),
            Err(ValidationError::BucketNameInvalidStart)
        );
        assert_eq!(
            BucketName::new("my bucket".to_string()),
            Err(ValidationError::BucketNameInvalidCharacter(' '))
        );
        assert!(BucketName::new("b".repeat(64)).is_err());
    }
}
