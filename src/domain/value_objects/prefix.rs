use crate::domain::errors::ValidationError;

/// A path segment under which bucket objects are grouped, e.g. `uploads/images`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Prefix(String);

impl Prefix {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();

        if value.is_empty() {
            return Err(ValidationError::EmptyPrefix);
        }

        if value.contains('\0') {
            return Err(ValidationError::InvalidPrefixCharacter('\0'));
        }

        if value.starts_with('/') {
            return Err(ValidationError::PrefixStartsWithSlash);
        }

        if value.ends_with('/') {
            return Err(ValidationError::PrefixEndsWithSlash);
        }

        if value.contains("//") {
            return Err(ValidationError::PrefixContainsDoubleSlash);
        }

        Ok(Self(value))
    }

    /// Parse a list of raw prefixes, failing on the first invalid one
    pub fn parse_all<I, S>(values: I) -> Result<Vec<Prefix>, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        values.into_iter().map(Prefix::new).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_prefixes() {
        assert!(Prefix::new("images").is_ok());
        assert!(Prefix::new("uploads/images").is_ok());
    }

    #[test]
    fn test_invalid_prefixes() {
        assert_eq!(Prefix::new(""), Err(ValidationError::EmptyPrefix));
        assert_eq!(
            Prefix::new("/images"),
            Err(ValidationError::PrefixStartsWithSlash)
        );
        assert_eq!(
            Prefix::new("images/"),
            Err(ValidationError::PrefixEndsWithSlash)
        );
        assert_eq!(
            Prefix::new("uploads//images"),
            Err(ValidationError::PrefixContainsDoubleSlash)
        );
    }

    #[test]
    fn test_parse_all_stops_at_first_error() {
        let parsed = Prefix::parse_all(["images", "videos"]).unwrap();
        assert_eq!(parsed.len(), 2);
        assert!(Prefix::parse_all(["images", ""]).is_err());
    }
}
