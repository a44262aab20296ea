use crate::domain::errors::ValidationError;

use super::Prefix;

/// Full path of an object inside the bucket: always `prefix + "/" + name`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectPath {
    full: String,
}

impl ObjectPath {
    pub fn new(prefix: &Prefix, name: &str) -> Result<Self, ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::EmptyObjectName);
        }

        if name.contains('\0') {
            return Err(ValidationError::InvalidObjectNameCharacter('\0'));
        }

        Ok(Self {
            full: format!("{}/{}", prefix.as_str(), name),
        })
    }

    /// Get the path as a string slice
    pub fn as_str(&self) -> &str {
        &self.full
    }

    /// Path segments split on '/', used when building URLs
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.full.split('/')
    }
}

impl std::fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full)
    }
}
