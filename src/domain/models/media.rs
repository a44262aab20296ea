use serde::{Deserialize, Serialize};

use crate::domain::{
    errors::ValidationError,
    value_objects::{ObjectPath, Prefix},
};

/// A listing entry that survived filtering, tagged with the prefix it came from
#[derive(Debug, Clone, PartialEq)]
pub struct StorageObjectRef {
    pub name: String,
    pub prefix: Prefix,
}

impl StorageObjectRef {
    pub fn path(&self) -> Result<ObjectPath, ValidationError> {
        ObjectPath::new(&self.prefix, &self.name)
    }
}

/// Which resolution step produced a media URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlKind {
    Signed,
    Public,
}

/// A displayable media object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedMedia {
    pub name: String,
    pub path: String,
    pub url: String,
    pub url_kind: UrlKind,
}

/// Result of one list-and-resolve run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaListing {
    /// Objects found after filtering placeholders and duplicate paths
    pub listed: usize,
    /// Objects that resolved to a URL, in listing order
    pub items: Vec<ResolvedMedia>,
}

impl MediaListing {
    /// Nothing has been uploaded under the listed prefixes
    pub fn is_empty(&self) -> bool {
        self.listed == 0
    }

    /// Objects exist, but none of them could be given a URL
    pub fn is_inaccessible(&self) -> bool {
        self.listed > 0 && self.items.is_empty()
    }
}
