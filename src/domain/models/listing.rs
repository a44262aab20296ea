use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Descriptive metadata reported for a listed object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectAttributes {
    pub size: Option<u64>,
    pub mime_type: Option<String>,
    pub etag: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
}

/// One raw entry of a bucket listing page, before any filtering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListedEntry {
    pub name: String,
    pub id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub metadata: Option<ObjectAttributes>,
}

impl ListedEntry {
    /// An entry for a stored object with the given identifier
    pub fn object(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// A pseudo-directory entry: a name with neither identifier nor metadata
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_metadata(mut self, metadata: ObjectAttributes) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Whether this entry is a real object rather than a placeholder.
    ///
    /// Requires a name plus either a non-empty identifier or metadata.
    pub fn is_object(&self) -> bool {
        let has_id = self.id.as_deref().map_or(false, |id| !id.is_empty());
        !self.name.is_empty() && (has_id || self.metadata.is_some())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Parameters of one listing page request. Pages are always ordered by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    pub limit: usize,
    pub offset: usize,
    pub order: SortOrder,
}

impl ListOptions {
    pub const SORT_COLUMN: &'static str = "created_at";

    /// A page ordered by creation time, newest first
    pub fn newest_first(limit: usize, offset: usize) -> Self {
        Self {
            limit,
            offset,
            order: SortOrder::Desc,
        }
    }

    /// Ordering of two entries within a page
    pub fn compare(&self, a: &ListedEntry, b: &ListedEntry) -> Ordering {
        let ordering = a.created_at.cmp(&b.created_at);
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    /// Sort `entries` in place and cut out this page. The sort is stable.
    pub fn paginate(&self, mut entries: Vec<ListedEntry>) -> Vec<ListedEntry> {
        entries.sort_by(|a, b| self.compare(a, b));
        entries
            .into_iter()
            .skip(self.offset)
            .take(self.limit)
            .collect()
    }
}

/// Outcome of signing a single path within a batch
#[derive(Debug, Clone, PartialEq)]
pub struct SignedUrlEntry {
    pub path: String,
    pub signed_url: Option<String>,
    pub error: Option<String>,
}

impl SignedUrlEntry {
    pub fn signed(path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            signed_url: Some(url.into()),
            error: None,
        }
    }

    pub fn failed(path: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            signed_url: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_detection() {
        assert!(ListedEntry::object("a.jpg", "id-1").is_object());
        assert!(ListedEntry::placeholder("a.jpg")
            .with_metadata(ObjectAttributes::default())
            .is_object());

        // pseudo-directories and nameless rows
        assert!(!ListedEntry::placeholder("2024").is_object());
        assert!(!ListedEntry::object("", "id-2").is_object());
        assert!(!ListedEntry::object("a.jpg", "").is_object());
    }

    #[test]
    fn test_newest_first_options() {
        let options = ListOptions::newest_first(100, 200);
        assert_eq!(ListOptions::SORT_COLUMN, "created_at");
        assert_eq!(options.order.as_str(), "desc");
        assert_eq!(options.offset, 200);
    }

    #[test]
    fn test_paginate_newest_first() {
        use chrono::TimeZone;

        let day = |d: u32| Utc.with_ymd_and_hms(2024, 2, d, 12, 0, 0).unwrap();
        let entries = vec![
            ListedEntry::object("old.jpg", "1").with_created_at(day(1)),
            ListedEntry::object("new.jpg", "2").with_created_at(day(3)),
            ListedEntry::object("mid.jpg", "3").with_created_at(day(2)),
            ListedEntry::placeholder("2023"),
        ];

        let page = ListOptions::newest_first(2, 1).paginate(entries.clone());
        let names: Vec<_> = page.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["mid.jpg", "old.jpg"]);

        // entries without a timestamp sort last when newest first
        let tail = ListOptions::newest_first(10, 3).paginate(entries);
        assert_eq!(tail.len(), 1);
        assert_eq!(tail[0].name, "2023");
    }
}
