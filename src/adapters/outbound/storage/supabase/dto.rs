//! Wire types of the storage REST API

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::{ListOptions, ListedEntry, ObjectAttributes, SignedUrlEntry};

#[derive(Debug, Serialize)]
pub struct SortByDto {
    pub column: &'static str,
    pub order: &'static str,
}

/// Body of `POST /object/list/{bucket}`
#[derive(Debug, Serialize)]
pub struct ListRequestDto<'a> {
    pub prefix: &'a str,
    pub limit: usize,
    pub offset: usize,
    #[serde(rename = "sortBy")]
    pub sort_by: SortByDto,
    pub search: &'a str,
}

impl<'a> ListRequestDto<'a> {
    pub fn new(prefix: &'a str, options: &ListOptions) -> Self {
        Self {
            prefix,
            limit: options.limit,
            offset: options.offset,
            sort_by: SortByDto {
                column: ListOptions::SORT_COLUMN,
                order: options.order.as_str(),
            },
            search: "",
        }
    }
}

/// One row of a listing response. Folders come back with null id and metadata.
#[derive(Debug, Deserialize)]
pub struct ObjectEntryDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl From<ObjectEntryDto> for ListedEntry {
    fn from(dto: ObjectEntryDto) -> Self {
        ListedEntry {
            name: dto.name.unwrap_or_default(),
            id: dto.id,
            created_at: dto.created_at.as_deref().and_then(parse_timestamp),
            updated_at: dto.updated_at.as_deref().and_then(parse_timestamp),
            metadata: dto.metadata.as_ref().and_then(attributes_from_json),
        }
    }
}

/// Body of `POST /object/sign/{bucket}`
#[derive(Debug, Serialize)]
pub struct SignRequestDto<'a> {
    #[serde(rename = "expiresIn")]
    pub expires_in: u64,
    pub paths: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct SignedUrlDto {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(rename = "signedURL", default)]
    pub signed_url: Option<String>,
}

impl SignedUrlDto {
    /// Resolve a relative signed URL against `base`
    pub fn into_entry(self, base: &str) -> SignedUrlEntry {
        let path = self.path.unwrap_or_default();
        match self.signed_url.filter(|url| !url.is_empty()) {
            Some(relative) => match reqwest::Url::parse(&format!("{}{}", base, relative)) {
                Ok(url) => SignedUrlEntry::signed(path, url.to_string()),
                Err(e) => SignedUrlEntry::failed(path, format!("Malformed signed URL: {}", e)),
            },
            None => SignedUrlEntry {
                path,
                signed_url: None,
                error: self.error,
            },
        }
    }
}

/// Error body returned with non-2xx responses
#[derive(Debug, Deserialize)]
pub struct ErrorBodyDto {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBodyDto {
    pub fn into_message(self) -> Option<String> {
        self.message
            .filter(|m| !m.is_empty())
            .or(self.error.filter(|e| !e.is_empty()))
    }
}

/// Accepts RFC 3339 as well as the zone-less form some deployments emit
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

fn attributes_from_json(value: &serde_json::Value) -> Option<ObjectAttributes> {
    let map = value.as_object()?;

    let size = map
        .get("size")
        .or_else(|| map.get("contentLength"))
        .and_then(|v| v.as_u64());
    let text = |key: &str| map.get(key).and_then(|v| v.as_str()).map(str::to_string);

    Some(ObjectAttributes {
        size,
        mime_type: text("mimetype"),
        etag: text("eTag"),
        last_modified: map
            .get("lastModified")
            .and_then(|v| v.as_str())
            .and_then(parse_timestamp),
    })
}
