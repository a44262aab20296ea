use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::{
    errors::{StorageError, ValidationError},
    models::{FeedKind, FeedSnapshot, FeedStatus, LiveStream, MediaListing, ResolvedMedia, UrlKind},
};

/// DTO for one displayable media item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItemDto {
    pub name: String,
    pub path: String,
    pub url: String,
    pub url_kind: UrlKind,
}

/// DTO for a feed's current state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSnapshotDto {
    pub kind: FeedKind,
    pub status: FeedStatus,
    pub message: Option<String>,
    pub items: Vec<MediaItemDto>,
    pub generation: u64,
    pub updated_at: DateTime<Utc>,
}

/// Query for an ad-hoc listing, e.g. `?prefixes=uploads/images,images`
#[derive(Debug, Clone, Deserialize)]
pub struct MediaQueryDto {
    pub prefixes: String,
}

/// DTO for an ad-hoc listing response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaListingDto {
    pub listed: usize,
    pub items: Vec<MediaItemDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveStreamDto {
    pub configured: bool,
    pub embed_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
}

/// DTO for error responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub error: String,
    pub message: String,
    pub details: Option<HashMap<String, serde_json::Value>>,
    pub timestamp: DateTime<Utc>,
}

// Conversion implementations

impl From<ResolvedMedia> for MediaItemDto {
    fn from(media: ResolvedMedia) -> Self {
        MediaItemDto {
            name: media.name,
            path: media.path,
            url: media.url,
            url_kind: media.url_kind,
        }
    }
}

impl From<FeedSnapshot> for FeedSnapshotDto {
    fn from(snapshot: FeedSnapshot) -> Self {
        FeedSnapshotDto {
            kind: snapshot.kind,
            status: snapshot.status,
            message: snapshot.message,
            items: snapshot.items.into_iter().map(MediaItemDto::from).collect(),
            generation: snapshot.generation,
            updated_at: snapshot.updated_at,
        }
    }
}

impl From<MediaListing> for MediaListingDto {
    fn from(listing: MediaListing) -> Self {
        MediaListingDto {
            listed: listing.listed,
            items: listing.items.into_iter().map(MediaItemDto::from).collect(),
        }
    }
}

impl From<&LiveStream> for LiveStreamDto {
    fn from(live: &LiveStream) -> Self {
        LiveStreamDto {
            configured: live.is_configured(),
            embed_url: live.embed_url(),
        }
    }
}

impl HealthDto {
    pub fn ok() -> Self {
        HealthDto {
            status: "ok".to_string(),
        }
    }
}

impl ErrorResponseDto {
    pub fn from_storage_error(error: StorageError) -> Self {
        let mut details = HashMap::new();

        match &error {
            StorageError::ListingFailed { prefix, .. } => {
                details.insert(
                    "prefix".to_string(),
                    serde_json::Value::String(prefix.clone()),
                );
            }
            StorageError::UnsupportedOperation { operation, .. } => {
                details.insert(
                    "operation".to_string(),
                    serde_json::Value::String(operation.clone()),
                );
            }
            _ => {}
        }

        ErrorResponseDto {
            error: "StorageError".to_string(),
            message: error.user_message(),
            details: if details.is_empty() {
                None
            } else {
                Some(details)
            },
            timestamp: Utc::now(),
        }
    }

    pub fn not_found(error: &ValidationError) -> Self {
        ErrorResponseDto {
            error: "NotFound".to_string(),
            message: error.to_string(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        ErrorResponseDto {
            error: "BadRequest".to_string(),
            message: message.to_string(),
            details: None,
            timestamp: Utc::now(),
        }
    }
}
