use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::{errors::ValidationError, models::ResolvedMedia};

/// The named call sites of the lister/resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    Images,
    Videos,
}

impl FeedKind {
    pub const ALL: [FeedKind; 2] = [FeedKind::Images, FeedKind::Videos];

    /// Prefixes walked for this feed, in order
    pub fn prefixes(&self) -> &'static [&'static str] {
        match self {
            FeedKind::Images => &["uploads/images", "images"],
            FeedKind::Videos => &["uploads/videos", "videos"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedKind::Images => "images",
            FeedKind::Videos => "videos",
        }
    }

    /// Message shown when objects were listed but none resolved to a URL
    pub fn inaccessible_message(&self) -> &'static str {
        match self {
            FeedKind::Images => "No accessible images found in storage.",
            FeedKind::Videos => "No accessible videos found in storage.",
        }
    }
}

impl std::fmt::Display for FeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FeedKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "images" | "image" | "gallery" => Ok(FeedKind::Images),
            "videos" | "video" => Ok(FeedKind::Videos),
            _ => Err(ValidationError::UnknownFeed(s.to_string())),
        }
    }
}

/// Load status of a feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// Everything presentation code needs to render one feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedSnapshot {
    pub kind: FeedKind,
    pub status: FeedStatus,
    pub message: Option<String>,
    pub items: Vec<ResolvedMedia>,
    pub generation: u64,
    pub updated_at: DateTime<Utc>,
}

impl FeedSnapshot {
    pub fn idle(kind: FeedKind) -> Self {
        Self {
            kind,
            status: FeedStatus::Idle,
            message: None,
            items: Vec::new(),
            generation: 0,
            updated_at: Utc::now(),
        }
    }
}
