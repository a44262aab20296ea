use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::{sync::RwLock, task::JoinHandle};
use tracing::{error, info, warn};

use crate::{
    domain::{
        models::{FeedKind, FeedSnapshot, FeedStatus},
        value_objects::Prefix,
    },
    ports::services::{FeedService, MediaService},
};

/// Holds the current snapshot of every feed and runs load cycles against a MediaService.
///
/// Each write replaces a feed's snapshot as a whole under the lock, so the
/// last load to complete wins. Nothing is queued or cancelled.
#[derive(Clone)]
pub struct FeedServiceImpl {
    media: Arc<dyn MediaService>,
    feeds: Arc<RwLock<HashMap<FeedKind, FeedSnapshot>>>,
    generation: Arc<AtomicU64>,
}

impl FeedServiceImpl {
    pub fn new(media: Arc<dyn MediaService>) -> Self {
        let feeds = FeedKind::ALL
            .iter()
            .map(|kind| (*kind, FeedSnapshot::idle(*kind)))
            .collect();

        Self {
            media,
            feeds: Arc::new(RwLock::new(feeds)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Start a load for a feed in the background, as on first activation of its view
    pub fn activate(&self, kind: FeedKind) -> JoinHandle<FeedSnapshot> {
        let service = self.clone();
        tokio::spawn(async move { service.load(kind).await })
    }

    async fn write<F>(&self, kind: FeedKind, update: F) -> FeedSnapshot
    where
        F: FnOnce(&mut FeedSnapshot),
    {
        let mut feeds = self.feeds.write().await;
        let snapshot = feeds
            .entry(kind)
            .or_insert_with(|| FeedSnapshot::idle(kind));

        update(snapshot);
        snapshot.generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        snapshot.updated_at = Utc::now();

        snapshot.clone()
    }

    async fn fail(&self, kind: FeedKind, message: String) -> FeedSnapshot {
        self.write(kind, |snapshot| {
            snapshot.status = FeedStatus::Error;
            snapshot.message = Some(message);
        })
        .await
    }
}

#[async_trait]
impl FeedService for FeedServiceImpl {
    async fn load(&self, kind: FeedKind) -> FeedSnapshot {
        if !self.media.is_configured() {
            return self
                .write(kind, |snapshot| {
                    snapshot.status = FeedStatus::Idle;
                    snapshot.message = None;
                    snapshot.items.clear();
                })
                .await;
        }

        self.write(kind, |snapshot| {
            snapshot.status = FeedStatus::Loading;
            snapshot.message = None;
        })
        .await;

        let prefixes = match Prefix::parse_all(kind.prefixes().iter().copied()) {
            Ok(prefixes) => prefixes,
            Err(e) => return self.fail(kind, e.to_string()).await,
        };

        match self.media.list_and_resolve(&prefixes).await {
            Err(e) => {
                error!(feed = %kind, error = %e, "Feed load failed");
                self.fail(kind, e.user_message()).await
            }
            Ok(listing) if listing.is_empty() => {
                info!(feed = %kind, "Feed has no uploaded media");
                self.write(kind, |snapshot| {
                    snapshot.status = FeedStatus::Success;
                    snapshot.message = None;
                    snapshot.items.clear();
                })
                .await
            }
            Ok(listing) if listing.is_inaccessible() => {
                warn!(feed = %kind, listed = listing.listed, "No listed media could be resolved to a URL");
                self.fail(kind, kind.inaccessible_message().to_string())
                    .await
            }
            Ok(listing) => {
                info!(feed = %kind, items = listing.items.len(), "Feed loaded");
                self.write(kind, move |snapshot| {
                    snapshot.status = FeedStatus::Success;
                    snapshot.message = None;
                    snapshot.items = listing.items;
                })
                .await
            }
        }
    }

    async fn snapshot(&self, kind: FeedKind) -> FeedSnapshot {
        self.feeds
            .read()
            .await
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| FeedSnapshot::idle(kind))
    }
}
