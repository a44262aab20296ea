use crate::domain::models::{FeedKind, FeedSnapshot};
use async_trait::async_trait;

/// Port for per-feed load state consumed by presentation code
#[async_trait]
pub trait FeedService: Send + Sync + 'static {
    /// Run one load cycle for a feed and return the resulting snapshot
    async fn load(&self, kind: FeedKind) -> FeedSnapshot;

    /// Current snapshot of a feed without loading
    async fn snapshot(&self, kind: FeedKind) -> FeedSnapshot;
}
