use media_gallery_feed::{
    adapters::outbound::storage::InMemoryMediaStore,
    domain::models::{FeedKind, FeedStatus, ListedEntry},
    ports::services::{FeedService, MediaService},
    services::{FeedServiceImpl, MediaServiceImpl},
};
use std::sync::Arc;

const PUBLIC_BASE: &str = "https://cdn.example.org/media";

fn feed_service(store: &InMemoryMediaStore) -> FeedServiceImpl {
    let media: Arc<dyn MediaService> = Arc::new(MediaServiceImpl::new(Arc::new(store.clone())));
    FeedServiceImpl::new(media)
}

#[tokio::test]
async fn feeds_start_idle() {
    let feeds = feed_service(&InMemoryMediaStore::new());

    for kind in FeedKind::ALL {
        let snapshot = feeds.snapshot(kind).await;
        assert_eq!(snapshot.status, FeedStatus::Idle);
        assert!(snapshot.items.is_empty());
        assert_eq!(snapshot.generation, 0);
    }
}

#[tokio::test]
async fn successful_load_walks_both_image_prefixes() {
    let store = InMemoryMediaStore::new();
    store
        .insert("uploads/images", ListedEntry::object("new.jpg", "1"))
        .await;
    store
        .insert("images", ListedEntry::object("old.jpg", "2"))
        .await;
    let feeds = feed_service(&store);

    let snapshot = feeds.load(FeedKind::Images).await;

    assert_eq!(snapshot.status, FeedStatus::Success);
    assert_eq!(snapshot.message, None);
    let paths: Vec<&str> = snapshot.items.iter().map(|m| m.path.as_str()).collect();
    assert_eq!(paths, vec!["uploads/images/new.jpg", "images/old.jpg"]);
    assert_eq!(feeds.snapshot(FeedKind::Images).await, snapshot);
}

#[tokio::test]
async fn listing_error_sets_error_status_with_message() {
    let store = InMemoryMediaStore::new();
    store.fail_listing("uploads/images", "access denied").await;
    let feeds = feed_service(&store);

    let snapshot = feeds.load(FeedKind::Images).await;

    assert_eq!(snapshot.status, FeedStatus::Error);
    assert_eq!(snapshot.message.as_deref(), Some("access denied"));
    assert!(snapshot.items.is_empty());
}

#[tokio::test]
async fn error_keeps_previously_loaded_items() {
    let store = InMemoryMediaStore::new();
    store
        .insert("videos", ListedEntry::object("a.mp4", "1"))
        .await;
    let feeds = feed_service(&store);

    let first = feeds.load(FeedKind::Videos).await;
    assert_eq!(first.items.len(), 1);

    store.fail_listing("uploads/videos", "network down").await;
    let second = feeds.load(FeedKind::Videos).await;

    assert_eq!(second.status, FeedStatus::Error);
    assert_eq!(second.message.as_deref(), Some("network down"));
    assert_eq!(second.items, first.items);
    assert!(second.generation > first.generation);
}

#[tokio::test]
async fn listed_but_unresolvable_uses_inaccessible_message() {
    let store = InMemoryMediaStore::new();
    store
        .insert("videos", ListedEntry::object("a.mp4", "1"))
        .await;
    store.fail_signing("forbidden").await;
    let feeds = feed_service(&store);

    let snapshot = feeds.load(FeedKind::Videos).await;

    assert_eq!(snapshot.status, FeedStatus::Error);
    assert_eq!(
        snapshot.message.as_deref(),
        Some("No accessible videos found in storage.")
    );
}

#[tokio::test]
async fn empty_bucket_is_success_without_message() {
    let feeds = feed_service(&InMemoryMediaStore::new());

    let snapshot = feeds.load(FeedKind::Images).await;

    assert_eq!(snapshot.status, FeedStatus::Success);
    assert_eq!(snapshot.message, None);
    assert!(snapshot.items.is_empty());
}

#[tokio::test]
async fn unconfigured_storage_stays_idle() {
    let media: Arc<dyn MediaService> = Arc::new(MediaServiceImpl::unconfigured());
    let feeds = FeedServiceImpl::new(media);

    let snapshot = feeds.load(FeedKind::Videos).await;

    assert_eq!(snapshot.status, FeedStatus::Idle);
    assert_eq!(snapshot.message, None);
    assert!(snapshot.items.is_empty());
}

#[tokio::test]
async fn feeds_fail_independently() {
    let store = InMemoryMediaStore::new().with_public_base_url(PUBLIC_BASE);
    store.fail_listing("uploads/images", "access denied").await;
    store
        .insert("videos", ListedEntry::object("a.mp4", "1"))
        .await;
    let feeds = feed_service(&store);

    let images = feeds.activate(FeedKind::Images);
    let videos = feeds.activate(FeedKind::Videos);
    let (images, videos) = (images.await.unwrap(), videos.await.unwrap());

    assert_eq!(images.status, FeedStatus::Error);
    assert_eq!(videos.status, FeedStatus::Success);
    assert_eq!(feeds.snapshot(FeedKind::Videos).await.items.len(), 1);
}

#[tokio::test]
async fn last_completed_load_wins() {
    let store = InMemoryMediaStore::new();
    store
        .insert("images", ListedEntry::object("a.jpg", "1"))
        .await;
    let feeds = feed_service(&store);

    let handles: Vec<_> = (0..4).map(|_| feeds.activate(FeedKind::Images)).collect();
    let mut finished = Vec::new();
    for handle in handles {
        finished.push(handle.await.unwrap());
    }

    let latest = finished
        .iter()
        .max_by_key(|snapshot| snapshot.generation)
        .unwrap();
    let current = feeds.snapshot(FeedKind::Images).await;

    assert_eq!(current.generation, latest.generation);
    assert_eq!(current.status, FeedStatus::Success);
    assert_eq!(current.items.len(), 1);
}
