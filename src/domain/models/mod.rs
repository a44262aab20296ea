pub mod feed;
pub mod listing;
pub mod live;
pub mod media;

pub use feed::{FeedKind, FeedSnapshot, FeedStatus};
pub use listing::{
    ListOptions, ListedEntry, ObjectAttributes, SignedUrlEntry, SortOrder,
};
pub use live::LiveStream;
pub use media::{MediaListing, ResolvedMedia, StorageObjectRef, UrlKind};
