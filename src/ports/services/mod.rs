mod feed_service;
mod media_service;

pub use feed_service::FeedService;
pub use media_service::MediaService;
