mod feed_service_impl;
mod media_service_impl;

pub use feed_service_impl::FeedServiceImpl;
pub use media_service_impl::{MediaServiceImpl, PAGE_SIZE, SIGNED_URL_TTL_SECS};
