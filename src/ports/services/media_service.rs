use crate::domain::{errors::StorageResult, models::MediaListing, value_objects::Prefix};
use async_trait::async_trait;

/// Port for the bucket lister/resolver.
/// Walks prefixes page by page and turns every stored object into a displayable URL.
#[async_trait]
pub trait MediaService: Send + Sync + 'static {
    /// List every object under the given prefixes and resolve each one to a URL.
    ///
    /// Returns an empty listing when no storage is configured.
    async fn list_and_resolve(&self, prefixes: &[Prefix]) -> StorageResult<MediaListing>;

    /// Whether a storage backend is configured at all
    fn is_configured(&self) -> bool;
}
