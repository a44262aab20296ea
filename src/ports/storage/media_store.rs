use crate::domain::{
    errors::StorageResult,
    models::{ListOptions, ListedEntry, SignedUrlEntry},
    value_objects::{ObjectPath, Prefix},
};
use async_trait::async_trait;

/// Port for the object-storage API the media feeds read from.
/// This abstracts the actual storage backend (Supabase Storage, S3, in-memory, etc.)
#[async_trait]
pub trait MediaStore: Send + Sync + 'static {
    /// List one page of entries directly under a prefix
    async fn list(&self, prefix: &Prefix, options: &ListOptions) -> StorageResult<Vec<ListedEntry>>;

    /// Issue time-limited signed URLs for a batch of paths in one call.
    ///
    /// An `Err` means the whole batch failed; per-path failures are reported
    /// as entries without a `signed_url`.
    async fn sign_urls(
        &self,
        paths: &[ObjectPath],
        expires_in_secs: u64,
    ) -> StorageResult<Vec<SignedUrlEntry>>;

    /// Build the public URL for a path without contacting the backend
    fn public_url(&self, path: &ObjectPath) -> Option<String>;
}
