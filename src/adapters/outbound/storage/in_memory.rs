use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        models::{ListOptions, ListedEntry, SignedUrlEntry},
        value_objects::{ObjectPath, Prefix},
    },
    ports::storage::MediaStore,
};

const SIGNED_BASE_URL: &str = "memory://signed";

/// A recorded `list` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCall {
    pub prefix: String,
    pub limit: usize,
    pub offset: usize,
}

/// In-memory implementation of MediaStore for testing and development.
///
/// Entries are seeded per prefix. Listing and signing failures can be
/// injected, and every call is recorded so tests can assert on paging.
#[derive(Clone, Default)]
pub struct InMemoryMediaStore {
    data: Arc<RwLock<StoreData>>,
    public_base_url: Option<String>,
}

#[derive(Default)]
struct StoreData {
    // prefix -> entries in insertion order
    entries: HashMap<String, Vec<ListedEntry>>,
    listing_errors: HashMap<String, String>,
    unsignable_paths: HashSet<String>,
    signing_error: Option<String>,
    list_calls: Vec<ListCall>,
    sign_calls: usize,
}

impl InMemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve public URLs under `base_url`; without it the public fallback yields nothing
    pub fn with_public_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.public_base_url = Some(base_url.into());
        self
    }

    pub async fn insert(&self, prefix: &str, entry: ListedEntry) {
        let mut data = self.data.write().await;
        data.entries
            .entry(prefix.to_string())
            .or_insert_with(Vec::new)
            .push(entry);
    }

    pub async fn insert_many<I>(&self, prefix: &str, entries: I)
    where
        I: IntoIterator<Item = ListedEntry>,
    {
        let mut data = self.data.write().await;
        data.entries
            .entry(prefix.to_string())
            .or_insert_with(Vec::new)
            .extend(entries);
    }

    /// Make every listing of `prefix` fail with `message`
    pub async fn fail_listing(&self, prefix: &str, message: &str) {
        let mut data = self.data.write().await;
        data.listing_errors
            .insert(prefix.to_string(), message.to_string());
    }

    /// Leave `path` without a signed URL in every batch
    pub async fn fail_signing_for(&self, path: &str) {
        let mut data = self.data.write().await;
        data.unsignable_paths.insert(path.to_string());
    }

    /// Make the whole signing batch fail with `message`
    pub async fn fail_signing(&self, message: &str) {
        let mut data = self.data.write().await;
        data.signing_error = Some(message.to_string());
    }

    pub async fn list_calls(&self) -> Vec<ListCall> {
        self.data.read().await.list_calls.clone()
    }

    pub async fn sign_calls(&self) -> usize {
        self.data.read().await.sign_calls
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn list(&self, prefix: &Prefix, options: &ListOptions) -> StorageResult<Vec<ListedEntry>> {
        let mut data = self.data.write().await;

        data.list_calls.push(ListCall {
            prefix: prefix.as_str().to_string(),
            limit: options.limit,
            offset: options.offset,
        });

        if let Some(message) = data.listing_errors.get(prefix.as_str()) {
            return Err(StorageError::listing_failed(prefix.as_str(), message.clone()));
        }

        let entries = data
            .entries
            .get(prefix.as_str())
            .cloned()
            .unwrap_or_default();

        // stable sort keeps insertion order among equal keys
        Ok(options.paginate(entries))
    }

    async fn sign_urls(
        &self,
        paths: &[ObjectPath],
        expires_in_secs: u64,
    ) -> StorageResult<Vec<SignedUrlEntry>> {
        let mut data = self.data.write().await;
        data.sign_calls += 1;

        if let Some(message) = &data.signing_error {
            return Err(StorageError::SigningFailed {
                message: message.clone(),
            });
        }

        Ok(paths
            .iter()
            .map(|path| {
                if data.unsignable_paths.contains(path.as_str()) {
                    SignedUrlEntry::failed(path.as_str(), "Object not found")
                } else {
                    SignedUrlEntry::signed(
                        path.as_str(),
                        format!(
                            "{}/{}?expires_in={}",
                            SIGNED_BASE_URL,
                            path.as_str(),
                            expires_in_secs
                        ),
                    )
                }
            })
            .collect())
    }

    fn public_url(&self, path: &ObjectPath) -> Option<String> {
        self.public_base_url
            .as_ref()
            .map(|base| format!("{}/{}", base.trim_end_matches('/'), path.as_str()))
    }
}
