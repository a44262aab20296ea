use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::{
    domain::{
        errors::StorageResult,
        models::{ListOptions, ListedEntry, MediaListing, ResolvedMedia, StorageObjectRef, UrlKind},
        value_objects::{ObjectPath, Prefix},
    },
    ports::{services::MediaService, storage::MediaStore},
};

/// Entries requested per listing page
pub const PAGE_SIZE: usize = 100;

/// Lifetime of issued signed URLs
pub const SIGNED_URL_TTL_SECS: u64 = 60 * 60;

/// Implementation of MediaService on top of a MediaStore.
///
/// Without a store the service is "unconfigured" and every run yields an
/// empty listing instead of an error.
#[derive(Clone)]
pub struct MediaServiceImpl {
    store: Option<Arc<dyn MediaStore>>,
}

impl MediaServiceImpl {
    /// Create a new MediaServiceImpl instance
    pub fn new(store: Arc<dyn MediaStore>) -> Self {
        Self { store: Some(store) }
    }

    /// A service with no backing bucket
    pub fn unconfigured() -> Self {
        Self { store: None }
    }

    pub fn from_optional(store: Option<Arc<dyn MediaStore>>) -> Self {
        Self { store }
    }

    /// Page through one prefix until a short or empty page, keeping real objects only
    async fn list_prefix(
        store: &dyn MediaStore,
        prefix: &Prefix,
    ) -> StorageResult<Vec<StorageObjectRef>> {
        let mut objects = Vec::new();
        let mut offset = 0;

        loop {
            let options = ListOptions::newest_first(PAGE_SIZE, offset);
            let page = store.list(prefix, &options).await.map_err(|e| {
                error!(prefix = %prefix, offset, error = %e, "Listing page failed");
                e
            })?;

            let page_len = page.len();
            debug!(prefix = %prefix, offset, entries = page_len, "Fetched listing page");

            if page_len == 0 {
                break;
            }

            objects.extend(
                page.into_iter()
                    .filter(ListedEntry::is_object)
                    .map(|entry| StorageObjectRef {
                        name: entry.name,
                        prefix: prefix.clone(),
                    }),
            );

            if page_len < PAGE_SIZE {
                break;
            }

            offset += page_len;
        }

        Ok(objects)
    }

    /// Build full paths, dropping repeats of a path already seen
    fn unique_paths(objects: Vec<StorageObjectRef>) -> Vec<(String, ObjectPath)> {
        let mut seen = HashSet::new();
        let mut paths = Vec::with_capacity(objects.len());

        for object in objects {
            let path = match object.path() {
                Ok(path) => path,
                Err(e) => {
                    warn!(name = %object.name, prefix = %object.prefix, error = %e, "Skipping object with invalid path");
                    continue;
                }
            };

            if seen.insert(path.as_str().to_string()) {
                paths.push((object.name, path));
            }
        }

        paths
    }

    /// Ask for signed URLs in one batch; any failure leaves the map without that path
    async fn signed_urls(store: &dyn MediaStore, paths: &[ObjectPath]) -> HashMap<String, String> {
        if paths.is_empty() {
            return HashMap::new();
        }

        match store.sign_urls(paths, SIGNED_URL_TTL_SECS).await {
            Ok(entries) => entries
                .into_iter()
                .filter_map(|entry| match entry.signed_url {
                    Some(url) if !url.is_empty() => Some((entry.path, url)),
                    _ => {
                        debug!(path = %entry.path, error = ?entry.error, "No signed URL issued for path");
                        None
                    }
                })
                .collect(),
            Err(e) => {
                warn!(paths = paths.len(), error = %e, "Signed URL issuance failed, falling back to public URLs");
                HashMap::new()
            }
        }
    }
}

#[async_trait]
impl MediaService for MediaServiceImpl {
    async fn list_and_resolve(&self, prefixes: &[Prefix]) -> StorageResult<MediaListing> {
        let Some(store) = self.store.as_deref() else {
            debug!("No media store configured, returning empty listing");
            return Ok(MediaListing::default());
        };

        let span = info_span!(
            "list_and_resolve",
            prefixes = %prefixes.iter().map(Prefix::as_str).collect::<Vec<_>>().join(",")
        );

        async move {
            let mut objects = Vec::new();
            for prefix in prefixes {
                objects.extend(Self::list_prefix(store, prefix).await?);
            }

            let paths = Self::unique_paths(objects);
            let listed = paths.len();

            let path_list: Vec<ObjectPath> = paths.iter().map(|(_, path)| path.clone()).collect();
            let signed = Self::signed_urls(store, &path_list).await;

            let items: Vec<ResolvedMedia> = paths
                .into_iter()
                .filter_map(|(name, path)| {
                    if let Some(url) = signed.get(path.as_str()) {
                        return Some(ResolvedMedia {
                            name,
                            path: path.to_string(),
                            url: url.clone(),
                            url_kind: UrlKind::Signed,
                        });
                    }

                    match store.public_url(&path) {
                        Some(url) if !url.is_empty() => Some(ResolvedMedia {
                            name,
                            path: path.to_string(),
                            url,
                            url_kind: UrlKind::Public,
                        }),
                        _ => {
                            debug!(path = %path, "Dropping object without any URL");
                            None
                        }
                    }
                })
                .collect();

            info!(listed, resolved = items.len(), "Resolved media listing");

            Ok(MediaListing { listed, items })
        }
        .instrument(span)
        .await
    }

    fn is_configured(&self) -> bool {
        self.store.is_some()
    }
}
