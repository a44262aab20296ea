use async_trait::async_trait;
use object_store::{path::Path, signer::Signer, ObjectMeta, ObjectStore as ApacheObjectStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::{
    domain::{
        errors::StorageResult,
        models::{ListOptions, ListedEntry, ObjectAttributes, SignedUrlEntry},
        value_objects::{ObjectPath, Prefix},
    },
    ports::storage::MediaStore,
};

use super::error::StoreError;

/// Adapter that implements MediaStore on top of any Apache object_store backend.
///
/// Listing is one level deep: nested "directories" come back as placeholder
/// entries, like folders do in a bucket listing. Signed URLs need a `Signer`
/// (e.g. `AmazonS3`); without one every path falls through to the public URL.
pub struct ObjectStoreMediaAdapter {
    inner: Arc<dyn ApacheObjectStore>,
    signer: Option<Arc<dyn Signer>>,
    public_base_url: Option<String>,
}

impl ObjectStoreMediaAdapter {
    pub fn new(store: Arc<dyn ApacheObjectStore>) -> Self {
        Self {
            inner: store,
            signer: None,
            public_base_url: None,
        }
    }

    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn with_public_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.public_base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    fn entry_from_meta(prefix: &Prefix, meta: ObjectMeta) -> ListedEntry {
        let location = meta.location.as_ref();
        let name = location
            .strip_prefix(prefix.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(location)
            .to_string();

        ListedEntry {
            name,
            // object_store has no object identifier; the full location stands in for it
            id: Some(meta.location.to_string()),
            created_at: Some(meta.last_modified),
            updated_at: Some(meta.last_modified),
            metadata: Some(ObjectAttributes {
                size: Some(meta.size),
                mime_type: None,
                etag: meta.e_tag,
                last_modified: Some(meta.last_modified),
            }),
        }
    }
}

#[async_trait]
impl MediaStore for ObjectStoreMediaAdapter {
    async fn list(&self, prefix: &Prefix, options: &ListOptions) -> StorageResult<Vec<ListedEntry>> {
        let prefix_path = Path::from(prefix.as_str());

        let result = self
            .inner
            .list_with_delimiter(Some(&prefix_path))
            .await
            .map_err(|e| StoreError::from(e).into_listing_error(prefix))?;

        let mut entries: Vec<ListedEntry> = result
            .objects
            .into_iter()
            .map(|meta| Self::entry_from_meta(prefix, meta))
            .collect();

        entries.extend(result.common_prefixes.iter().filter_map(|dir| {
            dir.filename().map(ListedEntry::placeholder)
        }));

        debug!(prefix = %prefix, total = entries.len(), offset = options.offset, "Listed object store prefix");

        Ok(options.paginate(entries))
    }

    async fn sign_urls(
        &self,
        paths: &[ObjectPath],
        expires_in_secs: u64,
    ) -> StorageResult<Vec<SignedUrlEntry>> {
        let Some(signer) = &self.signer else {
            return Ok(paths
                .iter()
                .map(|path| SignedUrlEntry::failed(path.as_str(), "URL signing is not supported by this store"))
                .collect());
        };

        let expires_in = Duration::from_secs(expires_in_secs);
        let mut entries = Vec::with_capacity(paths.len());

        for path in paths {
            // listed names are already in the store's encoded form
            let location = match Path::parse(path.as_str()) {
                Ok(location) => location,
                Err(e) => {
                    entries.push(SignedUrlEntry::failed(path.as_str(), e.to_string()));
                    continue;
                }
            };

            let entry = match signer
                .signed_url(http::Method::GET, &location, expires_in)
                .await
            {
                Ok(url) => SignedUrlEntry::signed(path.as_str(), url.to_string()),
                Err(e) => SignedUrlEntry::failed(path.as_str(), e.to_string()),
            };
            entries.push(entry);
        }

        Ok(entries)
    }

    /// The stored key is addressed verbatim, so its `%` escapes are encoded again for the URL
    fn public_url(&self, path: &ObjectPath) -> Option<String> {
        let base = self.public_base_url.as_ref()?;
        let encoded: Vec<String> = path
            .segments()
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();

        Some(format!("{}/{}", base, encoded.join("/")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::{memory::InMemory, PutPayload};
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct RecordingSigner {
        locations: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Signer for RecordingSigner {
        async fn signed_url(
            &self,
            _method: http::Method,
            path: &Path,
            expires_in: Duration,
        ) -> object_store::Result<reqwest::Url> {
            self.locations.lock().unwrap().push(path.to_string());
            Ok(reqwest::Url::parse(&format!(
                "https://signed.example.org/{}?expires={}",
                path,
                expires_in.as_secs()
            ))
            .unwrap())
        }
    }

    async fn seeded() -> Arc<InMemory> {
        let store = Arc::new(InMemory::new());
        for key in ["images/a.jpg", "images/b.jpg", "images/2023/old.jpg"] {
            store
                .put(&Path::from(key), PutPayload::from_static(b"data"))
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_list_returns_objects_and_folder_placeholders() {
        let adapter = ObjectStoreMediaAdapter::new(seeded().await);
        let prefix = Prefix::new("images").unwrap();

        let entries = adapter
            .list(&prefix, &ListOptions::newest_first(100, 0))
            .await
            .unwrap();

        let mut objects: Vec<_> = entries
            .iter()
            .filter(|e| e.is_object())
            .map(|e| e.name.as_str())
            .collect();
        objects.sort();
        assert_eq!(objects, vec!["a.jpg", "b.jpg"]);

        let placeholders: Vec<_> = entries.iter().filter(|e| !e.is_object()).collect();
        assert_eq!(placeholders.len(), 1);
        assert_eq!(placeholders[0].name, "2023");
    }

    #[tokio::test]
    async fn test_offset_past_end_is_empty() {
        let adapter = ObjectStoreMediaAdapter::new(seeded().await);
        let prefix = Prefix::new("images").unwrap();

        let entries = adapter
            .list(&prefix, &ListOptions::newest_first(100, 100))
            .await
            .unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_without_signer_every_path_is_unsigned() {
        let adapter = ObjectStoreMediaAdapter::new(seeded().await)
            .with_public_base_url("https://cdn.example.org/media/");
        let prefix = Prefix::new("images").unwrap();
        let path = ObjectPath::new(&prefix, "a b.jpg").unwrap();

        let signed = adapter.sign_urls(&[path.clone()], 3600).await.unwrap();
        assert!(signed[0].signed_url.is_none());
        assert_eq!(
            adapter.public_url(&path).as_deref(),
            Some("https://cdn.example.org/media/images/a%20b.jpg")
        );
    }

    #[tokio::test]
    async fn test_escaped_names_sign_the_stored_key() {
        let store = Arc::new(InMemory::new());
        let stored = Path::from("images/summer #1.jpg");
        store
            .put(&stored, PutPayload::from_static(b"data"))
            .await
            .unwrap();

        let signer = Arc::new(RecordingSigner::default());
        let adapter = ObjectStoreMediaAdapter::new(store)
            .with_signer(signer.clone())
            .with_public_base_url("https://cdn.example.org");
        let prefix = Prefix::new("images").unwrap();

        let entries = adapter
            .list(&prefix, &ListOptions::newest_first(100, 0))
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);

        let path = ObjectPath::new(&prefix, &entries[0].name).unwrap();
        assert_eq!(path.as_str(), stored.as_ref());

        let signed = adapter.sign_urls(&[path.clone()], 3600).await.unwrap();
        assert!(signed[0].signed_url.is_some());
        assert_eq!(
            *signer.locations.lock().unwrap(),
            vec![stored.to_string()]
        );

        // the public URL addresses the same stored key
        let public = adapter.public_url(&path).unwrap();
        let segment = public.rsplit('/').next().unwrap();
        assert_eq!(
            urlencoding::decode(segment).unwrap(),
            stored.filename().unwrap()
        );
    }
}
