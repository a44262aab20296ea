use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use super::dto::{ErrorBodyDto, ListRequestDto, ObjectEntryDto, SignRequestDto, SignedUrlDto};
use crate::{
    adapters::outbound::storage::error::StoreError,
    domain::{
        errors::{StorageError, StorageResult},
        models::{ListOptions, ListedEntry, SignedUrlEntry},
        value_objects::{BucketName, ObjectPath, Prefix},
    },
    ports::storage::MediaStore,
};

/// Connection settings for a hosted storage bucket
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub url: String,
    /// Anonymous (publishable) API key
    pub api_key: String,
    pub bucket: BucketName,
}

/// MediaStore backed by the storage REST API of a Supabase project
pub struct SupabaseStorageAdapter {
    client: Client,
    storage_url: String,
    api_key: String,
    bucket: BucketName,
}

impl SupabaseStorageAdapter {
    pub fn new(config: SupabaseConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            client,
            storage_url: format!("{}/storage/v1", config.url.trim_end_matches('/')),
            api_key: config.api_key,
            bucket: config.bucket,
        }
    }

    fn post(&self, route: &str) -> RequestBuilder {
        let url = format!("{}/object/{}/{}", self.storage_url, route, self.bucket);
        self.client
            .post(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Decode a JSON body, turning non-2xx responses into `StoreError::Http`
    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBodyDto>(&body)
                .ok()
                .and_then(ErrorBodyDto::into_message)
                .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });

            return Err(StoreError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn list_page(
        &self,
        prefix: &Prefix,
        options: &ListOptions,
    ) -> Result<Vec<ObjectEntryDto>, StoreError> {
        let response = self
            .post("list")
            .json(&ListRequestDto::new(prefix.as_str(), options))
            .send()
            .await?;

        Self::read_json(response).await
    }
}

#[async_trait]
impl MediaStore for SupabaseStorageAdapter {
    async fn list(&self, prefix: &Prefix, options: &ListOptions) -> StorageResult<Vec<ListedEntry>> {
        debug!(bucket = %self.bucket, prefix = %prefix, offset = options.offset, "Listing bucket page");

        let rows = self
            .list_page(prefix, options)
            .await
            .map_err(|e| e.into_listing_error(prefix))?;

        Ok(rows.into_iter().map(ListedEntry::from).collect())
    }

    async fn sign_urls(
        &self,
        paths: &[ObjectPath],
        expires_in_secs: u64,
    ) -> StorageResult<Vec<SignedUrlEntry>> {
        let body = SignRequestDto {
            expires_in: expires_in_secs,
            paths: paths.iter().map(ObjectPath::as_str).collect(),
        };

        let response = self
            .post("sign")
            .json(&body)
            .send()
            .await
            .map_err(|e| StorageError::SigningFailed {
                message: StoreError::from(e).reason(),
            })?;

        let rows: Vec<SignedUrlDto> = Self::read_json(response)
            .await
            .map_err(|e| StorageError::SigningFailed { message: e.reason() })?;

        let entries: Vec<SignedUrlEntry> = rows
            .into_iter()
            .map(|row| row.into_entry(&self.storage_url))
            .collect();

        let unsigned = entries.iter().filter(|e| e.signed_url.is_none()).count();
        if unsigned > 0 {
            warn!(bucket = %self.bucket, unsigned, "Some paths were not signed");
        }

        Ok(entries)
    }

    fn public_url(&self, path: &ObjectPath) -> Option<String> {
        let encoded: Vec<String> = path
            .segments()
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();

        Some(format!(
            "{}/object/public/{}/{}",
            self.storage_url,
            self.bucket,
            encoded.join("/")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> SupabaseStorageAdapter {
        SupabaseStorageAdapter::new(SupabaseConfig {
            url: "https://xyz.supabase.co/".to_string(),
            api_key: "anon-key".to_string(),
            bucket: BucketName::new("media".to_string()).unwrap(),
        })
    }

    #[test]
    fn test_public_url_encodes_segments() {
        let prefix = Prefix::new("uploads/images").unwrap();
        let path = ObjectPath::new(&prefix, "summer trip #1.jpg").unwrap();

        assert_eq!(
            adapter().public_url(&path).as_deref(),
            Some("https://xyz.supabase.co/storage/v1/object/public/media/uploads/images/summer%20trip%20%231.jpg")
        );
    }
}
