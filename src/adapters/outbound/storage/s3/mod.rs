//! S3-compatible storage built on the object_store crate

use anyhow::{Context, Result};
use object_store::aws::{AmazonS3, AmazonS3Builder};
use std::sync::Arc;

use super::ObjectStoreMediaAdapter;

/// Configuration for S3 storage backend
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub endpoint: Option<String>,
    /// Base URL objects are publicly reachable under, if any
    pub public_base_url: Option<String>,
}

/// Create an S3 store from configuration
pub fn create_s3_store(config: &S3Config) -> Result<Arc<AmazonS3>> {
    let mut builder = AmazonS3Builder::new()
        .with_bucket_name(&config.bucket)
        .with_region(&config.region);

    if let Some(access_key) = &config.access_key {
        builder = builder.with_access_key_id(access_key);
    }

    if let Some(secret_key) = &config.secret_key {
        builder = builder.with_secret_access_key(secret_key);
    }

    if let Some(endpoint) = &config.endpoint {
        builder = builder
            .with_endpoint(endpoint)
            .with_allow_http(endpoint.starts_with("http://"));
    }

    let store = builder.build().context("Failed to build S3 store")?;

    Ok(Arc::new(store))
}

/// An S3 media store that signs URLs with the bucket's own credentials
pub fn create_s3_media_store(config: &S3Config) -> Result<ObjectStoreMediaAdapter> {
    let store = create_s3_store(config)?;

    let mut adapter = ObjectStoreMediaAdapter::new(store.clone()).with_signer(store);
    if let Some(base) = &config.public_base_url {
        adapter = adapter.with_public_base_url(base.clone());
    }

    Ok(adapter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_s3_media_store_builds_offline() {
        let config = S3Config {
            bucket: "media".to_string(),
            region: "us-east-1".to_string(),
            access_key: Some("minioadmin".to_string()),
            secret_key: Some("minioadmin".to_string()),
            endpoint: Some("http://localhost:9000".to_string()),
            public_base_url: None,
        };

        assert!(create_s3_media_store(&config).is_ok());
    }
}
