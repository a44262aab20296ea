use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    adapters::{
        inbound::http::AppState,
        outbound::storage::{
            create_s3_media_store, InMemoryMediaStore, S3Config, SupabaseConfig,
            SupabaseStorageAdapter,
        },
    },
    domain::{models::LiveStream, value_objects::BucketName},
    ports::{services::MediaService, storage::MediaStore},
    services::{FeedServiceImpl, MediaServiceImpl},
};

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    pub youtube_channel_id: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::InMemory,
            youtube_channel_id: None,
        }
    }
}

impl AppConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_settings(
            StorageSettings::from_lookup(&lookup),
            youtube_channel_from_lookup(&lookup),
        )
    }

    pub fn from_settings(
        settings: StorageSettings,
        youtube_channel_id: Option<String>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            storage_backend: settings.into_backend()?,
            youtube_channel_id,
        })
    }
}

/// Storage backend configuration
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    /// No bucket configured: feeds stay idle
    Unconfigured,
    InMemory,
    Supabase {
        url: String,
        api_key: String,
        bucket: String,
    },
    S3 {
        bucket: String,
        region: String,
        endpoint: Option<String>,
        access_key: Option<String>,
        secret_key: Option<String>,
        public_base_url: Option<String>,
    },
}

/// Raw storage-related environment values before validation
#[derive(Debug, Clone, Default)]
pub struct StorageSettings {
    pub backend: Option<String>,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub supabase_bucket: Option<String>,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>,
    pub s3_access_key: Option<String>,
    pub s3_secret_key: Option<String>,
    pub s3_public_base_url: Option<String>,
}

fn first_set<F>(lookup: &F, keys: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    keys.iter()
        .filter_map(|key| lookup(*key))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

/// Live-stream channel id, if one is set
pub fn youtube_channel_from_lookup<F>(lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    first_set(lookup, &["YOUTUBE_CHANNEL_ID", "VITE_YOUTUBE_CHANNEL_ID"])
}

impl StorageSettings {
    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            backend: first_set(lookup, &["STORAGE_BACKEND"]),
            supabase_url: first_set(lookup, &["SUPABASE_URL", "VITE_SUPABASE_URL"]),
            supabase_key: first_set(lookup, &["SUPABASE_ANON_KEY", "VITE_SUPABASE_ANON_KEY"]),
            supabase_bucket: first_set(lookup, &["SUPABASE_BUCKET", "VITE_SUPABASE_BUCKET"]),
            s3_bucket: first_set(lookup, &["S3_BUCKET"]),
            s3_region: first_set(lookup, &["S3_REGION"]),
            s3_endpoint: first_set(lookup, &["S3_ENDPOINT"]),
            s3_access_key: first_set(lookup, &["S3_ACCESS_KEY"]),
            s3_secret_key: first_set(lookup, &["S3_SECRET_KEY"]),
            s3_public_base_url: first_set(lookup, &["S3_PUBLIC_BASE_URL"]),
        }
    }

    fn has_supabase(&self) -> bool {
        self.supabase_url.is_some() && self.supabase_key.is_some() && self.supabase_bucket.is_some()
    }

    /// Pick the backend. Missing values degrade to `Unconfigured`; only an unknown backend name is an error.
    pub fn into_backend(self) -> Result<StorageBackend, AppError> {
        let backend = self.backend.as_deref().map(str::to_lowercase);

        match backend.as_deref() {
            None if self.has_supabase() => Ok(self.supabase_backend()),
            None => {
                if self.supabase_url.is_some()
                    || self.supabase_key.is_some()
                    || self.supabase_bucket.is_some()
                {
                    warn!("Storage configuration is incomplete, media feeds will stay idle");
                }
                Ok(StorageBackend::Unconfigured)
            }
            Some("supabase") if self.has_supabase() => Ok(self.supabase_backend()),
            Some("supabase") => {
                warn!("SUPABASE_URL, SUPABASE_ANON_KEY and SUPABASE_BUCKET are required, media feeds will stay idle");
                Ok(StorageBackend::Unconfigured)
            }
            Some("s3") => match self.s3_bucket {
                Some(bucket) => Ok(StorageBackend::S3 {
                    bucket,
                    region: self.s3_region.unwrap_or_else(|| "us-east-1".to_string()),
                    endpoint: self.s3_endpoint,
                    access_key: self.s3_access_key,
                    secret_key: self.s3_secret_key,
                    public_base_url: self.s3_public_base_url,
                }),
                None => {
                    warn!("S3_BUCKET is required, media feeds will stay idle");
                    Ok(StorageBackend::Unconfigured)
                }
            },
            Some("memory") => Ok(StorageBackend::InMemory),
            Some("none") => Ok(StorageBackend::Unconfigured),
            Some(other) => Err(AppError::Configuration {
                message: format!("Unknown STORAGE_BACKEND: {}", other),
            }),
        }
    }

    fn supabase_backend(self) -> StorageBackend {
        StorageBackend::Supabase {
            url: self.supabase_url.unwrap_or_default(),
            api_key: self.supabase_key.unwrap_or_default(),
            bucket: self.supabase_bucket.unwrap_or_default(),
        }
    }
}

/// Application dependencies container
pub struct AppDependencies {
    pub media_store: Option<Arc<dyn MediaStore>>,
}

/// Application services container
pub struct AppServices {
    pub media_service: Arc<dyn MediaService>,
    pub feed_service: FeedServiceImpl,
    pub live_stream: LiveStream,
}

impl AppServices {
    /// State for the HTTP router, sharing this container's feed snapshots
    pub fn app_state(&self) -> AppState {
        AppState {
            feed_service: Arc::new(self.feed_service.clone()),
            media_service: self.media_service.clone(),
            live_stream: self.live_stream.clone(),
        }
    }
}

/// Application builder for dependency injection
pub struct AppBuilder {
    config: AppConfig,
    media_store: Option<Arc<dyn MediaStore>>,
}

impl AppBuilder {
    /// Create a new application builder
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            media_store: None,
        }
    }

    /// Configure the application with custom settings
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Configure storage backend
    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage_backend = backend;
        self
    }

    pub fn with_youtube_channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.config.youtube_channel_id = Some(channel_id.into());
        self
    }

    /// Use a ready-made store, ignoring the configured backend
    pub fn with_media_store(mut self, store: Arc<dyn MediaStore>) -> Self {
        self.media_store = Some(store);
        self
    }

    /// Build the application dependencies
    pub async fn build_dependencies(self) -> Result<AppDependencies, AppError> {
        if let Some(store) = self.media_store {
            return Ok(AppDependencies {
                media_store: Some(store),
            });
        }

        let media_store = Self::create_media_store(&self.config.storage_backend)?;
        Ok(AppDependencies { media_store })
    }

    /// Build the complete application with services
    pub async fn build(self) -> Result<AppServices, AppError> {
        let live_stream = LiveStream::new(self.config.youtube_channel_id.clone());
        let deps = self.build_dependencies().await?;

        // Create services with dependency injection
        let media_service: Arc<dyn MediaService> =
            Arc::new(MediaServiceImpl::from_optional(deps.media_store));
        let feed_service = FeedServiceImpl::new(media_service.clone());

        Ok(AppServices {
            media_service,
            feed_service,
            live_stream,
        })
    }

    /// Create the storage adapter for the configured backend
    fn create_media_store(
        backend: &StorageBackend,
    ) -> Result<Option<Arc<dyn MediaStore>>, AppError> {
        match backend {
            StorageBackend::Unconfigured => {
                info!("No storage backend configured");
                Ok(None)
            }
            StorageBackend::InMemory => {
                info!("Using in-memory storage backend");
                Ok(Some(Arc::new(InMemoryMediaStore::new())))
            }
            StorageBackend::Supabase {
                url,
                api_key,
                bucket,
            } => {
                let bucket = BucketName::new(bucket.clone()).map_err(|e| AppError::Configuration {
                    message: format!("Invalid storage bucket: {}", e),
                })?;
                info!(url = %url, bucket = %bucket, "Using Supabase storage backend");

                Ok(Some(Arc::new(SupabaseStorageAdapter::new(SupabaseConfig {
                    url: url.clone(),
                    api_key: api_key.clone(),
                    bucket,
                }))))
            }
            StorageBackend::S3 {
                bucket,
                region,
                endpoint,
                access_key,
                secret_key,
                public_base_url,
            } => {
                BucketName::new(bucket.clone()).map_err(|e| AppError::Configuration {
                    message: format!("Invalid storage bucket: {}", e),
                })?;
                info!(bucket = %bucket, region = %region, "Using S3 storage backend");

                let adapter = create_s3_media_store(&S3Config {
                    bucket: bucket.clone(),
                    region: region.clone(),
                    access_key: access_key.clone(),
                    secret_key: secret_key.clone(),
                    endpoint: endpoint.clone(),
                    public_base_url: public_base_url.clone(),
                })
                .map_err(|e| AppError::StorageInit {
                    message: format!("{:#}", e),
                })?;

                Ok(Some(Arc::new(adapter)))
            }
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage initialization error: {message}")]
    StorageInit { message: String },
}

/// Convenience functions for common configurations
///
/// Create an in-memory application for testing and development
pub async fn create_in_memory_app() -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_storage_backend(StorageBackend::InMemory)
        .build()
        .await
}

/// Create application from environment variables
pub async fn create_app_from_env() -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_config(AppConfig::from_env()?)
        .build()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[tokio::test]
    async fn test_create_in_memory_app() {
        let app = create_in_memory_app().await.unwrap();

        assert!(app.media_service.is_configured());
        assert!(!app.live_stream.is_configured());
    }

    #[test]
    fn test_nothing_set_is_unconfigured() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.storage_backend, StorageBackend::Unconfigured);
        assert_eq!(config.youtube_channel_id, None);
    }

    #[test]
    fn test_prefixed_names_are_fallbacks() {
        let config = AppConfig::from_lookup(lookup(&[
            ("VITE_SUPABASE_URL", "https://xyz.supabase.co"),
            ("VITE_SUPABASE_ANON_KEY", "anon"),
            ("VITE_SUPABASE_BUCKET", "church-media"),
            ("SUPABASE_BUCKET", "media"),
            ("VITE_YOUTUBE_CHANNEL_ID", "UC123"),
        ]))
        .unwrap();

        assert_eq!(
            config.storage_backend,
            StorageBackend::Supabase {
                url: "https://xyz.supabase.co".to_string(),
                api_key: "anon".to_string(),
                bucket: "media".to_string(),
            }
        );
        assert_eq!(config.youtube_channel_id.as_deref(), Some("UC123"));
    }

    #[test]
    fn test_partial_supabase_settings_degrade_to_unconfigured() {
        let config = AppConfig::from_lookup(lookup(&[
            ("STORAGE_BACKEND", "supabase"),
            ("SUPABASE_URL", "https://xyz.supabase.co"),
            ("SUPABASE_ANON_KEY", "   "),
        ]))
        .unwrap();

        assert_eq!(config.storage_backend, StorageBackend::Unconfigured);
    }

    #[test]
    fn test_unknown_backend_is_an_error() {
        let result = AppConfig::from_lookup(lookup(&[("STORAGE_BACKEND", "ftp")]));

        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_invalid_bucket_name_fails_build() {
        let result = AppBuilder::new()
            .with_storage_backend(StorageBackend::Supabase {
                url: "https://xyz.supabase.co".to_string(),
                api_key: "anon".to_string(),
                bucket: "-media".to_string(),
            })
            .build()
            .await;

        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_unconfigured_app_builds() {
        let app = AppBuilder::new()
            .with_storage_backend(StorageBackend::Unconfigured)
            .with_youtube_channel_id("UC123")
            .build()
            .await
            .unwrap();

        assert!(!app.media_service.is_configured());
        assert!(app.live_stream.is_configured());
    }
}
