pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - core business entities and value objects
pub use domain::{
    // Value objects
    BucketName,
    DomainValidationError,
    // Models
    FeedKind,
    FeedSnapshot,
    FeedStatus,
    ListOptions,
    ListedEntry,
    LiveStream,
    MediaListing,
    ObjectPath,
    Prefix,
    ResolvedMedia,
    SignedUrlEntry,
    // Errors
    StorageError,
    StorageResult,
    UrlKind,
};

// Port types - interfaces for external systems
pub use ports::{
    // Service ports
    FeedService,
    MediaService,
    // Storage ports
    MediaStore,
};

// Service implementations - business logic
pub use services::{FeedServiceImpl, MediaServiceImpl, PAGE_SIZE, SIGNED_URL_TTL_SECS};

// Application factory and configuration
pub use app::{
    create_app_from_env, create_in_memory_app, AppBuilder, AppConfig, AppDependencies, AppError,
    AppServices, StorageBackend, StorageSettings,
};

// Adapter types - infrastructure implementations
pub use adapters::outbound::storage::{
    InMemoryMediaStore, ObjectStoreMediaAdapter, SupabaseConfig, SupabaseStorageAdapter,
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        create_app_from_env, create_in_memory_app, AppBuilder, AppServices, FeedKind, FeedService,
        FeedServiceImpl, FeedSnapshot, FeedStatus, InMemoryMediaStore, MediaService,
        MediaServiceImpl, MediaStore, Prefix, ResolvedMedia,
    };
}
