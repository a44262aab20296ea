// Infrastructure error types
pub mod error;

// Storage implementations
pub mod in_memory;
pub mod object_store_adapter;

// Provider-specific implementations
pub mod s3;
pub mod supabase;

// Re-export key types
pub use error::StoreError;
pub use in_memory::{InMemoryMediaStore, ListCall};
pub use object_store_adapter::ObjectStoreMediaAdapter;
pub use s3::{create_s3_media_store, create_s3_store, S3Config};
pub use supabase::{SupabaseConfig, SupabaseStorageAdapter};
