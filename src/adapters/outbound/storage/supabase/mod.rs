//! Storage adapter for the Supabase storage REST API

mod client;
pub mod dto;

pub use client::{SupabaseConfig, SupabaseStorageAdapter};
