//! Atelier Storage Library
//!
//! Object-storage abstraction and implementations for the media pipeline.
//! The core treats storage as an opaque blob store addressed by
//! (bucket, path); URLs returned by `public_url` are assumed durable and
//! publicly fetchable.
//!
//! # Path format
//!
//! Paths are relative, slash-separated keys within a bucket. Paths must not
//! contain `..` or a leading `/`; every backend rejects such paths with
//! [`StorageError::InvalidPath`] before touching the underlying store.

pub mod factory;
pub mod local;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use atelier_core::StorageBackend;
pub use factory::create_storage;
pub use local::LocalStorage;
pub use memory::MemoryStorage;
pub use traits::{ObjectStorage, StorageError, StorageResult, UploadOptions};
