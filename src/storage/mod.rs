//! Object storage abstraction.
//!
//! The upload service talks to storage only through [`ObjectStore`]. The
//! production implementation is [`S3Storage`], which works with any
//! S3-compatible endpoint (AWS S3, Cloudflare R2, MinIO, LocalStack).

pub mod s3;

use async_trait::async_trait;
use thiserror::Error;

pub use s3::S3Storage;

/// Errors returned by object store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to store object '{key}': {message}")]
    Put { key: String, message: String },

    #[error("failed to delete object '{key}': {message}")]
    Delete { key: String, message: String },
}

/// Blob storage addressed by key, returning public URLs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `data` under `key` and return its public URL.
    async fn put(&self, data: Vec<u8>, key: &str, content_type: &str)
        -> Result<String, StorageError>;

    /// Remove the object stored under `key`.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Map a public URL (or a bare key) back to the object key.
    fn resolve_key(&self, reference: &str) -> String {
        reference.to_string()
    }
}
