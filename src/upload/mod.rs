//! Upload service.
//!
//! Ties the branding pipeline to object storage: an uploaded file is branded
//! when it is a raster image and complete branding parameters were sent,
//! then stored under a fresh key in the requested folder.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::branding::{Brander, BrandingError, BrandingParams, RasterFormat};
use crate::constants::DEFAULT_FILE_EXTENSION;
use crate::storage::{ObjectStore, StorageError};

/// Errors produced by [`UploadService`].
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("branding failed at stage '{stage}': {0}", stage = .0.stage())]
    Branding(#[from] BrandingError),

    #[error("storage operation failed: {0}")]
    Storage(#[from] StorageError),
}

/// A file received from a client.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub data: Vec<u8>,
    /// Original filename; only its extension is used
    pub filename: String,
    /// Destination folder inside the bucket
    pub folder: String,
    pub branding: Option<BrandingParams>,
}

/// Outcome of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    /// Public URL of the stored object
    pub url: String,
    /// Object key inside the bucket
    pub key: String,
    /// Whether a logo was composited before storing
    pub branded: bool,
}

#[derive(Clone)]
pub struct UploadService {
    store: Arc<dyn ObjectStore>,
    brander: Brander,
}

impl UploadService {
    pub fn new(store: Arc<dyn ObjectStore>, brander: Brander) -> Self {
        Self { store, brander }
    }

    /// Brand (when applicable) and store a file.
    ///
    /// A branding failure aborts the upload; the unbranded file is never
    /// stored in its place.
    #[tracing::instrument(
        skip_all,
        fields(filename = %request.filename, folder = %request.folder, size = request.data.len())
    )]
    pub async fn upload(&self, request: UploadRequest) -> Result<UploadResult, UploadError> {
        let extension = file_extension(&request.filename);
        let key = object_key(&request.folder, &extension);
        let content_type = content_type_for(&extension);

        let (data, branded) = self
            .apply_branding(request.data, &extension, request.branding)
            .await?;

        let url = self.store.put(data, &key, content_type).await?;

        tracing::info!(key = %key, url = %url, branded, "File uploaded");
        Ok(UploadResult { url, key, branded })
    }

    async fn apply_branding(
        &self,
        data: Vec<u8>,
        extension: &str,
        params: Option<BrandingParams>,
    ) -> Result<(Vec<u8>, bool), UploadError> {
        let Some(options) = params.and_then(BrandingParams::into_options) else {
            tracing::debug!("Branding parameters absent or incomplete, storing file as-is");
            return Ok((data, false));
        };

        let format = match RasterFormat::from_extension(extension) {
            Ok(format) => format,
            Err(_) => {
                tracing::info!(
                    extension = %extension,
                    "Branding skipped: only png, jpg and jpeg files are supported"
                );
                return Ok((data, false));
            }
        };

        let branded = self.brander.brand(data, format, options).await?;
        Ok((branded, true))
    }

    /// Delete a stored file by public URL or object key.
    ///
    /// Returns the key that was deleted.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, reference: &str) -> Result<String, UploadError> {
        let key = self.store.resolve_key(reference);
        self.store.delete(&key).await?;
        tracing::info!(key = %key, "File deleted");
        Ok(key)
    }
}

/// Extension of `filename` without the leading dot, or `""` if it has none.
pub fn file_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_string()
}

/// `{folder}/{uuid}.{ext}` with `folder` normalized by [`normalize_folder`].
pub fn object_key(folder: &str, extension: &str) -> String {
    let extension = if extension.is_empty() {
        DEFAULT_FILE_EXTENSION
    } else {
        extension
    };
    let name = format!("{}.{}", Uuid::new_v4(), extension);

    match normalize_folder(folder).as_str() {
        "" => name,
        folder => format!("{}/{}", folder, name),
    }
}

/// Clean a folder path into a relative key prefix.
///
/// Empty and `.` segments are dropped and `..` removes the previous segment.
/// A `..` at the root is discarded, so the prefix never leaves the bucket.
pub fn normalize_folder(folder: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in folder.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            segment => segments.push(segment),
        }
    }
    segments.join("/")
}

pub fn content_type_for(extension: &str) -> &'static str {
    if let Ok(format) = RasterFormat::from_extension(extension) {
        return format.content_type();
    }

    match extension.to_ascii_lowercase().as_str() {
        "gif" => "image/gif",
        "pdf" => "application/pdf",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}
