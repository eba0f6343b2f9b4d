//! Branding error types.
//!
//! Defines errors that can occur while decoding, fetching, compositing and
//! encoding images. [`BrandingError`] tags every failure with the pipeline
//! stage it came from.

use thiserror::Error;

/// Errors raised by the image codec.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Extension or format outside of jpeg/png
    #[error("Unsupported image format: '{format}'")]
    UnsupportedFormat { format: String },

    /// Malformed image data
    #[error("Failed to decode {format} image: {message}")]
    Decode { format: String, message: String },

    /// Encoder rejected the pixel buffer
    #[error("Failed to encode {format} image: {message}")]
    Encode { format: String, message: String },
}

impl CodecError {
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        CodecError::UnsupportedFormat {
            format: format.into(),
        }
    }

    pub fn decode(format: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::Decode {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn encode(format: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::Encode {
            format: format.into(),
            message: message.into(),
        }
    }
}

/// Network failures while downloading a logo.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: request to {url} timed out")]
    Timeout { url: String },

    #[error("Network error: {url} responded with status {status}")]
    Status { url: String, status: u16 },

    #[error("Network error: {url}: {message}")]
    Transport { url: String, message: String },
}

/// Failure of a branding operation, tagged with the stage that failed.
#[derive(Debug, Error)]
pub enum BrandingError {
    #[error("failed to decode base image: {0}")]
    DecodeBase(#[source] CodecError),

    #[error("failed to download logo: {0}")]
    FetchLogo(#[source] FetchError),

    #[error("failed to decode logo: {0}")]
    DecodeLogo(#[source] CodecError),

    #[error("failed to resize logo: {0}")]
    Resize(String),

    #[error("failed to encode branded image: {0}")]
    Encode(#[source] CodecError),

    #[error("branding task aborted: {0}")]
    Task(String),
}

impl BrandingError {
    /// Name of the pipeline stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            BrandingError::DecodeBase(_) => "decode_base",
            BrandingError::FetchLogo(_) => "fetch_logo",
            BrandingError::DecodeLogo(_) => "decode_logo",
            BrandingError::Resize(_) => "resize",
            BrandingError::Encode(_) => "encode",
            BrandingError::Task(_) => "task",
        }
    }
}
