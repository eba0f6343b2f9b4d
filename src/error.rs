// Error types module

use std::fmt;

use crate::upload::UploadError;

/// Top-level error type for the gateway
///
/// Categorizes request failures so each maps to one HTTP status code.
#[derive(Debug)]
pub enum GatewayError {
    /// Configuration errors (invalid YAML, missing env vars, etc.)
    Config(String),

    /// Malformed or incomplete client request (missing file, bad JSON, etc.)
    BadRequest(String),

    /// Request body exceeded the configured upload limit
    PayloadTooLarge { limit: usize },

    /// Branding or storage failure while handling an upload or delete
    Upload(UploadError),
}

impl GatewayError {
    pub fn to_http_status(&self) -> u16 {
        match self {
            GatewayError::BadRequest(_) => 400,
            GatewayError::PayloadTooLarge { .. } => 413,
            GatewayError::Config(_) | GatewayError::Upload(_) => 500,
        }
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Config(msg) => write!(f, "Configuration error: {}", msg),
            GatewayError::BadRequest(msg) => write!(f, "{}", msg),
            GatewayError::PayloadTooLarge { limit } => {
                write!(f, "Request body exceeds limit of {} bytes", limit)
            }
            GatewayError::Upload(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for GatewayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GatewayError::Upload(err) => Some(err),
            _ => None,
        }
    }
}

impl From<UploadError> for GatewayError {
    fn from(err: UploadError) -> Self {
        GatewayError::Upload(err)
    }
}
