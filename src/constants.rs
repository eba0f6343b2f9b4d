// Constants module - centralized default values for configuration
//
// This module defines all default values used throughout the codebase.
// Branding parameters are fixed here rather than exposed in the config file.

// =============================================================================
// Server defaults
// =============================================================================

/// Default bind address
pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0";

/// Default listen port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// Upload defaults
// =============================================================================

/// Default maximum upload size (10 MB)
pub const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Extension used for object keys when the uploaded filename has none
pub const DEFAULT_FILE_EXTENSION: &str = "bin";

// =============================================================================
// Storage defaults
// =============================================================================

/// Default region; R2 ignores the value but the SDK requires one
pub const DEFAULT_STORAGE_REGION: &str = "auto";

// =============================================================================
// Branding
// =============================================================================

/// Logo may never exceed this fraction of the shorter base-image dimension
pub const MAX_LOGO_RATIO: f64 = 0.25;

/// Logos smaller than this fraction of the maximum logo size are scaled up
pub const MIN_LOGO_FRACTION: f64 = 0.3;

/// Distance in pixels between the logo and the nearest image edges
pub const LOGO_MARGIN: u32 = 20;

/// JPEG encoder quality for branded output
pub const JPEG_QUALITY: u8 = 95;

/// Timeout for downloading a remote logo in seconds
pub const LOGO_FETCH_TIMEOUT_SECS: u64 = 30;
