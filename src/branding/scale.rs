//! Logo scale policy.
//!
//! Keeps the logo inside an adaptive band relative to the base image: never
//! larger than 25% of the shorter side, and logos under 30% of that maximum
//! are enlarged to the band floor (about 7.5% of the shorter side).
//!
//! One uniform factor is applied to both requested dimensions, so the result
//! keeps the aspect ratio of the *requested box*, not of the logo file.
//!
//! # Example
//!
//! ```
//! use brandgate::branding::scale::{compute_logo_size, LogoSize};
//!
//! // max = 200, requested 50 < 60 -> scaled by 1.2
//! assert_eq!(compute_logo_size(1000, 800, 50, 50), LogoSize::new(60, 60));
//! ```

use crate::constants::{MAX_LOGO_RATIO, MIN_LOGO_FRACTION};

/// Final logo dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoSize {
    pub width: u32,
    pub height: u32,
}

impl LogoSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The larger of the two dimensions.
    pub fn longest_side(&self) -> u32 {
        self.width.max(self.height)
    }
}

/// Largest logo side allowed for a base image.
pub fn max_logo_size(image_width: u32, image_height: u32) -> u32 {
    (f64::from(image_width.min(image_height)) * MAX_LOGO_RATIO).floor() as u32
}

/// Compute the final logo size for a base image and a requested box.
///
/// # Arguments
///
/// * `image_width`, `image_height` - Base image dimensions
/// * `requested_width`, `requested_height` - Requested logo box, both > 0
///
/// The returned dimensions are rounded to nearest and never 0.
pub fn compute_logo_size(
    image_width: u32,
    image_height: u32,
    requested_width: u32,
    requested_height: u32,
) -> LogoSize {
    let max_size = max_logo_size(image_width, image_height);
    let requested = requested_width.max(requested_height);
    let min_size = f64::from(max_size) * MIN_LOGO_FRACTION;

    let factor = if requested > max_size {
        f64::from(max_size) / f64::from(requested)
    } else if u64::from(requested) < min_size as u64 {
        // Threshold is compared as a truncated integer
        min_size / f64::from(requested)
    } else {
        return LogoSize::new(requested_width, requested_height);
    };

    LogoSize::new(
        scale_dimension(requested_width, factor),
        scale_dimension(requested_height, factor),
    )
}

fn scale_dimension(value: u32, factor: f64) -> u32 {
    ((f64::from(value) * factor).round() as u32).max(1)
}
