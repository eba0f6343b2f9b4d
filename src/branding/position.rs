//! Position calculation for logo placement.
//!
//! The logo is anchored to one of the four corners, with a fixed 20px margin
//! from the adjacent edges, or centered on the image. Coordinates are clamped
//! so they are never negative; there is no upper clamp, so a logo larger
//! than the image minus margins may extend past the right or bottom edge and
//! is clipped when drawn.
//!
//! # Example
//!
//! ```
//! use brandgate::branding::position::{
//!     calculate_position, BrandPosition, ImageDimensions, LogoDimensions, PlacementPosition,
//! };
//!
//! let image = ImageDimensions { width: 1000, height: 800 };
//! let logo = LogoDimensions { width: 100, height: 80 };
//!
//! let pos = calculate_position(BrandPosition::BottomRight, &image, &logo);
//! assert_eq!(pos, PlacementPosition::new(880, 700)); // 1000 - 100 - 20, 800 - 80 - 20
//! ```

use crate::constants::LOGO_MARGIN;
use std::fmt;

/// Where the logo is anchored on the base image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrandPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
    Center,
}

impl BrandPosition {
    /// Parse a position name such as `top-left` or `center`.
    ///
    /// Only the exact lowercase names are recognized. Anything else,
    /// including `TopLeft` or `BOTTOM_LEFT`, falls back to `BottomRight`.
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "top-left" => BrandPosition::TopLeft,
            "top-right" => BrandPosition::TopRight,
            "bottom-left" => BrandPosition::BottomLeft,
            "bottom-right" => BrandPosition::BottomRight,
            "center" => BrandPosition::Center,
            _ => {
                tracing::debug!(position = value, "Unknown logo position, using bottom-right");
                BrandPosition::default()
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BrandPosition::TopLeft => "top-left",
            BrandPosition::TopRight => "top-right",
            BrandPosition::BottomLeft => "bottom-left",
            BrandPosition::BottomRight => "bottom-right",
            BrandPosition::Center => "center",
        }
    }
}

impl fmt::Display for BrandPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dimensions of the base image.
#[derive(Debug, Clone, Copy)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Dimensions of the resized logo.
#[derive(Debug, Clone, Copy)]
pub struct LogoDimensions {
    pub width: u32,
    pub height: u32,
}

/// Top-left pixel where the logo is drawn. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementPosition {
    pub x: u32,
    pub y: u32,
}

impl PlacementPosition {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Calculate the placement of a logo on an image.
///
/// # Arguments
///
/// * `position` - Anchor position
/// * `image` - Dimensions of the base image
/// * `logo` - Dimensions of the resized logo
///
/// # Returns
///
/// The (x, y) coordinates of the logo's top-left corner, each clamped to 0.
pub fn calculate_position(
    position: BrandPosition,
    image: &ImageDimensions,
    logo: &LogoDimensions,
) -> PlacementPosition {
    let img_w = i64::from(image.width);
    let img_h = i64::from(image.height);
    let logo_w = i64::from(logo.width);
    let logo_h = i64::from(logo.height);
    let m = i64::from(LOGO_MARGIN);

    let (x, y) = match position {
        BrandPosition::TopLeft => (m, m),
        BrandPosition::TopRight => (img_w - logo_w - m, m),
        BrandPosition::BottomLeft => (m, img_h - logo_h - m),
        BrandPosition::BottomRight => (img_w - logo_w - m, img_h - logo_h - m),
        // Integer division truncates toward zero before the clamp
        BrandPosition::Center => ((img_w - logo_w) / 2, (img_h - logo_h) / 2),
    };

    PlacementPosition::new(clamp_non_negative(x), clamp_non_negative(y))
}

fn clamp_non_negative(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}
