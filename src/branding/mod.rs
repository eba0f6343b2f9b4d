//! Branding module for overlaying a logo onto uploaded images.
//!
//! A single logo is resized to fit an adaptive band relative to the base
//! image, anchored at a corner or the center, alpha-blended over the base and
//! re-encoded in the base image's original format.
//!
//! # Example
//!
//! ```ignore
//! use brandgate::branding::{Brander, BrandingParams, HttpLogoFetcher, RasterFormat};
//!
//! let brander = Brander::new(Arc::new(HttpLogoFetcher::new()?));
//! let options = BrandingParams { .. }.into_options().expect("complete params");
//!
//! let branded = brander.brand(upload_bytes, RasterFormat::Png, options).await?;
//! ```

pub mod codec;
pub mod compositor;
pub mod error;
pub mod fetcher;
pub mod options;
pub mod position;
pub mod scale;

pub use codec::RasterFormat;
pub use compositor::{composite, composite_images, resize_logo, Brander};
pub use error::{BrandingError, CodecError, FetchError};
pub use fetcher::{extension_from_url, HttpLogoFetcher, LogoFetcher};
pub use options::{BrandingOptions, BrandingParams, LogoSource};
pub use position::{
    calculate_position, BrandPosition, ImageDimensions, LogoDimensions, PlacementPosition,
};
pub use scale::{compute_logo_size, max_logo_size, LogoSize};
