//! Logo compositor.
//!
//! Resizes the logo according to the scale policy, places it according to the
//! placement policy and alpha-blends it over a copy of the base image.
//!
//! # Pipeline
//!
//! decode base → fetch + decode logo → scale → resize (Lanczos3) → place →
//! copy base onto canvas → blend logo ("over") → encode in the base format
//!
//! Everything runs in memory. [`composite`] is the synchronous pipeline for
//! callers that already hold the logo bytes; [`Brander`] adds the logo fetch
//! and moves the CPU-bound stages onto tokio's blocking pool.

use super::codec::{self, RasterFormat};
use super::error::BrandingError;
use super::fetcher::{extension_from_url, LogoFetcher};
use super::options::{BrandingOptions, LogoSource};
use super::position::{
    calculate_position, BrandPosition, ImageDimensions, LogoDimensions, PlacementPosition,
};
use super::scale::{compute_logo_size, LogoSize};
use fast_image_resize::{FilterType, Image, MulDiv, PixelType, ResizeAlg, Resizer};
use image::{DynamicImage, Rgba, RgbaImage};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Async branding entry point.
///
/// Holds no per-request state; clones share the underlying fetcher.
#[derive(Clone)]
pub struct Brander {
    fetcher: Arc<dyn LogoFetcher>,
}

impl Brander {
    pub fn new(fetcher: Arc<dyn LogoFetcher>) -> Self {
        Self { fetcher }
    }

    /// Brand `base` with the logo described by `options`.
    ///
    /// The base is decoded before the logo is fetched, so a corrupt upload
    /// fails without any network traffic. Dropping the returned future
    /// cancels an in-flight logo download.
    ///
    /// # Errors
    ///
    /// Returns a `BrandingError` tagged with the failing stage. No partial
    /// result is ever produced.
    #[tracing::instrument(skip_all, fields(format = %format, position = %options.position))]
    pub async fn brand(
        &self,
        base: Vec<u8>,
        format: RasterFormat,
        options: BrandingOptions,
    ) -> Result<Vec<u8>, BrandingError> {
        let base_image = run_blocking(move || {
            codec::decode(&base, format).map_err(BrandingError::DecodeBase)
        })
        .await?;

        let (logo_bytes, logo_extension) = match options.logo {
            LogoSource::Url(url) => {
                let bytes = self
                    .fetcher
                    .fetch(&url)
                    .await
                    .map_err(BrandingError::FetchLogo)?;
                (bytes, extension_from_url(&url))
            }
            LogoSource::Inline { data, extension } => (data, extension),
        };

        let (position, width, height) = (options.position, options.width, options.height);
        let output = run_blocking(move || {
            let logo = decode_logo(&logo_bytes, &logo_extension)?;
            let canvas = composite_images(&base_image, &logo, position, width, height)?;
            codec::encode(&canvas, format).map_err(BrandingError::Encode)
        })
        .await?;

        tracing::debug!(bytes = output.len(), "Branding applied");
        Ok(output)
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T, BrandingError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, BrandingError> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| BrandingError::Task(e.to_string()))?
}

/// Run the full pipeline on bytes already in memory.
///
/// # Arguments
///
/// * `base` - Encoded base image
/// * `format` - Format of the base image; the output uses the same format
/// * `logo` - Encoded logo image
/// * `logo_extension` - Extension naming the logo format (`png`, `jpg`, ...)
/// * `position`, `width`, `height` - Requested placement and logo box
pub fn composite(
    base: &[u8],
    format: RasterFormat,
    logo: &[u8],
    logo_extension: &str,
    position: BrandPosition,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, BrandingError> {
    let base_image = codec::decode(base, format).map_err(BrandingError::DecodeBase)?;
    let logo_image = decode_logo(logo, logo_extension)?;
    let canvas = composite_images(&base_image, &logo_image, position, width, height)?;
    codec::encode(&canvas, format).map_err(BrandingError::Encode)
}

fn decode_logo(data: &[u8], extension: &str) -> Result<DynamicImage, BrandingError> {
    RasterFormat::from_extension(extension)
        .and_then(|format| codec::decode(data, format))
        .map_err(BrandingError::DecodeLogo)
}

/// Draw a resized logo over a copy of `base`.
///
/// The returned canvas always has the base image's dimensions.
pub fn composite_images(
    base: &DynamicImage,
    logo: &DynamicImage,
    position: BrandPosition,
    requested_width: u32,
    requested_height: u32,
) -> Result<RgbaImage, BrandingError> {
    let image_dims = ImageDimensions {
        width: base.width(),
        height: base.height(),
    };

    let size = compute_logo_size(
        image_dims.width,
        image_dims.height,
        requested_width,
        requested_height,
    );
    let resized = resize_logo(logo, size)?;

    let placement = calculate_position(
        position,
        &image_dims,
        &LogoDimensions {
            width: resized.width(),
            height: resized.height(),
        },
    );

    tracing::debug!(
        logo_width = size.width,
        logo_height = size.height,
        x = placement.x,
        y = placement.y,
        "Logo placement computed"
    );

    let mut canvas = base.to_rgba8();
    overlay(&mut canvas, &resized, placement);
    Ok(canvas)
}

/// Resize a logo with Lanczos3, resampling in premultiplied alpha.
pub fn resize_logo(logo: &DynamicImage, size: LogoSize) -> Result<RgbaImage, BrandingError> {
    let src_width = NonZeroU32::new(logo.width())
        .ok_or_else(|| BrandingError::Resize("Logo width is 0".to_string()))?;
    let src_height = NonZeroU32::new(logo.height())
        .ok_or_else(|| BrandingError::Resize("Logo height is 0".to_string()))?;
    let dst_width = NonZeroU32::new(size.width)
        .ok_or_else(|| BrandingError::Resize("Target width is 0".to_string()))?;
    let dst_height = NonZeroU32::new(size.height)
        .ok_or_else(|| BrandingError::Resize("Target height is 0".to_string()))?;

    let mut src_image = Image::from_vec_u8(
        src_width,
        src_height,
        logo.to_rgba8().into_raw(),
        PixelType::U8x4,
    )
    .map_err(|e| BrandingError::Resize(format!("Failed to create source image: {:?}", e)))?;

    let alpha = MulDiv::default();
    alpha
        .multiply_alpha_inplace(&mut src_image.view_mut())
        .map_err(|e| BrandingError::Resize(format!("Failed to premultiply alpha: {:?}", e)))?;

    let mut dst_image = Image::new(dst_width, dst_height, PixelType::U8x4);
    {
        let mut dst_view = dst_image.view_mut();
        let mut resizer = Resizer::new(ResizeAlg::Convolution(FilterType::Lanczos3));
        resizer
            .resize(&src_image.view(), &mut dst_view)
            .map_err(|e| BrandingError::Resize(format!("Resize operation failed: {:?}", e)))?;
        alpha
            .divide_alpha_inplace(&mut dst_view)
            .map_err(|e| BrandingError::Resize(format!("Failed to restore alpha: {:?}", e)))?;
    }

    RgbaImage::from_raw(size.width, size.height, dst_image.into_vec())
        .ok_or_else(|| BrandingError::Resize("Failed to create output image buffer".to_string()))
}

/// Blend `logo` onto `canvas` at `position`, clipping at the canvas edges.
fn overlay(canvas: &mut RgbaImage, logo: &RgbaImage, position: PlacementPosition) {
    let x_end = position
        .x
        .saturating_add(logo.width())
        .min(canvas.width());
    let y_end = position
        .y
        .saturating_add(logo.height())
        .min(canvas.height());

    for ty in position.y..y_end {
        for tx in position.x..x_end {
            let logo_pixel = logo.get_pixel(tx - position.x, ty - position.y);
            let base_pixel = canvas.get_pixel(tx, ty);
            let blended = blend_pixels(*base_pixel, *logo_pixel);
            canvas.put_pixel(tx, ty, blended);
        }
    }
}

/// Blend two pixels with the Porter-Duff "over" operator.
///
/// result = foreground + background * (1 - foreground.alpha)
fn blend_pixels(background: Rgba<u8>, foreground: Rgba<u8>) -> Rgba<u8> {
    if foreground[3] == 255 {
        return foreground;
    }
    if foreground[3] == 0 {
        return background;
    }

    let fg_alpha = foreground[3] as f32 / 255.0;
    let bg_alpha = background[3] as f32 / 255.0;
    let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);

    if out_alpha < 0.001 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend_channel = |fg: u8, bg: u8| -> u8 {
        let fg_f = fg as f32 / 255.0;
        let bg_f = bg as f32 / 255.0;
        let result = (fg_f * fg_alpha + bg_f * bg_alpha * (1.0 - fg_alpha)) / out_alpha;
        (result * 255.0).round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend_channel(foreground[0], background[0]),
        blend_channel(foreground[1], background[1]),
        blend_channel(foreground[2], background[2]),
        (out_alpha * 255.0).round() as u8,
    ])
}
