//! Image codec for the two raster formats the gateway can brand.
//!
//! Decoding and encoding happen entirely in memory. JPEG output uses a fixed
//! quality of 95; PNG output is lossless RGBA.

use super::error::CodecError;
use crate::constants::JPEG_QUALITY;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ColorType, DynamicImage, ImageEncoder, RgbaImage};
use std::fmt;
use std::io::Cursor;

/// Raster formats supported by the branding pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RasterFormat {
    Jpeg,
    Png,
}

impl RasterFormat {
    /// Map a file extension (without the dot) to a format.
    ///
    /// Matching is case-insensitive. `jpg` and `jpeg` both map to JPEG.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnsupportedFormat` for any other value, including
    /// an empty extension.
    pub fn from_extension(ext: &str) -> Result<Self, CodecError> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(RasterFormat::Jpeg),
            "png" => Ok(RasterFormat::Png),
            _ => Err(CodecError::unsupported_format(ext)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RasterFormat::Jpeg => "jpeg",
            RasterFormat::Png => "png",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            RasterFormat::Jpeg => "image/jpeg",
            RasterFormat::Png => "image/png",
        }
    }

    fn image_format(&self) -> image::ImageFormat {
        match self {
            RasterFormat::Jpeg => image::ImageFormat::Jpeg,
            RasterFormat::Png => image::ImageFormat::Png,
        }
    }
}

impl fmt::Display for RasterFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decode `data` as an image of the given format.
pub fn decode(data: &[u8], format: RasterFormat) -> Result<DynamicImage, CodecError> {
    image::load_from_memory_with_format(data, format.image_format())
        .map_err(|e| CodecError::decode(format.as_str(), e.to_string()))
}

/// Encode an RGBA canvas into the given format.
pub fn encode(image: &RgbaImage, format: RasterFormat) -> Result<Vec<u8>, CodecError> {
    let (width, height) = image.dimensions();
    let mut output = Cursor::new(Vec::new());

    match format {
        RasterFormat::Jpeg => {
            // JPEG has no alpha channel
            let rgb = rgba_to_rgb(image.as_raw());
            JpegEncoder::new_with_quality(&mut output, JPEG_QUALITY)
                .write_image(&rgb, width, height, ColorType::Rgb8)
                .map_err(|e| CodecError::encode(format.as_str(), e.to_string()))?;
        }
        RasterFormat::Png => {
            PngEncoder::new(&mut output)
                .write_image(image.as_raw(), width, height, ColorType::Rgba8)
                .map_err(|e| CodecError::encode(format.as_str(), e.to_string()))?;
        }
    }

    Ok(output.into_inner())
}

fn rgba_to_rgb(data: &[u8]) -> Vec<u8> {
    data.chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect()
}
