//! Branding options.
//!
//! [`BrandingParams`] holds the raw, optional values received with an upload.
//! [`BrandingOptions`] is the validated form that the compositor consumes;
//! it only exists when every parameter is present and well-formed.

use super::position::BrandPosition;
use serde::Deserialize;

/// Where the logo bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoSource {
    /// Remote logo, downloaded per request.
    Url(String),
    /// Logo bytes supplied by the caller, with the extension used to pick
    /// the decoder.
    Inline { data: Vec<u8>, extension: String },
}

/// Validated branding request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandingOptions {
    pub position: BrandPosition,
    pub logo: LogoSource,
    /// Requested logo width, > 0
    pub width: u32,
    /// Requested logo height, > 0
    pub height: u32,
}

/// Raw branding parameters as received from a client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandingParams {
    pub position: Option<String>,
    pub brand_logo: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
}

impl BrandingParams {
    /// Validate the parameters.
    ///
    /// Returns `None` unless position and logo URL are non-empty and width
    /// and height are positive integers. Partial parameters never produce a
    /// branding request.
    pub fn into_options(self) -> Option<BrandingOptions> {
        let position = non_empty(self.position)?;
        let logo = non_empty(self.brand_logo)?;
        let width = positive_int(self.width)?;
        let height = positive_int(self.height)?;

        Some(BrandingOptions {
            position: BrandPosition::parse_or_default(&position),
            logo: LogoSource::Url(logo),
            width,
            height,
        })
    }

    /// True when no branding parameter was sent at all.
    pub fn is_empty(&self) -> bool {
        self.position.is_none()
            && self.brand_logo.is_none()
            && self.width.is_none()
            && self.height.is_none()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn positive_int(value: Option<String>) -> Option<u32> {
    value?.trim().parse::<u32>().ok().filter(|v| *v > 0)
}
