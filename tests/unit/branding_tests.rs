// Branding pipeline tests through the public API

use brandgate::branding::codec;
use brandgate::branding::*;
use image::{GenericImageView, Rgba, RgbaImage};

fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

fn encoded(width: u32, height: u32, color: [u8; 4], format: RasterFormat) -> Vec<u8> {
    codec::encode(&solid(width, height, color), format).expect("encode test image")
}

#[test]
fn test_jpeg_base_keeps_dimensions_and_format() {
    let base = encoded(640, 480, [255, 255, 255, 255], RasterFormat::Jpeg);
    let logo = encoded(32, 32, [0, 0, 255, 255], RasterFormat::Png);

    let output = composite(
        &base,
        RasterFormat::Jpeg,
        &logo,
        "png",
        BrandPosition::TopLeft,
        64,
        64,
    )
    .expect("composite succeeds");

    assert_eq!(&output[..2], &[0xFF, 0xD8], "output is a JPEG");
    let decoded = codec::decode(&output, RasterFormat::Jpeg).unwrap();
    assert_eq!(decoded.dimensions(), (640, 480));

    // 64 fits the band (max 120, min 36) so the logo is drawn at 64x64 from (20,20)
    let inside = decoded.get_pixel(20 + 32, 20 + 32);
    assert!(inside[2] > 200 && inside[0] < 60, "logo pixel {:?}", inside);
    let outside = decoded.get_pixel(20 + 64 + 10, 20 + 64 + 10);
    assert!(outside[0] > 230 && outside[2] > 230, "base pixel {:?}", outside);
}

#[test]
fn test_png_base_outside_logo_is_pixel_exact() {
    let base_image = solid(300, 200, [12, 34, 56, 255]);
    let base = codec::encode(&base_image, RasterFormat::Png).unwrap();
    let logo = encoded(10, 10, [255, 255, 255, 255], RasterFormat::Png);

    let output = composite(
        &base,
        RasterFormat::Png,
        &logo,
        "PNG",
        BrandPosition::BottomRight,
        30,
        30,
    )
    .unwrap();

    let decoded = codec::decode(&output, RasterFormat::Png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (300, 200));
    assert_eq!(*decoded.get_pixel(0, 0), Rgba([12, 34, 56, 255]));
    assert_eq!(*decoded.get_pixel(299, 0), Rgba([12, 34, 56, 255]));
    // max = 50, min threshold = 15, so 30x30 is kept: logo spans x 250..280, y 150..180
    let logo_pixel = decoded.get_pixel(265, 165);
    assert!(logo_pixel.0.iter().all(|c| *c > 245), "logo pixel {:?}", logo_pixel);
    assert_eq!(*decoded.get_pixel(285, 185), Rgba([12, 34, 56, 255]));
}

#[test]
fn test_tiny_base_still_gets_a_logo() {
    let base = encoded(3, 3, [0, 0, 0, 255], RasterFormat::Png);
    let logo = encoded(8, 8, [255, 0, 0, 255], RasterFormat::Png);

    let output = composite(
        &base,
        RasterFormat::Png,
        &logo,
        "png",
        BrandPosition::Center,
        50,
        50,
    )
    .expect("tiny base is not an error");

    let decoded = codec::decode(&output, RasterFormat::Png).unwrap();
    assert_eq!(decoded.dimensions(), (3, 3));
}

#[test]
fn test_unsupported_logo_extension_fails_at_decode_logo() {
    let base = encoded(100, 100, [255, 255, 255, 255], RasterFormat::Png);

    let err = composite(
        &base,
        RasterFormat::Png,
        b"GIF89a",
        "gif",
        BrandPosition::Center,
        10,
        10,
    )
    .unwrap_err();

    assert_eq!(err.stage(), "decode_logo");
    assert!(err.to_string().contains("Unsupported image format: 'gif'"));
}

#[test]
fn test_corrupt_base_fails_at_decode_base() {
    let logo = encoded(8, 8, [255, 0, 0, 255], RasterFormat::Png);

    let err = composite(
        b"not an image",
        RasterFormat::Jpeg,
        &logo,
        "png",
        BrandPosition::Center,
        10,
        10,
    )
    .unwrap_err();

    assert_eq!(err.stage(), "decode_base");
}

#[test]
fn test_branding_params_from_form_values() {
    let params = BrandingParams {
        position: Some("Top-Right".to_string()),
        brand_logo: Some("https://assets.example.com/logo.png".to_string()),
        width: Some("120".to_string()),
        height: Some("0".to_string()),
    };
    assert!(params.into_options().is_none(), "zero height is rejected");

    let params: BrandingParams = serde_json::from_str(
        r#"{"position":"top-right","brandLogo":"https://assets.example.com/logo.png","width":"120","height":"60"}"#,
    )
    .unwrap();
    let options = params.into_options().expect("complete params");

    assert_eq!(options.position, BrandPosition::TopRight);
    assert_eq!((options.width, options.height), (120, 60));
    assert_eq!(
        options.logo,
        LogoSource::Url("https://assets.example.com/logo.png".to_string())
    );
}

#[test]
fn test_logo_extension_ignores_query_string() {
    assert_eq!(
        extension_from_url("https://assets.example.com/brand/logo.PNG?v=3#top"),
        "PNG"
    );
    assert_eq!(extension_from_url("https://assets.example.com/logo"), "");
}
