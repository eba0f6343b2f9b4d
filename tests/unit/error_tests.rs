// Error mapping tests

use brandgate::branding::{BrandingError, CodecError, FetchError};
use brandgate::config::Config;
use brandgate::error::GatewayError;
use brandgate::storage::StorageError;
use brandgate::upload::UploadError;
use std::error::Error;

#[test]
fn test_gateway_error_status_codes() {
    let cases = [
        (GatewayError::BadRequest("Path is required".to_string()), 400),
        (GatewayError::PayloadTooLarge { limit: 1024 }, 413),
        (GatewayError::Config("missing storage".to_string()), 500),
        (
            GatewayError::Upload(UploadError::Storage(StorageError::Put {
                key: "images/a.png".to_string(),
                message: "AccessDenied".to_string(),
            })),
            500,
        ),
    ];

    for (error, status) in cases {
        assert_eq!(error.to_http_status(), status, "status for {}", error);
    }
}

#[test]
fn test_gateway_error_display() {
    assert_eq!(
        GatewayError::BadRequest("No file provided".to_string()).to_string(),
        "No file provided"
    );
    assert_eq!(
        GatewayError::PayloadTooLarge { limit: 10 }.to_string(),
        "Request body exceeds limit of 10 bytes"
    );
    assert_eq!(
        GatewayError::Config("bad yaml".to_string()).to_string(),
        "Configuration error: bad yaml"
    );
}

#[test]
fn test_config_load_failure_becomes_config_error() {
    let error = Config::from_yaml_with_env("server: [unclosed")
        .map_err(GatewayError::Config)
        .unwrap_err();

    assert!(matches!(error, GatewayError::Config(_)));
    assert!(error.to_string().starts_with("Configuration error: "));
    assert_eq!(error.to_http_status(), 500);
}

#[test]
fn test_branding_failure_names_stage_and_cause() {
    let fetch = FetchError::Status {
        url: "https://assets.example.com/logo.png".to_string(),
        status: 404,
    };
    let error: GatewayError = UploadError::from(BrandingError::FetchLogo(fetch)).into();
    let message = error.to_string();

    assert!(message.contains("fetch_logo"), "{}", message);
    assert!(message.contains("404"), "{}", message);
    assert!(error.source().is_some());
}

#[test]
fn test_decode_failure_chain_reaches_codec_error() {
    let error = UploadError::from(BrandingError::DecodeBase(CodecError::decode(
        "png",
        "invalid signature",
    )));

    let branding = error.source().expect("upload error has a source");
    let codec = branding.source().expect("branding error has a source");
    assert_eq!(
        codec.to_string(),
        "Failed to decode png image: invalid signature"
    );
}
