// Upload service end to end: branding, storage and deletion

use super::test_harness::*;
use brandgate::branding::{codec, BrandingParams, RasterFormat};
use brandgate::upload::{UploadError, UploadRequest};
use std::sync::Arc;

fn branding(logo_url: &str, position: &str, width: u32, height: u32) -> Option<BrandingParams> {
    Some(BrandingParams {
        position: Some(position.to_string()),
        brand_logo: Some(logo_url.to_string()),
        width: Some(width.to_string()),
        height: Some(height.to_string()),
    })
}

#[tokio::test]
async fn test_center_logo_is_scaled_up_and_centered() {
    let logo_host = spawn_logo_server().await;
    let store = Arc::new(MemoryStore::new());
    let service = upload_service(store.clone());

    let result = service
        .upload(UploadRequest {
            data: png_bytes(1000, 800, WHITE),
            filename: "poster.png".to_string(),
            folder: "/campaigns/".to_string(),
            branding: branding(&format!("{}/logo.png", logo_host), "center", 50, 50),
        })
        .await
        .expect("upload succeeds");

    assert!(result.branded);
    assert!(result.key.starts_with("campaigns/"));
    assert_eq!(result.url, format!("{}/{}", CDN_BASE, result.key));

    let stored = store.get(&result.key).expect("object stored");
    assert_eq!(stored.content_type, "image/png");

    let image = codec::decode(&stored.data, RasterFormat::Png)
        .unwrap()
        .to_rgba8();
    assert_eq!(image.dimensions(), (1000, 800));

    // max = 200, 50 < 60 so the logo becomes 60x60 at ((1000-60)/2, (800-60)/2)
    assert!(is_red(image.get_pixel(470, 370)));
    assert!(is_red(image.get_pixel(529, 429)));
    assert!(is_white(image.get_pixel(469, 370)));
    assert!(is_white(image.get_pixel(470, 369)));
    assert!(is_white(image.get_pixel(530, 429)));
    assert!(is_white(image.get_pixel(529, 430)));
}

#[tokio::test]
async fn test_jpeg_upload_with_jpeg_logo() {
    let logo_host = spawn_logo_server().await;
    let store = Arc::new(MemoryStore::new());
    let service = upload_service(store.clone());

    let result = service
        .upload(UploadRequest {
            data: jpeg_bytes(800, 600, WHITE),
            filename: "photo.JPEG".to_string(),
            folder: "photos".to_string(),
            branding: branding(&format!("{}/logo.jpg", logo_host), "top-left", 100, 100),
        })
        .await
        .unwrap();

    let stored = store.get(&result.key).unwrap();
    assert_eq!(stored.content_type, "image/jpeg");

    let image = codec::decode(&stored.data, RasterFormat::Jpeg)
        .unwrap()
        .to_rgba8();
    assert_eq!(image.dimensions(), (800, 600));
    assert!(is_red(image.get_pixel(20 + 50, 20 + 50)));
    assert!(is_white(image.get_pixel(400, 300)));
}

#[tokio::test]
async fn test_non_image_upload_is_stored_verbatim() {
    let store = Arc::new(MemoryStore::new());
    let service = upload_service(store.clone());
    let payload = b"PK\x03\x04 zipped bytes".to_vec();

    let result = service
        .upload(UploadRequest {
            data: payload.clone(),
            filename: "bundle.zip".to_string(),
            folder: "archives".to_string(),
            branding: branding("http://127.0.0.1:9/logo.png", "center", 10, 10),
        })
        .await
        .unwrap();

    assert!(!result.branded);
    let stored = store.get(&result.key).unwrap();
    assert_eq!(stored.data, payload);
    assert_eq!(stored.content_type, "application/zip");
}

#[tokio::test]
async fn test_missing_logo_fails_without_storing() {
    let logo_host = spawn_logo_server().await;
    let store = Arc::new(MemoryStore::new());
    let service = upload_service(store.clone());

    let err = service
        .upload(UploadRequest {
            data: png_bytes(200, 200, WHITE),
            filename: "photo.png".to_string(),
            folder: "images".to_string(),
            branding: branding(&format!("{}/missing.png", logo_host), "center", 40, 40),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, UploadError::Branding(ref e) if e.stage() == "fetch_logo"));
    assert_eq!(store.len(), 0);
}

#[tokio::test]
async fn test_undecodable_logo_fails_without_storing() {
    let logo_host = spawn_logo_server().await;
    let store = Arc::new(MemoryStore::new());
    let service = upload_service(store.clone());

    let err = service
        .upload(UploadRequest {
            data: png_bytes(200, 200, WHITE),
            filename: "photo.png".to_string(),
            folder: "images".to_string(),
            branding: branding(&format!("{}/garbage.png", logo_host), "center", 40, 40),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, UploadError::Branding(ref e) if e.stage() == "decode_logo"));
    assert_eq!(store.len(), 0);
}

#[tokio::test]
async fn test_delete_by_public_url() {
    let store = Arc::new(MemoryStore::new());
    let service = upload_service(store.clone());

    let result = service
        .upload(UploadRequest {
            data: b"hello".to_vec(),
            filename: "notes.txt".to_string(),
            folder: "docs".to_string(),
            branding: None,
        })
        .await
        .unwrap();
    assert_eq!(store.keys(), vec![result.key.clone()]);

    let deleted = service.delete(&result.url).await.unwrap();

    assert_eq!(deleted, result.key);
    assert_eq!(store.len(), 0);
}

#[tokio::test]
async fn test_delete_unknown_key_reports_storage_error() {
    let store = Arc::new(MemoryStore::new());
    let service = upload_service(store);

    let err = service.delete("docs/missing.txt").await.unwrap_err();

    assert!(matches!(err, UploadError::Storage(_)));
}
