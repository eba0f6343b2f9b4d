// Request handlers for the upload gateway endpoints

use bytes::Bytes;
use futures::Stream;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::Incoming;
use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE};
use hyper::{Request, Response, StatusCode};
use serde::Deserialize;

use super::response::{self, ApiResponse, ResponseBody};
use super::AppState;
use crate::branding::BrandingParams;
use crate::error::GatewayError;
use crate::upload::UploadRequest;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Upper bound for the JSON body of a delete request
const MAX_DELETE_BODY: usize = 64 * 1024;

pub fn health() -> Response<ResponseBody> {
    response::json(StatusCode::OK, &ApiResponse::success("Server is healthy"))
}

pub async fn upload(req: Request<Incoming>, state: &AppState) -> Response<ResponseBody> {
    match handle_upload(req, state).await {
        Ok(url) => response::json(
            StatusCode::OK,
            &ApiResponse::success("File uploaded successfully").with_file_url(url),
        ),
        Err(err) => {
            log_failure(&err, "Upload failed");
            response::error(&err, "Failed to upload file")
        }
    }
}

pub async fn delete(req: Request<Incoming>, state: &AppState) -> Response<ResponseBody> {
    match handle_delete(req, state).await {
        Ok(()) => response::json(
            StatusCode::OK,
            &ApiResponse::success("File deleted successfully"),
        ),
        Err(err) => {
            log_failure(&err, "Delete failed");
            response::error(&err, "Failed to delete file")
        }
    }
}

fn log_failure(err: &GatewayError, message: &str) {
    if err.to_http_status() >= 500 {
        tracing::error!(error = %err, "{}", message);
    } else {
        tracing::warn!(error = %err, status = err.to_http_status(), "{}", message);
    }
}

/// Multipart form fields of an upload request.
#[derive(Debug, Default)]
struct UploadForm {
    file: Option<(String, Bytes)>,
    path: Option<String>,
    branding: BrandingParams,
}

async fn handle_upload(req: Request<Incoming>, state: &AppState) -> Result<String, GatewayError> {
    let limit = state.max_file_size;
    reject_oversized(&req, limit)?;

    let boundary = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| multer::parse_boundary(value).ok())
        .ok_or_else(|| GatewayError::BadRequest("No file provided".to_string()))?;

    let form = read_upload_form(limited_stream(req, limit), boundary, limit).await?;

    let (filename, data) = form
        .file
        .ok_or_else(|| GatewayError::BadRequest("No file provided".to_string()))?;

    let folder = form
        .path
        .filter(|path| !path.trim().is_empty())
        .ok_or_else(|| GatewayError::BadRequest("Path is required".to_string()))?;

    let branding = if form.branding.is_empty() {
        None
    } else {
        Some(form.branding)
    };

    let result = state
        .uploads
        .upload(UploadRequest {
            data: data.to_vec(),
            filename,
            folder,
            branding,
        })
        .await?;

    Ok(result.url)
}

async fn read_upload_form<S>(
    stream: S,
    boundary: String,
    limit: usize,
) -> Result<UploadForm, GatewayError>
where
    S: Stream<Item = Result<Bytes, BoxError>> + Send + 'static,
{
    let mut multipart = multer::Multipart::new(stream, boundary);
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(|e| multipart_error(e, limit))?;
                form.file = Some((filename, data));
            }
            "path" | "position" | "brandLogo" | "width" | "height" => {
                let value = field.text().await.map_err(|e| multipart_error(e, limit))?;
                match name.as_str() {
                    "path" => form.path = Some(value),
                    "position" => form.branding.position = Some(value),
                    "brandLogo" => form.branding.brand_logo = Some(value),
                    "width" => form.branding.width = Some(value),
                    _ => form.branding.height = Some(value),
                }
            }
            other => tracing::debug!(field = %other, "Ignoring unknown form field"),
        }
    }

    Ok(form)
}

fn multipart_error(err: multer::Error, limit: usize) -> GatewayError {
    if let multer::Error::StreamReadFailed(source) = &err {
        if source.downcast_ref::<LengthLimitError>().is_some() {
            return GatewayError::PayloadTooLarge { limit };
        }
    }
    GatewayError::BadRequest(format!("Invalid multipart body: {}", err))
}

#[derive(Debug, Deserialize)]
struct DeleteBody {
    #[serde(default)]
    url: Option<String>,
}

async fn handle_delete(req: Request<Incoming>, state: &AppState) -> Result<(), GatewayError> {
    let body = Limited::new(req.into_body(), MAX_DELETE_BODY)
        .collect()
        .await
        .map_err(|e| {
            if e.downcast_ref::<LengthLimitError>().is_some() {
                GatewayError::PayloadTooLarge {
                    limit: MAX_DELETE_BODY,
                }
            } else {
                GatewayError::BadRequest(format!("Failed to read request body: {}", e))
            }
        })?
        .to_bytes();

    let url = serde_json::from_slice::<DeleteBody>(&body)
        .ok()
        .and_then(|body| body.url)
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| GatewayError::BadRequest("URL is required".to_string()))?;

    state.uploads.delete(&url).await?;
    Ok(())
}

/// Fail fast when the declared length already exceeds the limit.
fn reject_oversized(req: &Request<Incoming>, limit: usize) -> Result<(), GatewayError> {
    let declared = req
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<usize>().ok());

    match declared {
        Some(length) if length > limit => Err(GatewayError::PayloadTooLarge { limit }),
        _ => Ok(()),
    }
}

fn limited_stream(
    req: Request<Incoming>,
    limit: usize,
) -> impl Stream<Item = Result<Bytes, BoxError>> + Send + 'static {
    Limited::new(req.into_body(), limit).into_data_stream()
}
