// JSON response envelope and CORS handling

use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

pub type ResponseBody = Full<Bytes>;

const CORS_HEADERS: [(&str, &str); 3] = [
    ("access-control-allow-origin", "*"),
    (
        "access-control-allow-methods",
        "GET, POST, PUT, DELETE, OPTIONS",
    ),
    (
        "access-control-allow-headers",
        "Content-Type, Authorization",
    ),
];

/// Body returned by every JSON endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            file_url: None,
            error: None,
        }
    }

    pub fn with_file_url(mut self, url: impl Into<String>) -> Self {
        self.file_url = Some(url.into());
        self
    }

    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            file_url: None,
            error,
        }
    }
}

/// Serialize `body` with the given status.
pub fn json(status: StatusCode, body: &ApiResponse) -> Response<ResponseBody> {
    let payload = serde_json::to_vec(body).unwrap_or_else(|_| b"{}".to_vec());

    let mut response = Response::new(Full::new(Bytes::from(payload)));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

/// Map a request error to its JSON failure response.
///
/// `failure_message` is used for server-side failures; client errors carry
/// their own message.
pub fn error(err: &GatewayError, failure_message: &str) -> Response<ResponseBody> {
    let status =
        StatusCode::from_u16(err.to_http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let body = match err {
        GatewayError::BadRequest(message) => ApiResponse::failure(message.clone(), None),
        GatewayError::PayloadTooLarge { .. } => {
            ApiResponse::failure("File too large", Some(err.to_string()))
        }
        GatewayError::Config(_) | GatewayError::Upload(_) => {
            ApiResponse::failure(failure_message, Some(err.to_string()))
        }
    };

    json(status, &body)
}

pub fn no_content() -> Response<ResponseBody> {
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = StatusCode::NO_CONTENT;
    response
}

pub fn not_found() -> Response<ResponseBody> {
    json(
        StatusCode::NOT_FOUND,
        &ApiResponse::failure("Route not found", None),
    )
}

/// Attach the permissive CORS headers.
pub fn with_cors<B>(mut response: Response<B>) -> Response<B> {
    let headers = response.headers_mut();
    for (name, value) in CORS_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
    response
}
