// Server module - hyper HTTP/1.1 accept loop and routing

pub mod handlers;
pub mod response;

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use crate::upload::UploadService;
use response::ResponseBody;

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub uploads: UploadService,
    /// Maximum accepted upload body in bytes
    pub max_file_size: usize,
}

impl AppState {
    pub fn new(uploads: UploadService, max_file_size: usize) -> Self {
        Self {
            uploads,
            max_file_size,
        }
    }
}

/// Dispatch a request to its handler and attach CORS headers.
pub async fn route(req: Request<Incoming>, state: Arc<AppState>) -> Response<ResponseBody> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = match (&method, path.as_str()) {
        (&Method::OPTIONS, _) => response::no_content(),
        (&Method::GET, "/health") => handlers::health(),
        (&Method::POST, "/upload") => handlers::upload(req, &state).await,
        (&Method::POST, "/delete") => handlers::delete(req, &state).await,
        _ => response::not_found(),
    };

    tracing::info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        "Request completed"
    );

    response::with_cors(response)
}

/// Accept connections on `listener` until `shutdown` resolves.
///
/// Each connection is served on its own task. Connections already accepted
/// are left to finish on their own once the loop stops.
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F)
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, peer)) => spawn_connection(stream, peer, state.clone()),
                    Err(e) => tracing::warn!(error = %e, "Failed to accept connection"),
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Shutting down");
                break;
            }
        }
    }
}

fn spawn_connection(stream: tokio::net::TcpStream, peer: SocketAddr, state: Arc<AppState>) {
    tokio::spawn(async move {
        let service = service_fn(move |req| {
            let state = state.clone();
            async move { Ok::<_, Infallible>(route(req, state).await) }
        });

        if let Err(e) = http1::Builder::new()
            .serve_connection(TokioIo::new(stream), service)
            .await
        {
            tracing::debug!(peer = %peer, error = %e, "Connection closed with error");
        }
    });
}
