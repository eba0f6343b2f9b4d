use anyhow::Context;
use brandgate::branding::{Brander, HttpLogoFetcher};
use brandgate::config::Config;
use brandgate::error::GatewayError;
use brandgate::server::{self, AppState};
use brandgate::storage::S3Storage;
use brandgate::upload::UploadService;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Brandgate - file upload gateway with logo branding for S3-compatible storage
#[derive(Parser, Debug)]
#[command(name = "brandgate")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Test configuration and exit
    #[arg(long)]
    test: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::from_file(&args.config)
        .map_err(GatewayError::Config)
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;
    config
        .validate()
        .map_err(GatewayError::Config)
        .context("Invalid configuration")?;

    if args.test {
        println!("Configuration {} is valid", args.config.display());
        return Ok(());
    }

    brandgate::logging::init_subscriber(&config.logging)
        .context("Failed to initialize logging subsystem")?;

    tracing::info!(
        config_file = %args.config.display(),
        server_address = %config.server.address,
        server_port = config.server.port,
        bucket = %config.storage.bucket_name,
        max_file_size = config.upload.max_file_size,
        "Configuration loaded successfully"
    );

    let storage = S3Storage::new(&config.storage).await;
    let fetcher = HttpLogoFetcher::new().context("Failed to build logo HTTP client")?;
    let uploads = UploadService::new(Arc::new(storage), Brander::new(Arc::new(fetcher)));
    let state = Arc::new(AppState::new(uploads, config.upload.max_file_size));

    let listen_addr = config.server.listen_addr();
    let listener = TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", listen_addr))?;

    tracing::info!(address = %listen_addr, "Starting Brandgate upload server");

    server::serve(listener, state, shutdown_signal()).await;
    Ok(())
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
