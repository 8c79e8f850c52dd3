//! Gallery Feed - a shuffled, paginated feed of Cloudinary images.
//!
//! This binary loads configuration, builds the upstream client and the
//! aggregation pipeline, and starts the HTTP server.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gallery_feed::{
    config::Config,
    gallery::GalleryService,
    server::{create_router, RouterConfig},
    upstream::CloudinaryClient,
};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; real environment variables still apply
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let config = Config::parse();
    init_logging(config.verbose);

    if dotenv_loaded {
        info!("Loaded environment from .env");
    }

    run_serve(config).await
}

async fn run_serve(config: Config) -> ExitCode {
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let base_url = match config.api_base_url() {
        Ok(url) => url,
        Err(e) => {
            error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = CloudinaryClient::new(base_url.clone(), config.credentials());

    info!("Gallery Feed v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Cloud name: {}", client.cloud_name());
    info!("  API endpoint: {}", base_url);
    info!("  Images per folder: {}", config.max_results_per_folder);
    match config.cors_origins {
        Some(ref origins) if origins.is_empty() => {
            warn!("  CORS: no origins allowed");
        }
        Some(ref origins) => info!("  CORS origins: {}", origins.join(", ")),
        None => info!("  CORS: any origin"),
    }

    let gallery = GalleryService::new(client, config.gallery_options());
    let router = create_router(gallery, build_router_config(&config));

    let addr = config.bind_address();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    info!("Server running on http://{}", addr);
    info!("  curl http://{}/images?page=1&limit=30", addr);

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "gallery_feed=debug,tower_http=debug"
    } else {
        "gallery_feed=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application Config.
fn build_router_config(config: &Config) -> RouterConfig {
    let mut router_config = RouterConfig::new().with_tracing(!config.no_tracing);

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config
}
