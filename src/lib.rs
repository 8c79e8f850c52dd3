//! # Gallery Feed
//!
//! An HTTP endpoint that serves every image stored in a Cloudinary folder
//! hierarchy as one shuffled, paginated list.
//!
//! Each request walks the folder tree, fetches a capped number of images from
//! the root and from every folder, shuffles the combined collection, and
//! returns the requested page. Nothing is cached between requests.
//!
//! ## Architecture
//!
//! - [`upstream`] - `MediaSource` trait and the Cloudinary Admin API client
//! - [`gallery`] - Folder enumeration, image fetching, shuffle and pagination
//! - [`server`] - Axum-based HTTP server and routes
//! - [`config`] - CLI and environment configuration
//!
//! ## Example
//!
//! ```rust,no_run
//! use gallery_feed::{create_router, CloudinaryClient, Config, GalleryService, RouterConfig};
//! use clap::Parser;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::parse();
//!     let client = CloudinaryClient::new(config.api_base_url().unwrap(), config.credentials());
//!     let gallery = GalleryService::new(client, config.gallery_options());
//!     let router = create_router(gallery, RouterConfig::new());
//!
//!     let listener = tokio::net::TcpListener::bind(config.bind_address()).await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod gallery;
pub mod server;
pub mod upstream;

// Re-export commonly used types
pub use config::Config;
pub use error::{GalleryError, UpstreamError};
pub use gallery::{
    enumerate_folders, fetch_images, Fault, FaultKind, GalleryOptions, GalleryService, ImagePage,
    PageRequest, Partial,
};
pub use server::{create_router, images_handler, AppState, ErrorResponse, RouterConfig};
pub use upstream::{CloudinaryClient, Credentials, FolderEntry, MediaSource, ResourceEntry};
