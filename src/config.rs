//! Configuration management for the gallery feed.
//!
//! Configuration is read once at startup from command-line arguments, falling
//! back to environment variables (a `.env` file in the working directory is
//! loaded first) and then to defaults. Components never read the environment
//! themselves; they receive [`Credentials`] and [`GalleryOptions`] built from
//! this struct.
//!
//! # Environment Variables
//!
//! - `CLOUDINARY_CLOUD_NAME` - Cloud (account) name (required)
//! - `CLOUDINARY_API_KEY` - Admin API key (required)
//! - `CLOUDINARY_API_SECRET` - Admin API secret (required)
//! - `CLOUDINARY_API_BASE_URL` - Admin API endpoint (default: https://api.cloudinary.com)
//! - `PORT` - Server port (default: 3000)
//! - `GALLERY_HOST` - Server bind address (default: 0.0.0.0)
//! - `GALLERY_MAX_RESULTS_PER_FOLDER` - Images taken per folder (default: 30)
//! - `GALLERY_CORS_ORIGINS` - Comma-separated allowed origins (default: any)

use clap::Parser;
use url::Url;

use crate::gallery::{
    GalleryOptions, DEFAULT_MAX_RESULTS_PER_FOLDER, MAX_RESULTS_PER_FOLDER_LIMIT,
};
use crate::upstream::{Credentials, DEFAULT_API_BASE_URL};

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Gallery Feed - a shuffled, paginated feed of every image in a Cloudinary
/// folder tree.
#[derive(Parser, Debug, Clone)]
#[command(name = "gallery-feed")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "GALLERY_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PORT")]
    pub port: u16,

    // =========================================================================
    // Upstream Configuration
    // =========================================================================
    /// Cloudinary cloud name.
    #[arg(long, env = "CLOUDINARY_CLOUD_NAME")]
    pub cloud_name: String,

    /// Cloudinary Admin API key.
    #[arg(long, env = "CLOUDINARY_API_KEY")]
    pub api_key: String,

    /// Cloudinary Admin API secret.
    #[arg(long, env = "CLOUDINARY_API_SECRET", hide_env_values = true)]
    pub api_secret: String,

    /// Admin API endpoint, overridable for proxies and local fakes.
    #[arg(long, default_value = DEFAULT_API_BASE_URL, env = "CLOUDINARY_API_BASE_URL")]
    pub api_base_url: String,

    // =========================================================================
    // Feed Configuration
    // =========================================================================
    /// Maximum number of images taken from each folder (1-500).
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_RESULTS_PER_FOLDER,
        env = "GALLERY_MAX_RESULTS_PER_FOLDER"
    )]
    pub max_results_per_folder: u32,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "GALLERY_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.cloud_name.trim().is_empty() {
            return Err(
                "Cloud name is required. Set --cloud-name or CLOUDINARY_CLOUD_NAME".to_string(),
            );
        }
        if self.api_key.trim().is_empty() {
            return Err("API key is required. Set --api-key or CLOUDINARY_API_KEY".to_string());
        }
        if self.api_secret.trim().is_empty() {
            return Err(
                "API secret is required. Set --api-secret or CLOUDINARY_API_SECRET".to_string(),
            );
        }

        self.api_base_url()?;

        if self.max_results_per_folder == 0
            || self.max_results_per_folder > MAX_RESULTS_PER_FOLDER_LIMIT
        {
            return Err(format!(
                "max_results_per_folder must be between 1 and {}",
                MAX_RESULTS_PER_FOLDER_LIMIT
            ));
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parse the Admin API endpoint.
    pub fn api_base_url(&self) -> Result<Url, String> {
        let url = Url::parse(&self.api_base_url)
            .map_err(|e| format!("Invalid API base URL '{}': {}", self.api_base_url, e))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(format!(
                "Invalid API base URL '{}': unsupported scheme '{}'",
                self.api_base_url, other
            )),
        }
    }

    /// Upstream account credentials.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.cloud_name, &self.api_key, &self.api_secret)
    }

    /// Aggregation pipeline options.
    pub fn gallery_options(&self) -> GalleryOptions {
        GalleryOptions::default().with_max_results_per_folder(self.max_results_per_folder)
    }
}

// =============================================================================
// Tests
// =============================================================================
