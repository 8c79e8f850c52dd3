//! Upstream media-hosting collaborator.
//!
//! The gallery only needs three operations from the hosting service. They are
//! captured by the [`MediaSource`] trait so the aggregation pipeline can run
//! against the real API or an in-memory double.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │            Aggregation Pipeline          │
//! └────────────────────┬─────────────────────┘
//!                      │
//!                      ▼
//! ┌──────────────────────────────────────────┐
//! │            MediaSource Trait             │
//! │  root_folders / sub_folders / resources  │
//! └────────────────────┬─────────────────────┘
//!                      │
//!                      ▼
//! ┌──────────────────────────────────────────┐
//! │            CloudinaryClient              │
//! │      (Admin REST API over reqwest)       │
//! └──────────────────────────────────────────┘
//! ```

mod cloudinary;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::UpstreamError;

pub use cloudinary::{CloudinaryClient, Credentials, DEFAULT_API_BASE_URL};

// =============================================================================
// Entries
// =============================================================================

/// A folder as reported by the upstream service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FolderEntry {
    /// Last path segment
    pub name: String,

    /// Full slash-delimited path from the root
    pub path: String,
}

impl FolderEntry {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// An uploaded resource as reported by the upstream service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceEntry {
    /// Storage identifier, including the folder prefix
    pub public_id: String,

    /// HTTPS delivery URL
    pub secure_url: String,
}

// =============================================================================
// MediaSource Trait
// =============================================================================

/// The upstream operations the gallery consumes.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// List the folders at the top of the hierarchy.
    async fn root_folders(&self) -> Result<Vec<FolderEntry>, UpstreamError>;

    /// List the immediate child folders of `path`.
    async fn sub_folders(&self, path: &str) -> Result<Vec<FolderEntry>, UpstreamError>;

    /// List upload resources whose storage path starts with `prefix`.
    ///
    /// At most `max_results` entries are returned, in upstream order.
    async fn upload_resources(
        &self,
        prefix: &str,
        max_results: u32,
    ) -> Result<Vec<ResourceEntry>, UpstreamError>;
}
