//! Aggregation pipeline for the image feed.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      GalleryService                         │
//! │  ┌───────────────────────────────────────────────────────┐  │
//! │  │                       page()                          │  │
//! │  │  1. Enumerate folders    4. Shuffle the collection    │  │
//! │  │  2. Prepend the root     5. Slice the requested page  │  │
//! │  │  3. Fetch per folder                                  │  │
//! │  └───────────────────────────────────────────────────────┘  │
//! │            │                          │                     │
//! │            ▼                          ▼                     │
//! │   ┌──────────────────┐       ┌──────────────────┐           │
//! │   │ enumerate_folders│       │   fetch_images   │           │
//! │   └──────────────────┘       └──────────────────┘           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every request re-enumerates and re-fetches from the upstream service.
//! Folders are processed one at a time, never concurrently.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use super::folders::enumerate_folders;
use super::images::fetch_images;
use super::pagination::PageRequest;
use super::partial::{Fault, Partial};
use crate::error::GalleryError;
use crate::upstream::MediaSource;

/// Default number of images fetched from each folder.
pub const DEFAULT_MAX_RESULTS_PER_FOLDER: u32 = 30;

/// Largest per-folder cap the upstream accepts.
pub const MAX_RESULTS_PER_FOLDER_LIMIT: u32 = 500;

// =============================================================================
// Options
// =============================================================================

/// Tunables for the aggregation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryOptions {
    /// Cap on images taken from a single folder
    pub max_results_per_folder: u32,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            max_results_per_folder: DEFAULT_MAX_RESULTS_PER_FOLDER,
        }
    }
}

impl GalleryOptions {
    pub fn with_max_results_per_folder(mut self, max_results: u32) -> Self {
        self.max_results_per_folder = max_results;
        self
    }
}

// =============================================================================
// Image Page
// =============================================================================

/// One page of the shuffled feed.
#[derive(Debug, Clone)]
pub struct ImagePage {
    /// Image URLs on this page
    pub images: Vec<String>,

    /// Size of the whole shuffled collection
    pub total: usize,

    /// Upstream failures recorded while building the collection
    pub faults: Vec<Fault>,
}

impl ImagePage {
    /// Whether part of the hierarchy could not be read.
    pub fn is_degraded(&self) -> bool {
        !self.faults.is_empty()
    }
}

/// Shuffle a collected feed and cut out the requested page.
///
/// The shuffle is a uniform Fisher-Yates permutation drawn from `rng`.
pub fn assemble<R>(
    collection: Partial<Vec<String>>,
    request: PageRequest,
    rng: &mut R,
) -> ImagePage
where
    R: Rng + ?Sized,
{
    let (mut images, faults) = collection.into_parts();
    images.shuffle(rng);

    ImagePage {
        images: request.slice(&images),
        total: images.len(),
        faults,
    }
}

// =============================================================================
// Gallery Service
// =============================================================================

/// Builds the shuffled, paginated image feed from a `MediaSource`.
///
/// # Example
///
/// ```ignore
/// use gallery_feed::gallery::{GalleryOptions, GalleryService, PageRequest};
///
/// let service = GalleryService::new(client, GalleryOptions::default());
/// let page = service.page(PageRequest::new(1, 30)).await?;
/// println!("{} of {} images", page.images.len(), page.total);
/// ```
pub struct GalleryService<S: MediaSource> {
    source: Arc<S>,
    options: GalleryOptions,
}

impl<S: MediaSource> Clone for GalleryService<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            options: self.options,
        }
    }
}

impl<S: MediaSource + 'static> GalleryService<S> {
    /// Create a service over the given source.
    pub fn new(source: S, options: GalleryOptions) -> Self {
        Self {
            source: Arc::new(source),
            options,
        }
    }

    /// Get a reference to the upstream source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Collect every image URL in the hierarchy, unshuffled.
    ///
    /// The root is always fetched first, followed by every enumerated folder
    /// in pre-order. Upstream failures are carried as faults.
    pub async fn collect(&self) -> Partial<Vec<String>> {
        let (mut folders, mut faults) = enumerate_folders(self.source.as_ref(), "")
            .await
            .into_parts();
        folders.insert(0, String::new());

        let mut images = Vec::new();
        for folder in &folders {
            let (urls, fetch_faults) =
                fetch_images(self.source.as_ref(), folder, self.options.max_results_per_folder)
                    .await
                    .into_parts();
            images.extend(urls);
            faults.extend(fetch_faults);
        }

        debug!(
            folders = folders.len(),
            images = images.len(),
            faults = faults.len(),
            "Collected gallery images"
        );

        Partial::degraded(images, faults)
    }

    /// Build one page of the shuffled feed.
    ///
    /// Collection runs on its own task; a panic anywhere in it is reported as
    /// [`GalleryError::Aborted`] instead of unwinding into the caller.
    pub async fn page(&self, request: PageRequest) -> Result<ImagePage, GalleryError> {
        let service = self.clone();
        let collection = tokio::spawn(async move { service.collect().await })
            .await
            .map_err(|e| GalleryError::Aborted(e.to_string()))?;

        let page = assemble(collection, request, &mut rand::rng());

        if page.is_degraded() {
            warn!(
                faults = page.faults.len(),
                total = page.total,
                "Serving degraded gallery page"
            );
        }

        Ok(page)
    }
}

// =============================================================================
// Tests
// =============================================================================
