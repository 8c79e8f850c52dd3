//! Per-folder image fetching.

use tracing::{debug, warn};

use super::partial::{Fault, FaultKind, Partial};
use crate::upstream::MediaSource;

/// Storage prefix for the resources directly under `folder`.
///
/// The root uses an empty prefix; any other folder gets a trailing slash so
/// `A` does not also match `AB/...`.
pub fn folder_prefix(folder: &str) -> String {
    if folder.is_empty() {
        String::new()
    } else {
        format!("{}/", folder)
    }
}

/// Fetch up to `max_results` image URLs stored under `folder`.
///
/// URLs keep the upstream order. A failing fetch yields no images and a
/// recorded fault rather than an error.
pub async fn fetch_images<S>(source: &S, folder: &str, max_results: u32) -> Partial<Vec<String>>
where
    S: MediaSource + ?Sized,
{
    let prefix = folder_prefix(folder);

    match source.upload_resources(&prefix, max_results).await {
        Ok(resources) => {
            debug!(folder = folder, count = resources.len(), "Fetched images");
            Partial::complete(resources.into_iter().map(|r| r.secure_url).collect())
        }
        Err(err) => {
            warn!(folder = folder, error = %err, "Failed to fetch images from folder");
            Partial::degraded(
                Vec::new(),
                vec![Fault::new(folder, FaultKind::ListResources, &err)],
            )
        }
    }
}
