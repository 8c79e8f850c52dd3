//! HTTP request handlers for the gallery feed.
//!
//! # Endpoints
//!
//! - `GET /images?page=<int>&limit=<int>` - One page of the shuffled feed
//! - `GET /health` - Health check endpoint
//!
//! `/images` is the only route that serves the feed. `/health` is an
//! operational addition for load balancers and process supervisors; it never
//! touches the upstream service.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::GalleryError;
use crate::gallery::{GalleryService, PageRequest};
use crate::upstream::MediaSource;

/// Body message for every failed feed request.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch images";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the gallery service.
///
/// This is passed to all handlers via Axum's State extractor.
pub struct AppState<S: MediaSource> {
    /// The aggregation pipeline
    pub gallery: GalleryService<S>,
}

impl<S: MediaSource> AppState<S> {
    pub fn new(gallery: GalleryService<S>) -> Self {
        Self { gallery }
    }
}

impl<S: MediaSource> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            gallery: self.gallery.clone(),
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Query parameters for the images endpoint.
///
/// Kept as raw strings so a non-numeric value falls back to its default
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ImagesQueryParams {
    /// 1-based page number (default: 1)
    #[serde(default)]
    pub page: Option<String>,

    /// Page size (default: 30)
    #[serde(default)]
    pub limit: Option<String>,
}

impl ImagesQueryParams {
    /// Resolve into a page request, applying defaults.
    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_raw(self.page.as_deref(), self.limit.as_deref())
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Every aggregation failure is reported as the same generic 500.
impl IntoResponse for GalleryError {
    fn into_response(self) -> Response {
        error!(error = %self, "Failed to build image feed");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(FETCH_FAILED_MESSAGE)),
        )
            .into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle image feed requests.
///
/// # Endpoint
///
/// `GET /images`
///
/// # Query Parameters
///
/// - `page`: 1-based page number (default: 1)
/// - `limit`: Page size (default: 30)
///
/// Each value is read up to its first non-digit (`2abc` is 2, `12.7` is 12).
/// Missing values, or values without leading digits, use the defaults, and
/// `page=0` means the first page. Pages past the end, a negative page, or a
/// limit of zero or less produce an empty array.
///
/// # Response
///
/// `200 OK` with a JSON array of image URLs:
/// ```json
/// ["https://res.cloudinary.com/demo/image/upload/v1/a.jpg", "..."]
/// ```
///
/// Upstream failures for individual folders still produce `200 OK` with the
/// images that could be gathered.
///
/// # Errors
///
/// - `500 Internal Server Error`: `{"error": "Failed to fetch images"}`
pub async fn images_handler<S: MediaSource + 'static>(
    State(state): State<AppState<S>>,
    Query(query): Query<ImagesQueryParams>,
) -> Result<Json<Vec<String>>, GalleryError> {
    let request = query.page_request();
    let page = state.gallery.page(request).await?;

    debug!(
        page = request.page,
        limit = request.limit,
        returned = page.images.len(),
        total = page.total,
        "Serving image page"
    );

    Ok(Json(page.images))
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
