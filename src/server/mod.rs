//! HTTP server layer for the gallery feed.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                     HTTP Layer                      │
//! │          GET /images?page=<int>&limit=<int>         │
//! │                                                     │
//! │   ┌─────────────────────┐  ┌─────────────────────┐  │
//! │   │      handlers       │  │       routes        │  │
//! │   │ (requests, errors)  │  │ (router, CORS)      │  │
//! │   └─────────────────────┘  └─────────────────────┘  │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    health_handler, images_handler, AppState, ErrorResponse, HealthResponse, ImagesQueryParams,
    FETCH_FAILED_MESSAGE,
};
pub use routes::{create_router, RouterConfig};
