//! Image feed aggregation.
//!
//! Turns a folder hierarchy on the upstream service into a single shuffled,
//! paginated list of image URLs.
//!
//! # Pipeline
//!
//! ```text
//! enumerate_folders("")  ──►  ["", A, A/B, ...]
//!                                   │
//!                                   ▼  one folder at a time
//!                          fetch_images(folder)
//!                                   │
//!                                   ▼
//!                     concatenate ─► shuffle ─► slice page
//! ```
//!
//! Upstream failures never abort the pipeline. They are recorded as
//! [`Fault`]s on a [`Partial`] result and the affected folder contributes
//! nothing.

mod folders;
mod images;
mod pagination;
mod partial;
mod service;

pub use folders::{child_path, enumerate_folders};
pub use images::{fetch_images, folder_prefix};
pub use pagination::{PageRequest, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use partial::{Fault, FaultKind, Partial};
pub use service::{
    assemble, GalleryOptions, GalleryService, ImagePage, DEFAULT_MAX_RESULTS_PER_FOLDER,
    MAX_RESULTS_PER_FOLDER_LIMIT,
};
