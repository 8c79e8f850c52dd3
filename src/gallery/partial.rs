//! Best-effort results.
//!
//! Folder listings and image fetches never fail the whole request. A failing
//! upstream call is recorded as a [`Fault`] next to whatever value could still
//! be produced, so callers can tell a degraded result from a complete one.

use std::fmt;

use crate::error::UpstreamError;

/// Which upstream operation a fault came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// Listing the child folders of a path
    ListFolders,

    /// Listing the resources stored under a path
    ListResources,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultKind::ListFolders => f.write_str("list_folders"),
            FaultKind::ListResources => f.write_str("list_resources"),
        }
    }
}

/// A recorded, non-fatal upstream failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    /// Folder path the failing call was about ("" for the root)
    pub path: String,

    /// Operation that failed
    pub kind: FaultKind,

    /// Rendered upstream error
    pub message: String,
}

impl Fault {
    pub fn new(path: impl Into<String>, kind: FaultKind, error: &UpstreamError) -> Self {
        Self {
            path: path.into(),
            kind,
            message: error.to_string(),
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed for {:?}: {}", self.kind, self.path, self.message)
    }
}

/// A value together with the faults recorded while producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partial<T> {
    value: T,
    faults: Vec<Fault>,
}

impl<T> Partial<T> {
    /// A result produced without any fault.
    pub fn complete(value: T) -> Self {
        Self {
            value,
            faults: Vec::new(),
        }
    }

    /// A result produced with the given faults.
    pub fn degraded(value: T, faults: Vec<Fault>) -> Self {
        Self { value, faults }
    }

    /// Whether any fault was recorded.
    pub fn is_degraded(&self) -> bool {
        !self.faults.is_empty()
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn faults(&self) -> &[Fault] {
        &self.faults
    }

    /// Split into the value and its faults.
    pub fn into_parts(self) -> (T, Vec<Fault>) {
        (self.value, self.faults)
    }
}
