//! Folder enumeration.
//!
//! Walks the upstream folder hierarchy depth-first and returns every folder
//! path in pre-order. The walk uses an explicit stack, so deep hierarchies do
//! not grow the call stack.

use std::collections::HashSet;

use tracing::{debug, warn};

use super::partial::{Fault, FaultKind, Partial};
use crate::error::UpstreamError;
use crate::upstream::{FolderEntry, MediaSource};

/// Join a parent path and a child folder name.
pub fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// List the immediate children of `path` ("" lists the root folders).
async fn list_children<S>(source: &S, path: &str) -> Result<Vec<FolderEntry>, UpstreamError>
where
    S: MediaSource + ?Sized,
{
    if path.is_empty() {
        source.root_folders().await
    } else {
        source.sub_folders(path).await
    }
}

/// Enumerate every folder below `start`, depth-first pre-order.
///
/// The start path itself is not part of the result. A path whose listing
/// fails contributes no children; the failure is recorded as a fault and the
/// walk continues with the folders already discovered. A path reported more
/// than once is only visited the first time.
pub async fn enumerate_folders<S>(source: &S, start: &str) -> Partial<Vec<String>>
where
    S: MediaSource + ?Sized,
{
    let mut folders = Vec::new();
    let mut faults = Vec::new();

    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(start.to_string());

    // Top of the stack is the next folder in pre-order.
    let mut pending = vec![start.to_string()];

    while let Some(path) = pending.pop() {
        if path != start {
            folders.push(path.clone());
        }

        let children = match list_children(source, &path).await {
            Ok(children) => children,
            Err(err) => {
                warn!(path = %path, error = %err, "Failed to list subfolders");
                faults.push(Fault::new(path, FaultKind::ListFolders, &err));
                continue;
            }
        };

        let before = pending.len();
        for child in &children {
            let full = child_path(&path, &child.name);
            if seen.insert(full.clone()) {
                pending.push(full);
            }
        }
        // Siblings must pop in listing order.
        pending[before..].reverse();
    }

    debug!(
        start = start,
        folders = folders.len(),
        faults = faults.len(),
        "Folder enumeration finished"
    );

    Partial::degraded(folders, faults)
}
