//! Repository existence probe.

use std::fs;
use std::path::Path;

/// Returns true if `path` has an `objects` subdirectory.
///
/// This is a layout heuristic, not a full repository check. Any stat
/// failure, including a missing path, is logged and reported as `false`.
pub fn looks_like_repo(path: &Path) -> bool {
    let objects = path.join("objects");
    match fs::metadata(&objects) {
        Ok(meta) => meta.is_dir(),
        Err(e) => {
            tracing::warn!(path = %objects.display(), error = %e, "repository probe failed");
            false
        }
    }
}
