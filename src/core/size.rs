//! Recursive, filter-aware folder size aggregation.

use std::path::Path;

use walkdir::WalkDir;

use super::filter::{should_exclude, FilterSettings};

/// Sums the sizes of all non-excluded regular files under `path`, applying
/// the same filter settings at every level. A directory excluded at any
/// level contributes zero and its subtree is not visited.
///
/// Size is a best-effort statistic: per-entry stat failures contribute 0 and
/// the walk continues, and an unreadable or vanished `path` yields 0 for the
/// whole subtree instead of an error. This is deliberately looser than the
/// lister's failure surfacing, which is structural.
pub fn folder_size(path: &Path, settings: &FilterSettings) -> u64 {
    let walker = WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0 || !should_exclude(entry.path(), entry.file_type().is_dir(), settings)
        });

    let mut total_size = 0u64;
    for entry in walker.filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        total_size += entry.metadata().map(|metadata| metadata.len()).unwrap_or(0);
    }

    total_size
}
