//! Single-level directory enumeration under the active filter settings.

use std::fs;
use std::path::Path;

use super::filter::{should_exclude, FilterSettings};
use super::{Entry, ScanError};

/// Lists the immediate, admitted children of `path`, sorted by name
/// (case-insensitive, ascending; ties keep enumeration order).
///
/// The is-directory flag comes from the directory entry itself and does not
/// follow symlinks, so a symlinked directory is listed as a plain file and
/// never descended into. Entries whose type cannot be determined are treated
/// as files. Per-entry read failures are skipped; only the failure to open
/// `path` itself is surfaced, as a typed [`ScanError`].
pub fn list_visible_children(
    path: &Path,
    settings: &FilterSettings,
) -> Result<Vec<Entry>, ScanError> {
    let read_dir = fs::read_dir(path).map_err(|e| ScanError::from_io(e, path))?;

    let mut children = Vec::new();
    for dir_entry in read_dir {
        let Ok(dir_entry) = dir_entry else { continue };

        let entry_path = dir_entry.path();
        let is_directory = dir_entry
            .file_type()
            .map(|file_type| file_type.is_dir())
            .unwrap_or(false);

        if should_exclude(&entry_path, is_directory, settings) {
            continue;
        }

        children.push(Entry {
            name: dir_entry.file_name().to_string_lossy().into_owned(),
            path: entry_path,
            is_directory,
        });
    }

    // Stable, so equal keys keep the enumeration order the OS returned.
    children.sort_by_cached_key(|entry| entry.name.to_lowercase());

    Ok(children)
}
