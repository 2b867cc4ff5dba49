//! The admit/reject predicate applied to every enumerated entry.

use std::collections::HashSet;
use std::path::Path;

use super::hidden::is_hidden;

/// Filter configuration for one render pass.
///
/// Captured once at the start of a traversal and passed by reference into
/// every recursive call, so the lister, the size aggregator and both
/// renderer projections always agree on what is visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSettings {
    pub exclude_hidden: bool,
    /// Lowercase path suffixes, e.g. `.log`.
    pub exclude_extensions: HashSet<String>,
}

impl FilterSettings {
    /// Builds settings from the shell's raw inputs: the exclude-hidden flag
    /// and a comma-separated extension list.
    pub fn new(exclude_hidden: bool, extension_list: &str) -> Self {
        Self {
            exclude_hidden,
            exclude_extensions: parse_extension_filter(extension_list),
        }
    }
}

/// Parses a comma-separated list of extension suffixes.
///
/// Entries are whitespace-trimmed, empty entries dropped, and the rest
/// normalized to lowercase.
pub fn parse_extension_filter(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|ext| !ext.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Returns true when the entry must not be admitted.
///
/// Hidden exclusion applies to files and directories alike. Extension
/// exclusion applies to files only: hidden folders like `.git` are caught by
/// the hidden flag, while extension filters target files, so a directory
/// named `archive.log` is never excluded by a `.log` filter.
pub fn should_exclude(path: &Path, is_directory: bool, settings: &FilterSettings) -> bool {
    if settings.exclude_hidden && is_hidden(path) {
        return true;
    }

    if !is_directory && !settings.exclude_extensions.is_empty() {
        let lowercase_path = path.to_string_lossy().to_lowercase();
        return settings
            .exclude_extensions
            .iter()
            .any(|ext| lowercase_path.ends_with(ext.as_str()));
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn settings(exclude_hidden: bool, extensions: &str) -> FilterSettings {
        FilterSettings::new(exclude_hidden, extensions)
    }

    #[test]
    fn parse_trims_drops_empties_and_lowercases() {
        let parsed = parse_extension_filter(" .LOG, .tmp ,, .Bak ");
        let expected: HashSet<String> = [".log", ".tmp", ".bak"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn parse_empty_input_yields_no_filters() {
        assert!(parse_extension_filter("").is_empty());
        assert!(parse_extension_filter("  , ,  ").is_empty());
    }

    #[test]
    fn extension_filter_excludes_matching_files() {
        let settings = settings(false, ".log");
        assert!(should_exclude(
            &PathBuf::from("/data/data.log"),
            false,
            &settings
        ));
        assert!(!should_exclude(
            &PathBuf::from("/data/data.txt"),
            false,
            &settings
        ));
    }

    #[test]
    fn extension_filter_is_case_insensitive_on_the_path() {
        let settings = settings(false, ".log");
        assert!(should_exclude(
            &PathBuf::from("/data/TRACE.LOG"),
            false,
            &settings
        ));
    }

    #[test]
    fn directories_are_never_excluded_by_extension() {
        let settings = settings(false, ".log");
        assert!(!should_exclude(
            &PathBuf::from("/data/archive.log"),
            true,
            &settings
        ));
    }

    #[cfg(not(windows))]
    #[test]
    fn hidden_exclusion_applies_to_files_and_directories() {
        let settings = settings(true, "");
        assert!(should_exclude(&PathBuf::from("/data/.env"), false, &settings));
        assert!(should_exclude(&PathBuf::from("/data/.git"), true, &settings));
        assert!(!should_exclude(
            &PathBuf::from("/data/visible"),
            true,
            &settings
        ));
    }

    #[test]
    fn no_filters_admit_everything() {
        let settings = FilterSettings::default();
        assert!(!should_exclude(
            &PathBuf::from("/data/anything.log"),
            false,
            &settings
        ));
    }
}
