//! The nested outline projection of a filtered directory tree.
//!
//! This is the representation shared by the Markdown and plain-text exports;
//! the two differ only in the destination file extension chosen by the
//! shell.

use std::fs;
use std::path::Path;

use crate::utils::format_size;

use super::descriptions::DescriptionStore;
use super::filter::FilterSettings;
use super::scanner::list_visible_children;
use super::size::folder_size;
use super::ScanError;

const CONNECTOR_MIDDLE: &str = "├── ";
const CONNECTOR_LAST: &str = "└── ";
const EXTENSION_BAR: &str = "│   ";
const EXTENSION_BLANK: &str = "    ";

const PLACEHOLDER_DENIED: &str = "[Permission Denied]";
const PLACEHOLDER_NOT_FOUND: &str = "[Not Found]";
const PLACEHOLDER_EMPTY: &str = "[Empty Folder]";

/// Aggregate counters for one render invocation.
///
/// Zeroed at render start and returned with the output; never reused across
/// renders, so every export reflects the live filesystem and the filters
/// active for that pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderCounters {
    /// Successfully listed directories below the selected root.
    pub folders: usize,
    /// Admitted files.
    pub files: usize,
    /// Sum of admitted file sizes in bytes. Directory sizes are derived by
    /// recursive summation and never added here.
    pub total_size: u64,
}

/// The rendered outline plus the counters accumulated while walking.
#[derive(Debug, Clone)]
pub struct OutlineReport {
    pub text: String,
    pub counters: RenderCounters,
}

/// Renders the filtered tree under `root` as a connector-prefixed outline
/// with a trailing summary block.
///
/// Structural failures never abort the walk: an unlistable directory
/// renders a single placeholder line and the rest of the tree still
/// renders.
pub fn render_outline(
    root: &Path,
    settings: &FilterSettings,
    descriptions: &DescriptionStore,
) -> OutlineReport {
    let mut counters = RenderCounters::default();
    let mut lines = Vec::new();

    lines.push(root_display_name(root));
    render_directory(root, "", true, settings, descriptions, &mut lines, &mut counters);

    lines.push(String::new());
    lines.push("---".to_string());
    lines.push("**Summary:**".to_string());
    lines.push(format!("- Total folders: {}", counters.folders));
    lines.push(format!("- Total files: {}", counters.files));
    lines.push(format!("- Total size: {}", format_size(counters.total_size)));

    OutlineReport {
        text: lines.join("\n"),
        counters,
    }
}

fn root_display_name(root: &Path) -> String {
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string())
}

/// Emits the children of one directory, depth-first and pre-order.
///
/// The caller has already emitted the line for `path` itself (or the root
/// heading), so a listing failure here renders exactly one placeholder
/// under the current prefix and contributes nothing to the counters.
fn render_directory(
    path: &Path,
    prefix: &str,
    is_root: bool,
    settings: &FilterSettings,
    descriptions: &DescriptionStore,
    lines: &mut Vec<String>,
    counters: &mut RenderCounters,
) {
    let children = match list_visible_children(path, settings) {
        Ok(children) => children,
        Err(ScanError::NotFound(_, _)) => {
            lines.push(format!("{prefix}{CONNECTOR_LAST}{PLACEHOLDER_NOT_FOUND}"));
            return;
        }
        Err(ScanError::AccessDenied(denied, _)) => {
            tracing::debug!("Skipping unreadable directory {:?}", denied);
            lines.push(format!("{prefix}{CONNECTOR_LAST}{PLACEHOLDER_DENIED}"));
            return;
        }
    };

    if !is_root {
        counters.folders += 1;
    }

    if children.is_empty() {
        lines.push(format!("{prefix}{CONNECTOR_LAST}{PLACEHOLDER_EMPTY}"));
        return;
    }

    let last_index = children.len() - 1;
    for (index, child) in children.iter().enumerate() {
        let is_last = index == last_index;
        let connector = if is_last { CONNECTOR_LAST } else { CONNECTOR_MIDDLE };
        let extension = if is_last { EXTENSION_BLANK } else { EXTENSION_BAR };

        let size = if child.is_directory {
            folder_size(&child.path, settings)
        } else {
            file_size(&child.path)
        };

        if child.is_directory {
            lines.push(format!(
                "{prefix}{connector}**{}** [ {} ]",
                child.name,
                format_size(size)
            ));
        } else {
            lines.push(format!(
                "{prefix}{connector}{} [ {} ]",
                child.name,
                format_size(size)
            ));
            counters.files += 1;
            counters.total_size += size;
        }

        if let Some(description) = descriptions.get(&child.path).filter(|d| !d.is_empty()) {
            lines.push(format!("{prefix}{extension}<!-- {description} -->"));
        }

        if child.is_directory {
            let child_prefix = format!("{prefix}{extension}");
            render_directory(
                &child.path,
                &child_prefix,
                false,
                settings,
                descriptions,
                lines,
                counters,
            );
        }
    }
}

/// Direct size of a single file, 0 when it cannot be read. Symlinks are not
/// followed, matching the lister's classification.
fn file_size(path: &Path) -> u64 {
    fs::symlink_metadata(path)
        .map(|metadata| metadata.len())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn connectors_and_prefixes_nest_correctly() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"1234").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/c.txt"), b"0123456789").unwrap();

        let report = render_outline(
            dir.path(),
            &FilterSettings::default(),
            &DescriptionStore::empty(),
        );

        let lines: Vec<&str> = report.text.lines().collect();
        assert_eq!(lines[1], "├── a.txt [ 4 B ]");
        assert_eq!(lines[2], "└── **sub** [ 10 B ]");
        assert_eq!(lines[3], "    └── c.txt [ 10 B ]");
    }

    #[test]
    fn description_lines_follow_their_entry() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"1234").unwrap();
        fs::write(dir.path().join("b.txt"), b"12").unwrap();

        let mut descriptions = DescriptionStore::empty();
        descriptions.set(dir.path().join("a.txt"), "raw capture".into());

        let report = render_outline(dir.path(), &FilterSettings::default(), &descriptions);
        let lines: Vec<&str> = report.text.lines().collect();
        assert_eq!(lines[1], "├── a.txt [ 4 B ]");
        assert_eq!(lines[2], "│   <!-- raw capture -->");
        assert_eq!(lines[3], "└── b.txt [ 2 B ]");
    }

    #[test]
    fn empty_descriptions_are_not_rendered() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"1234").unwrap();

        let mut descriptions = DescriptionStore::empty();
        descriptions.set(dir.path().join("a.txt"), String::new());

        let report = render_outline(dir.path(), &FilterSettings::default(), &descriptions);
        assert!(!report.text.contains("<!--"));
    }

    #[test]
    fn missing_root_renders_not_found_placeholder() {
        let dir = tempdir().unwrap();
        let gone = dir.path().join("gone");

        let report = render_outline(
            &gone,
            &FilterSettings::default(),
            &DescriptionStore::empty(),
        );

        let lines: Vec<&str> = report.text.lines().collect();
        assert_eq!(lines[0], "gone");
        assert_eq!(lines[1], "└── [Not Found]");
        assert_eq!(report.counters, RenderCounters::default());
    }
}
