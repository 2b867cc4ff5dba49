//! The flat row projection of a filtered directory tree, used for CSV
//! export.
//!
//! Unlike the outline projection this is a plain data dump: no placeholder
//! rows, no counters. A branch that cannot be listed simply ends silently.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::descriptions::DescriptionStore;
use super::filter::FilterSettings;
use super::scanner::list_visible_children;
use super::size::folder_size;

pub const CSV_HEADER: [&str; 5] = ["Path", "Type", "Name", "Size (Bytes)", "Description"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Directory => "Directory",
            EntryKind::File => "File",
        }
    }
}

/// One exported row: an admitted entry with its path relative to the
/// selected root, its recursive (directories) or direct (files) size, and
/// its description, empty when none is set.
#[derive(Debug, Clone)]
pub struct ManifestRow {
    pub path: String,
    pub kind: EntryKind,
    pub name: String,
    pub size: u64,
    pub description: String,
}

/// Walks the filtered tree depth-first, pre-order, and returns one row per
/// admitted entry. The selected root itself gets no row.
pub fn collect_rows(
    root: &Path,
    settings: &FilterSettings,
    descriptions: &DescriptionStore,
) -> Vec<ManifestRow> {
    let mut rows = Vec::new();
    collect_directory(root, root, settings, descriptions, &mut rows);
    rows
}

fn collect_directory(
    root: &Path,
    dir: &Path,
    settings: &FilterSettings,
    descriptions: &DescriptionStore,
    rows: &mut Vec<ManifestRow>,
) {
    let Ok(children) = list_visible_children(dir, settings) else {
        return;
    };

    for child in children {
        let (kind, size) = if child.is_directory {
            (EntryKind::Directory, folder_size(&child.path, settings))
        } else {
            (EntryKind::File, file_size(&child.path))
        };

        let relative_path = child
            .path
            .strip_prefix(root)
            .unwrap_or(&child.path)
            .to_string_lossy()
            .into_owned();

        rows.push(ManifestRow {
            path: relative_path,
            kind,
            name: child.name.clone(),
            size,
            description: descriptions.get(&child.path).unwrap_or("").to_string(),
        });

        if child.is_directory {
            collect_directory(root, &child.path, settings, descriptions, rows);
        }
    }
}

fn file_size(path: &Path) -> u64 {
    fs::symlink_metadata(path)
        .map(|metadata| metadata.len())
        .unwrap_or(0)
}

/// Writes the header row plus one record per manifest row, with standard
/// CSV quoting.
pub fn write_csv<W: Write>(rows: &[ManifestRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(CSV_HEADER)
        .context("writing CSV header")?;

    for row in rows {
        let size = row.size.to_string();
        csv_writer
            .write_record([
                row.path.as_str(),
                row.kind.as_str(),
                row.name.as_str(),
                size.as_str(),
                row.description.as_str(),
            ])
            .with_context(|| format!("writing CSV row for {}", row.path))?;
    }

    csv_writer.flush().context("flushing CSV output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn rows_cover_files_and_directories_in_preorder() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"1234").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/c.txt"), b"0123456789").unwrap();

        let rows = collect_rows(
            dir.path(),
            &FilterSettings::default(),
            &DescriptionStore::empty(),
        );

        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a.txt", "sub", "c.txt"]);
        assert_eq!(rows[1].kind, EntryKind::Directory);
        assert_eq!(rows[1].size, 10);
        assert_eq!(rows[2].path, Path::new("sub").join("c.txt").to_string_lossy());
    }

    #[test]
    fn csv_output_has_header_and_quotes_embedded_commas() {
        let rows = vec![ManifestRow {
            path: "notes.txt".into(),
            kind: EntryKind::File,
            name: "notes.txt".into(),
            size: 7,
            description: "draft, do not share".into(),
        }];

        let mut buf = Vec::new();
        write_csv(&rows, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Path,Type,Name,Size (Bytes),Description"));
        assert_eq!(
            lines.next(),
            Some("notes.txt,File,notes.txt,7,\"draft, do not share\"")
        );
    }
}
