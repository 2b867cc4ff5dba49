//! The description sidecar: a JSON map stored next to the described data.
//!
//! Descriptions are keyed by absolute path and live in a single
//! `.descriptions.json` file inside the selected directory. The file is
//! loaded whole when a directory is selected and rewritten whole on every
//! mutation; the renderer only ever reads the in-memory map.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;

/// Name of the sidecar file inside the selected directory.
pub const SIDECAR_FILENAME: &str = ".descriptions.json";

/// In-memory description map plus the sidecar location it persists to.
#[derive(Debug, Clone, Default)]
pub struct DescriptionStore {
    sidecar_path: Option<PathBuf>,
    entries: BTreeMap<PathBuf, String>,
}

impl DescriptionStore {
    /// An empty store with no backing file. Useful when rendering without
    /// annotations; [`DescriptionStore::save`] rejects it.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads the sidecar from `root`. A missing file yields an empty map;
    /// an unparsable file is reported and also yields an empty map, so a
    /// corrupt sidecar never blocks rendering.
    pub fn load(root: &Path) -> Self {
        let sidecar_path = root.join(SIDECAR_FILENAME);

        let entries = match fs::read_to_string(&sidecar_path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse description sidecar at {:?}: {}. Starting empty.",
                        sidecar_path,
                        e
                    );
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };

        Self {
            sidecar_path: Some(sidecar_path),
            entries,
        }
    }

    /// Rewrites the whole sidecar file, pretty-printed with a 4-space
    /// indent, UTF-8 encoded.
    pub fn save(&self) -> Result<()> {
        let Some(sidecar_path) = &self.sidecar_path else {
            bail!("description store has no sidecar file to save to");
        };

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.entries
            .serialize(&mut serializer)
            .context("serializing descriptions")?;

        fs::write(sidecar_path, buf)
            .with_context(|| format!("writing description sidecar {sidecar_path:?}"))?;
        tracing::debug!("Saved {} description(s) to {:?}", self.entries.len(), sidecar_path);
        Ok(())
    }

    /// Keyed lookup by absolute path.
    pub fn get(&self, path: &Path) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn set(&mut self, path: PathBuf, description: String) {
        self.entries.insert(path, description);
    }

    /// Removes the entry for `path`; returns whether one existed.
    pub fn remove(&mut self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
