pub mod settings;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Persisted application configuration: default filter inputs and export
/// filenames, plus the last directory the user worked on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub exclude_hidden: bool,
    /// Raw comma-separated extension list, kept as entered so it can be
    /// shown back to the user verbatim.
    pub exclude_extensions: String,
    pub last_directory: Option<PathBuf>,
    pub markdown_filename: String,
    pub plain_text_filename: String,
    pub csv_filename: String,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        settings::load_config()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            exclude_hidden: false,
            exclude_extensions: String::new(),
            last_directory: None,
            markdown_filename: "file_tree.md".to_string(),
            plain_text_filename: "file_tree.txt".to_string(),
            csv_filename: "file_tree.csv".to_string(),
        }
    }
}
