pub mod descriptions;
pub mod error;
pub mod filter;
pub mod hidden;
pub mod outline;
pub mod rows;
pub mod scanner;
pub mod size;

use std::path::PathBuf;

/// One filesystem object seen during enumeration of a directory level.
///
/// Produced transiently by [`scanner::list_visible_children`]; never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub is_directory: bool,
}

pub use descriptions::DescriptionStore;
pub use error::ScanError;
pub use filter::{parse_extension_filter, should_exclude, FilterSettings};
pub use hidden::is_hidden;
pub use outline::{render_outline, OutlineReport, RenderCounters};
pub use rows::{collect_rows, write_csv, EntryKind, ManifestRow};
pub use scanner::list_visible_children;
pub use size::folder_size;
