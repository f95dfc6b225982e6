//! Data models for runbook indexing.
//!
//! This module defines the core data structures used throughout the application:
//! - [`IndexConfig`]: the ordered set of folders to index and the index filename
//! - [`RunbookFile`]: a single Markdown runbook discovered on disk
//! - [`RunbookTitle`] and [`TitleSource`]: a display title together with where
//!   it came from (a Markdown heading, or the file name fallback)
//!
//! Everything here is recomputed from the filesystem on every invocation; the
//! only persisted state is the written index files themselves.

use serde::Deserialize;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::info;

/// Folder categories indexed when no config file is supplied.
pub const DEFAULT_FOLDERS: [&str; 7] = [
    "Firewall", "Windows", "Linux", "Cloud", "Email", "Endpoint", "Network",
];

fn default_index_filename() -> String {
    "README.md".to_string()
}

fn default_folders() -> Vec<String> {
    DEFAULT_FOLDERS.iter().map(|s| s.to_string()).collect()
}

/// Configuration for one indexing run.
///
/// The folder list is an explicit, ordered value passed into the generator
/// rather than ambient global state, so the pipeline stays testable in
/// isolation. It can be overridden from a YAML file:
///
/// ```yaml
/// folders:
///   - Firewall
///   - Cloud
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    /// Ordered list of top-level folder names to index.
    #[serde(default = "default_folders")]
    pub folders: Vec<String>,
    /// Name of the generated index file inside each folder (and of the root
    /// document the auto-index block lives in).
    #[serde(default = "default_index_filename")]
    pub index_filename: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            folders: default_folders(),
            index_filename: default_index_filename(),
        }
    }
}

impl IndexConfig {
    /// Load a configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid YAML.
    pub async fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        let raw = fs::read_to_string(path).await?;
        let config: IndexConfig = serde_yaml::from_str(&raw)?;
        info!(path, folders = config.folders.len(), "Loaded configuration");
        Ok(config)
    }

    /// Whether `name` is this run's index file, compared case-insensitively
    /// so an existing `readme.md` is excluded from its own listing.
    pub fn is_index_file(&self, name: &str) -> bool {
        name.eq_ignore_ascii_case(&self.index_filename)
    }
}

/// A Markdown runbook discovered inside one of the configured folders.
///
/// The file's existence and content belong to the surrounding repository;
/// this tool only reads it.
#[derive(Debug, Clone)]
pub struct RunbookFile {
    /// Base file name, used both as the sort key and as the relative link.
    pub name: String,
    /// Location of the file on disk.
    pub path: PathBuf,
}

/// Where a runbook's display title came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleSource {
    /// Taken from the first Markdown heading line in the file.
    Heading,
    /// Derived from the file name because no heading was found or the file
    /// could not be read.
    FileName,
}

/// A display title for a runbook, with its provenance.
///
/// Carrying [`TitleSource`] makes the filename-fallback path observable to
/// tests instead of being an absorbed failure.
#[derive(Debug, Clone)]
pub struct RunbookTitle {
    /// The text rendered into the index's link list.
    pub text: String,
    /// Whether the text came from a heading or the file name.
    pub source: TitleSource,
}
