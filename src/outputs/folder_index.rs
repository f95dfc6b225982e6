//! Per-folder index generation.
//!
//! Each configured folder gets a fully regenerated `README.md` on every run:
//! a header naming the folder, a bulleted list of its runbooks (linked by
//! relative file name, ordered by case-insensitive file name), a fixed block
//! of usage notes, and a UTC timestamp footer.
//!
//! The index is only written back when its bytes differ from what is already
//! on disk, so untouched folders keep their modification times.

use crate::models::{IndexConfig, RunbookFile};
use crate::title::runbook_title;
use crate::utils::utc_stamp;
use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};

/// Enumerate the Markdown runbooks directly inside `folder`.
///
/// Non-recursive. The folder's own index file is excluded by
/// case-insensitive name match; the `.md` extension match is likewise
/// case-insensitive. Results are sorted ascending by lowercased file name,
/// which is the ordering the rendered list uses.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
#[instrument(level = "debug", skip_all, fields(folder = %folder.display()))]
pub async fn collect_runbooks(
    folder: &Path,
    config: &IndexConfig,
) -> Result<Vec<RunbookFile>, Box<dyn Error>> {
    let mut runbooks = Vec::new();
    let mut entries = fs::read_dir(folder).await?;
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let path = entry.path();
        let is_md = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("md"));
        if !is_md {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if config.is_index_file(&name) {
            continue;
        }
        runbooks.push(RunbookFile { name, path });
    }
    runbooks.sort_by_key(|r| r.name.to_lowercase());
    debug!(count = runbooks.len(), "Collected runbooks");
    Ok(runbooks)
}

/// Render the complete index document for one folder.
///
/// The runbooks must already be in listing order (see [`collect_runbooks`]).
/// Each entry links the runbook's title to its relative file name; a folder
/// with no runbooks gets a single placeholder line instead. The caller
/// supplies the generation timestamp so rendering stays deterministic under
/// test.
///
/// # Returns
///
/// The full document text with a single trailing newline.
pub async fn render_folder_index(
    folder_name: &str,
    runbooks: &[RunbookFile],
    generated_at: DateTime<Utc>,
) -> String {
    let mut md = String::new();
    writeln!(md, "# 🔥 {folder_name} Runbooks").unwrap();
    writeln!(md).unwrap();
    writeln!(
        md,
        "This folder contains runbooks related to **{folder_name}** alerts and incidents."
    )
    .unwrap();
    writeln!(md, "\n---\n").unwrap();
    writeln!(md, "## 📘 Available Runbooks").unwrap();
    writeln!(md).unwrap();

    if runbooks.is_empty() {
        writeln!(md, "_(No runbooks yet—add some `.md` files!)_").unwrap();
    } else {
        for runbook in runbooks {
            let title = runbook_title(runbook).await;
            writeln!(md, "- [{}]({})", title.text, runbook.name).unwrap();
        }
    }

    writeln!(md, "\n---\n").unwrap();
    writeln!(md, "## 🛡️ Usage Notes").unwrap();
    writeln!(
        md,
        "- Each runbook follows a standard structure: Detection → Analysis (L1→L2→L3) → Containment → Eradication & Recovery → Evidence → Recommendations → Reporting."
    )
    .unwrap();
    writeln!(
        md,
        "- Cross-reference with SIEM, ticketing, and CMDB during triage."
    )
    .unwrap();
    writeln!(md).unwrap();
    writeln!(md, "_Last updated: {} (UTC)_", utc_stamp(generated_at)).unwrap();
    md
}

/// Write `rendered` to `index_path` only if the on-disk content differs.
///
/// The current content is taken as the empty string when the file does not
/// exist (or cannot be read), so a first run always writes. Parent
/// directories are created as needed.
///
/// # Returns
///
/// `true` if the file was written, `false` if it already matched.
///
/// # Errors
///
/// Returns an error if directory creation or the write itself fails.
#[instrument(level = "debug", skip_all, fields(path = %index_path.display()))]
pub async fn write_if_changed(
    index_path: &Path,
    rendered: &str,
) -> Result<bool, Box<dyn Error>> {
    let current = fs::read_to_string(index_path).await.unwrap_or_default();
    if current == rendered {
        debug!("Index unchanged; skipping write");
        return Ok(false);
    }
    if let Some(parent) = index_path.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(index_path, rendered).await?;
    info!(path = %index_path.display(), "Wrote folder index");
    Ok(true)
}

/// Regenerate one folder's index end to end.
///
/// A configured folder missing from disk is skipped silently (this is the
/// normal state for categories that have no runbooks yet).
///
/// # Returns
///
/// `Some(path)` of the index file when it was (re)written, `None` when the
/// folder is absent or the index already matched.
#[instrument(level = "info", skip_all, fields(folder = %folder_name))]
pub async fn generate_folder_index(
    root: &Path,
    folder_name: &str,
    config: &IndexConfig,
    generated_at: DateTime<Utc>,
) -> Result<Option<PathBuf>, Box<dyn Error>> {
    let folder = root.join(folder_name);
    if !folder.exists() {
        debug!("Configured folder not present; skipping");
        return Ok(None);
    }
    let runbooks = collect_runbooks(&folder, config).await?;
    let rendered = render_folder_index(folder_name, &runbooks, generated_at).await;
    let index_path = folder.join(&config.index_filename);
    if write_if_changed(&index_path, &rendered).await? {
        Ok(Some(index_path))
    } else {
        Ok(None)
    }
}
