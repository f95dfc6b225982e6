//! Runbook title extraction.
//!
//! A runbook's display title is the first Markdown heading in the file, with
//! the `#` markers stripped. When no heading exists, or the file cannot be
//! read at all, the title degrades to the capitalized file stem. Read
//! failures are absorbed here rather than propagated; the outcome is
//! reported through [`TitleSource`] instead.

use crate::models::{RunbookFile, RunbookTitle, TitleSource};
use crate::utils::title_case_stem;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io;
use std::path::Path;
use tokio::fs;
use tracing::{debug, instrument, warn};

static HEADING_MARKERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#+\s*").unwrap());

/// Produce the display title for a runbook.
///
/// Scans the file for its first heading line; on any failure (missing file,
/// permission error, no heading) falls back to a title derived from the file
/// name, e.g. `incident-response.md` becomes `Incident Response`.
///
/// # Arguments
///
/// * `file` - The runbook to title
#[instrument(level = "debug", skip_all, fields(name = %file.name))]
pub async fn runbook_title(file: &RunbookFile) -> RunbookTitle {
    match scan_for_heading(&file.path).await {
        Ok(Some(text)) => RunbookTitle {
            text,
            source: TitleSource::Heading,
        },
        Ok(None) => {
            debug!(name = %file.name, "No heading line; deriving title from file name");
            fallback_title(&file.path)
        }
        Err(e) => {
            warn!(name = %file.name, error = %e, "Unreadable runbook; deriving title from file name");
            fallback_title(&file.path)
        }
    }
}

/// Scan a file for its first Markdown heading.
///
/// The file is decoded leniently: invalid UTF-8 bytes are replaced rather
/// than failing the scan. The first line whose trimmed form starts with `#`
/// wins; scanning stops there.
///
/// # Returns
///
/// `Ok(Some(title))` with markers and surrounding whitespace stripped,
/// `Ok(None)` if no heading line exists, or the I/O error from reading.
async fn scan_for_heading(path: &Path) -> io::Result<Option<String>> {
    let bytes = fs::read(path).await?;
    let text = String::from_utf8_lossy(&bytes);
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('#') {
            let title = HEADING_MARKERS.replace(trimmed, "").trim().to_string();
            return Ok(Some(title));
        }
    }
    Ok(None)
}

fn fallback_title(path: &Path) -> RunbookTitle {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    RunbookTitle {
        text: title_case_stem(&stem),
        source: TitleSource::FileName,
    }
}
