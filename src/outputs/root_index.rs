//! Auto-index block maintenance for the root README.
//!
//! The root document carries a marker-delimited region listing a link to
//! each configured folder's index:
//!
//! ```text
//! <!-- AUTO-INDEX:START -->
//!
//! ## 📂 Runbook Folders
//! - [Firewall](Firewall/README.md)
//! - [Windows](Windows/README.md)
//!
//! <!-- AUTO-INDEX:END -->
//! ```
//!
//! When the markers are present the region between them is replaced
//! wholesale; when absent, the block is appended to the end of the document.
//! Either way exactly one marker pair remains afterwards. A repository
//! without a root README, or with none of the configured folders on disk,
//! is left untouched.

use crate::models::IndexConfig;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, instrument};

/// Literal marker opening the auto-index region.
pub const BLOCK_START: &str = "<!-- AUTO-INDEX:START -->";
/// Literal marker closing the auto-index region.
pub const BLOCK_END: &str = "<!-- AUTO-INDEX:END -->";

// Greedy span from the first start marker to the last end marker, so a
// document that somehow accumulated several marker pairs collapses back to
// exactly one on the next update.
static BLOCK_REGION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        "(?s){}.*{}",
        regex::escape(BLOCK_START),
        regex::escape(BLOCK_END)
    ))
    .unwrap()
});

/// Render the auto-index block for the given link lines.
pub fn render_auto_index(links: &[String]) -> String {
    format!(
        "{BLOCK_START}\n\n## 📂 Runbook Folders\n{}\n\n{BLOCK_END}",
        links.join("\n")
    )
}

/// Splice `block` into `content`.
///
/// If both markers are present, everything from the start marker through the
/// end marker (inclusive) is replaced; content outside the markers is not
/// touched. Otherwise the block is appended after a blank-line separator,
/// and the result gains a trailing newline.
pub fn inject_auto_index(content: &str, block: &str) -> String {
    if content.contains(BLOCK_START) && content.contains(BLOCK_END) {
        BLOCK_REGION.replace(content, NoExpand(block)).into_owned()
    } else {
        format!("{}\n\n{}\n", content.trim_end(), block)
    }
}

/// Refresh the auto-index block in the repository's root document.
///
/// Builds one `- [Name](Name/README.md)` link per configured folder that
/// exists on disk, in configured order. No root document, or no existing
/// folders, means nothing is written. Unlike the per-folder indexes, the
/// root document is always rewritten when this step runs.
///
/// # Errors
///
/// Returns an error if the root document cannot be read or written back.
#[instrument(level = "info", skip_all, fields(root = %root.display()))]
pub async fn update_root_readme(root: &Path, config: &IndexConfig) -> Result<(), Box<dyn Error>> {
    let readme_path = root.join(&config.index_filename);
    if !readme_path.exists() {
        debug!("No root document; skipping auto-index");
        return Ok(());
    }

    let links: Vec<String> = config
        .folders
        .iter()
        .filter(|name| root.join(name.as_str()).exists())
        .map(|name| format!("- [{name}]({name}/{})", config.index_filename))
        .collect();
    if links.is_empty() {
        debug!("No configured folders on disk; leaving root document alone");
        return Ok(());
    }

    let bytes = fs::read(&readme_path).await?;
    let content = String::from_utf8_lossy(&bytes);
    let updated = inject_auto_index(&content, &render_auto_index(&links));
    fs::write(&readme_path, updated).await?;
    info!(path = %readme_path.display(), links = links.len(), "Refreshed root auto-index");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn links(names: &[&str]) -> Vec<String> {
        names
            .iter()
            .map(|n| format!("- [{n}]({n}/README.md)"))
            .collect()
    }

    #[test]
    fn test_inject_replaces_existing_region() {
        let content = format!(
            "# SOC Runbooks\n\nIntro text.\n\n{BLOCK_START}\nstale links\n{BLOCK_END}\n\nOutro.\n"
        );
        let block = render_auto_index(&links(&["Firewall", "Cloud"]));
        let updated = inject_auto_index(&content, &block);

        assert_eq!(updated.matches(BLOCK_START).count(), 1);
        assert_eq!(updated.matches(BLOCK_END).count(), 1);
        assert!(updated.starts_with("# SOC Runbooks\n\nIntro text.\n\n"));
        assert!(updated.ends_with("\n\nOutro.\n"));
        assert!(updated.contains("- [Firewall](Firewall/README.md)\n- [Cloud](Cloud/README.md)"));
        assert!(!updated.contains("stale links"));
    }

    #[test]
    fn test_inject_collapses_duplicate_regions() {
        let content = format!(
            "Top\n{BLOCK_START}\na\n{BLOCK_END}\nMiddle\n{BLOCK_START}\nb\n{BLOCK_END}\nBottom\n"
        );
        let updated = inject_auto_index(&content, &render_auto_index(&links(&["Email"])));

        assert_eq!(updated.matches(BLOCK_START).count(), 1);
        assert_eq!(updated.matches(BLOCK_END).count(), 1);
        assert!(updated.starts_with("Top\n"));
        assert!(updated.ends_with("\nBottom\n"));
        assert!(!updated.contains("Middle"));
    }

    #[test]
    fn test_inject_appends_when_markers_absent() {
        let content = "# SOC Runbooks\n\nJust prose.\n";
        let block = render_auto_index(&links(&["Network"]));
        let updated = inject_auto_index(content, &block);

        assert!(updated.starts_with("# SOC Runbooks\n\nJust prose.\n\n"));
        assert!(updated.ends_with(&format!("{BLOCK_END}\n")));
        assert_eq!(updated.matches(BLOCK_START).count(), 1);
    }

    #[tokio::test]
    async fn test_update_skips_missing_readme() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("Firewall")).unwrap();
        let config = IndexConfig::default();

        update_root_readme(dir.path(), &config).await.unwrap();
        assert!(!dir.path().join("README.md").exists());
    }

    #[tokio::test]
    async fn test_update_skips_when_no_folders_exist() {
        let dir = TempDir::new().unwrap();
        let original = "# SOC Runbooks\n";
        std::fs::write(dir.path().join("README.md"), original).unwrap();
        let config = IndexConfig::default();

        update_root_readme(dir.path(), &config).await.unwrap();
        let content = std::fs::read_to_string(dir.path().join("README.md")).unwrap();
        assert_eq!(content, original);
    }

    #[tokio::test]
    async fn test_update_lists_only_existing_folders_in_config_order() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("README.md"), "# SOC Runbooks\n").unwrap();
        std::fs::create_dir(dir.path().join("Network")).unwrap();
        std::fs::create_dir(dir.path().join("Firewall")).unwrap();
        let config = IndexConfig::default();

        update_root_readme(dir.path(), &config).await.unwrap();
        let content = std::fs::read_to_string(dir.path().join("README.md")).unwrap();
        let firewall = content.find("- [Firewall](Firewall/README.md)").unwrap();
        let network = content.find("- [Network](Network/README.md)").unwrap();
        assert!(firewall < network, "links follow configured order");
        assert!(!content.contains("- [Windows]"));
    }
}
