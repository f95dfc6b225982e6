//! # Runbook Index
//!
//! A documentation-generation tool for incident-response runbook
//! repositories. It scans a configured, ordered set of top-level folders for
//! Markdown runbooks, regenerates each folder's `README.md` index, and keeps
//! an auto-index block in the root `README.md` pointing at those folder
//! indexes.
//!
//! ## Usage
//!
//! ```sh
//! runbook_index                      # index the current directory
//! runbook_index -r ~/soc-runbooks    # index another checkout
//! ```
//!
//! ## Pipeline
//!
//! Each invocation runs the same linear pipeline against the current
//! filesystem state:
//! 1. **Collect**: list the `*.md` runbooks inside each configured folder
//! 2. **Title**: take each runbook's first heading, falling back to its name
//! 3. **Render**: regenerate the folder's full index document
//! 4. **Write**: persist the index only when its bytes changed, printing
//!    `Updated <path>` for each file written
//! 5. **Root**: refresh the auto-index block in the root `README.md`
//!
//! The process exits 0 whether or not anything changed; changes are signalled
//! only by the `Updated` lines on stdout.

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use std::path::Path;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod models;
mod outputs;
mod title;
mod utils;

use cli::Cli;
use models::IndexConfig;
use outputs::{folder_index, root_index};

/// Regenerate every folder index under `root`, then the root auto-index.
///
/// Folders are processed sequentially in configured order; one timestamp is
/// taken up front so every index written in a run carries the same
/// generation time.
///
/// # Returns
///
/// `true` if any folder index was written.
#[instrument(level = "info", skip_all, fields(root = %root.display()))]
async fn run(root: &Path, config: &IndexConfig) -> Result<bool, Box<dyn Error>> {
    let generated_at = Utc::now();
    let mut changed = false;

    for name in &config.folders {
        if let Some(index_path) =
            folder_index::generate_folder_index(root, name, config, generated_at).await?
        {
            println!("Updated {}", index_path.display());
            changed = true;
        }
    }

    root_index::update_root_readme(root, config).await?;
    Ok(changed)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("runbook_index starting up");

    let args = Cli::parse();
    debug!(?args.root, ?args.config, "Parsed CLI arguments");

    let config = match args.config.as_deref() {
        Some(path) => IndexConfig::load(path).await?,
        None => IndexConfig::default(),
    };

    let changed = run(Path::new(&args.root), &config).await?;

    let elapsed = start_time.elapsed();
    info!(
        changed,
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outputs::root_index::{BLOCK_END, BLOCK_START};
    use tempfile::TempDir;

    fn seed_repo() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("README.md"), "# SOC Runbooks\n\nWelcome.\n").unwrap();
        std::fs::create_dir(dir.path().join("Firewall")).unwrap();
        std::fs::write(
            dir.path().join("Firewall/port-scan.md"),
            "# Port Scan Triage\n\nSteps...\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("Firewall/ddos_response.md"),
            "no heading here\n",
        )
        .unwrap();
        std::fs::create_dir(dir.path().join("Cloud")).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_run_creates_index_in_every_existing_folder() {
        let dir = seed_repo();
        let config = IndexConfig::default();

        let changed = run(dir.path(), &config).await.unwrap();
        assert!(changed);
        assert!(dir.path().join("Firewall/README.md").exists());
        assert!(dir.path().join("Cloud/README.md").exists());
        // Folders that do not exist are skipped, not created.
        assert!(!dir.path().join("Windows").exists());
    }

    #[tokio::test]
    async fn test_run_links_titles_with_filename_fallback() {
        let dir = seed_repo();
        let config = IndexConfig::default();
        run(dir.path(), &config).await.unwrap();

        let index = std::fs::read_to_string(dir.path().join("Firewall/README.md")).unwrap();
        assert!(index.contains("- [Ddos Response](ddos_response.md)"));
        assert!(index.contains("- [Port Scan Triage](port-scan.md)"));

        let empty = std::fs::read_to_string(dir.path().join("Cloud/README.md")).unwrap();
        assert!(empty.contains("_(No runbooks yet—add some `.md` files!)_"));
    }

    #[tokio::test]
    async fn test_run_appends_auto_index_to_root_readme() {
        let dir = seed_repo();
        let config = IndexConfig::default();
        run(dir.path(), &config).await.unwrap();

        let root = std::fs::read_to_string(dir.path().join("README.md")).unwrap();
        assert!(root.starts_with("# SOC Runbooks\n\nWelcome.\n"));
        assert_eq!(root.matches(BLOCK_START).count(), 1);
        assert_eq!(root.matches(BLOCK_END).count(), 1);
        assert!(root.contains("- [Firewall](Firewall/README.md)"));
        assert!(root.contains("- [Cloud](Cloud/README.md)"));
        assert!(!root.contains("- [Email]"));
    }

    #[tokio::test]
    async fn test_second_run_replaces_block_instead_of_appending() {
        let dir = seed_repo();
        let config = IndexConfig::default();
        run(dir.path(), &config).await.unwrap();
        run(dir.path(), &config).await.unwrap();

        let root = std::fs::read_to_string(dir.path().join("README.md")).unwrap();
        assert_eq!(root.matches(BLOCK_START).count(), 1);
        assert_eq!(root.matches(BLOCK_END).count(), 1);
    }

    #[tokio::test]
    async fn test_config_restricts_indexed_folders() {
        let dir = seed_repo();
        let config = IndexConfig {
            folders: vec!["Cloud".to_string()],
            ..IndexConfig::default()
        };
        run(dir.path(), &config).await.unwrap();

        assert!(dir.path().join("Cloud/README.md").exists());
        assert!(!dir.path().join("Firewall/README.md").exists());

        let root = std::fs::read_to_string(dir.path().join("README.md")).unwrap();
        assert!(root.contains("- [Cloud](Cloud/README.md)"));
        assert!(!root.contains("- [Firewall]"));
    }
}
