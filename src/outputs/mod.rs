//! Index-file generation for the runbook tree.
//!
//! # Submodules
//!
//! - [`folder_index`]: Builds each folder's `README.md` listing its runbooks
//! - [`root_index`]: Maintains the auto-index block in the root `README.md`
//!
//! # Output Structure
//!
//! ```text
//! repo_root/
//! ├── README.md            # root document with AUTO-INDEX block
//! ├── Firewall/
//! │   ├── README.md        # generated folder index
//! │   └── port-scan.md
//! └── Windows/
//!     └── README.md
//! ```

pub mod folder_index;
pub mod root_index;
