//! # Model Events
//!
//! Events emitted when models change. The view layer drains these from the
//! controller to decide what to re-render.

use std::path::PathBuf;

/// Events emitted when models change
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    /// An authentication token was stored on the user model
    TokenStored,

    /// The forms list was replaced with a fresh server payload
    FormsLoaded { count: usize },

    /// The pending download action changed
    FormActionChanged { action: String },

    /// A download completed and was persisted to disk
    DownloadCompleted { path: PathBuf, bytes: u64 },

    /// A tabular export was written to disk
    ExportWritten { path: PathBuf, sections: usize },
}
