//! # Download Model
//!
//! The pending submission action and the record of the last completed
//! download. The action is committed here before the submission sink reads
//! it, which is the synchronization point the download path relies on.

use crate::app::events::ModelEvent;
use std::path::PathBuf;

/// A download that finished and was persisted to disk
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedDownload {
    pub path: PathBuf,
    pub bytes: u64,
}

/// Download state owned by the controller
#[derive(Debug, Clone, Default)]
pub struct DownloadModel {
    form_action: String,
    last_download: Option<CompletedDownload>,
}

impl DownloadModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// The committed action path for the next submission
    pub fn form_action(&self) -> &str {
        &self.form_action
    }

    /// Commit a new action path, returning the change event
    pub fn set_form_action(&mut self, action: String) -> ModelEvent {
        self.form_action = action.clone();
        ModelEvent::FormActionChanged { action }
    }

    /// Record a finished download, returning the change event
    pub fn record_completed(&mut self, download: CompletedDownload) -> ModelEvent {
        let event = ModelEvent::DownloadCompleted {
            path: download.path.clone(),
            bytes: download.bytes,
        };
        self.last_download = Some(download);
        event
    }

    pub fn last_download(&self) -> Option<&CompletedDownload> {
        self.last_download.as_ref()
    }
}
