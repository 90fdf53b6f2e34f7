//! # Submission Sink
//!
//! The seam for the side-effecting download submission. The controller
//! commits the action path to its model first, then hands the committed
//! value to the sink together with the form fields; the sink resolves the
//! action against the server base URL, posts the fields, and streams the
//! response body to disk.

use crate::app::models::CompletedDownload;
use crate::app::profile::ConnectionProfile;
use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use std::io::Write;
use std::path::PathBuf;

/// Type alias for submitted form fields to reduce complexity
pub type FormFields = Vec<(String, String)>;

/// Submission target for the download path, mockable in tests
#[async_trait]
pub trait SubmitSink: Send + Sync {
    /// Submit the fields to the action path and persist the response body
    async fn submit(&self, action: &str, fields: &[(String, String)])
        -> Result<CompletedDownload>;
}

/// Sink posting submissions to the form server and saving the response
pub struct HttpSubmitSink {
    client: reqwest::Client,
    base_url: String,
    download_dir: PathBuf,
    filename_re: Regex,
}

impl HttpSubmitSink {
    /// Create a sink for a profile, persisting downloads into `download_dir`
    pub fn new(profile: &impl ConnectionProfile, download_dir: PathBuf) -> Result<Self> {
        let server = profile
            .server()
            .ok_or_else(|| anyhow::anyhow!("profile has no server configured"))?;
        let base_url = server.trim_end_matches('/').to_string();

        tracing::debug!(
            "Creating submit sink for '{base_url}', downloads into '{}'",
            download_dir.display()
        );
        let client = reqwest::Client::builder()
            .user_agent(concat!("formline/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let filename_re = Regex::new(r#"filename="?([^";]+)"?"#)?;

        Ok(Self {
            client,
            base_url,
            download_dir,
            filename_re,
        })
    }

    /// File name from the Content-Disposition header, if the server sent one
    fn filename_from_disposition(&self, disposition: Option<&str>) -> Option<String> {
        let value = disposition?;
        self.filename_re
            .captures(value)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Fallback file name derived from the action path
    fn filename_from_action(action: &str) -> String {
        let stem = action.trim_matches('/').replace('/', "-");
        if stem.is_empty() {
            "download".to_string()
        } else {
            stem
        }
    }
}

#[async_trait]
impl SubmitSink for HttpSubmitSink {
    async fn submit(
        &self,
        action: &str,
        fields: &[(String, String)],
    ) -> Result<CompletedDownload> {
        let url = format!("{}{}", self.base_url, action);
        tracing::info!("Submitting download form to {url}");

        let response = self.client.post(&url).form(&fields).send().await?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("download request to '{action}' failed with status {status}");
        }

        let disposition = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let file_name = self
            .filename_from_disposition(disposition.as_deref())
            .unwrap_or_else(|| Self::filename_from_action(action));

        let body = response.bytes().await?;

        std::fs::create_dir_all(&self.download_dir).with_context(|| {
            format!(
                "failed to create download directory '{}'",
                self.download_dir.display()
            )
        })?;

        // Stage through a temp file so a failed transfer never leaves a partial download
        let mut staged = tempfile::NamedTempFile::new_in(&self.download_dir)?;
        staged.write_all(&body)?;

        let target = self.download_dir.join(&file_name);
        staged
            .persist(&target)
            .map_err(|e| anyhow::anyhow!("failed to persist download '{file_name}': {e}"))?;

        tracing::info!("Saved {} bytes to '{}'", body.len(), target.display());
        Ok(CompletedDownload {
            path: target,
            bytes: body.len() as u64,
        })
    }
}
