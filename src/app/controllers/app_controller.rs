//! # Application Controller
//!
//! Owns the user, form list, and download models and exposes the three
//! operations the view layer drives: `load_forms`, `download_data`, and
//! `export_data`. Services are injected at construction, one controller per
//! view mount.

use crate::app::events::ModelEvent;
use crate::app::export::{write_zipped_csv, ExportBuilder};
use crate::app::models::{CompletedDownload, DownloadModel, FormDescriptor, FormListModel, UserModel};
use crate::app::profile::ConnectionProfile;
use crate::app::services::api::{ApiClient, ApiError};
use crate::app::services::notify::Notifier;
use crate::app::services::submit::SubmitSink;
use crate::config::USER_TOKEN_FIELD;
use anyhow::Result;
use std::path::PathBuf;

/// Alert text for a rejected credential exchange
pub const INVALID_CREDENTIALS_ALERT: &str = "Invalid username or password.";

/// The main application controller owning UI-bound state
pub struct AppController<A: ApiClient, N: Notifier, S: SubmitSink> {
    user: UserModel,
    forms: FormListModel,
    download: DownloadModel,
    api: A,
    notifier: N,
    sink: S,
    export_dir: PathBuf,
    pending_events: Vec<ModelEvent>,
}

impl<A: ApiClient, N: Notifier, S: SubmitSink> AppController<A, N, S> {
    /// Create a controller with empty credentials and injected services
    pub fn new(api: A, notifier: N, sink: S, export_dir: PathBuf) -> Self {
        Self {
            user: UserModel::new(),
            forms: FormListModel::new(),
            download: DownloadModel::new(),
            api,
            notifier,
            sink,
            export_dir,
            pending_events: Vec::new(),
        }
    }

    /// Create a controller with credentials seeded from a profile
    pub fn with_profile(
        profile: &impl ConnectionProfile,
        api: A,
        notifier: N,
        sink: S,
        export_dir: PathBuf,
    ) -> Self {
        let mut controller = Self::new(api, notifier, sink, export_dir);
        controller.user = UserModel::from_profile(profile);
        controller
    }

    /// Replace the user's credentials (does not touch a stored token)
    pub fn set_credentials(&mut self, username: String, password: String) {
        self.user.set_credentials(username, password);
    }

    /// Load the form list, authenticating first when no token is stored.
    ///
    /// The two network steps are strictly ordered. A rejected credential
    /// exchange raises one alert and stops the sequence; the form fetch
    /// never runs in that case. Other failures propagate to the caller.
    pub async fn load_forms(&mut self) -> Result<()> {
        if !self.ensure_token().await? {
            return Ok(());
        }

        let forms = self.api.fetch_forms(&self.user).await?;
        tracing::info!("Loaded {} forms", forms.len());
        let event = self.forms.set_forms(forms);
        self.push_event(event);
        Ok(())
    }

    /// Trigger a download for the form identified by `pk`.
    ///
    /// Commits the action path to the download model first, then submits the
    /// committed value through the sink together with the token field. The
    /// sink only ever sees an action that is already readable from state.
    pub async fn download_data(&mut self, pk: &str) -> Result<CompletedDownload> {
        let event = self.download.set_form_action(format!("/download-data/{pk}"));
        self.push_event(event);

        // Read the action back from the committed model state
        let action = self.download.form_action().to_string();
        let fields = vec![(
            USER_TOKEN_FIELD.to_string(),
            self.user.token().unwrap_or_default().to_string(),
        )];

        let completed = self.sink.submit(&action, &fields).await?;
        let event = self.download.record_completed(completed.clone());
        self.push_event(event);
        Ok(completed)
    }

    /// Build a zipped CSV export for the form identified by `pk`.
    ///
    /// Fetches the submission records and the form definition, flattens the
    /// records with select values mapped to labels, and writes one CSV entry
    /// per section. Returns None when authentication was rejected (the user
    /// has already been alerted).
    pub async fn export_data(&mut self, pk: &str) -> Result<Option<PathBuf>> {
        if !self.ensure_token().await? {
            return Ok(None);
        }
        let Some(token) = self.user.token().map(str::to_string) else {
            return Ok(None);
        };

        let records = self.api.fetch_data(pk, &token).await?;
        let definition = self.api.fetch_definition(pk, &token).await?;

        let export = ExportBuilder::new(&definition)?.build(&records)?;
        let path = self.export_dir.join(format!("form-{pk}-export.zip"));
        write_zipped_csv(&export, &path)?;

        tracing::info!(
            "Export for form {pk} written to '{}' ({} sections)",
            path.display(),
            export.sections.len()
        );
        self.push_event(ModelEvent::ExportWritten {
            path: path.clone(),
            sections: export.sections.len(),
        });
        Ok(Some(path))
    }

    /// Ensure a token is stored, exchanging credentials when necessary.
    ///
    /// Returns false when the exchange was rejected: the notifier has fired
    /// once and the caller must stop its sequence.
    async fn ensure_token(&mut self) -> Result<bool> {
        if self.user.has_token() {
            tracing::debug!("Reusing stored token, skipping credential exchange");
            return Ok(true);
        }

        match self
            .api
            .fetch_token(self.user.username(), self.user.password())
            .await
        {
            Ok(response) => {
                let event = self.user.set_token(response.token);
                self.push_event(event);
                Ok(true)
            }
            Err(ApiError::InvalidCredentials) => {
                tracing::warn!("Credential exchange rejected");
                self.notifier.alert(INVALID_CREDENTIALS_ALERT);
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// The owned user state
    pub fn user(&self) -> &UserModel {
        &self.user
    }

    /// The loaded form descriptors
    pub fn forms(&self) -> &[FormDescriptor] {
        self.forms.forms()
    }

    /// The committed download action path
    pub fn form_action(&self) -> &str {
        self.download.form_action()
    }

    /// The last completed download, if any
    pub fn last_download(&self) -> Option<&CompletedDownload> {
        self.download.last_download()
    }

    /// Drain the model events accumulated since the last call
    pub fn collect_pending_events(&mut self) -> Vec<ModelEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn push_event(&mut self, event: ModelEvent) {
        tracing::debug!("Model event: {:?}", event);
        self.pending_events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::mock::{MockApiClient, MockNotifier, MockSubmitSink};
    use serde_json::json;

    fn forms_payload() -> Vec<FormDescriptor> {
        serde_json::from_value(json!([{"id": 1, "name": "Survey A"}])).unwrap()
    }

    fn controller(
        api: MockApiClient,
    ) -> AppController<MockApiClient, MockNotifier, MockSubmitSink> {
        AppController::new(
            api,
            MockNotifier::new(),
            MockSubmitSink::new(),
            PathBuf::from("/tmp"),
        )
    }

    #[tokio::test]
    async fn load_forms_should_fetch_token_before_forms() {
        let api = MockApiClient::new().with_forms(forms_payload());
        let log = api.call_log();
        let mut app = controller(api);

        app.load_forms().await.unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["fetch_token".to_string(), "fetch_forms".to_string()]
        );
    }

    #[tokio::test]
    async fn load_forms_should_skip_token_exchange_when_token_present() {
        let api = MockApiClient::new().with_forms(forms_payload());
        let log = api.call_log();
        let mut app = controller(api);
        app.user.set_token("existing-token".to_string());

        app.load_forms().await.unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["fetch_forms".to_string()]);
        assert_eq!(app.user().token(), Some("existing-token"));
    }

    #[tokio::test]
    async fn load_forms_should_store_exchanged_token() {
        let api = MockApiClient::new().with_token("fresh-token");
        let mut app = controller(api);

        app.load_forms().await.unwrap();

        assert_eq!(app.user().token(), Some("fresh-token"));
    }

    #[tokio::test]
    async fn load_forms_should_alert_once_and_stop_on_rejected_credentials() {
        let api = MockApiClient::new().rejecting_credentials();
        let call_log = api.call_log();
        let notifier = MockNotifier::new();
        let alert_log = notifier.alert_log();
        let mut app = AppController::new(
            api,
            notifier,
            MockSubmitSink::new(),
            PathBuf::from("/tmp"),
        );

        let result = app.load_forms().await;

        assert!(result.is_ok());
        assert_eq!(
            *alert_log.lock().unwrap(),
            vec![INVALID_CREDENTIALS_ALERT.to_string()]
        );
        // The forms fetch never runs after a rejected exchange
        assert_eq!(*call_log.lock().unwrap(), vec!["fetch_token".to_string()]);
        assert!(app.forms().is_empty());
    }

    #[tokio::test]
    async fn load_forms_should_store_payload_verbatim() {
        let api = MockApiClient::new().with_forms(forms_payload());
        let mut app = controller(api);

        app.load_forms().await.unwrap();

        assert_eq!(app.forms(), forms_payload().as_slice());
    }

    #[tokio::test]
    async fn download_data_should_commit_exact_action() {
        let mut app = controller(MockApiClient::new());

        app.download_data("42").await.unwrap();

        assert_eq!(app.form_action(), "/download-data/42");
    }

    #[tokio::test]
    async fn download_data_should_submit_committed_action_with_token_field() {
        let sink = MockSubmitSink::new();
        let submissions = sink.submission_log();
        let mut app = AppController::new(
            MockApiClient::new(),
            MockNotifier::new(),
            sink,
            PathBuf::from("/tmp"),
        );
        app.user.set_token("tok".to_string());

        app.download_data("42").await.unwrap();

        let recorded = submissions.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].0, app.form_action());
        assert_eq!(
            recorded[0].1,
            vec![("userToken".to_string(), "tok".to_string())]
        );
    }

    #[tokio::test]
    async fn download_data_should_submit_empty_token_field_when_unauthenticated() {
        let sink = MockSubmitSink::new();
        let submissions = sink.submission_log();
        let mut app = AppController::new(
            MockApiClient::new(),
            MockNotifier::new(),
            sink,
            PathBuf::from("/tmp"),
        );

        app.download_data("7").await.unwrap();

        let recorded = submissions.lock().unwrap();
        assert_eq!(
            recorded[0].1,
            vec![("userToken".to_string(), String::new())]
        );
    }

    #[tokio::test]
    async fn download_data_should_record_completion() {
        let mut app = controller(MockApiClient::new());

        let completed = app.download_data("42").await.unwrap();

        assert_eq!(app.last_download(), Some(&completed));
        assert_eq!(completed.bytes, 1024);
    }

    #[tokio::test]
    async fn download_data_should_propagate_sink_failure() {
        let mut app = AppController::new(
            MockApiClient::new(),
            MockNotifier::new(),
            MockSubmitSink::new().failing(),
            PathBuf::from("/tmp"),
        );

        let result = app.download_data("42").await;

        assert!(result.is_err());
        // The action was still committed before the submission failed
        assert_eq!(app.form_action(), "/download-data/42");
        assert!(app.last_download().is_none());
    }

    #[tokio::test]
    async fn export_data_should_stop_after_rejected_credentials() {
        let api = MockApiClient::new().rejecting_credentials();
        let call_log = api.call_log();
        let notifier = MockNotifier::new();
        let alert_log = notifier.alert_log();
        let mut app = AppController::new(
            api,
            notifier,
            MockSubmitSink::new(),
            PathBuf::from("/tmp"),
        );

        let result = app.export_data("42").await.unwrap();

        assert!(result.is_none());
        assert_eq!(alert_log.lock().unwrap().len(), 1);
        assert_eq!(*call_log.lock().unwrap(), vec!["fetch_token".to_string()]);
    }

    #[tokio::test]
    async fn export_data_should_write_archive_from_fetched_records() {
        let dir = tempfile::tempdir().unwrap();
        let api = MockApiClient::new()
            .with_data(vec![json!({"respondent": "alice", "score": 4})])
            .with_definition(json!({
                "name": "survey_a",
                "title": "Survey A",
                "children": [
                    {"name": "respondent", "label": "Respondent", "type": "text"},
                    {"name": "score", "label": "Score", "type": "integer"},
                ],
            }));
        let log = api.call_log();
        let mut app = AppController::new(
            api,
            MockNotifier::new(),
            MockSubmitSink::new(),
            dir.path().to_path_buf(),
        );

        let path = app.export_data("9").await.unwrap().unwrap();

        assert!(path.ends_with("form-9-export.zip"));
        assert!(path.exists());
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "fetch_token".to_string(),
                "fetch_data:9".to_string(),
                "fetch_definition:9".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn controller_should_accumulate_and_drain_events() {
        let api = MockApiClient::new().with_forms(forms_payload());
        let mut app = controller(api);

        app.load_forms().await.unwrap();
        app.download_data("1").await.unwrap();

        let events = app.collect_pending_events();
        assert!(events.contains(&ModelEvent::TokenStored));
        assert!(events.contains(&ModelEvent::FormsLoaded { count: 1 }));
        assert!(events.contains(&ModelEvent::FormActionChanged {
            action: "/download-data/1".to_string()
        }));

        // Draining leaves the queue empty
        assert!(app.collect_pending_events().is_empty());
    }
}
