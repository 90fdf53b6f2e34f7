//! # Mock Service Implementations for Testing
//!
//! Recording mocks for the three service seams, so controller behavior can
//! be verified without a server: the API mock keeps an ordered call log, the
//! notifier records every alert, and the sink records every submission.

use crate::app::models::{CompletedDownload, FormDescriptor, UserModel};
use crate::app::services::api::{ApiClient, ApiError, TokenResponse};
use crate::app::services::notify::Notifier;
use crate::app::services::submit::{FormFields, SubmitSink};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Type alias for a shared record of observed calls
type SharedLog<T> = Arc<Mutex<Vec<T>>>;

/// Mock API client with configurable responses and an ordered call log
pub struct MockApiClient {
    calls: SharedLog<String>,
    token: Option<String>,
    forms: Vec<FormDescriptor>,
    data: Vec<Value>,
    definition: Value,
}

impl MockApiClient {
    /// Create a mock that accepts credentials and returns empty payloads
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            token: Some("mock-token".to_string()),
            forms: Vec::new(),
            data: Vec::new(),
            definition: serde_json::json!({"name": "mock", "children": []}),
        }
    }

    /// Configure the token returned by a successful credential exchange
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    /// Make every credential exchange fail with `InvalidCredentials`
    pub fn rejecting_credentials(mut self) -> Self {
        self.token = None;
        self
    }

    /// Configure the forms payload
    pub fn with_forms(mut self, forms: Vec<FormDescriptor>) -> Self {
        self.forms = forms;
        self
    }

    /// Configure the data records payload
    pub fn with_data(mut self, data: Vec<Value>) -> Self {
        self.data = data;
        self
    }

    /// Configure the form definition payload
    pub fn with_definition(mut self, definition: Value) -> Self {
        self.definition = definition;
        self
    }

    /// Handle to the ordered call log; clone before moving the mock into a controller
    pub fn call_log(&self) -> SharedLog<String> {
        Arc::clone(&self.calls)
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Default for MockApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApiClient for MockApiClient {
    async fn fetch_token(
        &self,
        _username: &str,
        _password: &str,
    ) -> Result<TokenResponse, ApiError> {
        self.record("fetch_token".to_string());
        match &self.token {
            Some(token) => Ok(TokenResponse {
                token: token.clone(),
            }),
            None => Err(ApiError::InvalidCredentials),
        }
    }

    async fn fetch_forms(&self, _user: &UserModel) -> Result<Vec<FormDescriptor>, ApiError> {
        self.record("fetch_forms".to_string());
        Ok(self.forms.clone())
    }

    async fn fetch_data(&self, pk: &str, _token: &str) -> Result<Vec<Value>, ApiError> {
        self.record(format!("fetch_data:{pk}"));
        Ok(self.data.clone())
    }

    async fn fetch_definition(&self, pk: &str, _token: &str) -> Result<Value, ApiError> {
        self.record(format!("fetch_definition:{pk}"));
        Ok(self.definition.clone())
    }
}

/// Mock notifier recording every alert message
pub struct MockNotifier {
    alerts: SharedLog<String>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            alerts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the recorded alerts; clone before moving the mock into a controller
    pub fn alert_log(&self) -> SharedLog<String> {
        Arc::clone(&self.alerts)
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for MockNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

/// One recorded submission: the action path and the submitted fields
pub type RecordedSubmission = (String, FormFields);

/// Mock submission sink recording every submission
pub struct MockSubmitSink {
    submissions: SharedLog<RecordedSubmission>,
    fail: bool,
}

impl MockSubmitSink {
    pub fn new() -> Self {
        Self {
            submissions: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// Make every submission fail
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Handle to the recorded submissions; clone before moving the mock into a controller
    pub fn submission_log(&self) -> SharedLog<RecordedSubmission> {
        Arc::clone(&self.submissions)
    }
}

impl Default for MockSubmitSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubmitSink for MockSubmitSink {
    async fn submit(
        &self,
        action: &str,
        fields: &[(String, String)],
    ) -> Result<CompletedDownload> {
        self.submissions
            .lock()
            .unwrap()
            .push((action.to_string(), fields.to_vec()));
        if self.fail {
            anyhow::bail!("mock submission failure");
        }
        Ok(CompletedDownload {
            path: PathBuf::from("mock-download"),
            bytes: 1024,
        })
    }
}
