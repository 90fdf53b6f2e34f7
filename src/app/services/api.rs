//! # API Service
//!
//! HTTP access to the form server: the credential exchange, the form
//! listing, and the raw data/definition endpoints used by the export
//! builder. All paths are resolved against the profile's base URL.

use crate::app::models::{FormDescriptor, UserModel};
use crate::app::profile::ConnectionProfile;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Path of the credential exchange endpoint
pub const FETCH_TOKEN_PATH: &str = "/fetch-token";

/// Path of the form listing endpoint
pub const FETCH_FORMS_PATH: &str = "/fetch-forms";

/// Errors surfaced by the API seam.
///
/// `InvalidCredentials` is distinguished so the controller can encode the
/// notify-and-stop branch explicitly instead of treating every failure
/// alike.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("the server rejected the supplied credentials")]
    InvalidCredentials,

    #[error("unexpected status {status} from {endpoint}")]
    UnexpectedStatus { endpoint: String, status: u16 },

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Body of a successful credential exchange
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Client operations against the form server, mockable in tests
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Exchange credentials for an API token
    async fn fetch_token(&self, username: &str, password: &str)
        -> Result<TokenResponse, ApiError>;

    /// List the account's forms, carrying the full user object
    async fn fetch_forms(&self, user: &UserModel) -> Result<Vec<FormDescriptor>, ApiError>;

    /// Fetch the submission records for a form
    async fn fetch_data(&self, pk: &str, token: &str) -> Result<Vec<Value>, ApiError>;

    /// Fetch the form definition (the `children` tree) for a form
    async fn fetch_definition(&self, pk: &str, token: &str) -> Result<Value, ApiError>;
}

/// Service for executing API requests against a configured server
pub struct HttpApiService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApiService {
    /// Create a new service from a connection profile
    pub fn new(profile: &impl ConnectionProfile) -> Result<Self> {
        let server = profile
            .server()
            .ok_or_else(|| anyhow::anyhow!("profile has no server configured"))?;
        let base_url = server.trim_end_matches('/').to_string();

        tracing::debug!("Creating API service for '{base_url}'");
        let client = reqwest::Client::builder()
            .user_agent(concat!("formline/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn token_header(token: &str) -> String {
        format!("Token {token}")
    }
}

#[async_trait]
impl ApiClient for HttpApiService {
    async fn fetch_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenResponse, ApiError> {
        let url = self.endpoint(FETCH_TOKEN_PATH);
        tracing::debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() {
            tracing::debug!("Credential exchange rejected with status {status}");
            return Err(ApiError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus {
                endpoint: FETCH_TOKEN_PATH.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.json::<TokenResponse>().await?)
    }

    async fn fetch_forms(&self, user: &UserModel) -> Result<Vec<FormDescriptor>, ApiError> {
        let url = self.endpoint(FETCH_FORMS_PATH);
        tracing::debug!("POST {url}");

        let response = self.client.post(&url).json(user).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus {
                endpoint: FETCH_FORMS_PATH.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.json::<Vec<FormDescriptor>>().await?)
    }

    async fn fetch_data(&self, pk: &str, token: &str) -> Result<Vec<Value>, ApiError> {
        let path = format!("/data/{pk}");
        let url = self.endpoint(&path);
        tracing::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, Self::token_header(token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus {
                endpoint: path,
                status: status.as_u16(),
            });
        }

        Ok(response.json::<Vec<Value>>().await?)
    }

    async fn fetch_definition(&self, pk: &str, token: &str) -> Result<Value, ApiError> {
        let path = format!("/forms/{pk}/form.json");
        let url = self.endpoint(&path);
        tracing::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, Self::token_header(token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus {
                endpoint: path,
                status: status.as_u16(),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}
