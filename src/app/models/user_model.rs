//! # User Model
//!
//! Credentials and the session token. Created empty at controller
//! construction (or seeded from the profile); the token is populated after a
//! successful credential exchange and reused for the rest of the session.

use crate::app::events::ModelEvent;
use crate::app::profile::ConnectionProfile;
use serde::Serialize;

/// UI-bound user state carried through the authenticate-then-list sequence.
///
/// The whole object is serialized as the `fetch-forms` request body, token
/// included, matching the server's contract.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserModel {
    username: String,
    password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

impl UserModel {
    /// Create an empty user with no credentials and no token
    pub fn new() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            token: None,
        }
    }

    /// Seed credentials from a connection profile
    pub fn from_profile(profile: &impl ConnectionProfile) -> Self {
        Self {
            username: profile.user().cloned().unwrap_or_default(),
            password: profile.password().cloned().unwrap_or_default(),
            token: None,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Whether a usable (non-empty) token is present
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn set_credentials(&mut self, username: String, password: String) {
        self.username = username;
        self.password = password;
    }

    /// Store the exchanged token, returning the change event
    pub fn set_token(&mut self, token: String) -> ModelEvent {
        self.token = Some(token);
        ModelEvent::TokenStored
    }

    /// Drop the stored token, forcing re-authentication on the next load
    pub fn clear_token(&mut self) {
        self.token = None;
    }
}

impl Default for UserModel {
    fn default() -> Self {
        Self::new()
    }
}
