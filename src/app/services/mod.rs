//! # Services
//!
//! The controller's collaborators, behind trait seams so tests can inject
//! mock implementations: the API client for the token/forms/data endpoints,
//! the notification surface for blocking alerts, and the submission sink
//! that performs the side-effecting download.

pub mod api;
pub mod mock;
pub mod notify;
pub mod submit;

pub use api::{ApiClient, ApiError, HttpApiService, TokenResponse};
pub use mock::{MockApiClient, MockNotifier, MockSubmitSink};
pub use notify::{Notifier, TerminalNotifier};
pub use submit::{FormFields, HttpSubmitSink, SubmitSink};
