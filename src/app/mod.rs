//! # Application Components
//!
//! Controllers, models, services, and views for the form client.
//! All components are designed with clear separation of concerns and
//! testability: controllers own their models and receive services through
//! trait seams, so tests can inject mock implementations.

pub mod controllers;
pub mod events;
pub mod export;
pub mod models;
pub mod profile;
pub mod services;
pub mod views;

// Re-export core types
pub use controllers::{AppController, UserController, INVALID_CREDENTIALS_ALERT};
pub use events::ModelEvent;
pub use export::{Export, ExportBuilder, Section};
pub use models::{CompletedDownload, DownloadModel, FormDescriptor, FormListModel, UserModel};
pub use profile::{blank_profile, ConnectionProfile, IniProfile, IniProfileStore};
pub use services::{
    ApiClient, ApiError, FormFields, HttpApiService, HttpSubmitSink, MockApiClient, MockNotifier,
    MockSubmitSink, Notifier, SubmitSink, TerminalNotifier, TokenResponse,
};
pub use views::FormListView;
