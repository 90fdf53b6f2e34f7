//! # Data Models
//!
//! Pure data models without business logic or service concerns. Models are
//! owned by the controller; mutations return [`ModelEvent`]s so the view
//! layer can react.
//!
//! [`ModelEvent`]: crate::app::events::ModelEvent

pub mod download_model;
pub mod form_model;
pub mod user_model;

pub use download_model::{CompletedDownload, DownloadModel};
pub use form_model::{FormDescriptor, FormListModel};
pub use user_model::UserModel;
