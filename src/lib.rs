//! # Formline - Terminal Client for Form Data Servers
//!
//! A profile-based client for servers that speak the form-data export
//! protocol: exchange credentials for a token, list the account's forms,
//! and retrieve data exports for a chosen form.
//!
//! ## Architecture
//!
//! The application follows an explicit-ownership MVVM split: controllers own
//! the models and receive their collaborators through trait seams rather
//! than a framework container.
//!
//! ```text
//! ┌─────────────┐   renders    ┌──────────────┐    owns      ┌─────────┐
//! │    View     │◄─────────────│  Controller  │─────────────▶│ Models  │
//! │             │              │              │              │         │
//! │ - Form list │              │ - load_forms │              │ - User  │
//! │ - Stdout    │              │ - download   │              │ - Forms │
//! └─────────────┘              │ - export     │              │ - D/L   │
//!                              └──────────────┘              └─────────┘
//!                                      │ injected
//!                                      ▼
//!                               ┌──────────────┐
//!                               │   Services   │
//!                               │              │
//!                               │ - ApiClient  │
//!                               │ - Notifier   │
//!                               │ - SubmitSink │
//!                               └──────────────┘
//! ```

pub mod app;
pub mod cmd_args;
pub mod config;

// Re-export main types for easy access
pub use app::*;
