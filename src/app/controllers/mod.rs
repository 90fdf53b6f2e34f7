//! # Controllers
//!
//! Controllers own the models and drive the request/response flow. They are
//! constructed per view mount with their services passed in, and torn down
//! when the view goes away.

pub mod app_controller;
pub mod user_controller;

pub use app_controller::{AppController, INVALID_CREDENTIALS_ALERT};
pub use user_controller::UserController;
