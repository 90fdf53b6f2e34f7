//! # User Controller
//!
//! Extension point for account-level operations (password changes, profile
//! management). Holds its injected dependencies but implements no
//! operations yet.

use crate::app::services::api::ApiClient;
use crate::app::services::notify::Notifier;

/// Empty controller shell reserved for account-level operations
pub struct UserController<A: ApiClient, N: Notifier> {
    #[allow(dead_code)]
    api: A,
    #[allow(dead_code)]
    notifier: N,
}

impl<A: ApiClient, N: Notifier> UserController<A, N> {
    /// Create the controller with its injected dependencies
    pub fn new(api: A, notifier: N) -> Self {
        Self { api, notifier }
    }
}
