//! # Views
//!
//! Rendering of controller state into an output stream. Views read model
//! state through the controller's accessors and never mutate it.

pub mod form_list;

pub use form_list::FormListView;
