//! # Form List Model
//!
//! The server's form descriptors, kept verbatim. Only the identifier and
//! title are surfaced for display; every other field is preserved as raw
//! JSON without client-side validation.

use crate::app::events::ModelEvent;
use serde::Deserialize;
use serde_json::{Map, Value};

/// One form descriptor as returned by the server.
///
/// Servers differ on key names (`id`, `pk`, `formid`; `name`, `title`), so
/// the known fields accept the common aliases and the remainder is carried
/// through untouched.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FormDescriptor {
    #[serde(default, alias = "pk", alias = "formid")]
    id: Option<Value>,
    #[serde(default, alias = "title")]
    name: Option<String>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl FormDescriptor {
    /// The form identifier, if the server provided one
    pub fn id(&self) -> Option<&Value> {
        self.id.as_ref()
    }

    /// The form title, if the server provided one
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Fields beyond id and title, verbatim
    pub fn rest(&self) -> &Map<String, Value> {
        &self.rest
    }

    /// Identifier rendered for display and URL building
    pub fn id_display(&self) -> String {
        match &self.id {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "-".to_string(),
        }
    }

    /// Title rendered for display
    pub fn name_display(&self) -> &str {
        self.name.as_deref().unwrap_or("(untitled)")
    }
}

/// The list of forms owned by the controller
#[derive(Debug, Clone, Default)]
pub struct FormListModel {
    forms: Vec<FormDescriptor>,
}

impl FormListModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forms(&self) -> &[FormDescriptor] {
        &self.forms
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// Replace the list with a fresh server payload, returning the change event
    pub fn set_forms(&mut self, forms: Vec<FormDescriptor>) -> ModelEvent {
        self.forms = forms;
        ModelEvent::FormsLoaded {
            count: self.forms.len(),
        }
    }

    pub fn clear(&mut self) {
        self.forms.clear();
    }
}
