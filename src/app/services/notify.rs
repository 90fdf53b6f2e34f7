//! # Notification Service
//!
//! Blocking user-facing alerts. The controller raises exactly one alert per
//! failed credential exchange; where it goes is up to the implementation.

/// User-facing alert surface, mockable in tests
pub trait Notifier: Send + Sync {
    /// Surface a blocking alert to the user
    fn alert(&self, message: &str);
}

/// Notifier writing alerts to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        tracing::warn!("alert: {message}");
        eprintln!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_notifier_should_be_constructible() {
        // Output goes to stderr; this only checks the type is usable as a trait object.
        let notifier: &dyn Notifier = &TerminalNotifier;
        notifier.alert("test alert");
    }
}
