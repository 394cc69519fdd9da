//! Toast delivery from the session to the UI

use fastadmin_session::{Listeners, Notifier, Subscription, Toast};

/// Fan-out point between the coordinator and the toast stack component.
/// Clones share listeners.
#[derive(Clone, Default)]
pub struct ToastSink {
    listeners: Listeners<Toast>,
}

impl ToastSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, callback: impl Fn(&Toast) + 'static) -> Subscription {
        self.listeners.subscribe(callback)
    }
}

impl PartialEq for ToastSink {
    fn eq(&self, other: &Self) -> bool {
        self.listeners.ptr_eq(&other.listeners)
    }
}

impl Notifier for ToastSink {
    fn notify(&self, toast: Toast) {
        tracing::debug!(title = %toast.title, severity = ?toast.severity, "Toast");
        self.listeners.emit(&toast);
    }
}
