//! History-backed navigation

use fastadmin_session::{Navigator, Route};
use yew_router::history::{BrowserHistory, History};

/// Pushes onto the same browser history the router listens to
#[derive(Clone, Default)]
pub struct BrowserNavigator {
    history: BrowserHistory,
}

impl BrowserNavigator {
    pub fn new() -> Self {
        Self {
            history: BrowserHistory::new(),
        }
    }
}

impl Navigator for BrowserNavigator {
    fn push(&self, route: Route) {
        tracing::debug!(%route, "Navigating");
        self.history.push(route.path());
    }
}
