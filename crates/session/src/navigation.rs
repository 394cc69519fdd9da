//! Route table and navigation guard

use crate::token::TokenStore;
use std::fmt;

/// Every view of the application
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Admin,
    Items,
    Settings { tab: Option<String> },
    Login,
    Signup,
    RecoverPassword,
    ResetPassword,
    NotFound,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Admin => "/admin".to_string(),
            Self::Items => "/items".to_string(),
            Self::Settings { tab: None } => "/settings".to_string(),
            Self::Settings { tab: Some(tab) } => format!("/settings/{tab}"),
            Self::Login => "/login".to_string(),
            Self::Signup => "/signup".to_string(),
            Self::RecoverPassword => "/recover-password".to_string(),
            Self::ResetPassword => "/reset-password".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// Route name used in navigation logs
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Admin => "admin",
            Self::Items => "items",
            Self::Settings { .. } => "settings",
            Self::Login => "login",
            Self::Signup => "signup",
            Self::RecoverPassword => "recover-password",
            Self::ResetPassword => "reset-password",
            Self::NotFound => "not-found",
        }
    }

    /// Resolve a location path. Query strings and trailing slashes are ignored.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Self::Home,
            ["admin"] => Self::Admin,
            ["items"] => Self::Items,
            ["settings"] => Self::Settings { tab: None },
            ["settings", tab] => Self::Settings {
                tab: Some((*tab).to_string()),
            },
            ["login"] => Self::Login,
            ["signup"] => Self::Signup,
            ["recover-password"] => Self::RecoverPassword,
            ["reset-password"] => Self::ResetPassword,
            _ => Self::NotFound,
        }
    }

    /// Protected routes need a stored token
    pub const fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Home | Self::Admin | Self::Items | Self::Settings { .. }
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Performs navigation (the browser crate wraps the router history)
pub trait Navigator {
    fn push(&self, route: Route);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(Route),
}

/// Presence-only check run before every navigation.
///
/// The token is not validated here; a rejected token is caught by the
/// current-user query.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    tokens: TokenStore,
}

impl RouteGuard {
    pub const fn new(tokens: TokenStore) -> Self {
        Self { tokens }
    }

    pub fn check(&self, target: &Route) -> GuardDecision {
        if target.requires_auth() && !self.tokens.is_present() {
            tracing::debug!(route = target.name(), "Redirecting unauthenticated navigation");
            GuardDecision::Redirect(Route::Login)
        } else {
            GuardDecision::Proceed
        }
    }

    /// The route that should actually render for `target`
    pub fn resolve(&self, target: Route) -> Route {
        match self.check(&target) {
            GuardDecision::Proceed => target,
            GuardDecision::Redirect(to) => to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FallbackStorage;

    #[test]
    fn parse_and_path_agree() {
        for route in [
            Route::Home,
            Route::Admin,
            Route::Items,
            Route::Settings { tab: None },
            Route::Settings {
                tab: Some("password".into()),
            },
            Route::Login,
            Route::Signup,
            Route::RecoverPassword,
            Route::ResetPassword,
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
        assert_eq!(Route::parse("/items/?page=2"), Route::Items);
        assert_eq!(Route::parse("/nope"), Route::NotFound);
    }

    #[test]
    fn guard_redirects_protected_routes_without_token() {
        let tokens = TokenStore::new(FallbackStorage::memory_only());
        let guard = RouteGuard::new(tokens.clone());

        assert_eq!(
            guard.check(&Route::Settings { tab: None }),
            GuardDecision::Redirect(Route::Login)
        );
        assert_eq!(guard.check(&Route::Signup), GuardDecision::Proceed);
        assert_eq!(guard.check(&Route::NotFound), GuardDecision::Proceed);

        tokens.set("t");
        assert_eq!(guard.resolve(Route::Admin), Route::Admin);
    }
}
