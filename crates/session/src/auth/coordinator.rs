//! Session coordinator: login, sign-up, logout and the current-user query

use super::errors::{GENERIC_ERROR_MESSAGE, error_detail};
use super::mutation::{Mutation, PendingMutations};
use crate::api::{HttpSessionApi, SessionApi};
use crate::clock::{Clock, SystemClock};
use crate::events::{AppEvent, EventBus, Listeners, Subscription};
use crate::gate::SessionGate;
use crate::navigation::{Navigator, Route, RouteGuard};
use crate::notify::{Notifier, Toast};
use crate::query::{QueryClient, QueryKey, QueryStatus, RetryPolicy};
use crate::storage::FallbackStorage;
use crate::token::TokenStore;
use fastadmin_core::{AppConfig, QueryConfig};
use fastadmin_http::types::{LoginForm, UserPublic, UserRegister};
use fastadmin_http::{ClientError, PublicAdminClient};
use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;
use tracing::{debug, info, warn};

struct Inner {
    api: Rc<dyn SessionApi>,
    tokens: TokenStore,
    gate: SessionGate,
    guard: RouteGuard,
    events: EventBus,
    queries: QueryClient,
    retry: RetryPolicy,
    navigator: Rc<dyn Navigator>,
    notifier: Rc<dyn Notifier>,
    error: RefCell<Option<String>>,
    error_listeners: Listeners<Option<String>>,
    pending: PendingMutations,
    statuses: RefCell<HashMap<QueryKey, Rc<QueryStatus>>>,
    _cache_binding: Subscription,
}

/// Single owner of authentication state.
///
/// All reads and writes of the token go through here. Consumers observe
/// changes with [`subscribe_session`](Self::subscribe_session) and
/// [`subscribe_events`](Self::subscribe_events) instead of polling storage.
/// Clones share the same session.
#[derive(Clone)]
pub struct SessionCoordinator {
    inner: Rc<Inner>,
}

impl std::fmt::Debug for SessionCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCoordinator")
            .field("logged_in", &self.is_logged_in())
            .field("cached_queries", &self.inner.queries.len())
            .finish_non_exhaustive()
    }
}

/// Builder for [`SessionCoordinator`]
#[derive(Default)]
pub struct SessionCoordinatorBuilder {
    storage: Option<FallbackStorage>,
    api: Option<Rc<dyn SessionApi>>,
    base_url: Option<String>,
    navigator: Option<Rc<dyn Navigator>>,
    notifier: Option<Rc<dyn Notifier>>,
    clock: Option<Rc<dyn Clock>>,
    query: QueryConfig,
    retry: Option<RetryPolicy>,
}

impl SessionCoordinatorBuilder {
    /// Where the token lives. Defaults to memory only.
    #[must_use]
    pub fn storage(mut self, storage: FallbackStorage) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Use a custom backend instead of the HTTP client
    #[must_use]
    pub fn api(mut self, api: impl SessionApi + 'static) -> Self {
        self.api = Some(Rc::new(api));
        self
    }

    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Take the API URL and query settings from the application config
    #[must_use]
    pub fn config(mut self, config: &AppConfig) -> Self {
        self.base_url = Some(config.base_url().to_string());
        self.query = config.query;
        self
    }

    #[must_use]
    pub const fn query_config(mut self, query: QueryConfig) -> Self {
        self.query = query;
        self
    }

    /// Override the retry policy derived from the query config
    #[must_use]
    pub const fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    #[must_use]
    pub fn navigator(mut self, navigator: impl Navigator + 'static) -> Self {
        self.navigator = Some(Rc::new(navigator));
        self
    }

    #[must_use]
    pub fn notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Some(Rc::new(notifier));
        self
    }

    #[must_use]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Rc::new(clock));
        self
    }

    pub fn build(self) -> Result<SessionCoordinator, ClientError> {
        let navigator = self
            .navigator
            .ok_or_else(|| ClientError::Configuration("navigator is required".to_string()))?;
        let notifier = self
            .notifier
            .ok_or_else(|| ClientError::Configuration("notifier is required".to_string()))?;

        let tokens = TokenStore::new(self.storage.unwrap_or_else(FallbackStorage::memory_only));
        let api = match (self.api, self.base_url) {
            (Some(api), _) => api,
            (None, Some(base_url)) => Rc::new(HttpSessionApi::new(
                PublicAdminClient::new(base_url)?,
                tokens.clone(),
            )),
            (None, None) => {
                return Err(ClientError::Configuration(
                    "either an API or a base URL is required".to_string(),
                ));
            }
        };

        let clock = self.clock.unwrap_or_else(|| Rc::new(SystemClock));
        let queries = QueryClient::new(clock, &self.query);
        let events = EventBus::new();
        let cache_binding = queries.bind(&events);
        let gate = SessionGate::new(tokens.get());

        debug!(logged_in = gate.is_logged_in(), "Session coordinator ready");

        Ok(SessionCoordinator {
            inner: Rc::new(Inner {
                api,
                guard: RouteGuard::new(tokens.clone()),
                tokens,
                gate,
                events,
                queries,
                retry: self.retry.unwrap_or_else(|| RetryPolicy::from(&self.query)),
                navigator,
                notifier,
                error: RefCell::new(None),
                error_listeners: Listeners::new(),
                pending: PendingMutations::default(),
                statuses: RefCell::new(HashMap::new()),
                _cache_binding: cache_binding,
            }),
        })
    }
}

impl SessionCoordinator {
    pub fn builder() -> SessionCoordinatorBuilder {
        SessionCoordinatorBuilder::default()
    }

    /// Whether both handles share one session
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Whether a token is stored
    pub fn is_logged_in(&self) -> bool {
        self.inner.tokens.is_present()
    }

    /// Whether identity-dependent queries may run (driven by the mirror)
    pub fn is_query_enabled(&self) -> bool {
        self.inner.gate.is_logged_in()
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.inner.tokens
    }

    pub fn gate(&self) -> &SessionGate {
        &self.inner.gate
    }

    pub fn queries(&self) -> &QueryClient {
        &self.inner.queries
    }

    pub fn events(&self) -> &EventBus {
        &self.inner.events
    }

    pub fn guard(&self) -> &RouteGuard {
        &self.inner.guard
    }

    /// Observe the session gate flipping
    pub fn subscribe_session(&self, callback: impl Fn(bool) + 'static) -> Subscription {
        self.inner.gate.subscribe(callback)
    }

    pub fn subscribe_events(&self, callback: impl Fn(&AppEvent) + 'static) -> Subscription {
        self.inner.events.subscribe(callback)
    }

    pub fn subscribe_error(&self, callback: impl Fn(&Option<String>) + 'static) -> Subscription {
        self.inner.error_listeners.subscribe(callback)
    }

    /// Navigate through the route guard; returns where we actually went
    pub fn navigate(&self, route: Route) -> Route {
        let target = self.inner.guard.resolve(route);
        self.inner.navigator.push(target.clone());
        target
    }

    // ---- current user ----

    /// Cached profile of the logged-in user, without fetching
    pub fn user(&self) -> Option<UserPublic> {
        self.inner
            .queries
            .get_query_data(&QueryKey::current_user())
    }

    /// Loading/error flags of the query under `key`
    pub fn query_status(&self, key: &QueryKey) -> Rc<QueryStatus> {
        Rc::clone(
            self.inner
                .statuses
                .borrow_mut()
                .entry(key.clone())
                .or_default(),
        )
    }

    /// Whether the current-user fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.query_status(&QueryKey::current_user()).is_loading()
    }

    /// Profile of the logged-in user.
    ///
    /// Returns `Ok(None)` without a request while logged out. A 403 means the
    /// token was rejected: the session is ended before the error is returned.
    pub async fn current_user(&self) -> Result<Option<UserPublic>, ClientError> {
        let token = self.inner.gate.token();
        let api = Rc::clone(&self.inner.api);
        let result = self
            .gated_query(&QueryKey::current_user(), move || {
                let api = Rc::clone(&api);
                async move { api.current_user().await }
            })
            .await;

        if let Err(err) = &result {
            // A 403 for a token we no longer hold belongs to an old session.
            if err.is_forbidden() && self.inner.gate.token() == token {
                warn!("Current token was rejected, logging out");
                self.logout();
            }
        }
        result
    }

    /// Fetch through the cache if the session gate is open
    pub(crate) async fn gated_query<T, F, Fut>(
        &self,
        key: &QueryKey,
        fetch: F,
    ) -> Result<Option<T>, ClientError>
    where
        T: Clone + 'static,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        if !self.is_query_enabled() {
            return Ok(None);
        }
        let status = self.query_status(key);
        self.inner
            .queries
            .fetch_query(key, &status, &self.inner.retry, fetch)
            .await
            .map(Some)
    }

    pub(crate) fn api(&self) -> Rc<dyn SessionApi> {
        Rc::clone(&self.inner.api)
    }

    // ---- error state ----

    /// Message of the last failed login
    pub fn error(&self) -> Option<String> {
        self.inner.error.borrow().clone()
    }

    pub fn reset_error(&self) {
        self.set_error(None);
    }

    fn set_error(&self, error: Option<String>) {
        self.inner.error.replace(error.clone());
        self.inner.error_listeners.emit(&error);
    }

    // ---- mutations ----

    pub fn is_pending(&self, mutation: Mutation) -> bool {
        self.inner.pending.is_pending(mutation)
    }

    pub(crate) fn notify(&self, toast: Toast) {
        self.inner.notifier.notify(toast);
    }

    pub(crate) fn publish(&self, event: AppEvent) {
        self.inner.events.emit(&event);
    }

    pub(crate) fn push_route(&self, route: Route) {
        self.inner.navigator.push(route);
    }

    /// Run a write: success toast on `Ok`, error toast with the extracted
    /// detail on `Err`, then publish `settled` either way.
    pub(crate) async fn mutate<T, Fut>(
        &self,
        mutation: Mutation,
        request: Fut,
        success: Toast,
        settled: &[AppEvent],
    ) -> Option<T>
    where
        Fut: Future<Output = Result<T, ClientError>>,
    {
        self.mutate_then(mutation, request, |_| {}, success, settled)
            .await
    }

    /// [`mutate`](Self::mutate) with a step that runs before the success toast
    pub(crate) async fn mutate_then<T, Fut>(
        &self,
        mutation: Mutation,
        request: Fut,
        on_success: impl FnOnce(&T),
        success: Toast,
        settled: &[AppEvent],
    ) -> Option<T>
    where
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let _pending = self.inner.pending.begin(mutation);
        let result = request.await;
        match &result {
            Ok(value) => {
                debug!(?mutation, "Mutation succeeded");
                on_success(value);
                self.notify(success);
            }
            Err(err) => {
                warn!(?mutation, error = %err, "Mutation failed");
                self.notify(Toast::error(GENERIC_ERROR_MESSAGE, error_detail(err)));
            }
        }
        for event in settled {
            self.publish(*event);
        }
        result.ok()
    }

    /// Exchange credentials for a token.
    ///
    /// On success the token is stored and mirrored, the app navigates home
    /// and the current-user query is invalidated, in that order. On failure
    /// the message lands in [`error`](Self::error) and nothing else changes.
    pub async fn login(&self, form: LoginForm) -> bool {
        let _pending = self.inner.pending.begin(Mutation::Login);
        match self.inner.api.login(&form).await {
            Ok(token) => {
                self.inner.tokens.set(&token.access_token);
                self.inner.gate.set_token(Some(token.access_token));
                info!("Logged in");
                self.push_route(Route::Home);
                self.publish(AppEvent::LoggedIn);
                true
            }
            Err(err) => {
                let message = error_detail(&err);
                warn!(error = %err, "Login failed");
                self.set_error(Some(message));
                false
            }
        }
    }

    /// Register a new account, then send the user to the login page.
    ///
    /// User listings are invalidated whatever the outcome.
    pub async fn sign_up(&self, body: UserRegister) -> bool {
        let api = self.api();
        self.mutate_then(
            Mutation::SignUp,
            api.register(&body),
            |_| self.push_route(Route::Login),
            Toast::success(
                "Account created",
                "Your account has been created successfully.",
            ),
            &[AppEvent::UsersChanged],
        )
        .await
        .is_some()
    }

    /// End the session locally: no request is made.
    ///
    /// Clears the token and its mirror, drops every cached query and
    /// navigates to login. Safe to call repeatedly.
    pub fn logout(&self) {
        self.inner.tokens.clear();
        self.inner.gate.set_token(None);
        self.publish(AppEvent::LoggedOut);
        info!("Logged out");
        self.push_route(Route::Login);
    }
}
