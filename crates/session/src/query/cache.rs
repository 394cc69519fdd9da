//! In-memory query cache with freshness and garbage-collection windows

use super::key::QueryKey;
use super::retry::{RetryPolicy, retry_with_policy};
use crate::clock::Clock;
use crate::events::{AppEvent, EventBus, Subscription};
use fastadmin_core::QueryConfig;
use fastadmin_http::ClientError;
use futures::channel::oneshot;
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

struct CacheEntry {
    data: Rc<dyn Any>,
    updated_at: u64,
    last_used: u64,
    invalidated: bool,
}

struct QueryClientInner {
    entries: RefCell<HashMap<QueryKey, CacheEntry>>,
    clock: Rc<dyn Clock>,
    stale_ms: u64,
    gc_ms: u64,
    /// Fetch that new callers of a key join
    in_flight: RefCell<HashMap<QueryKey, u64>>,
    /// Callers waiting on each fetch, by flight id. Each waiter is a
    /// `oneshot::Sender<Result<T, ClientError>>` for the caller's `T`.
    waiters: RefCell<HashMap<u64, Vec<Box<dyn Any>>>>,
    next_flight: Cell<u64>,
}

/// Loading/error flags of one query, for the UI
#[derive(Debug, Default)]
pub struct QueryStatus {
    loading: Cell<bool>,
    error: Cell<bool>,
    fetches: Cell<u32>,
}

impl QueryStatus {
    /// A network fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    /// The last fetch failed
    pub fn is_error(&self) -> bool {
        self.error.get()
    }

    /// Network fetches started so far (cache hits are not counted)
    pub fn fetch_count(&self) -> u32 {
        self.fetches.get()
    }
}

/// Shared cache of server data. Clones share the same entries.
#[derive(Clone)]
pub struct QueryClient {
    inner: Rc<QueryClientInner>,
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl QueryClient {
    pub fn new(clock: Rc<dyn Clock>, config: &QueryConfig) -> Self {
        Self {
            inner: Rc::new(QueryClientInner {
                entries: RefCell::new(HashMap::new()),
                clock,
                stale_ms: duration_ms(config.stale_time()),
                gc_ms: duration_ms(config.gc_time()),
                in_flight: RefCell::new(HashMap::new()),
                waiters: RefCell::new(HashMap::new()),
                next_flight: Cell::new(0),
            }),
        }
    }

    fn now(&self) -> u64 {
        self.inner.clock.now_ms()
    }

    /// Cached data for `key`, fresh or stale
    pub fn get_query_data<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        self.collect_garbage();
        let now = self.now();
        let mut entries = self.inner.entries.borrow_mut();
        let entry = entries.get_mut(key)?;
        entry.last_used = now;
        entry.data.downcast_ref::<T>().cloned()
    }

    /// Cached data for `key` only if it is still fresh
    pub fn get_fresh<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        if self.is_stale(key) {
            return None;
        }
        self.get_query_data(key)
    }

    /// Whether the next read of `key` should go to the network
    pub fn is_stale(&self, key: &QueryKey) -> bool {
        let now = self.now();
        self.inner.entries.borrow().get(key).is_none_or(|entry| {
            entry.invalidated || now.saturating_sub(entry.updated_at) >= self.inner.stale_ms
        })
    }

    pub fn set_query_data<T: 'static>(&self, key: &QueryKey, data: T) {
        let now = self.now();
        self.inner.entries.borrow_mut().insert(
            key.clone(),
            CacheEntry {
                data: Rc::new(data),
                updated_at: now,
                last_used: now,
                invalidated: false,
            },
        );
    }

    /// Mark every entry under `prefix` stale; returns how many matched.
    /// Fetches in flight under `prefix` will not write their results back,
    /// and later callers start a new request instead of joining them.
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        self.inner
            .in_flight
            .borrow_mut()
            .retain(|key, _| !key.starts_with(prefix));
        let mut count = 0;
        for (key, entry) in self.inner.entries.borrow_mut().iter_mut() {
            if key.starts_with(prefix) {
                entry.invalidated = true;
                count += 1;
            }
        }
        tracing::debug!(%prefix, count, "Invalidated queries");
        count
    }

    /// Drop every entry under `prefix`
    pub fn remove(&self, prefix: &QueryKey) {
        self.inner
            .entries
            .borrow_mut()
            .retain(|key, _| !key.starts_with(prefix));
    }

    /// Drop everything. Fetches that started before the clear will not
    /// write their results back.
    pub fn clear(&self) {
        self.inner.entries.borrow_mut().clear();
        self.inner.in_flight.borrow_mut().clear();
        tracing::debug!("Cleared query cache");
    }

    /// Evict entries unused for longer than the gc window
    pub fn collect_garbage(&self) -> usize {
        let now = self.now();
        let gc_ms = self.inner.gc_ms;
        let mut entries = self.inner.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|_, entry| now.saturating_sub(entry.last_used) < gc_ms);
        before - entries.len()
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.inner.entries.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.borrow().is_empty()
    }

    /// Invalidate cached views in response to application events
    pub fn bind(&self, events: &EventBus) -> Subscription {
        let client = self.clone();
        events.subscribe(move |event| match event {
            AppEvent::LoggedIn => {
                client.invalidate(&QueryKey::current_user());
            }
            AppEvent::LoggedOut => client.clear(),
            AppEvent::ProfileChanged => {
                client.invalidate(&QueryKey::current_user());
                client.invalidate(&QueryKey::users());
            }
            AppEvent::UsersChanged => {
                client.invalidate(&QueryKey::users());
            }
            AppEvent::ItemsChanged => {
                client.invalidate(&QueryKey::items());
            }
        })
    }

    /// Return fresh cached data or fetch it with retries.
    ///
    /// Concurrent callers for the same key share one request: the first
    /// one fetches and the others await its result. A result is only cached
    /// if the key was not cleared or invalidated while the request was in
    /// flight, so a response for a previous session can never repopulate
    /// the cache after logout.
    pub async fn fetch_query<T, F, Fut>(
        &self,
        key: &QueryKey,
        status: &QueryStatus,
        policy: &RetryPolicy,
        fetcher: F,
    ) -> Result<T, ClientError>
    where
        T: Clone + 'static,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        if let Some(data) = self.get_fresh::<T>(key) {
            tracing::debug!(%key, "Query cache hit");
            return Ok(data);
        }

        if let Some(receiver) = self.join_flight::<T>(key) {
            tracing::debug!(%key, "Joining in-flight query");
            // A dropped sender means the fetching caller went away.
            if let Ok(result) = receiver.await {
                return result;
            }
        }

        let flight = self.begin_flight(key);
        status.loading.set(true);
        status.fetches.set(status.fetches.get() + 1);

        let result = retry_with_policy(policy, fetcher).await;

        status.loading.set(false);
        status.error.set(result.is_err());
        if let Ok(data) = &result {
            if flight.is_current() {
                self.set_query_data(key, data.clone());
            } else {
                tracing::debug!(%key, "Discarding result superseded while in flight");
            }
        }
        flight.settle(result)
    }

    fn join_flight<T: 'static>(
        &self,
        key: &QueryKey,
    ) -> Option<oneshot::Receiver<Result<T, ClientError>>> {
        let id = *self.inner.in_flight.borrow().get(key)?;
        let (sender, receiver) = oneshot::channel::<Result<T, ClientError>>();
        self.inner
            .waiters
            .borrow_mut()
            .get_mut(&id)?
            .push(Box::new(sender));
        Some(receiver)
    }

    fn begin_flight(&self, key: &QueryKey) -> Flight {
        let id = self.inner.next_flight.get();
        self.inner.next_flight.set(id + 1);
        self.inner.in_flight.borrow_mut().insert(key.clone(), id);
        self.inner.waiters.borrow_mut().insert(id, Vec::new());
        Flight {
            client: self.clone(),
            key: key.clone(),
            id,
        }
    }
}

/// One network fetch other callers can join. Dropping it releases the
/// key and cancels any callers still waiting.
struct Flight {
    client: QueryClient,
    key: QueryKey,
    id: u64,
}

impl Flight {
    /// Whether the key still points at this fetch
    fn is_current(&self) -> bool {
        self.client.inner.in_flight.borrow().get(&self.key) == Some(&self.id)
    }

    /// Hand the result to every joined caller and return it
    fn settle<T: Clone + 'static>(self, result: Result<T, ClientError>) -> Result<T, ClientError> {
        let waiters = self
            .client
            .inner
            .waiters
            .borrow_mut()
            .remove(&self.id)
            .unwrap_or_default();
        if waiters.is_empty() {
            return result;
        }

        tracing::debug!(key = %self.key, joined = waiters.len(), "Sharing query result");
        let result = result.map_err(Arc::new);
        for waiter in waiters {
            // A caller that asked for another type gets nothing and refetches.
            if let Ok(sender) = waiter.downcast::<oneshot::Sender<Result<T, ClientError>>>() {
                let _ = (*sender).send(result.clone().map_err(ClientError::Shared));
            }
        }
        result.map_err(ClientError::Shared)
    }
}

impl Drop for Flight {
    fn drop(&mut self) {
        let inner = &self.client.inner;
        inner.waiters.borrow_mut().remove(&self.id);
        let mut in_flight = inner.in_flight.borrow_mut();
        if in_flight.get(&self.key) == Some(&self.id) {
            in_flight.remove(&self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use fastadmin_http::types::Paging;

    fn client() -> (QueryClient, ManualClock) {
        let clock = ManualClock::new(0);
        (
            QueryClient::new(Rc::new(clock.clone()), &QueryConfig::default()),
            clock,
        )
    }

    #[test]
    fn data_is_fresh_for_five_minutes() {
        let (cache, clock) = client();
        let key = QueryKey::current_user();
        cache.set_query_data(&key, 7u32);

        clock.advance(Duration::from_secs(299));
        assert_eq!(cache.get_fresh::<u32>(&key), Some(7));

        clock.advance(Duration::from_secs(1));
        assert_eq!(cache.get_fresh::<u32>(&key), None);
        assert_eq!(cache.get_query_data::<u32>(&key), Some(7));
    }

    #[test]
    fn unused_data_is_evicted_after_thirty_minutes() {
        let (cache, clock) = client();
        let key = QueryKey::items_page(Paging::default());
        cache.set_query_data(&key, "items".to_string());

        clock.advance(Duration::from_secs(20 * 60));
        assert!(cache.get_query_data::<String>(&key).is_some());

        // Reading refreshed last_used, so the window restarts.
        clock.advance(Duration::from_secs(20 * 60));
        assert_eq!(cache.collect_garbage(), 0);

        clock.advance(Duration::from_secs(10 * 60));
        assert_eq!(cache.collect_garbage(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn invalidation_matches_prefix() {
        let (cache, _) = client();
        cache.set_query_data(&QueryKey::users_page(Paging::page(0, 10)), 1u8);
        cache.set_query_data(&QueryKey::users_page(Paging::page(1, 10)), 2u8);
        cache.set_query_data(&QueryKey::current_user(), 3u8);

        assert_eq!(cache.invalidate(&QueryKey::users()), 2);
        assert!(cache.is_stale(&QueryKey::users_page(Paging::page(0, 10))));
        assert!(!cache.is_stale(&QueryKey::current_user()));
    }

    #[test]
    fn events_drive_invalidation() {
        let (cache, _) = client();
        let events = EventBus::new();
        let _binding = cache.bind(&events);

        cache.set_query_data(&QueryKey::current_user(), 1u8);
        cache.set_query_data(&QueryKey::items_page(Paging::default()), 2u8);

        events.emit(&AppEvent::LoggedIn);
        assert!(cache.is_stale(&QueryKey::current_user()));
        assert!(!cache.is_stale(&QueryKey::items_page(Paging::default())));

        events.emit(&AppEvent::LoggedOut);
        assert!(cache.is_empty());
    }

    #[test]
    fn wrong_type_reads_as_missing() {
        let (cache, _) = client();
        cache.set_query_data(&QueryKey::current_user(), 1u8);
        assert_eq!(cache.get_query_data::<String>(&QueryKey::current_user()), None);
    }

    #[tokio::test]
    async fn fetch_query_uses_cache_until_stale() {
        let (cache, clock) = client();
        let status = QueryStatus::default();
        let policy = RetryPolicy::immediate(0);
        let key = QueryKey::current_user();

        let first = cache
            .fetch_query(&key, &status, &policy, || async { Ok(1u32) })
            .await
            .unwrap();
        let second = cache
            .fetch_query(&key, &status, &policy, || async { Ok(2u32) })
            .await
            .unwrap();
        assert_eq!((first, second), (1, 1));
        assert_eq!(status.fetch_count(), 1);

        clock.advance(Duration::from_secs(301));
        let third = cache
            .fetch_query(&key, &status, &policy, || async { Ok(3u32) })
            .await
            .unwrap();
        assert_eq!(third, 3);
        assert_eq!(status.fetch_count(), 2);
        assert!(!status.is_loading());
    }

    #[tokio::test]
    async fn results_from_before_a_clear_are_discarded() {
        let (cache, _) = client();
        let status = QueryStatus::default();
        let key = QueryKey::current_user();

        let result = cache
            .fetch_query(&key, &status, &RetryPolicy::immediate(0), || {
                cache.clear();
                async { Ok(5u32) }
            })
            .await;

        assert_eq!(result.unwrap(), 5);
        assert!(!cache.contains(&key));
    }

    #[tokio::test]
    async fn invalidation_during_a_fetch_keeps_the_entry_stale() {
        let (cache, _) = client();
        let status = QueryStatus::default();
        let key = QueryKey::users_page(Paging::default());
        cache.set_query_data(&key, 1u32);
        cache.invalidate(&QueryKey::users());

        let result = cache
            .fetch_query(&key, &status, &RetryPolicy::immediate(0), || {
                cache.invalidate(&QueryKey::users());
                async { Ok(2u32) }
            })
            .await;

        assert_eq!(result.unwrap(), 2);
        assert!(cache.is_stale(&key));
        assert_eq!(cache.get_query_data::<u32>(&key), Some(1));
    }

    #[tokio::test]
    async fn unrelated_invalidation_during_a_fetch_still_caches() {
        let (cache, _) = client();
        let status = QueryStatus::default();
        let key = QueryKey::current_user();

        let result = cache
            .fetch_query(&key, &status, &RetryPolicy::immediate(0), || {
                cache.invalidate(&QueryKey::items());
                async { Ok(9u32) }
            })
            .await;

        assert_eq!(result.unwrap(), 9);
        assert_eq!(cache.get_fresh::<u32>(&key), Some(9));
    }

    #[tokio::test]
    async fn concurrent_fetches_share_one_request() {
        let (cache, _) = client();
        let status = QueryStatus::default();
        let policy = RetryPolicy::immediate(0);
        let key = QueryKey::current_user();
        let (release, gate) = oneshot::channel::<()>();
        let gate = RefCell::new(Some(gate));
        let calls = Cell::new(0);

        let fetch = || {
            calls.set(calls.get() + 1);
            let gate = gate.borrow_mut().take();
            async move {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                Ok(4u32)
            }
        };

        let (first, second, ()) = tokio::join!(
            cache.fetch_query(&key, &status, &policy, fetch),
            cache.fetch_query(&key, &status, &policy, fetch),
            async {
                release.send(()).unwrap();
            }
        );

        assert_eq!((first.unwrap(), second.unwrap()), (4, 4));
        assert_eq!(calls.get(), 1);
        assert_eq!(status.fetch_count(), 1);
        assert_eq!(cache.get_fresh::<u32>(&key), Some(4));
    }

    #[tokio::test]
    async fn joined_callers_receive_the_shared_failure() {
        let (cache, _) = client();
        let status = QueryStatus::default();
        let policy = RetryPolicy::immediate(0);
        let key = QueryKey::current_user();
        let (release, gate) = oneshot::channel::<()>();
        let gate = RefCell::new(Some(gate));

        let fetch = || {
            let gate = gate.borrow_mut().take();
            async move {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                Err::<u32, _>(ClientError::Forbidden(String::new()))
            }
        };

        let (first, second, ()) = tokio::join!(
            cache.fetch_query(&key, &status, &policy, fetch),
            cache.fetch_query(&key, &status, &policy, fetch),
            async {
                release.send(()).unwrap();
            }
        );

        assert!(first.unwrap_err().is_forbidden());
        assert!(second.unwrap_err().is_forbidden());
        assert_eq!(status.fetch_count(), 1);
        assert!(!cache.contains(&key));
    }

    #[tokio::test]
    async fn invalidated_fetch_is_not_joined() {
        let (cache, _) = client();
        let status = QueryStatus::default();
        let policy = RetryPolicy::immediate(0);
        let key = QueryKey::current_user();
        let (release, gate) = oneshot::channel::<()>();
        let gate = RefCell::new(Some(gate));

        let stale = || {
            let gate = gate.borrow_mut().take();
            async move {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                Ok(1u32)
            }
        };

        let (old, new, ()) = tokio::join!(
            cache.fetch_query(&key, &status, &policy, stale),
            async {
                cache.invalidate(&key);
                cache
                    .fetch_query(&key, &status, &policy, || async { Ok(2u32) })
                    .await
            },
            async {
                release.send(()).unwrap();
            }
        );

        assert_eq!((old.unwrap(), new.unwrap()), (1, 2));
        assert_eq!(status.fetch_count(), 2);
        assert_eq!(cache.get_fresh::<u32>(&key), Some(2));
    }

    #[tokio::test]
    async fn failed_fetch_sets_error_flag() {
        let (cache, _) = client();
        let status = QueryStatus::default();
        let result: Result<u32, _> = cache
            .fetch_query(&QueryKey::items(), &status, &RetryPolicy::immediate(1), || async {
                Err(ClientError::NotFound(String::new()))
            })
            .await;

        assert!(result.is_err());
        assert!(status.is_error());
        assert_eq!(status.fetch_count(), 1);
    }
}
