//! Run a cached session query from a component

use crate::auth::use_session;
use fastadmin_http::ClientError;
use fastadmin_session::{SessionCoordinator, error_detail};
use std::future::Future;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Last result of a query as seen by a component
#[derive(Clone, Debug, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

/// Fetch through the session whenever `deps`, the session gate or the event
/// revision change. The cache decides whether that hits the network.
///
/// Responses that arrive after a newer fetch started are dropped.
#[hook]
pub fn use_session_query<T, D, F, Fut>(deps: D, fetch: F) -> QueryState<T>
where
    T: Clone + PartialEq + 'static,
    D: Clone + PartialEq + 'static,
    F: FnOnce(SessionCoordinator, D) -> Fut + 'static,
    Fut: Future<Output = Result<Option<T>, ClientError>> + 'static,
{
    let context = use_session();
    let state = use_state(QueryState::<T>::default);
    let generation = use_mut_ref(|| 0u64);

    {
        let state = state.clone();
        let session = context.session.clone();
        let generation = generation.clone();
        use_effect_with(
            (deps, context.state.logged_in, context.state.revision),
            move |(deps, _, _)| {
                let current = {
                    let mut generation = generation.borrow_mut();
                    *generation += 1;
                    *generation
                };
                state.set(QueryState {
                    loading: true,
                    ..(*state).clone()
                });

                let deps = deps.clone();
                spawn_local(async move {
                    let result = fetch(session, deps).await;
                    if *generation.borrow() != current {
                        return;
                    }
                    state.set(match result {
                        Ok(data) => QueryState {
                            data,
                            loading: false,
                            error: None,
                        },
                        Err(err) => QueryState {
                            data: None,
                            loading: false,
                            error: Some(error_detail(&err)),
                        },
                    });
                });
            },
        );
    }

    (*state).clone()
}
