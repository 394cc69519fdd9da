//! Session provider component

use super::context::{SessionAction, SessionContext, SessionSnapshot};
use crate::services::{BrowserNavigator, ToastSink};
use crate::storage::browser_storage;
use fastadmin_core::AppConfig;
use fastadmin_session::SessionCoordinator;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct SessionProviderProps {
    pub config: AppConfig,
    pub toasts: ToastSink,
    pub children: Children,
}

/// Builds the coordinator once and publishes it with its live snapshot
#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let built = {
        let config = props.config.clone();
        let toasts = props.toasts.clone();
        use_memo((), move |()| {
            SessionCoordinator::builder()
                .config(&config)
                .storage(browser_storage())
                .navigator(BrowserNavigator::new())
                .notifier(toasts)
                .build()
        })
    };

    match &*built {
        Ok(session) => html! {
            <SessionState session={Handle(session.clone())}>
                { props.children.clone() }
            </SessionState>
        },
        Err(err) => {
            tracing::error!(error = %err, "Could not start the session");
            html! {
                <div class="min-h-screen flex items-center justify-center">
                    <p class="text-red-600">{ format!("Could not start: {err}") }</p>
                </div>
            }
        }
    }
}

#[derive(Clone)]
struct Handle(SessionCoordinator);

impl PartialEq for Handle {
    fn eq(&self, other: &Self) -> bool {
        self.0.ptr_eq(&other.0)
    }
}

#[derive(Properties, Clone, PartialEq)]
struct SessionStateProps {
    session: Handle,
    children: Children,
}

#[function_component(SessionState)]
fn session_state(props: &SessionStateProps) -> Html {
    let session = props.session.0.clone();
    let snapshot = {
        let session = session.clone();
        use_reducer(move || SessionSnapshot {
            logged_in: session.is_query_enabled(),
            error: session.error(),
            revision: 0,
        })
    };

    {
        let snapshot = snapshot.clone();
        use_effect_with(props.session.clone(), move |handle| {
            let session = &handle.0;
            let subscriptions = vec![
                {
                    let snapshot = snapshot.clone();
                    session.subscribe_session(move |logged_in| {
                        snapshot.dispatch(SessionAction::Gate(logged_in));
                    })
                },
                {
                    let snapshot = snapshot.clone();
                    session.subscribe_error(move |error| {
                        snapshot.dispatch(SessionAction::Error(error.clone()));
                    })
                },
                session.subscribe_events(move |event| {
                    tracing::trace!(?event, "Session event");
                    snapshot.dispatch(SessionAction::Changed);
                }),
            ];
            move || drop(subscriptions)
        });
    }

    let context = SessionContext {
        session,
        state: (*snapshot).clone(),
    };

    html! {
        <ContextProvider<SessionContext> context={context}>
            { props.children.clone() }
        </ContextProvider<SessionContext>>
    }
}
