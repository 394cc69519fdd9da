//! Session context shared by every view

mod context;
mod provider;

pub use context::SessionContext;
pub use provider::SessionProvider;

use fastadmin_http::types::UserPublic;
use yew::prelude::*;

use crate::hooks::{QueryState, use_session_query};

/// Hook to access the session context
#[hook]
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
        .expect("Session context not found. Make sure to wrap your app with SessionProvider")
}

/// Profile of the logged-in user, refetched when the session or profile changes
#[hook]
pub fn use_current_user() -> QueryState<UserPublic> {
    use_session_query((), |session, ()| async move { session.current_user().await })
}
