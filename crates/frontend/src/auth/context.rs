//! Session context value

use fastadmin_session::SessionCoordinator;
use std::rc::Rc;
use yew::prelude::*;

/// What the UI re-renders on
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub logged_in: bool,
    /// Message of the last failed login
    pub error: Option<String>,
    /// Bumped on every application event so queries can refetch
    pub revision: u64,
}

pub enum SessionAction {
    Gate(bool),
    Error(Option<String>),
    Changed,
}

impl Reducible for SessionSnapshot {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            SessionAction::Gate(logged_in) => next.logged_in = logged_in,
            SessionAction::Error(error) => next.error = error,
            SessionAction::Changed => next.revision += 1,
        }
        Rc::new(next)
    }
}

/// The coordinator plus the snapshot it last published
#[derive(Clone, Debug)]
pub struct SessionContext {
    pub session: SessionCoordinator,
    pub state: SessionSnapshot,
}

impl PartialEq for SessionContext {
    fn eq(&self, other: &Self) -> bool {
        self.session.ptr_eq(&other.session) && self.state == other.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn revision_only_moves_on_change_events() {
        let snapshot = Rc::new(SessionSnapshot::default());
        let snapshot = snapshot.reduce(SessionAction::Gate(true));
        let snapshot = snapshot.reduce(SessionAction::Error(Some("Incorrect email or password".into())));
        assert_eq!(snapshot.revision, 0);
        assert!(snapshot.logged_in);

        let snapshot = snapshot.reduce(SessionAction::Changed);
        assert_eq!(snapshot.revision, 1);
        assert_eq!(snapshot.error.as_deref(), Some("Incorrect email or password"));
    }
}
