//! Theme context value

use fastadmin_session::{ColorMode, ThemeStore};

/// The persisted store plus the mode it last reported
#[derive(Clone, Debug)]
pub struct ThemeContext {
    pub store: ThemeStore,
    pub mode: ColorMode,
}

impl PartialEq for ThemeContext {
    fn eq(&self, other: &Self) -> bool {
        self.store.ptr_eq(&other.store) && self.mode == other.mode
    }
}
