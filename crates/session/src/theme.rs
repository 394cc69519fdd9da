//! Colour mode preference

use crate::events::{Listeners, Subscription};
use crate::storage::FallbackStorage;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;

/// Storage key of the colour mode
pub const COLOR_MODE_KEY: &str = "colorMode";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ColorMode {
    #[default]
    #[serde(rename = "light-mode")]
    Light,
    #[serde(rename = "dark-mode")]
    Dark,
}

impl ColorMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light-mode",
            Self::Dark => "dark-mode",
        }
    }

    /// Unknown values read as light
    pub fn parse(value: &str) -> Self {
        match value {
            "dark-mode" => Self::Dark,
            _ => Self::Light,
        }
    }

    pub const fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Whether the `dark-mode` class belongs on the document element
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

struct ThemeInner {
    storage: FallbackStorage,
    mode: Cell<ColorMode>,
    listeners: Listeners<ColorMode>,
}

/// Persisted colour mode with change notifications. Clones share state.
#[derive(Clone)]
pub struct ThemeStore {
    inner: Rc<ThemeInner>,
}

impl ThemeStore {
    /// Load the stored preference, defaulting to light
    pub fn new(storage: FallbackStorage) -> Self {
        let mode = storage
            .get(COLOR_MODE_KEY)
            .map(|value| ColorMode::parse(&value))
            .unwrap_or_default();
        Self {
            inner: Rc::new(ThemeInner {
                storage,
                mode: Cell::new(mode),
                listeners: Listeners::new(),
            }),
        }
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn color_mode(&self) -> ColorMode {
        self.inner.mode.get()
    }

    /// Persist and apply. Subscribers are called even when the mode is
    /// unchanged so the document class can be applied on startup.
    pub fn set_color_mode(&self, mode: ColorMode) {
        self.inner.mode.set(mode);
        self.inner.storage.set(COLOR_MODE_KEY, mode.as_str());
        tracing::debug!(mode = mode.as_str(), "Color mode set");
        self.inner.listeners.emit(&mode);
    }

    pub fn toggle(&self) -> ColorMode {
        let mode = self.color_mode().toggle();
        self.set_color_mode(mode);
        mode
    }

    pub fn subscribe(&self, callback: impl Fn(ColorMode) + 'static) -> Subscription {
        self.inner.listeners.subscribe(move |mode| callback(*mode))
    }
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("mode", &self.color_mode())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::cell::RefCell;

    #[test]
    fn serializes_as_css_class_names() {
        assert_eq!(
            serde_json::to_string(&ColorMode::Dark).unwrap(),
            "\"dark-mode\""
        );
        assert_eq!(ColorMode::parse("light-mode"), ColorMode::Light);
        assert_eq!(ColorMode::parse("garbage"), ColorMode::Light);
    }

    #[test]
    fn preference_survives_reload() {
        let backend = MemoryStorage::new();
        let theme = ThemeStore::new(FallbackStorage::new(Rc::new(backend.clone())));
        assert_eq!(theme.color_mode(), ColorMode::Light);

        assert_eq!(theme.toggle(), ColorMode::Dark);
        assert_eq!(backend.get(COLOR_MODE_KEY).as_deref(), Some("dark-mode"));

        let reloaded = ThemeStore::new(FallbackStorage::new(Rc::new(backend)));
        assert_eq!(reloaded.color_mode(), ColorMode::Dark);
    }

    #[test]
    fn subscribers_see_every_set() {
        let theme = ThemeStore::new(FallbackStorage::memory_only());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let seen = seen.clone();
            theme.subscribe(move |mode| seen.borrow_mut().push(mode))
        };

        theme.set_color_mode(ColorMode::Light);
        theme.toggle();
        assert_eq!(*seen.borrow(), vec![ColorMode::Light, ColorMode::Dark]);
    }
}
