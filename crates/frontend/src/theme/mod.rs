//! Theme management module

mod context;
mod provider;

pub use context::ThemeContext;
pub use provider::ThemeProvider;

use fastadmin_session::ColorMode;
use yew::prelude::*;

/// Hook to access theme context
#[hook]
pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>()
        .expect("Theme context not found. Make sure to wrap your app with ThemeProvider")
}

/// Hook to get current color mode
#[hook]
pub fn use_color_mode() -> ColorMode {
    use_theme().mode
}

/// Hook to get theme toggle callback
#[hook]
pub fn use_theme_toggle() -> Callback<()> {
    let theme = use_theme();
    Callback::from(move |()| {
        theme.store.toggle();
    })
}
