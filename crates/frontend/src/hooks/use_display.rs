//! Viewport breakpoints tracked from window resizes

use fastadmin_session::{Display, DisplayOptions, Platform};
use gloo::events::EventListener;
use wasm_bindgen::JsValue;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayState {
    pub display: Display,
    pub platform: Platform,
}

/// Current viewport classification, updated on every resize
#[hook]
pub fn use_display(options: DisplayOptions) -> DisplayState {
    let state = use_state(move || {
        let mut display = Display::new(options);
        if let Some((width, height)) = viewport() {
            display.update(width, height);
        }
        DisplayState {
            display,
            platform: detect_platform(),
        }
    });

    {
        let state = state.clone();
        use_effect_with((), move |()| {
            let listener = web_sys::window().map(|window| {
                EventListener::new(&window, "resize", move |_| {
                    if let Some((width, height)) = viewport() {
                        let mut next = (*state).clone();
                        next.display.update(width, height);
                        state.set(next);
                    }
                })
            });
            move || drop(listener)
        });
    }

    (*state).clone()
}

fn viewport() -> Option<(u32, u32)> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some((width as u32, height as u32))
}

fn detect_platform() -> Platform {
    let Some(window) = web_sys::window() else {
        return Platform::server_side();
    };
    let user_agent = window.navigator().user_agent().unwrap_or_default();
    let has = |name: &str| js_sys::Reflect::has(&window, &JsValue::from_str(name)).unwrap_or(false);
    Platform::detect(&user_agent, has("ontouchstart"), has("cordova"))
}
