//! Theme provider component

use super::context::ThemeContext;
use crate::storage::browser_storage;
use fastadmin_session::{ColorMode, ThemeStore};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct ThemeProviderProps {
    pub children: Children,
}

#[function_component(ThemeProvider)]
pub fn theme_provider(props: &ThemeProviderProps) -> Html {
    let store = use_memo((), |()| ThemeStore::new(browser_storage()));
    let mode = use_state(|| store.color_mode());

    {
        let mode = mode.clone();
        let store = store.clone();
        use_effect_with((), move |()| {
            let subscription = store.subscribe(move |next| {
                apply_to_document(next);
                mode.set(next);
            });
            // Apply the stored preference on startup.
            store.set_color_mode(store.color_mode());
            move || drop(subscription)
        });
    }

    let context = ThemeContext {
        store: (*store).clone(),
        mode: *mode,
    };

    html! {
        <ContextProvider<ThemeContext> context={context}>
            { props.children.clone() }
        </ContextProvider<ThemeContext>>
    }
}

/// Toggle the `dark-mode` class on `<html>`
fn apply_to_document(mode: ColorMode) {
    let Some(element) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
    else {
        return;
    };
    let class_list = element.class_list();
    let result = if mode.is_dark() {
        class_list.add_1(ColorMode::Dark.as_str())
    } else {
        class_list.remove_1(ColorMode::Dark.as_str())
    };
    if let Err(err) = result {
        tracing::warn!(?err, "Could not apply color mode");
    }
}
