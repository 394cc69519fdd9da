use crate::theme::{use_color_mode, use_theme_toggle};
use yew::prelude::*;

#[function_component(ThemeToggle)]
pub fn theme_toggle() -> Html {
    let mode = use_color_mode();
    let toggle = use_theme_toggle();
    let onclick = Callback::from(move |_: MouseEvent| toggle.emit(()));

    html! {
        <button
            {onclick}
            class="p-2 rounded-md text-gray-600 dark:text-gray-300 hover:bg-gray-100 dark:hover:bg-gray-800"
            title={if mode.is_dark() { "Switch to light mode" } else { "Switch to dark mode" }}
        >
            { if mode.is_dark() { "☀" } else { "☾" } }
        </button>
    }
}
