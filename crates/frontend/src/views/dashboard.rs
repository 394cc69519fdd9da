use crate::auth::use_current_user;
use crate::components::LoadingSpinner;
use yew::prelude::*;

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let user = use_current_user();

    if user.loading && user.data.is_none() {
        return html! { <LoadingSpinner /> };
    }

    html! {
        <div>
            <h1 class="text-2xl font-bold text-gray-900 dark:text-white">
                { format!("Hi, {} 👋🏼", user.data.as_ref().map_or("", |user| user.display_name())) }
            </h1>
            <p class="mt-2 text-gray-600 dark:text-gray-400">{"Welcome back, nice to see you again!"}</p>
            if let Some(error) = &user.error {
                <p class="mt-4 text-sm text-red-600 dark:text-red-400">{ error.clone() }</p>
            }
        </div>
    }
}
