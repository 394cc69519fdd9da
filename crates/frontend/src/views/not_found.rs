use crate::app::AppRoute;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <div class="text-center">
            <h1 class="text-6xl font-bold text-blue-600 dark:text-blue-400">{"404"}</h1>
            <p class="mt-4 text-gray-600 dark:text-gray-400">{"Oops! Page not found."}</p>
            <Link<AppRoute> to={AppRoute::Home} classes={classes!("mt-6", "inline-block", "text-blue-600", "dark:text-blue-400")}>
                {"Go back"}
            </Link<AppRoute>>
        </div>
    }
}
