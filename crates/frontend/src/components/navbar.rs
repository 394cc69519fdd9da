//! Top navigation for authenticated pages

use crate::app::AppRoute;
use crate::auth::{use_current_user, use_session};
use crate::components::ThemeToggle;
use crate::hooks::use_display;
use fastadmin_session::DisplayOptions;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(Navbar)]
pub fn navbar() -> Html {
    let context = use_session();
    let user = use_current_user();
    let display = use_display(DisplayOptions {
        name: Some("navbar".into()),
        ..DisplayOptions::default()
    });

    let on_logout = {
        let session = context.session.clone();
        Callback::from(move |_: MouseEvent| session.logout())
    };

    let is_superuser = user.data.as_ref().is_some_and(|user| user.is_superuser);
    let greeting = user
        .data
        .as_ref()
        .map(|user| user.display_name().to_string());
    let link = "text-sm text-gray-600 dark:text-gray-400 hover:text-gray-900 dark:hover:text-gray-100";

    html! {
        <nav class={classes!("bg-white/80", "dark:bg-gray-900/80", "border-b", "border-gray-200", "dark:border-gray-700", display.display.display_classes())}>
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 flex justify-between h-16 items-center">
                <div class="flex items-center gap-6">
                    <Link<AppRoute> to={AppRoute::Home} classes={classes!("text-xl", "font-bold", "text-blue-600", "dark:text-blue-400")}>
                        {"FastAdmin"}
                    </Link<AppRoute>>
                    if !display.display.mobile() {
                        <Link<AppRoute> to={AppRoute::Items} classes={classes!(link)}>{"Items"}</Link<AppRoute>>
                        if is_superuser {
                            <Link<AppRoute> to={AppRoute::Admin} classes={classes!(link)}>{"Admin"}</Link<AppRoute>>
                        }
                        <Link<AppRoute> to={AppRoute::Settings} classes={classes!(link)}>{"User Settings"}</Link<AppRoute>>
                    }
                </div>
                <div class="flex items-center gap-4">
                    if let Some(name) = greeting {
                        if display.display.sm_and_up() {
                            <span class="text-sm text-gray-600 dark:text-gray-400">{ name }</span>
                        }
                    }
                    <button onclick={on_logout} class={link}>{"Log out"}</button>
                    <ThemeToggle />
                </div>
            </div>
            if display.display.mobile() {
                <div class="flex gap-4 px-4 pb-3">
                    <Link<AppRoute> to={AppRoute::Items} classes={classes!(link)}>{"Items"}</Link<AppRoute>>
                    if is_superuser {
                        <Link<AppRoute> to={AppRoute::Admin} classes={classes!(link)}>{"Admin"}</Link<AppRoute>>
                    }
                    <Link<AppRoute> to={AppRoute::Settings} classes={classes!(link)}>{"Settings"}</Link<AppRoute>>
                </div>
            }
        </nav>
    }
}
