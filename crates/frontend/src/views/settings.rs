//! User settings: profile, password, appearance and account deletion

use super::validation;
use crate::app::AppRoute;
use crate::auth::{use_current_user, use_session};
use crate::components::{LoadingSpinner, TextField, ThemeToggle};
use crate::theme::use_color_mode;
use fastadmin_http::types::{UpdatePassword, UserUpdateMe};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

const TABS: [(&str, &str); 4] = [
    ("my-profile", "My profile"),
    ("password", "Password"),
    ("appearance", "Appearance"),
    ("danger-zone", "Danger zone"),
];

#[derive(Properties, PartialEq)]
pub struct SettingsPageProps {
    pub tab: Option<AttrValue>,
}

#[function_component(SettingsPage)]
pub fn settings_page(props: &SettingsPageProps) -> Html {
    let user = use_current_user();
    let active = props.tab.as_deref().unwrap_or(TABS[0].0);
    // Superusers manage their account from the admin page.
    let is_superuser = user.data.as_ref().is_some_and(|user| user.is_superuser);

    let body = match active {
        "password" => html! { <ChangePassword /> },
        "appearance" => html! { <Appearance /> },
        "danger-zone" if !is_superuser => html! { <DeleteAccount /> },
        _ => html! { <Profile /> },
    };

    html! {
        <div>
            <h1 class="text-2xl font-bold mb-6 text-gray-900 dark:text-white">{"User Settings"}</h1>
            <div class="flex gap-4 mb-6 border-b border-gray-200 dark:border-gray-700">
                { for TABS.iter()
                    .filter(|(tab, _)| *tab != "danger-zone" || !is_superuser)
                    .map(|(tab, label)| {
                        let classes = if *tab == active {
                            classes!("pb-2", "border-b-2", "border-blue-600", "text-blue-600", "dark:text-blue-400")
                        } else {
                            classes!("pb-2", "text-gray-600", "dark:text-gray-400")
                        };
                        html! {
                            <Link<AppRoute> to={AppRoute::SettingsTab { tab: (*tab).to_string() }} {classes}>
                                { *label }
                            </Link<AppRoute>>
                        }
                    }) }
            </div>
            { body }
        </div>
    }
}

#[function_component(Profile)]
fn profile() -> Html {
    let context = use_session();
    let user = use_current_user();
    let editing = use_state(|| false);
    let full_name = use_state(String::new);
    let email = use_state(String::new);
    let submitted = use_state(|| false);

    let Some(current) = user.data.clone() else {
        return html! { <LoadingSpinner /> };
    };

    let start = {
        let editing = editing.clone();
        let full_name = full_name.clone();
        let email = email.clone();
        let current = current.clone();
        Callback::from(move |_: MouseEvent| {
            full_name.set(current.full_name.clone().unwrap_or_default());
            email.set(current.email.clone());
            editing.set(true);
        })
    };
    let cancel = {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| editing.set(false))
    };

    if !*editing {
        return html! {
            <div>
                <h2 class="text-lg font-medium mb-4 text-gray-900 dark:text-white">{"User Information"}</h2>
                <p class="mb-2"><span class="text-gray-500">{"Full name: "}</span>{ current.full_name.clone().unwrap_or_else(|| "N/A".to_string()) }</p>
                <p class="mb-4"><span class="text-gray-500">{"Email: "}</span>{ current.email.clone() }</p>
                <button onclick={start} class="py-2 px-4 rounded-md text-white bg-blue-600 hover:bg-blue-700">{"Edit"}</button>
            </div>
        };
    }

    let set = |field: &UseStateHandle<String>| {
        let field = field.clone();
        Callback::from(move |value: String| field.set(value))
    };
    let full_name_error = validation::full_name(&full_name);
    let email_error = validation::email(&email);

    let onsubmit = {
        let session = context.session.clone();
        let body = UserUpdateMe {
            full_name: validation::optional(&full_name),
            email: Some(email.trim().to_string()),
        };
        let editing = editing.clone();
        let submitted = submitted.clone();
        let valid = full_name_error.is_none() && email_error.is_none();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submitted.set(true);
            if !valid {
                return;
            }
            let session = session.clone();
            let body = body.clone();
            let editing = editing.clone();
            spawn_local(async move {
                if session.update_profile(body).await.is_some() {
                    editing.set(false);
                }
            });
        })
    };

    let shown = |error: Option<&'static str>| error.filter(|_| *submitted).map(AttrValue::Static);

    html! {
        <form {onsubmit} novalidate=true>
            <h2 class="text-lg font-medium mb-4 text-gray-900 dark:text-white">{"User Information"}</h2>
            <TextField label="Full name" value={(*full_name).clone()} oninput={set(&full_name)} error={shown(full_name_error)} />
            <TextField label="Email" input_type="email" value={(*email).clone()} oninput={set(&email)} required=true error={shown(email_error)} />
            <div class="space-x-2">
                <button type="submit" class="py-2 px-4 rounded-md text-white bg-blue-600 hover:bg-blue-700">{"Save"}</button>
                <button type="button" onclick={cancel}>{"Cancel"}</button>
            </div>
        </form>
    }
}

#[function_component(ChangePassword)]
fn change_password() -> Html {
    let context = use_session();
    let current = use_state(String::new);
    let new_password = use_state(String::new);
    let confirm = use_state(String::new);
    let submitted = use_state(|| false);

    let set = |field: &UseStateHandle<String>| {
        let field = field.clone();
        Callback::from(move |value: String| field.set(value))
    };
    let current_error = validation::password(&current);
    let new_error = validation::password(&new_password);
    let confirm_error = validation::confirm_password(&new_password, &confirm);

    let onsubmit = {
        let session = context.session.clone();
        let body = UpdatePassword {
            current_password: (*current).clone(),
            new_password: (*new_password).clone(),
        };
        let fields = [current.clone(), new_password.clone(), confirm.clone()];
        let submitted = submitted.clone();
        let valid = current_error.is_none() && new_error.is_none() && confirm_error.is_none();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submitted.set(true);
            if !valid {
                return;
            }
            let session = session.clone();
            let body = body.clone();
            let fields = fields.clone();
            let submitted = submitted.clone();
            spawn_local(async move {
                if session.update_password(body).await {
                    for field in fields {
                        field.set(String::new());
                    }
                    submitted.set(false);
                }
            });
        })
    };

    let shown = |error: Option<&'static str>| error.filter(|_| *submitted).map(AttrValue::Static);

    html! {
        <form {onsubmit} novalidate=true>
            <h2 class="text-lg font-medium mb-4 text-gray-900 dark:text-white">{"Change Password"}</h2>
            <TextField label="Current Password" input_type="password" value={(*current).clone()} oninput={set(&current)} required=true error={shown(current_error)} />
            <TextField label="Set Password" input_type="password" value={(*new_password).clone()} oninput={set(&new_password)} required=true error={shown(new_error)} />
            <TextField label="Confirm Password" input_type="password" value={(*confirm).clone()} oninput={set(&confirm)} required=true error={shown(confirm_error)} />
            <button type="submit" class="py-2 px-4 rounded-md text-white bg-blue-600 hover:bg-blue-700">{"Save"}</button>
        </form>
    }
}

#[function_component(Appearance)]
fn appearance() -> Html {
    let mode = use_color_mode();

    html! {
        <div>
            <h2 class="text-lg font-medium mb-4 text-gray-900 dark:text-white">{"Appearance"}</h2>
            <div class="flex items-center gap-4">
                <span class="text-gray-600 dark:text-gray-400">
                    { if mode.is_dark() { "Dark mode" } else { "Light mode" } }
                </span>
                <ThemeToggle />
            </div>
        </div>
    }
}

#[function_component(DeleteAccount)]
fn delete_account() -> Html {
    let context = use_session();
    let confirming = use_state(|| false);

    let ask = {
        let confirming = confirming.clone();
        Callback::from(move |_: MouseEvent| confirming.set(true))
    };
    let cancel = {
        let confirming = confirming.clone();
        Callback::from(move |_: MouseEvent| confirming.set(false))
    };
    let confirm = {
        let session = context.session.clone();
        Callback::from(move |_: MouseEvent| {
            let session = session.clone();
            spawn_local(async move {
                session.delete_account().await;
            });
        })
    };

    html! {
        <div>
            <h2 class="text-lg font-medium mb-2 text-gray-900 dark:text-white">{"Delete Account"}</h2>
            <p class="mb-4 text-gray-600 dark:text-gray-400">
                {"Permanently delete your data and everything associated with your account."}
            </p>
            if *confirming {
                <p class="mb-4 text-sm">
                    {"All your account data will be "}<strong>{"permanently deleted."}</strong>
                    {" If you are sure, please click "}<strong>{"\"Confirm\""}</strong>{" to proceed. This action cannot be undone."}
                </p>
                <div class="space-x-2">
                    <button onclick={confirm} class="py-2 px-4 rounded-md text-white bg-red-600 hover:bg-red-700">{"Confirm"}</button>
                    <button onclick={cancel}>{"Cancel"}</button>
                </div>
            } else {
                <button onclick={ask} class="py-2 px-4 rounded-md text-white bg-red-600 hover:bg-red-700">{"Delete"}</button>
            }
        </div>
    }
}
