//! User administration (superusers only)

use super::validation;
use crate::auth::{use_current_user, use_session};
use crate::components::{Checkbox, LoadingSpinner, TextField};
use crate::hooks::use_session_query;
use fastadmin_http::types::{Paging, UserCreate, UserPublic, UserUpdate};
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

const PER_PAGE: u32 = 5;

#[function_component(AdminPage)]
pub fn admin_page() -> Html {
    let context = use_session();
    let me = use_current_user();
    let page = use_state(|| 0u32);
    let users = use_session_query(*page, |session, page| async move {
        session.users(Paging::page(page, PER_PAGE)).await
    });

    let on_update = {
        let session = context.session.clone();
        Callback::from(move |(id, body): (Uuid, UserUpdate)| {
            let session = session.clone();
            spawn_local(async move {
                session.update_user(id, body).await;
            });
        })
    };
    let on_delete = {
        let session = context.session.clone();
        Callback::from(move |id: Uuid| {
            let session = session.clone();
            spawn_local(async move {
                session.delete_user(id).await;
            });
        })
    };

    let count = users.data.as_ref().map_or(0, |users| users.count);
    let pages = u32::try_from(count.div_ceil(u64::from(PER_PAGE))).unwrap_or(u32::MAX);
    let previous = {
        let page = page.clone();
        Callback::from(move |_: MouseEvent| page.set(page.saturating_sub(1)))
    };
    let next = {
        let page = page.clone();
        Callback::from(move |_: MouseEvent| page.set(*page + 1))
    };
    let my_id = me.data.as_ref().map(|user| user.id);

    html! {
        <div>
            <h1 class="text-2xl font-bold mb-6 text-gray-900 dark:text-white">{"Users Management"}</h1>
            if me.data.as_ref().is_some_and(|user| user.is_superuser) {
                <AddUser />
            }
            if users.loading && users.data.is_none() {
                <LoadingSpinner />
            }
            if let Some(error) = &users.error {
                <p class="text-sm text-red-600 dark:text-red-400">{ error.clone() }</p>
            }
            if let Some(listing) = &users.data {
                <table class="w-full text-left">
                    <thead>
                        <tr class="text-sm text-gray-500 dark:text-gray-400">
                            <th>{"Full name"}</th>
                            <th>{"Email"}</th>
                            <th>{"Role"}</th>
                            <th>{"Status"}</th>
                            <th>{"Actions"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for listing.data.iter().map(|user| html! {
                            <UserRow
                                key={user.id.to_string()}
                                user={user.clone()}
                                is_me={my_id == Some(user.id)}
                                on_update={on_update.clone()}
                                on_delete={on_delete.clone()}
                            />
                        }) }
                    </tbody>
                </table>
                <div class="flex justify-end items-center gap-4 mt-4 text-sm">
                    <button onclick={previous} disabled={*page == 0}>{"Previous"}</button>
                    <span>{ format!("Page {} of {}", *page + 1, pages.max(1)) }</span>
                    <button onclick={next} disabled={*page + 1 >= pages}>{"Next"}</button>
                </div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct UserRowProps {
    user: UserPublic,
    is_me: bool,
    on_update: Callback<(Uuid, UserUpdate)>,
    on_delete: Callback<Uuid>,
}

#[function_component(UserRow)]
fn user_row(props: &UserRowProps) -> Html {
    let user = &props.user;
    let id = user.id;

    let toggle_active = {
        let on_update = props.on_update.clone();
        let is_active = user.is_active;
        Callback::from(move |_: MouseEvent| {
            on_update.emit((
                id,
                UserUpdate {
                    is_active: Some(!is_active),
                    ..UserUpdate::default()
                },
            ));
        })
    };
    let toggle_superuser = {
        let on_update = props.on_update.clone();
        let is_superuser = user.is_superuser;
        Callback::from(move |_: MouseEvent| {
            on_update.emit((
                id,
                UserUpdate {
                    is_superuser: Some(!is_superuser),
                    ..UserUpdate::default()
                },
            ));
        })
    };
    let delete = {
        let on_delete = props.on_delete.clone();
        Callback::from(move |_: MouseEvent| on_delete.emit(id))
    };

    html! {
        <tr class="border-t border-gray-200 dark:border-gray-700">
            <td class="py-2">
                { user.full_name.clone().unwrap_or_else(|| "N/A".to_string()) }
                if props.is_me {
                    <span class="ml-2 text-xs px-2 py-0.5 rounded bg-blue-100 dark:bg-blue-900">{"You"}</span>
                }
            </td>
            <td class="py-2">{ user.email.clone() }</td>
            <td class="py-2">{ if user.is_superuser { "Superuser" } else { "User" } }</td>
            <td class="py-2">{ if user.is_active { "Active" } else { "Inactive" } }</td>
            <td class="py-2 space-x-2 text-sm">
                <button onclick={toggle_active} disabled={props.is_me}>
                    { if user.is_active { "Deactivate" } else { "Activate" } }
                </button>
                <button onclick={toggle_superuser} disabled={props.is_me}>
                    { if user.is_superuser { "Revoke admin" } else { "Make admin" } }
                </button>
                <button onclick={delete} disabled={props.is_me} class="text-red-600 dark:text-red-400">{"Delete User"}</button>
            </td>
        </tr>
    }
}

#[function_component(AddUser)]
fn add_user() -> Html {
    let context = use_session();
    let email = use_state(String::new);
    let full_name = use_state(String::new);
    let password = use_state(String::new);
    let confirm = use_state(String::new);
    let is_superuser = use_state(|| false);
    let is_active = use_state(|| false);
    let submitted = use_state(|| false);

    let set = |field: &UseStateHandle<String>| {
        let field = field.clone();
        Callback::from(move |value: String| field.set(value))
    };
    let set_flag = |field: &UseStateHandle<bool>| {
        let field = field.clone();
        Callback::from(move |value: bool| field.set(value))
    };

    let email_error = validation::email(&email);
    let full_name_error = validation::full_name(&full_name);
    let password_error = validation::password(&password);
    let confirm_error = validation::confirm_password(&password, &confirm);
    let valid = email_error.is_none()
        && full_name_error.is_none()
        && password_error.is_none()
        && confirm_error.is_none();

    let onsubmit = {
        let session = context.session.clone();
        let body = UserCreate {
            email: email.trim().to_string(),
            password: (*password).clone(),
            is_active: *is_active,
            is_superuser: *is_superuser,
            full_name: validation::optional(&full_name),
        };
        let fields = [email.clone(), full_name.clone(), password.clone(), confirm.clone()];
        let submitted = submitted.clone();
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
                if session.create_user(body).await.is_some() {
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
        <form {onsubmit} novalidate=true class="mb-8 p-4 rounded-md bg-white dark:bg-gray-800 shadow">
            <h2 class="text-lg font-medium mb-4 text-gray-900 dark:text-white">{"Add User"}</h2>
            <TextField label="Email" input_type="email" value={(*email).clone()} oninput={set(&email)} required=true error={shown(email_error)} />
            <TextField label="Full Name" value={(*full_name).clone()} oninput={set(&full_name)} error={shown(full_name_error)} />
            <TextField label="Set Password" input_type="password" value={(*password).clone()} oninput={set(&password)} required=true error={shown(password_error)} />
            <TextField label="Confirm Password" input_type="password" value={(*confirm).clone()} oninput={set(&confirm)} required=true error={shown(confirm_error)} />
            <Checkbox label="Is superuser?" checked={*is_superuser} onchange={set_flag(&is_superuser)} />
            <Checkbox label="Is active?" checked={*is_active} onchange={set_flag(&is_active)} />
            <div>
                <button type="submit" class="py-2 px-4 rounded-md text-white bg-blue-600 hover:bg-blue-700">{"Save"}</button>
            </div>
        </form>
    }
}
