//! Item listing and editing

use super::validation;
use crate::auth::use_session;
use crate::components::{LoadingSpinner, TextField};
use crate::hooks::use_session_query;
use fastadmin_http::types::{ItemCreate, ItemPublic, ItemUpdate, Paging};
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

const PER_PAGE: u32 = 5;

#[function_component(ItemsPage)]
pub fn items_page() -> Html {
    let context = use_session();
    let page = use_state(|| 0u32);
    let editing = use_state(|| None::<Uuid>);
    let items = use_session_query(*page, |session, page| async move {
        session.items(Paging::page(page, PER_PAGE)).await
    });

    let on_delete = {
        let session = context.session.clone();
        Callback::from(move |id: Uuid| {
            let session = session.clone();
            spawn_local(async move {
                session.delete_item(id).await;
            });
        })
    };
    let on_edit = {
        let editing = editing.clone();
        Callback::from(move |id: Option<Uuid>| editing.set(id))
    };

    let count = items.data.as_ref().map_or(0, |items| items.count);
    let pages = u32::try_from(count.div_ceil(u64::from(PER_PAGE))).unwrap_or(u32::MAX);
    let previous = {
        let page = page.clone();
        Callback::from(move |_: MouseEvent| page.set(page.saturating_sub(1)))
    };
    let next = {
        let page = page.clone();
        Callback::from(move |_: MouseEvent| page.set(*page + 1))
    };

    html! {
        <div>
            <h1 class="text-2xl font-bold mb-6 text-gray-900 dark:text-white">{"Items Management"}</h1>
            <AddItem />
            if items.loading && items.data.is_none() {
                <LoadingSpinner />
            }
            if let Some(error) = &items.error {
                <p class="text-sm text-red-600 dark:text-red-400">{ error.clone() }</p>
            }
            if let Some(listing) = &items.data {
                if listing.data.is_empty() {
                    <p class="text-gray-600 dark:text-gray-400">{"No item found."}</p>
                } else {
                    <table class="w-full text-left">
                        <thead>
                            <tr class="text-sm text-gray-500 dark:text-gray-400">
                                <th>{"Title"}</th>
                                <th>{"Description"}</th>
                                <th>{"Actions"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            { for listing.data.iter().map(|item| html! {
                                <ItemRow
                                    key={item.id.to_string()}
                                    item={item.clone()}
                                    editing={*editing == Some(item.id)}
                                    on_edit={on_edit.clone()}
                                    on_delete={on_delete.clone()}
                                />
                            }) }
                        </tbody>
                    </table>
                }
                <div class="flex justify-end items-center gap-4 mt-4 text-sm">
                    <button onclick={previous} disabled={*page == 0}>{"Previous"}</button>
                    <span>{ format!("Page {} of {}", *page + 1, pages.max(1)) }</span>
                    <button onclick={next} disabled={*page + 1 >= pages}>{"Next"}</button>
                </div>
            }
        </div>
    }
}

#[function_component(AddItem)]
fn add_item() -> Html {
    let context = use_session();
    let title = use_state(String::new);
    let description = use_state(String::new);
    let submitted = use_state(|| false);

    let set = |field: &UseStateHandle<String>| {
        let field = field.clone();
        Callback::from(move |value: String| field.set(value))
    };
    let title_error = validation::title(&title);

    let onsubmit = {
        let session = context.session.clone();
        let title = title.clone();
        let description = description.clone();
        let submitted = submitted.clone();
        let valid = title_error.is_none();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submitted.set(true);
            if !valid {
                return;
            }
            let session = session.clone();
            let body = ItemCreate {
                title: title.trim().to_string(),
                description: validation::optional(&description),
            };
            let title = title.clone();
            let description = description.clone();
            let submitted = submitted.clone();
            spawn_local(async move {
                if session.create_item(body).await.is_some() {
                    title.set(String::new());
                    description.set(String::new());
                    submitted.set(false);
                }
            });
        })
    };

    html! {
        <form {onsubmit} novalidate=true class="mb-8 p-4 rounded-md bg-white dark:bg-gray-800 shadow">
            <h2 class="text-lg font-medium mb-4 text-gray-900 dark:text-white">{"Add Item"}</h2>
            <TextField label="Title" value={(*title).clone()} oninput={set(&title)} required=true error={title_error.filter(|_| *submitted).map(AttrValue::Static)} />
            <TextField label="Description" value={(*description).clone()} oninput={set(&description)} />
            <button type="submit" class="py-2 px-4 rounded-md text-white bg-blue-600 hover:bg-blue-700">{"Save"}</button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
struct ItemRowProps {
    item: ItemPublic,
    editing: bool,
    on_edit: Callback<Option<Uuid>>,
    on_delete: Callback<Uuid>,
}

#[function_component(ItemRow)]
fn item_row(props: &ItemRowProps) -> Html {
    let context = use_session();
    let title = use_state(|| props.item.title.clone());
    let description = use_state(|| props.item.description.clone().unwrap_or_default());

    let id = props.item.id;
    let start_edit = {
        let on_edit = props.on_edit.clone();
        Callback::from(move |_: MouseEvent| on_edit.emit(Some(id)))
    };
    let cancel = {
        let on_edit = props.on_edit.clone();
        Callback::from(move |_: MouseEvent| on_edit.emit(None))
    };
    let delete = {
        let on_delete = props.on_delete.clone();
        Callback::from(move |_: MouseEvent| on_delete.emit(id))
    };
    let save = {
        let session = context.session.clone();
        let on_edit = props.on_edit.clone();
        let body = ItemUpdate {
            title: validation::optional(&title),
            description: Some((*description).clone()),
        };
        Callback::from(move |_: MouseEvent| {
            let session = session.clone();
            let on_edit = on_edit.clone();
            let body = body.clone();
            spawn_local(async move {
                if session.update_item(id, body).await.is_some() {
                    on_edit.emit(None);
                }
            });
        })
    };

    if props.editing {
        let set = |field: &UseStateHandle<String>| {
            let field = field.clone();
            Callback::from(move |value: String| field.set(value))
        };
        return html! {
            <tr>
                <td><TextField label="Title" value={(*title).clone()} oninput={set(&title)} /></td>
                <td><TextField label="Description" value={(*description).clone()} oninput={set(&description)} /></td>
                <td class="space-x-2">
                    <button onclick={save} class="text-blue-600 dark:text-blue-400">{"Save"}</button>
                    <button onclick={cancel}>{"Cancel"}</button>
                </td>
            </tr>
        };
    }

    html! {
        <tr class="border-t border-gray-200 dark:border-gray-700">
            <td class="py-2">{ props.item.title.clone() }</td>
            <td class="py-2 text-gray-600 dark:text-gray-400">
                { props.item.description.clone().unwrap_or_else(|| "N/A".to_string()) }
            </td>
            <td class="py-2 space-x-2">
                <button onclick={start_edit} class="text-blue-600 dark:text-blue-400">{"Edit Item"}</button>
                <button onclick={delete} class="text-red-600 dark:text-red-400">{"Delete Item"}</button>
            </td>
        </tr>
    }
}
