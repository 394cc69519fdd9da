use super::validation;
use crate::app::AppRoute;
use crate::auth::use_session;
use crate::components::TextField;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(RecoverPasswordPage)]
pub fn recover_password_page() -> Html {
    let context = use_session();
    let email = use_state(String::new);
    let submitted = use_state(|| false);
    let submitting = use_state(|| false);

    let oninput = {
        let email = email.clone();
        Callback::from(move |value: String| email.set(value))
    };
    let email_error = validation::email(&email);

    let onsubmit = {
        let session = context.session.clone();
        let email = email.clone();
        let submitted = submitted.clone();
        let submitting = submitting.clone();
        let valid = email_error.is_none();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submitted.set(true);
            if !valid || *submitting {
                return;
            }
            let session = session.clone();
            let address = email.trim().to_string();
            let email = email.clone();
            let submitting = submitting.clone();
            submitting.set(true);
            spawn_local(async move {
                if session.recover_password(&address).await.is_some() {
                    email.set(String::new());
                }
                submitting.set(false);
            });
        })
    };

    html! {
        <>
            <h1 class="text-2xl font-bold mb-2 text-gray-900 dark:text-white">{"Password Recovery"}</h1>
            <p class="mb-6 text-sm text-gray-600 dark:text-gray-400">
                {"A password recovery email will be sent to the registered account."}
            </p>
            <form {onsubmit} novalidate=true>
                <TextField
                    label="Email"
                    input_type="email"
                    value={(*email).clone()}
                    {oninput}
                    required=true
                    error={email_error.filter(|_| *submitted).map(AttrValue::Static)}
                />
                <button type="submit" disabled={*submitting} class="w-full py-2 px-4 rounded-md text-white bg-blue-600 hover:bg-blue-700 disabled:opacity-50">
                    {"Continue"}
                </button>
            </form>
            <p class="mt-6 text-center text-sm">
                <Link<AppRoute> to={AppRoute::Login} classes={classes!("text-blue-600", "dark:text-blue-400")}>{"Back to Log In"}</Link<AppRoute>>
            </p>
        </>
    }
}
